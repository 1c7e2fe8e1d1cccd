//! # Common Types and Traits
use core::{
    borrow::Borrow,
    fmt::{Debug, Display},
    hash::Hash,
    ops::AddAssign,
};

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

/// A type that can be used as a vocabulary id.
///
/// These are constrained to be unsigned primitive integers;
/// such that the largest id in a vocabulary is less than `T::max()`.
pub trait TokenType:
    'static
    + PrimInt
    + FromPrimitive
    + ToPrimitive
    + Unsigned
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
{
}

impl<T> TokenType for T where
    T: 'static
        + PrimInt
        + FromPrimitive
        + ToPrimitive
        + Unsigned
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
{
}

/// A type that can be used as an occurrence count.
pub trait CountType:
    'static
    + PrimInt
    + FromPrimitive
    + ToPrimitive
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
    + AddAssign
{
}

impl<T> CountType for T where
    T: 'static
        + PrimInt
        + FromPrimitive
        + ToPrimitive
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
        + AddAssign
{
}

/// A type that can be used as a string key while counting tokens.
pub trait StringChunkType:
    for<'a> From<&'a str> + AsRef<str> + Borrow<str> + Debug + Clone + Send + Sync + Eq + Hash + Ord
{
}

impl<T> StringChunkType for T where
    T: for<'a> From<&'a str>
        + AsRef<str>
        + Borrow<str>
        + Debug
        + Clone
        + Send
        + Sync
        + Eq
        + Hash
        + Ord
{
}

/// Convert a token to a `usize` index.
///
/// Every id handed out by a [`crate::vocab::WordVocab`] fits in `usize`.
#[inline(always)]
pub fn token_index<T: TokenType>(token: T) -> usize {
    token.to_usize().unwrap_or(usize::MAX)
}

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Type Alias for hash maps in this crate.
        pub type SCHashMap<K, V> = foldhash::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> SCHashMap<K, V> {
            foldhash::HashMapExt::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> SCHashMap<K, V> {
            foldhash::HashMapExt::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type SCHashSet<V> = foldhash::HashSet<V>;

        /// Create a new hash set with the given capacity.
        pub fn hash_set_with_capacity<V>(capacity: usize) -> SCHashSet<V> {
            foldhash::HashSetExt::with_capacity(capacity)
        }
    } else {
        /// Type Alias for hash maps in this crate.
        pub type SCHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> SCHashMap<K, V> {
            SCHashMap::new()
        }

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> SCHashMap<K, V> {
            SCHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type SCHashSet<V> = std::collections::HashSet<V>;

        /// Create a new hash set with the given capacity.
        pub fn hash_set_with_capacity<V>(capacity: usize) -> SCHashSet<V> {
            SCHashSet::with_capacity(capacity)
        }
    }
}

#[cfg(test)]
mod tests {
    use core::marker::PhantomData;

    use super::*;

    #[test]
    fn test_common_token_types() {
        struct IsToken<T: TokenType>(PhantomData<T>);

        let _: IsToken<u16>;
        let _: IsToken<u32>;
        let _: IsToken<u64>;
        let _: IsToken<usize>;
    }

    #[test]
    fn test_common_count_types() {
        struct IsCount<T: CountType>(PhantomData<T>);

        let _: IsCount<u32>;
        let _: IsCount<u64>;
        let _: IsCount<usize>;
    }

    #[test]
    fn test_common_string_chunk_types() {
        struct IsStringChunk<T: StringChunkType>(PhantomData<T>);

        let _: IsStringChunk<String>;
        let _: IsStringChunk<compact_str::CompactString>;
    }

    #[test]
    fn test_token_index() {
        assert_eq!(token_index(7u16), 7);
        assert_eq!(token_index(123_456u32), 123_456);
    }

    #[test]
    fn test_hash_aliases() {
        let mut map: SCHashMap<u32, &str> = hash_map_with_capacity(4);
        map.insert(1, "a");
        assert_eq!(map.get(&1), Some(&"a"));

        let empty: SCHashMap<u32, u32> = hash_map_new();
        assert!(empty.is_empty());

        let mut set: SCHashSet<u32> = hash_set_with_capacity(4);
        assert!(set.insert(3));
        assert!(!set.insert(3));
    }
}
