//! # Word Vocabulary

use compact_str::CompactString;

use crate::{
    errors::{SCResult, SkipchipperError},
    types::{SCHashMap, TokenType, hash_map_with_capacity, token_index},
};

/// A bidirectional ``{token <-> id}`` mapping over dense ids ``[0, len)``.
///
/// Built by [`super::VocabBuilder`]; ids are ranked by descending frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct WordVocab<T: TokenType> {
    id_to_token: Vec<CompactString>,
    token_to_id: SCHashMap<CompactString, T>,
}

impl<T: TokenType> WordVocab<T> {
    /// Build a vocabulary from tokens listed in id order.
    ///
    /// ## Arguments
    /// * `tokens` - the tokens; the first gets id ``0``.
    ///
    /// ## Returns
    /// The vocabulary, or [`SkipchipperError::InvalidConfig`] when a token
    /// repeats or the vocabulary does not fit in `T`.
    pub fn from_ranked_tokens<I>(tokens: I) -> SCResult<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let id_to_token: Vec<CompactString> = tokens
            .into_iter()
            .map(|t| CompactString::from(t.as_ref()))
            .collect();

        if let Some(last) = id_to_token.len().checked_sub(1)
            && T::from_usize(last).is_none()
        {
            return Err(SkipchipperError::invalid_config(
                "vocab_size",
                format!(
                    "({}) exceeds token type capacity ({})",
                    id_to_token.len(),
                    T::max_value()
                ),
            ));
        }

        let mut token_to_id = hash_map_with_capacity(id_to_token.len());
        for (idx, token) in id_to_token.iter().enumerate() {
            let id = T::from_usize(idx).unwrap_or_else(T::max_value);
            if token_to_id.insert(token.clone(), id).is_some() {
                return Err(SkipchipperError::invalid_config(
                    "tokens",
                    format!("contains duplicate token {token:?}"),
                ));
            }
        }

        Ok(Self {
            id_to_token,
            token_to_id,
        })
    }

    /// The number of ids in the vocabulary.
    pub fn len(&self) -> usize {
        self.id_to_token.len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.id_to_token.is_empty()
    }

    /// Look up the id of `token`.
    pub fn token_to_id(
        &self,
        token: &str,
    ) -> Option<T> {
        self.token_to_id.get(token).copied()
    }

    /// Look up the token for `id`.
    pub fn id_to_token(
        &self,
        id: T,
    ) -> Option<&str> {
        self.id_to_token.get(token_index(id)).map(|t| t.as_str())
    }

    /// Iterate over the tokens in id order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.id_to_token.iter().map(|t| t.as_str())
    }

    /// Iterate over ``(id, token)`` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (T, &str)> {
        self.id_to_token
            .iter()
            .enumerate()
            .filter_map(|(idx, t)| T::from_usize(idx).map(|id| (id, t.as_str())))
    }

    /// Translate tokens into a token stream.
    ///
    /// ## Returns
    /// The ids, or [`SkipchipperError::UnknownToken`] for the first token
    /// not in the vocabulary.
    pub fn encode<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> SCResult<Vec<T>> {
        tokens
            .iter()
            .map(|t| {
                let t = t.as_ref();
                self.token_to_id(t)
                    .ok_or_else(|| SkipchipperError::UnknownToken(t.to_string()))
            })
            .collect()
    }

    /// Translate tokens into a token stream, skipping unknown tokens.
    pub fn encode_lossy<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> Vec<T> {
        tokens
            .iter()
            .filter_map(|t| self.token_to_id(t.as_ref()))
            .collect()
    }

    /// Translate ids back to tokens; ids outside the vocabulary are skipped.
    pub fn decode(
        &self,
        ids: &[T],
    ) -> Vec<&str> {
        ids.iter().filter_map(|&id| self.id_to_token(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ranked_tokens() {
        let vocab: WordVocab<u32> = WordVocab::from_ranked_tokens(["the", "of", "and"]).unwrap();

        assert_eq!(vocab.len(), 3);
        assert!(!vocab.is_empty());
        assert_eq!(vocab.token_to_id("of"), Some(1));
        assert_eq!(vocab.token_to_id("zebra"), None);
        assert_eq!(vocab.id_to_token(2), Some("and"));
        assert_eq!(vocab.id_to_token(3), None);

        assert_eq!(vocab.tokens().collect::<Vec<_>>(), vec!["the", "of", "and"]);
        assert_eq!(
            vocab.iter().collect::<Vec<_>>(),
            vec![(0, "the"), (1, "of"), (2, "and")]
        );
    }

    #[test]
    fn test_duplicate_tokens() {
        let err = WordVocab::<u32>::from_ranked_tokens(["a", "b", "a"]).unwrap_err();
        assert!(matches!(
            err,
            SkipchipperError::InvalidConfig { name: "tokens", .. }
        ));
    }

    #[test]
    fn test_capacity_overflow() {
        let tokens: Vec<String> = (0..300).map(|i| format!("t{i}")).collect();
        let err = WordVocab::<u8>::from_ranked_tokens(&tokens).unwrap_err();
        assert!(matches!(
            err,
            SkipchipperError::InvalidConfig {
                name: "vocab_size",
                ..
            }
        ));

        let tokens: Vec<String> = (0..256).map(|i| format!("t{i}")).collect();
        let vocab = WordVocab::<u8>::from_ranked_tokens(&tokens).unwrap();
        assert_eq!(vocab.token_to_id("t255"), Some(255));
    }

    #[test]
    fn test_encode_decode() {
        let vocab: WordVocab<u16> = WordVocab::from_ranked_tokens(["a", "b", "c"]).unwrap();

        let stream = vocab.encode(&["c", "a", "a", "b"]).unwrap();
        assert_eq!(stream, vec![2, 0, 0, 1]);
        assert_eq!(vocab.decode(&stream), vec!["c", "a", "a", "b"]);
        assert_eq!(vocab.decode(&[0, 9]), vec!["a"]);

        let err = vocab.encode(&["a", "zebra"]).unwrap_err();
        assert!(matches!(err, SkipchipperError::UnknownToken(t) if t == "zebra"));

        assert_eq!(vocab.encode_lossy(&["a", "zebra", "c"]), vec![0, 2]);
    }
}
