//! Corpus loading and word tokenization.

use std::io::BufRead;

use regex::Regex;
use skipchipper::{
    SCResult,
    training::{SkipGramDataset, SkipGramOptions},
    vocab::{FrequencyTable, VocabBuilder, VocabBuilderOptions, WordVocab},
};

use crate::input_output::open_reader;

/// The default word pattern: punctuation markers, or runs of word characters.
pub const DEFAULT_WORD_PATTERN: &str = r"<[A-Z_]+>|[\w']+";

/// The default upstream frequency filter: keep tokens seen more than 5 times.
pub const DEFAULT_MIN_COUNT: u64 = 6;

/// Punctuation rewritten into standalone marker tokens.
///
/// Applied in order, after lowercasing.
const PUNCTUATION_MARKERS: &[(&str, &str)] = &[
    (".", " <PERIOD> "),
    (",", " <COMMA> "),
    ("\"", " <QUOTATION_MARK> "),
    (";", " <SEMICOLON> "),
    ("!", " <EXCLAMATION_MARK> "),
    ("?", " <QUESTION_MARK> "),
    ("(", " <LEFT_PAREN> "),
    (")", " <RIGHT_PAREN> "),
    ("--", " <HYPHENS> "),
    (":", " <COLON> "),
];

/// Splits raw text into word tokens.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    pattern: Regex,
}

impl Preprocessor {
    /// Build a preprocessor for a word pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Lowercase `text`, mark punctuation, and split it into tokens.
    pub fn tokenize(
        &self,
        text: &str,
    ) -> Vec<String> {
        let mut text = text.to_lowercase();
        for (mark, marker) in PUNCTUATION_MARKERS {
            if text.contains(mark) {
                text = text.replace(mark, marker);
            }
        }

        self.pattern
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Tokenize every line of `reader`, appending to `tokens`.
    pub fn tokenize_reader<B: BufRead>(
        &self,
        reader: B,
        tokens: &mut Vec<String>,
    ) -> std::io::Result<()> {
        for line in reader.lines() {
            tokens.extend(self.tokenize(&line?));
        }
        Ok(())
    }
}

/// Corpus input arg group.
#[derive(clap::Args, Debug)]
pub struct CorpusArgs {
    /// Input text files; "-" may be used to indicate stdin.
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Word tokenization regex.
    #[arg(long, default_value = DEFAULT_WORD_PATTERN)]
    pub regex: String,

    /// Keep only tokens seen at least this many times.
    #[arg(long, default_value_t = DEFAULT_MIN_COUNT)]
    pub min_count: u64,
}

/// A tokenized, frequency-filtered corpus.
#[derive(Debug)]
pub struct Corpus {
    /// The vocabulary over the surviving tokens.
    pub vocab: WordVocab<u32>,

    /// Counts, indexed by id.
    pub freqs: FrequencyTable<u32>,

    /// The encoded corpus, with filtered tokens removed.
    pub token_stream: Vec<u32>,
}

impl Corpus {
    /// Build a corpus from raw tokens, dropping tokens seen fewer than `min_count` times.
    pub fn from_tokens(
        tokens: &[String],
        min_count: u64,
    ) -> SCResult<Self> {
        let mut builder: VocabBuilder = VocabBuilderOptions::default()
            .with_min_count(min_count)
            .init();
        builder.update_from_tokens(tokens);

        let (vocab, freqs) = builder.build()?;
        let token_stream = vocab.encode_lossy(tokens);

        Ok(Self {
            vocab,
            freqs,
            token_stream,
        })
    }

    /// Write the vocabulary as ``id\ttoken\tcount`` lines.
    pub fn write_vocab<W: std::io::Write>(
        &self,
        writer: &mut W,
    ) -> std::io::Result<()> {
        for (id, token) in self.vocab.iter() {
            writeln!(writer, "{id}\t{token}\t{}", self.freqs.count(id))?;
        }
        Ok(())
    }

    /// Subsample the corpus into a dataset.
    pub fn into_dataset<R: rand::Rng + ?Sized>(
        self,
        options: SkipGramOptions,
        rng: &mut R,
    ) -> SCResult<SkipGramDataset> {
        SkipGramDataset::from_token_stream(self.vocab, self.token_stream, options, rng)
    }
}

impl CorpusArgs {
    /// Read, tokenize and filter the input files.
    pub fn load(&self) -> Result<Corpus, Box<dyn std::error::Error>> {
        let preprocessor = Preprocessor::new(&self.regex)?;

        let mut tokens = Vec::new();
        log::info!("Reading corpus:");
        for (idx, path) in self.files.iter().enumerate() {
            log::info!("{idx}: {path}");
            preprocessor.tokenize_reader(open_reader(path)?, &mut tokens)?;
        }
        log::info!("Total words: {}", tokens.len());

        let corpus = Corpus::from_tokens(&tokens, self.min_count)?;
        log::info!(
            "Unique words: {} (min_count={}); {} words kept",
            corpus.vocab.len(),
            self.min_count,
            corpus.token_stream.len()
        );
        Ok(corpus)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempdir::TempDir;

    use super::*;

    fn words(tokens: &[String]) -> Vec<&str> {
        tokens.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_tokenize() {
        let pre = Preprocessor::new(DEFAULT_WORD_PATTERN).unwrap();

        assert_eq!(
            words(&pre.tokenize("Hello, World! (It's) -- done.")),
            vec![
                "hello",
                "<COMMA>",
                "world",
                "<EXCLAMATION_MARK>",
                "<LEFT_PAREN>",
                "it's",
                "<RIGHT_PAREN>",
                "<HYPHENS>",
                "done",
                "<PERIOD>",
            ]
        );
        assert_eq!(
            words(&pre.tokenize("\"Why?\" she asked; then: nothing")),
            vec![
                "<QUOTATION_MARK>",
                "why",
                "<QUESTION_MARK>",
                "<QUOTATION_MARK>",
                "she",
                "asked",
                "<SEMICOLON>",
                "then",
                "<COLON>",
                "nothing",
            ]
        );
        assert!(pre.tokenize("   ").is_empty());
    }

    #[test]
    fn test_bad_pattern() {
        assert!(Preprocessor::new("(").is_err());
    }

    #[test]
    fn test_corpus_min_count() {
        let tokens: Vec<String> = "a b a c a b d"
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let corpus = Corpus::from_tokens(&tokens, 2).unwrap();
        assert_eq!(corpus.vocab.tokens().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(corpus.token_stream, vec![0, 1, 0, 0, 1]);

        let mut out = Vec::new();
        corpus.write_vocab(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0\ta\t3\n1\tb\t2\n");

        assert!(Corpus::from_tokens(&tokens, 4).is_err());
    }

    #[test]
    fn test_load_files() {
        let dir = TempDir::new("skipchipper-cli").unwrap();
        let path = dir.path().join("corpus.txt");
        {
            let mut f = std::fs::File::create(&path).unwrap();
            writeln!(f, "The cat. The dog.").unwrap();
            writeln!(f, "The end.").unwrap();
        }

        let args = CorpusArgs {
            files: vec![path.to_string_lossy().to_string()],
            regex: DEFAULT_WORD_PATTERN.to_string(),
            min_count: 2,
        };
        let corpus = args.load().unwrap();

        assert_eq!(
            corpus.vocab.tokens().collect::<Vec<_>>(),
            vec!["the", "<PERIOD>"]
        );
        assert_eq!(corpus.token_stream, vec![0, 1, 0, 1, 0, 1]);
    }
}
