use core::future::Future;
use core::pin::pin;

use futures_util::future::{Either, select};
use thiserror::Error;
use wordy_protocol::WordListDocument;

use crate::*;

const BUNDLED_WORDS: &str = include_str!("../assets/words.json");

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Word source is offline")]
    Offline,
    #[error("Word source timed out")]
    TimedOut,
    #[error("Malformed word list: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Word source returned no usable words")]
    Empty,
}

pub type SourceResult<T> = core::result::Result<T, SourceError>;

/// Supplier of candidate words, awaited once when a puzzle starts.
pub trait WordSource {
    /// Up to `count` words; with `with_clues` only words that carry a clue.
    fn fetch_words(&self, count: usize, with_clues: bool) -> impl Future<Output = SourceResult<Vec<Word>>>;
}

/// Word list held in memory, usually the one bundled with the game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticWordSource {
    words: Vec<Word>,
}

impl StaticWordSource {
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// Keeps every entry that makes a valid word, skipping the rest.
    pub fn from_document(document: &WordListDocument) -> Self {
        let words = document
            .words
            .iter()
            .filter_map(|entry| match Word::from_entry(entry) {
                Ok(word) => Some(word),
                Err(err) => {
                    log::debug!("Skipping word list entry {:?}: {err}", entry.answer());
                    None
                }
            })
            .collect();
        Self { words }
    }

    pub fn from_json(input: &str) -> SourceResult<Self> {
        let document = WordListDocument::from_json(input)?;
        Ok(Self::from_document(&document))
    }

    /// The list shipped with the crate.
    pub fn bundled() -> SourceResult<Self> {
        Self::from_json(BUNDLED_WORDS)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn select(&self, count: usize, with_clues: bool) -> SourceResult<Vec<Word>> {
        let words: Vec<Word> = self
            .words
            .iter()
            .filter(|word| !with_clues || word.clue().is_some())
            .take(count)
            .cloned()
            .collect();

        if words.is_empty() {
            Err(SourceError::Empty)
        } else {
            Ok(words)
        }
    }
}

impl WordSource for StaticWordSource {
    async fn fetch_words(&self, count: usize, with_clues: bool) -> SourceResult<Vec<Word>> {
        self.select(count, with_clues)
    }
}

/// Awaits `primary` once, racing it against `timeout`, and falls back to `fallback` on any failure, an empty
/// answer included. The host supplies `timeout` so the engine stays free of a timer runtime.
pub async fn fetch_or_fallback(
    primary: &impl WordSource,
    fallback: &impl WordSource,
    count: usize,
    with_clues: bool,
    timeout: impl Future<Output = ()>,
) -> SourceResult<Vec<Word>> {
    let fetch = pin!(primary.fetch_words(count, with_clues));
    let timeout = pin!(timeout);
    let fetched = match select(fetch, timeout).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(SourceError::TimedOut),
    };

    match fetched {
        Ok(words) if !words.is_empty() => Ok(words),
        Ok(_) => {
            log::warn!("Word source returned nothing, using fallback list");
            fallback.fetch_words(count, with_clues).await
        }
        Err(err) => {
            log::warn!("Word source failed ({err}), using fallback list");
            fallback.fetch_words(count, with_clues).await
        }
    }
}
