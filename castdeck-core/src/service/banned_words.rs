use tracing::debug;

use crate::{Error, Result};

/// Moderation word list screening chat text
///
/// Matching is case-sensitive and by exact substring. Entries are
/// normalized by trimming surrounding whitespace and kept in insertion
/// order without duplicates.
#[derive(Debug, Clone, Default)]
pub struct BannedWordFilter {
    words: Vec<String>,
}

impl BannedWordFilter {
    #[must_use]
    pub const fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Build a filter from configured defaults, skipping blanks and repeats
    #[must_use]
    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::new();
        for word in words {
            if let Err(e) = filter.add(word.as_ref()) {
                debug!(error = %e, "Skipping configured banned word");
            }
        }
        filter
    }

    fn normalize(word: &str) -> Result<String> {
        let normalized = word.trim();
        if normalized.is_empty() {
            return Err(Error::InvalidInput(
                "Banned word may not be empty".to_string(),
            ));
        }
        Ok(normalized.to_string())
    }

    pub fn add(&mut self, word: &str) -> Result<()> {
        let word = Self::normalize(word)?;
        if self.contains(&word) {
            return Err(Error::DuplicateEntry(format!(
                "\"{word}\" is already banned"
            )));
        }
        self.words.push(word);
        Ok(())
    }

    pub fn remove(&mut self, word: &str) -> Result<String> {
        let word = word.trim();
        let index = self
            .words
            .iter()
            .position(|w| w == word)
            .ok_or_else(|| Error::NotFound(format!("\"{word}\" is not banned")))?;
        Ok(self.words.remove(index))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// First banned entry occurring in `text`, if any
    pub fn find_match(&self, text: &str) -> Option<&str> {
        self.words
            .iter()
            .find(|w| text.contains(w.as_str()))
            .map(String::as_str)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
