//! Chat moderation for a live session
//!
//! Keeps the ordered message log and screens every post against the
//! session's banned word list before it is appended.

use tracing::{info, warn};

use crate::{
    models::ChatMessage,
    service::BannedWordFilter,
    validation::TextValidator,
    Error, Result,
};

/// Append-only chat log guarded by a [`BannedWordFilter`]
#[derive(Debug, Clone)]
pub struct ChatModerator {
    filter: BannedWordFilter,
    messages: Vec<ChatMessage>,
    max_length: usize,
}

impl ChatModerator {
    #[must_use]
    pub const fn new(filter: BannedWordFilter, max_length: usize) -> Self {
        Self {
            filter,
            messages: Vec::new(),
            max_length,
        }
    }

    /// Post a chat message
    ///
    /// Text is trimmed before screening. Fails with [`Error::Blocked`]
    /// carrying the matched word when the text contains a banned entry.
    pub fn post_message(&mut self, author: &str, text: &str, is_host: bool) -> Result<ChatMessage> {
        let author = TextValidator::new("author")
            .with_max_length(crate::validation::LABEL_MAX)
            .validate(author)?;
        let text = TextValidator::new("message")
            .with_max_length(self.max_length)
            .validate(text)?;

        if let Some(word) = self.filter.find_match(&text) {
            warn!(author = %author, banned_word = %word, "Chat message blocked");
            return Err(Error::Blocked(word.to_string()));
        }

        let message = ChatMessage::new(author, text, is_host);
        self.messages.push(message.clone());

        info!(
            message_id = %message.id,
            author = %message.author,
            is_host = message.is_host,
            "Chat message posted"
        );

        Ok(message)
    }

    pub fn add_banned_word(&mut self, word: &str) -> Result<()> {
        self.filter.add(word)?;
        info!(word = %word.trim(), "Banned word added");
        Ok(())
    }

    pub fn remove_banned_word(&mut self, word: &str) -> Result<()> {
        let removed = self.filter.remove(word)?;
        info!(word = %removed, "Banned word removed");
        Ok(())
    }

    pub const fn filter(&self) -> &BannedWordFilter {
        &self.filter
    }

    pub fn banned_words(&self) -> &[String] {
        self.filter.words()
    }

    /// Messages in posting order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}
