use std::collections::VecDeque;

use tracing::info;

use crate::{models::Notice, validation::TextValidator, Result};

/// Announcement history, most recent first
#[derive(Debug, Clone)]
pub struct NoticeBroadcaster {
    history: VecDeque<Notice>,
    max_length: usize,
}

impl NoticeBroadcaster {
    #[must_use]
    pub const fn new(max_length: usize) -> Self {
        Self {
            history: VecDeque::new(),
            max_length,
        }
    }

    /// Record a notice; the caller publishes it outward
    pub fn send(&mut self, message: &str) -> Result<Notice> {
        let message = TextValidator::new("notice")
            .with_max_length(self.max_length)
            .validate(message)?;

        let notice = Notice::new(message);
        self.history.push_front(notice.clone());

        info!(notice_id = %notice.id, "Notice sent");
        Ok(notice)
    }

    pub fn history(&self) -> Vec<Notice> {
        self.history.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.history.front()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_history_most_recent_first() {
        let mut notices = NoticeBroadcaster::new(280);
        notices.send("Welcome!").unwrap();
        notices.send("Flash sale").unwrap();
        notices.send("Last call").unwrap();

        let messages: Vec<_> = notices.history().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["Last call", "Flash sale", "Welcome!"]);
        assert_eq!(notices.latest().unwrap().message, "Last call");
    }

    #[test]
    fn test_blank_notice_rejected() {
        let mut notices = NoticeBroadcaster::new(280);
        assert!(matches!(notices.send("  "), Err(Error::InvalidInput(_))));
        assert!(matches!(
            notices.send(&"x".repeat(281)),
            Err(Error::InvalidInput(_))
        ));
        assert!(notices.is_empty());
    }
}
