use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    models::{Viewer, ViewerId},
    validation::{TextValidator, LABEL_MAX},
    Error, Result,
};

/// Append-only list of viewers who joined the session
#[derive(Debug, Clone, Default)]
pub struct Roster {
    viewers: Vec<Viewer>,
}

impl Roster {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            viewers: Vec::new(),
        }
    }

    pub fn join(
        &mut self,
        viewer_id: ViewerId,
        username: &str,
        joined_at: DateTime<Utc>,
    ) -> Result<Viewer> {
        let username = TextValidator::new("username")
            .with_max_length(LABEL_MAX)
            .validate(username)?;

        if self.contains(&viewer_id) {
            return Err(Error::DuplicateEntry(format!(
                "Viewer {viewer_id} already joined"
            )));
        }

        let viewer = Viewer::new(viewer_id, username, joined_at);
        // Joins may arrive out of timestamp order from the transport
        let index = self
            .viewers
            .partition_point(|v| v.joined_at <= viewer.joined_at);
        self.viewers.insert(index, viewer.clone());

        info!(viewer_id = %viewer.id, username = %viewer.username, "Viewer joined");
        Ok(viewer)
    }

    pub fn contains(&self, viewer_id: &ViewerId) -> bool {
        self.viewers.iter().any(|v| &v.id == viewer_id)
    }

    /// Viewers ordered by join time
    pub fn list(&self) -> &[Viewer] {
        &self.viewers
    }

    pub fn len(&self) -> usize {
        self.viewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_join_and_duplicate() {
        let mut roster = Roster::new();
        let now = Utc::now();

        roster.join(ViewerId::from("v1"), "amy", now).unwrap();
        let result = roster.join(ViewerId::from("v1"), "amy again", now);

        assert!(matches!(result, Err(Error::DuplicateEntry(_))));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_list_ordered_by_join_time() {
        let mut roster = Roster::new();
        let now = Utc::now();

        roster.join(ViewerId::from("late"), "late", now + Duration::seconds(10)).unwrap();
        roster.join(ViewerId::from("early"), "early", now).unwrap();
        roster.join(ViewerId::from("tie"), "tie", now).unwrap();

        let ids: Vec<_> = roster.list().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "tie", "late"]);
    }

    #[test]
    fn test_blank_username() {
        let mut roster = Roster::new();
        assert!(matches!(
            roster.join(ViewerId::from("v1"), " ", Utc::now()),
            Err(Error::InvalidInput(_))
        ));
    }
}
