//! Articles served by the synthetic feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const CREATED_FORMAT: &str = "%d %b %Y";

/// A generated article as produced by the synthetic feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleEntity {
    /// Offset of the article in the feed; stable across reloads.
    pub id: u32,
    /// Display title.
    pub title: String,
    /// Short blurb.
    pub description: String,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Selection flag, always `false` when generated.
    pub selected: bool,
}

/// Display wrapper around an [`ArticleEntity`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Article {
    entity: ArticleEntity,
}

impl Article {
    /// Wrap an entity for display.
    pub const fn new(entity: ArticleEntity) -> Self {
        Self { entity }
    }

    /// Article identifier.
    pub const fn id(&self) -> u32 {
        self.entity.id
    }

    /// Article title.
    pub fn title(&self) -> &str {
        &self.entity.title
    }

    /// Article description.
    pub fn description(&self) -> &str {
        &self.entity.description
    }

    /// Creation time.
    pub const fn created(&self) -> DateTime<Utc> {
        self.entity.created
    }

    /// Whether the article is selected.
    pub const fn selected(&self) -> bool {
        self.entity.selected
    }

    /// Creation date formatted like `07 Mar 2024`.
    pub fn created_text(&self) -> String {
        self.entity.created.format(CREATED_FORMAT).to_string()
    }

    /// The wrapped entity.
    pub const fn entity(&self) -> &ArticleEntity {
        &self.entity
    }
}

impl From<ArticleEntity> for Article {
    fn from(entity: ArticleEntity) -> Self {
        Self::new(entity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entity(id: u32) -> ArticleEntity {
        ArticleEntity {
            id,
            title: format!("Article #{id}"),
            description: "A boring article".into(),
            created: Utc.with_ymd_and_hms(2024, 3, 7, 12, 30, 0).unwrap(),
            selected: false,
        }
    }

    #[test]
    fn test_created_text_format() {
        let article = Article::from(entity(4));
        assert_eq!(article.created_text(), "07 Mar 2024");
        assert_eq!(article.title(), "Article #4");
        assert_eq!(article.id(), 4);
        assert!(!article.selected());
    }

    #[test]
    fn test_equality_follows_entity() {
        assert_eq!(Article::new(entity(1)), Article::new(entity(1)));
        assert_ne!(Article::new(entity(1)), Article::new(entity(2)));
    }
}
