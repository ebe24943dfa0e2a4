use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::richtext::Block;

/// A post as it appears on the listing page. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSummary {
    /// Unique per article; doubles as the URL segment.
    pub uid: String,
    pub first_publication_date: Option<DateTime<Utc>>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl ArticleSummary {
    /// Route of the article's detail page.
    pub fn path(&self) -> String {
        format!("/post/{}", self.uid)
    }
}

/// One page of summaries plus the cursor to the next one.
///
/// `next_page` is `None` exactly when the source reports no further
/// results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleListPage {
    pub next_page: Option<String>,
    pub results: Vec<ArticleSummary>,
}

/// A content section: optional heading plus a rich-text body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub heading: Option<String>,
    pub body: Vec<Block>,
}

/// A fully fetched article document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDetail {
    /// The source's internal document id; relative neighbor queries key on
    /// this, not on `uid`.
    pub id: String,
    pub uid: String,
    pub first_publication_date: Option<DateTime<Utc>>,
    pub last_publication_date: Option<DateTime<Utc>>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner_url: String,
    /// Sections in source order; never reordered or deduplicated.
    pub content: Vec<Section>,
}

impl ArticleDetail {
    pub fn path(&self) -> String {
        format!("/post/{}", self.uid)
    }
}

/// The chronologically adjacent article, when one exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborLink {
    pub uid: Option<String>,
    pub title: Option<String>,
}

impl NeighborLink {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_present(&self) -> bool {
        self.uid.is_some() && self.title.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_path() {
        let summary = ArticleSummary {
            uid: "how-to-float".to_string(),
            first_publication_date: None,
            title: "How to float".to_string(),
            subtitle: "Gently".to_string(),
            author: "Ada".to_string(),
        };
        assert_eq!(summary.path(), "/post/how-to-float");
    }

    #[test]
    fn test_neighbor_presence() {
        assert!(!NeighborLink::none().is_present());
        let neighbor = NeighborLink {
            uid: Some("next-post".to_string()),
            title: Some("Next post".to_string()),
        };
        assert!(neighbor.is_present());
    }
}
