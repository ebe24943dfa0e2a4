use crate::article::AssembledArticle;
use crate::domain::ArticleSummary;
use crate::listing::Listing;

/// What the reader is currently showing.
pub enum View {
    List,
    /// An article was selected but its document hasn't resolved yet. No
    /// document field is accessible in this state, so the layout can only
    /// render a placeholder.
    LoadingArticle { uid: String },
    Article {
        article: Box<AssembledArticle>,
        scroll: u16,
    },
}

pub struct TuiApp {
    pub listing: Listing,
    pub view: View,
    pub selected: usize,
    pub status_message: Option<String>,
    pub preview_ref: Option<String>,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(listing: Listing, preview_ref: Option<String>) -> Self {
        Self {
            listing,
            view: View::List,
            selected: 0,
            status_message: None,
            preview_ref,
            should_quit: false,
        }
    }

    pub fn selected_article(&self) -> Option<&ArticleSummary> {
        self.listing.articles().get(self.selected)
    }

    pub fn is_preview(&self) -> bool {
        self.preview_ref.is_some()
    }

    /// Drop the preview override; queries issued from here on use the
    /// published ref.
    pub fn exit_preview(&mut self) {
        self.preview_ref = None;
    }

    pub fn move_up(&mut self) {
        match &mut self.view {
            View::List => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            View::Article { scroll, .. } => {
                *scroll = scroll.saturating_sub(1);
            }
            View::LoadingArticle { .. } => {}
        }
    }

    pub fn move_down(&mut self) {
        match &mut self.view {
            View::List => {
                let len = self.listing.len();
                if len > 0 && self.selected < len - 1 {
                    self.selected += 1;
                }
            }
            View::Article { scroll, .. } => {
                *scroll = scroll.saturating_add(1);
            }
            View::LoadingArticle { .. } => {}
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArticleListPage;

    fn app_with(results: Vec<ArticleSummary>) -> TuiApp {
        TuiApp::new(
            Listing::from_page(ArticleListPage {
                next_page: None,
                results,
            }),
            None,
        )
    }

    fn summary(uid: &str) -> ArticleSummary {
        ArticleSummary {
            uid: uid.to_string(),
            first_publication_date: None,
            title: uid.to_string(),
            subtitle: String::new(),
            author: String::new(),
        }
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app_with(vec![summary("a"), summary("b")]);

        app.move_up();
        assert_eq!(app.selected, 0);

        app.move_down();
        app.move_down();
        app.move_down();
        assert_eq!(app.selected, 1);
        assert_eq!(app.selected_article().unwrap().uid, "b");
    }

    #[test]
    fn test_selection_on_empty_listing() {
        let mut app = app_with(Vec::new());
        app.move_down();
        assert_eq!(app.selected, 0);
        assert!(app.selected_article().is_none());
    }

    #[test]
    fn test_exit_preview_clears_override() {
        let mut app = app_with(Vec::new());
        app.preview_ref = Some("preview-ref".to_string());
        assert!(app.is_preview());

        app.exit_preview();
        assert!(!app.is_preview());
        assert!(app.preview_ref.is_none());
    }
}
