//! Assembled output: one briefing book per presenter.
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// One renderable page of a briefing book.
///
/// `Content` pages carry the paginated description markup; `number` counts
/// content pages only, per book, 1-based (covers and end pages are unnumbered
/// in the reader's footer). `title` is set on the first page of each
/// presentation and rendered as that page's header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BookPage {
    Cover {
        heading: String,
        presenter_name: String,
        presenter_title: String,
    },
    Content {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        body: String,
        number: usize,
    },
    End {
        heading: String,
        message: String,
    },
}

/// The full paginated output for one presenter, bounded by cover and end
/// pages. Derived data: recomputed from the presentation collection on every
/// assembly pass, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub presenter_id: String,
    pub presenter_name: String,
    pub presenter_title: String,
    pub pages: Vec<BookPage>,
}

impl Book {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn content_page_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| matches!(p, BookPage::Content { .. }))
            .count()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_book() -> Book {
        Book {
            presenter_id: "a1".to_string(),
            presenter_name: "Amina Diallo".to_string(),
            presenter_title: "Chief Justice".to_string(),
            pages: vec![
                BookPage::Cover {
                    heading: "Briefing Book".to_string(),
                    presenter_name: "Amina Diallo".to_string(),
                    presenter_title: "Chief Justice".to_string(),
                },
                BookPage::Content {
                    title: Some("Opening Keynote".to_string()),
                    body: "<p>Welcome</p>".to_string(),
                    number: 1,
                },
                BookPage::End {
                    heading: "END OF BRIEFING".to_string(),
                    message: "Thank you for the presentation.".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_page_counts() {
        let book = make_book();
        assert_eq!(book.page_count(), 3);
        assert_eq!(book.content_page_count(), 1);
    }

    #[test]
    fn test_serializes_with_page_type_tags() {
        let json = serde_json::to_string(&make_book()).unwrap();
        assert!(json.contains(r#""type":"cover""#));
        assert!(json.contains(r#""type":"content""#));
        assert!(json.contains(r#""type":"end""#));
    }

    #[test]
    fn test_content_title_omitted_when_absent() {
        let page = BookPage::Content {
            title: None,
            body: "<p>x</p>".to_string(),
            number: 2,
        };
        let json = serde_json::to_string(&page).unwrap();
        assert!(!json.contains("title"));
    }
}
