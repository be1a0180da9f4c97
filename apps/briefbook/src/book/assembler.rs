//! Book Assembler — builds one briefing book per presenter.
//!
//! Presentations are grouped by presenter (presenters ordered by the first
//! appearance of one of their presentations, presentations in input order).
//! Each book opens with a cover page, carries the paginated description of
//! every presentation — the presentation title heads its first page — and
//! closes with an end page.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::html::{sanitize_whitespace, split_blocks};
use crate::layout::{paginate, HeightProber, PageGeometry};
use crate::models::{Book, BookPage, Presentation, Presenter};

/// Substituted for an empty or missing description before pagination.
pub const NO_DESCRIPTION_PLACEHOLDER: &str = "<p>No description provided.</p>";

/// Cover fallback when the presenter record has no title.
pub const DEFAULT_PRESENTER_TITLE: &str = "Presenter";

const COVER_HEADING: &str = "Briefing Book";
const END_HEADING: &str = "END OF BRIEFING";
const END_MESSAGE: &str = "Thank you for the presentation.";

/// The fixed header fragment probed (but never stored) with a presentation's
/// first page.
pub fn title_header_html(title: &str) -> String {
    format!(
        "<div class=\"presentation-title\"><h3>{}</h3></div>",
        html_escape::encode_text(title)
    )
}

/// Assembles the full book collection for a presentation collection.
///
/// A presenter appearing in no presentation yields no book; an empty input
/// yields an empty collection. Never fails: malformed descriptions degrade to
/// best-effort block extraction and empty ones get the placeholder.
pub fn assemble_books<P: HeightProber>(
    presentations: &[Presentation],
    geometry: &PageGeometry,
    prober: &P,
) -> Vec<Book> {
    let books: Vec<Book> = group_by_presenter(presentations)
        .into_iter()
        .map(|(presenter, list)| build_book(presenter, &list, geometry, prober))
        .collect();

    info!(
        presentations = presentations.len(),
        books = books.len(),
        pages = books.iter().map(Book::page_count).sum::<usize>(),
        "assembled briefing books"
    );
    books
}

/// Groups presentations by presenter id, preserving first-appearance order of
/// presenters and input order within each group.
fn group_by_presenter(presentations: &[Presentation]) -> Vec<(&Presenter, Vec<&Presentation>)> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Presentation>> = HashMap::new();

    for presentation in presentations {
        let id = presentation.presenter.id.as_str();
        if !groups.contains_key(id) {
            order.push(id);
        }
        groups.entry(id).or_default().push(presentation);
    }

    order
        .into_iter()
        .filter_map(|id| {
            let list = groups.remove(id)?;
            let first: &Presentation = list.first().copied()?;
            Some((&first.presenter, list))
        })
        .collect()
}

fn build_book<P: HeightProber>(
    presenter: &Presenter,
    presentations: &[&Presentation],
    geometry: &PageGeometry,
    prober: &P,
) -> Book {
    let presenter_name = presenter.full_name();
    let presenter_title = presenter
        .title
        .clone()
        .unwrap_or_else(|| DEFAULT_PRESENTER_TITLE.to_string());

    let mut pages = vec![BookPage::Cover {
        heading: COVER_HEADING.to_string(),
        presenter_name: presenter_name.clone(),
        presenter_title: presenter_title.clone(),
    }];

    let mut number = 0usize;
    for presentation in presentations {
        let raw = if presentation.description.trim().is_empty() {
            NO_DESCRIPTION_PLACEHOLDER
        } else {
            presentation.description.as_str()
        };
        let cleaned = sanitize_whitespace(raw);
        let blocks = split_blocks(&cleaned);
        let header = title_header_html(&presentation.title);

        let contents = paginate(&blocks, geometry, Some(&header), prober);
        debug!(
            presentation = %presentation.id,
            pages = contents.len(),
            "paginated presentation"
        );

        for (idx, content) in contents.iter().enumerate() {
            number += 1;
            pages.push(BookPage::Content {
                title: (idx == 0).then(|| presentation.title.clone()),
                body: content.html(),
                number,
            });
        }
    }

    pages.push(BookPage::End {
        heading: END_HEADING.to_string(),
        message: END_MESSAGE.to_string(),
    });

    Book {
        presenter_id: presenter.id.clone(),
        presenter_name,
        presenter_title,
        pages,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
