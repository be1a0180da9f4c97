//! Page Accumulator — greedy packing of blocks into fixed-height pages.
//!
//! Blocks are appended to the current page until a height probe says the next
//! one would overflow the budget. An overflowing block is split at its direct
//! child nodes and the split pieces are re-wrapped in the block's own tag on
//! both sides of the break, so a list sliced across pages keeps its `<ul>` on
//! every page. Content is never dropped: a block (or single child node) taller
//! than a whole page is emitted as its own overflowing page.
//!
//! Overflow is strict — a probed height exactly equal to the budget fits.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::html::{split_child_nodes, Block, SplitBlock};
use crate::layout::prober::HeightProber;

/// Gap reserved for the page border chrome, on top of padding and footer.
const PAGE_CHROME_PX: f32 = 8.0;

// ────────────────────────────────────────────────────────────────────────────
// Geometry
// ────────────────────────────────────────────────────────────────────────────

/// Fixed dimensions of the rendered page viewport, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub padding: f32,
    pub footer_height: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry {
            page_width: 380.0,
            page_height: 520.0,
            padding: 32.0,
            footer_height: 48.0,
        }
    }
}

impl PageGeometry {
    /// Width available to content after horizontal padding.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.padding
    }

    /// Height budget for one page's content: viewport height minus padding,
    /// footer, and border chrome.
    pub fn available_height(&self) -> f32 {
        self.page_height - 2.0 * self.padding - self.footer_height - PAGE_CHROME_PX
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page output
// ────────────────────────────────────────────────────────────────────────────

/// One page's worth of content: block fragments in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    pub fragments: Vec<String>,
}

impl PageContent {
    /// The page body as a single renderable fragment.
    pub fn html(&self) -> String {
        self.fragments.concat()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

/// Splits a block sequence into pages fitting `geometry`'s height budget.
///
/// `title_header`, when present, is prepended to every probe for the first
/// page only — it occupies first-page space without ever being a removable
/// block (the caller renders it separately).
pub fn paginate<P: HeightProber>(
    blocks: &[Block],
    geometry: &PageGeometry,
    title_header: Option<&str>,
    prober: &P,
) -> Vec<PageContent> {
    let mut acc = Accumulator {
        prober,
        width: geometry.content_width(),
        budget: geometry.available_height(),
        title_header,
        first_page: true,
        buffer: Vec::new(),
        pages: Vec::new(),
    };

    for block in blocks {
        acc.push_block(block);
    }
    acc.commit();

    debug!(
        blocks = blocks.len(),
        pages = acc.pages.len(),
        "paginated description"
    );
    acc.pages
}

struct Accumulator<'a, P: HeightProber> {
    prober: &'a P,
    width: f32,
    budget: f32,
    title_header: Option<&'a str>,
    first_page: bool,
    buffer: Vec<String>,
    pages: Vec<PageContent>,
}

impl<P: HeightProber> Accumulator<'_, P> {
    /// Probes the buffer plus an optional extra fragment, composing the
    /// first-page title header in front when applicable.
    fn probe_with(&self, extra: Option<&str>) -> f32 {
        let mut composed = String::new();
        if self.first_page {
            if let Some(header) = self.title_header {
                composed.push_str(header);
            }
        }
        for fragment in &self.buffer {
            composed.push_str(fragment);
        }
        if let Some(extra) = extra {
            composed.push_str(extra);
        }
        self.prober.measure(&composed, self.width)
    }

    fn fits_with(&self, extra: &str) -> bool {
        self.probe_with(Some(extra)) <= self.budget
    }

    /// Emits the buffered page, if any, and resets for the next one.
    fn commit(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        debug!(
            fragments = self.buffer.len(),
            page = self.pages.len() + 1,
            "committed page"
        );
        self.pages.push(PageContent {
            fragments: std::mem::take(&mut self.buffer),
        });
        self.first_page = false;
    }

    fn push_block(&mut self, block: &Block) {
        if self.fits_with(&block.html) {
            self.buffer.push(block.html.clone());
            return;
        }

        match split_child_nodes(&block.html) {
            Some(split) => self.push_split(&split),
            None => self.push_atomic(&block.html),
        }
    }

    /// Places a block that cannot be split: moves it to a fresh page, and if
    /// it exceeds the whole budget on its own, emits it as an overflowing
    /// page rather than dropping it.
    fn push_atomic(&mut self, html: &str) {
        self.commit();
        self.buffer.push(html.to_string());
        let height = self.probe_with(None);
        if height > self.budget {
            warn!(
                height,
                budget = self.budget,
                "block exceeds the page budget; emitting overflowing page"
            );
            self.commit();
        }
    }

    /// Distributes a block's child nodes across pages, re-wrapping each run
    /// in the parent tag. The child that triggers overflow starts the next
    /// page; a child too tall for even an empty page is kept and the overflow
    /// accepted.
    fn push_split(&mut self, split: &SplitBlock) {
        let mut run: Vec<String> = Vec::new();

        for piece in &split.pieces {
            let mut widened = run.clone();
            widened.push(piece.clone());
            if self.probe_with(Some(&split.wrap(&widened))) <= self.budget {
                run = widened;
                continue;
            }

            // This child does not fit on the current page.
            if !run.is_empty() {
                let partial = split.wrap(&run);
                self.buffer.push(partial);
            }
            if self.buffer.is_empty() {
                warn!("child node exceeds the page budget; accepting overflow");
            } else {
                self.commit();
            }
            run = vec![piece.clone()];
        }

        if !run.is_empty() {
            self.buffer.push(split.wrap(&run));
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
