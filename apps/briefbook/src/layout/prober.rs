//! Height Prober — estimates the rendered pixel height of an HTML fragment.
//!
//! The paginator only ever asks one question: "how tall is this fragment at
//! this width?". That question is a capability behind the [`HeightProber`]
//! trait so tests can substitute deterministic fakes, and so a different
//! measurement backend (a headless layout engine, say) could be dropped in
//! without touching the pagination algorithm.
//!
//! [`TextMetricsProber`] is the production implementation: a deterministic
//! text-metrics approximation built on the static font table. It walks the
//! parsed fragment block by block and sums estimated line heights. Each call
//! is stateless — nothing is cached across fragments, since content differs
//! on every probe.

use scraper::{ElementRef, Html};

use crate::html::is_block_tag;
use crate::layout::font_metrics::{ui_font, wrapped_line_count, FontMetricTable, TextStyle};

/// Horizontal inset applied to list items and quote bodies.
const INDENT_PX: f32 = 24.0;

/// The measure capability: rendered height of `html` at `width_px`.
pub trait HeightProber {
    fn measure(&self, html: &str, width_px: f32) -> f32;
}

/// Deterministic height estimation from static font metrics.
pub struct TextMetricsProber {
    style: TextStyle,
    metrics: &'static FontMetricTable,
}

impl TextMetricsProber {
    pub fn new(style: TextStyle) -> Self {
        TextMetricsProber {
            style,
            metrics: ui_font(),
        }
    }

    /// Font-size scale factor applied to heading text.
    fn heading_scale(tag: &str) -> f32 {
        match tag {
            "h1" => 1.5,
            "h2" => 1.35,
            "h3" => 1.25,
            "h4" => 1.1,
            _ => 1.0,
        }
    }

    /// Height of a wrapped text run at the given width and font scale.
    fn flow_height(&self, text: &str, width_px: f32, scale: f32) -> f32 {
        let style = self.style.scaled(scale);
        let lines = wrapped_line_count(text, width_px, &style, self.metrics);
        lines as f32 * style.line_height_px()
    }

    /// Height of one block-level element.
    fn block_height(&self, el: ElementRef<'_>, width_px: f32) -> f32 {
        let tag = el.value().name();
        match tag {
            "ul" | "ol" => el
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|child| child.value().name() == "li")
                .map(|li| self.block_height(li, width_px - INDENT_PX))
                .sum(),
            "li" => self.children_height(el, width_px),
            "blockquote" => self.children_height(el, width_px - 2.0 * INDENT_PX),
            "pre" => {
                // Preformatted text keeps its own line breaks and never wraps.
                let text: String = el.text().collect();
                let lines = text.trim_end_matches('\n').split('\n').count();
                if text.trim().is_empty() {
                    0.0
                } else {
                    lines as f32 * self.style.line_height_px()
                }
            }
            "table" => self.table_height(el, width_px),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let text: String = el.text().collect();
                self.flow_height(&text, width_px, Self::heading_scale(tag))
            }
            _ => self.children_height(el, width_px),
        }
    }

    /// Height of a container's children: nested blocks stack, consecutive
    /// inline/text nodes flow together as one wrapped run.
    fn children_height(&self, el: ElementRef<'_>, width_px: f32) -> f32 {
        let mut total = 0.0;
        let mut inline_run = String::new();

        for child in el.children() {
            if let Some(child_el) = ElementRef::wrap(child) {
                if is_block_tag(child_el.value().name()) {
                    total += self.flow_height(&inline_run, width_px, 1.0);
                    inline_run.clear();
                    total += self.block_height(child_el, width_px);
                } else {
                    inline_run.push_str(&child_el.text().collect::<String>());
                }
            } else if let Some(text) = child.value().as_text() {
                inline_run.push_str(&**text);
            }
        }

        total + self.flow_height(&inline_run, width_px, 1.0)
    }

    /// One stacked row per `<tr>`; a row is as tall as its tallest cell,
    /// cells sharing the width evenly.
    fn table_height(&self, el: ElementRef<'_>, width_px: f32) -> f32 {
        let mut total = 0.0;
        for row in el
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|d| d.value().name() == "tr")
        {
            let cells: Vec<ElementRef<'_>> = row
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|c| matches!(c.value().name(), "td" | "th"))
                .collect();
            if cells.is_empty() {
                continue;
            }
            let cell_width = width_px / cells.len() as f32;
            let tallest = cells
                .iter()
                .map(|cell| {
                    let text: String = cell.text().collect();
                    self.flow_height(&text, cell_width, 1.0)
                })
                .fold(self.style.line_height_px(), f32::max);
            total += tallest;
        }
        total
    }
}

impl HeightProber for TextMetricsProber {
    fn measure(&self, html: &str, width_px: f32) -> f32 {
        if html.trim().is_empty() {
            return 0.0;
        }
        let fragment = Html::parse_fragment(html);
        self.children_height(fragment.root_element(), width_px)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 316.0;

    fn make_prober() -> TextMetricsProber {
        TextMetricsProber::new(TextStyle::default())
    }

    #[test]
    fn test_empty_fragment_has_zero_height() {
        let prober = make_prober();
        assert_eq!(prober.measure("", WIDTH), 0.0);
        assert_eq!(prober.measure("   ", WIDTH), 0.0);
    }

    #[test]
    fn test_short_paragraph_is_one_line() {
        let prober = make_prober();
        let height = prober.measure("<p>Hello</p>", WIDTH);
        assert!(
            (height - 25.2).abs() < 1e-3,
            "one line at 14px/1.8 should be 25.2px, got {height}"
        );
    }

    #[test]
    fn test_longer_text_is_taller() {
        let prober = make_prober();
        let short = prober.measure("<p>one line</p>", WIDTH);
        let long = prober.measure(&format!("<p>{}</p>", "wrap me ".repeat(30)), WIDTH);
        assert!(long > short, "long ({long}) should exceed short ({short})");
    }

    #[test]
    fn test_list_height_sums_items() {
        let prober = make_prober();
        let one = prober.measure("<ul><li>a</li></ul>", WIDTH);
        let three = prober.measure("<ul><li>a</li><li>b</li><li>c</li></ul>", WIDTH);
        assert!(
            (three - 3.0 * one).abs() < 1e-3,
            "three one-line items should be 3x one item ({one} vs {three})"
        );
    }

    #[test]
    fn test_heading_taller_than_paragraph() {
        let prober = make_prober();
        let p = prober.measure("<p>Section</p>", WIDTH);
        let h1 = prober.measure("<h1>Section</h1>", WIDTH);
        assert!(h1 > p, "h1 ({h1}) should exceed p ({p})");
    }

    #[test]
    fn test_pre_counts_literal_lines() {
        let prober = make_prober();
        let height = prober.measure("<pre>a\nb\nc</pre>", WIDTH);
        assert!(
            (height - 3.0 * 25.2).abs() < 1e-3,
            "three literal lines expected, got {height}"
        );
    }

    #[test]
    fn test_table_stacks_rows() {
        let prober = make_prober();
        let one = prober.measure("<table><tr><td>a</td><td>b</td></tr></table>", WIDTH);
        let two = prober.measure(
            "<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>",
            WIDTH,
        );
        assert!(two > one, "two rows ({two}) should exceed one ({one})");
    }

    #[test]
    fn test_top_level_inline_nodes_flow_together() {
        let prober = make_prober();
        // Sub-block slices put span pieces at the top level; they should
        // measure as one flowed paragraph, not one line per span.
        let flowed = prober.measure("<span>a</span><span>b</span><span>c</span>", WIDTH);
        assert!(
            (flowed - 25.2).abs() < 1e-3,
            "three short spans should share one line, got {flowed}"
        );
    }

    #[test]
    fn test_nested_blocks_stack() {
        let prober = make_prober();
        let height = prober.measure("<div><p>a</p><p>b</p></div>", WIDTH);
        assert!(
            (height - 2.0 * 25.2).abs() < 1e-3,
            "two nested paragraphs should stack, got {height}"
        );
    }

    #[test]
    fn test_measure_is_stateless_and_deterministic() {
        let prober = make_prober();
        let html = "<p>measured twice</p><ul><li>same</li></ul>";
        assert_eq!(prober.measure(html, WIDTH), prober.measure(html, WIDTH));
    }
}
