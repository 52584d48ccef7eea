//! Flow layout with manual pagination.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner. The
//! cursor walks down from the top margin; a new page starts whenever the next
//! line would drop below the bottom margin, so no baseline is ever placed
//! under it.

use crate::output::style::Rgb;
use unicode_segmentation::UnicodeSegmentation;

/// Line height as a multiple of the font size.
pub const LINE_SPACING: f32 = 1.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

// Glyph widths in 1/1000 em for ASCII 0x20..=0x7E, from the standard Helvetica AFM files.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Fallback for characters outside printable ASCII.
const AVERAGE_WIDTH: u16 = 556;

/// Rendered width of `text` in points.
pub fn text_width(text: &str, size: f32, style: FontStyle) -> f32 {
    let table = match style {
        FontStyle::Bold => &HELVETICA_BOLD_WIDTHS,
        FontStyle::Regular | FontStyle::Italic => &HELVETICA_WIDTHS,
    };

    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as usize;
            if (32..=126).contains(&code) {
                table[code - 32] as u32
            } else {
                AVERAGE_WIDTH as u32
            }
        })
        .sum();

    units as f32 * size / 1000.0
}

/// Greedy word wrap. Explicit newlines start new lines; blank lines are dropped.
pub fn wrap_text(text: &str, size: f32, style: FontStyle, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate, size, style) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if text_width(word, size, style) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = break_word(word, size, style, max_width);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

fn break_word(word: &str, size: f32, style: FontStyle, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();

    for grapheme in word.graphemes(true) {
        let candidate = format!("{}{}", current, grapheme);
        if !current.is_empty() && text_width(&candidate, size, style) > max_width {
            pieces.push(std::mem::replace(&mut current, grapheme.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        /// Baseline.
        y: f32,
        size: f32,
        style: FontStyle,
        color: Rgb,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Photo {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub width: f32,
    pub height: f32,
    pub bottom_margin: f32,
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// (page index, baseline, text) for every text run.
    pub fn text_runs(&self) -> impl Iterator<Item = (usize, f32, &str)> {
        self.pages.iter().enumerate().flat_map(|(index, page)| {
            page.ops.iter().filter_map(move |op| match op {
                DrawOp::Text { y, text, .. } => Some((index, *y, text.as_str())),
                _ => None,
            })
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_runs().any(|(_, _, text)| text == needle)
    }

    pub fn has_photo(&self) -> bool {
        self.pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .any(|op| matches!(op, DrawOp::Photo { .. }))
    }
}

/// Vertical cursor over a growing list of pages.
pub struct PageFlow {
    width: f32,
    height: f32,
    top_margin: f32,
    bottom_margin: f32,
    side_margin: f32,
    cursor: f32,
    pages: Vec<PageLayout>,
}

impl PageFlow {
    pub fn new(width: f32, height: f32, top_margin: f32, bottom_margin: f32, side_margin: f32) -> Self {
        Self {
            width,
            height,
            top_margin,
            bottom_margin,
            side_margin,
            cursor: height - top_margin,
            pages: vec![PageLayout::default()],
        }
    }

    pub fn left(&self) -> f32 {
        self.side_margin
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.side_margin
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn top(&self) -> f32 {
        self.height - self.top_margin
    }

    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn new_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.cursor = self.top();
    }

    /// Break the page unless `height` still fits above the bottom margin.
    /// Returns true when a page break happened.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        let at_top = (self.cursor - self.top()).abs() < f32::EPSILON;
        if self.cursor - height < self.bottom_margin && !at_top {
            self.new_page();
            true
        } else {
            false
        }
    }

    /// Moves the cursor down, never past the bottom margin.
    pub fn advance(&mut self, amount: f32) {
        self.cursor = (self.cursor - amount).max(self.bottom_margin);
    }

    pub fn set_cursor(&mut self, y: f32) {
        self.cursor = y.clamp(self.bottom_margin, self.top());
    }

    pub fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    /// One line of text at `x`, breaking the page first when needed.
    pub fn text_line(&mut self, x: f32, text: &str, size: f32, style: FontStyle, color: Rgb) {
        let line_height = size * LINE_SPACING;
        self.ensure_space(line_height);

        self.push(DrawOp::Text {
            x,
            y: self.cursor - size,
            size,
            style,
            color,
            text: text.to_string(),
        });
        self.advance(line_height);
    }

    /// A line centered across the content width.
    pub fn centered_line(&mut self, text: &str, size: f32, style: FontStyle, color: Rgb) {
        let width = text_width(text, size, style);
        let x = self.side_margin + ((self.content_width() - width) / 2.0).max(0.0);
        self.text_line(x, text, size, style, color);
    }

    /// Wrapped paragraph within `width` starting at `x`.
    pub fn paragraph_at(&mut self, x: f32, width: f32, text: &str, size: f32, style: FontStyle, color: Rgb) {
        for line in wrap_text(text, size, style, width) {
            self.text_line(x, &line, size, style, color);
        }
    }

    pub fn paragraph(&mut self, text: &str, size: f32, style: FontStyle, color: Rgb) {
        let (x, width) = (self.left(), self.content_width());
        self.paragraph_at(x, width, text, size, style, color);
    }

    pub fn finish(self) -> DocumentLayout {
        DocumentLayout {
            width: self.width,
            height: self.height,
            bottom_margin: self.bottom_margin,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_uses_metrics() {
        assert_eq!(text_width("", 12.0, FontStyle::Regular), 0.0);
        assert!((text_width("i", 10.0, FontStyle::Regular) - 2.22).abs() < 1e-4);
        assert!(text_width("Match", 10.0, FontStyle::Bold) > text_width("Match", 10.0, FontStyle::Regular));
        assert!((text_width("é", 10.0, FontStyle::Italic) - 5.56).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Designed and maintained reporting pipelines for finance and operations teams across three regions";
        let lines = wrap_text(text, 10.0, FontStyle::Regular, 150.0);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 10.0, FontStyle::Regular) <= 150.0, "{} overflows", line);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_breaks_overlong_words() {
        let url = "https://example.com/a/very/long/path/that/cannot/fit/on/one/narrow/line";
        let lines = wrap_text(url, 10.0, FontStyle::Regular, 80.0);

        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), url);
        for line in &lines {
            assert!(text_width(line, 10.0, FontStyle::Regular) <= 80.0);
        }
    }

    #[test]
    fn test_wrap_keeps_explicit_lines() {
        let lines = wrap_text("first\n\nsecond", 10.0, FontStyle::Regular, 500.0);
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_flow_breaks_pages_above_bottom_margin() {
        let mut flow = PageFlow::new(595.0, 842.0, 60.0, 150.0, 56.0);
        for i in 0..200 {
            flow.text_line(56.0, &format!("line {}", i), 10.0, FontStyle::Regular, Rgb::TEXT);
        }
        let layout = flow.finish();

        assert!(layout.page_count() >= 2);
        for (_, y, text) in layout.text_runs() {
            assert!(y >= 150.0, "{} placed at {}", text, y);
        }
        assert!(layout.contains_text("line 199"));
    }

    #[test]
    fn test_ensure_space_on_fresh_page_does_not_break() {
        let mut flow = PageFlow::new(595.0, 842.0, 60.0, 150.0, 56.0);
        assert!(!flow.ensure_space(10_000.0));
        assert_eq!(flow.page_index(), 0);

        flow.advance(600.0);
        assert!(flow.ensure_space(100.0));
        assert_eq!(flow.page_index(), 1);
        assert_eq!(flow.cursor(), flow.top());
    }
}
