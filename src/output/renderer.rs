//! PDF report renderer: lays out the profile and match score, then writes it with printpdf

use crate::config::LayoutConfig;
use crate::error::{CvMatcherError, Result};
use crate::output::layout::{text_width, DocumentLayout, DrawOp, FontStyle, PageFlow, LINE_SPACING};
use crate::output::photo::PreparedPhoto;
use crate::output::report::ReportFields;
use crate::output::style::{HeaderLayout, Rgb, StyleToken};
use crate::processing::matcher::MatchResult;
use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, Pt, Rect,
    Rgb as PdfRgb,
};

const NAME_SIZE: f32 = 22.0;
const CONTACT_SIZE: f32 = 10.0;
const HEADING_SIZE: f32 = 13.0;
const TITLE_SIZE: f32 = 11.0;
const PERIOD_SIZE: f32 = 9.5;
const BODY_SIZE: f32 = 10.5;
const NOTE_SIZE: f32 = 8.0;

const SECTION_GAP: f32 = 14.0;
const ENTRY_GAP: f32 = 6.0;
const RULE_THICKNESS: f32 = 1.0;

const PHOTO_CELL_WIDTH: f32 = 80.0;
const PHOTO_CELL_HEIGHT: f32 = 100.0;
const PHOTO_GAP: f32 = 16.0;

const BAR_HEIGHT: f32 = 12.0;

pub const NO_MATCHED_TEXT: &str = "No keywords matched.";
pub const ALL_COVERED_TEXT: &str = "All keywords covered.";

#[derive(Debug, Clone, PartialEq)]
pub enum RenderWarning {
    /// The photo could not be decoded or scaled; the single-column header was used.
    PhotoSkipped(String),
}

#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<RenderWarning>,
}

/// Layout plus the decoded photo it refers to.
#[derive(Debug, Clone)]
pub struct PreparedReport {
    pub layout: DocumentLayout,
    pub photo: Option<PreparedPhoto>,
    pub warnings: Vec<RenderWarning>,
}

pub struct ReportRenderer {
    page_width: f32,
    page_height: f32,
    top_margin: f32,
    bottom_margin: f32,
    side_margin: f32,
    max_listed_keywords: usize,
    generated_on: Option<NaiveDate>,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(&crate::config::Config::default().layout)
    }
}

impl ReportRenderer {
    pub fn new(config: &LayoutConfig) -> Self {
        let (page_width, page_height) = config.page_size.dimensions();
        Self {
            page_width,
            page_height,
            top_margin: config.top_margin,
            bottom_margin: config.bottom_margin,
            side_margin: config.side_margin,
            max_listed_keywords: config.max_listed_keywords.max(1),
            generated_on: Some(Local::now().date_naive()),
        }
    }

    /// Date printed at the end of the report; `None` omits the line.
    pub fn with_generated_on(mut self, date: Option<NaiveDate>) -> Self {
        self.generated_on = date;
        self
    }

    /// Render `fields` (and the score section when `result` is given) into PDF bytes.
    pub fn render(
        &self,
        fields: &ReportFields,
        result: Option<&MatchResult>,
        style: &StyleToken,
    ) -> Result<RenderedReport> {
        let prepared = self.layout(fields, result, style);
        let page_count = prepared.layout.page_count();

        let title = format!("{} - CV", fields.name.trim());
        let bytes = self.write_pdf(&title, &prepared.layout, prepared.photo.as_ref())?;

        info!("Rendered report for '{}': {} page(s), {} bytes", fields.name, page_count, bytes.len());

        Ok(RenderedReport {
            bytes,
            page_count,
            warnings: prepared.warnings,
        })
    }

    pub fn layout(&self, fields: &ReportFields, result: Option<&MatchResult>, style: &StyleToken) -> PreparedReport {
        let mut warnings = Vec::new();

        let photo = match fields.photo.as_deref() {
            Some(bytes) => match PreparedPhoto::decode(bytes) {
                Ok(photo) => Some(photo),
                Err(e) => {
                    warn!("Skipping photo: {}", e);
                    warnings.push(RenderWarning::PhotoSkipped(e.to_string()));
                    None
                }
            },
            None => None,
        };

        let layout = self.layout_with_photo(fields, result, style, photo.as_ref());
        PreparedReport {
            layout,
            photo,
            warnings,
        }
    }

    fn layout_with_photo(
        &self,
        fields: &ReportFields,
        result: Option<&MatchResult>,
        style: &StyleToken,
        photo: Option<&PreparedPhoto>,
    ) -> DocumentLayout {
        let mut flow = PageFlow::new(
            self.page_width,
            self.page_height,
            self.top_margin,
            self.bottom_margin,
            self.side_margin,
        );

        match photo {
            Some(photo) => self.photo_header(&mut flow, fields, style, photo),
            None => self.header(&mut flow, fields, style),
        }

        if !fields.objective.trim().is_empty() {
            self.heading(&mut flow, "Objective", style);
            flow.paragraph(&fields.objective, BODY_SIZE, FontStyle::Regular, Rgb::TEXT);
        }

        if !fields.summary.trim().is_empty() {
            self.heading(&mut flow, "Professional Summary", style);
            flow.paragraph(&fields.summary, BODY_SIZE, FontStyle::Regular, Rgb::TEXT);
        }

        if !fields.experience.is_empty() {
            self.heading(&mut flow, "Experience", style);
            for (index, entry) in fields.experience.iter().enumerate() {
                if index > 0 {
                    flow.advance(ENTRY_GAP);
                }
                self.entry(&mut flow, &entry.title_line(), &entry.period, &entry.description, style);
            }
        }

        if !fields.education.is_empty() {
            self.heading(&mut flow, "Education", style);
            for (index, entry) in fields.education.iter().enumerate() {
                if index > 0 {
                    flow.advance(ENTRY_GAP);
                }
                self.entry(&mut flow, &entry.title_line(), &entry.period, &entry.details, style);
            }
        }

        let skills = fields.skills_line();
        if !skills.is_empty() {
            self.heading(&mut flow, "Skills", style);
            flow.paragraph(&skills, BODY_SIZE, FontStyle::Regular, Rgb::TEXT);
        }

        if let Some(certifications) = non_blank(fields.certifications.as_deref()) {
            self.heading(&mut flow, "Certifications", style);
            flow.paragraph(certifications, BODY_SIZE, FontStyle::Regular, Rgb::TEXT);
        }

        if let Some(languages) = non_blank(fields.languages.as_deref()) {
            self.heading(&mut flow, "Languages", style);
            flow.paragraph(languages, BODY_SIZE, FontStyle::Regular, Rgb::TEXT);
        }

        if let Some(result) = result {
            self.score_section(&mut flow, result, style);
        }

        if let Some(date) = self.generated_on {
            flow.advance(SECTION_GAP);
            flow.text_line(
                flow.left(),
                &format!("Generated on {}", date.format("%Y-%m-%d")),
                NOTE_SIZE,
                FontStyle::Italic,
                Rgb::MUTED,
            );
        }

        let mut layout = flow.finish();
        self.number_pages(&mut layout);
        debug!("Laid out {} page(s)", layout.page_count());
        layout
    }

    fn header(&self, flow: &mut PageFlow, fields: &ReportFields, style: &StyleToken) {
        let contact = fields.contact.line();

        match style.layout {
            HeaderLayout::Centered => {
                flow.centered_line(fields.name.trim(), NAME_SIZE, FontStyle::Bold, style.primary);
                if !contact.is_empty() {
                    flow.centered_line(&contact, CONTACT_SIZE, FontStyle::Regular, Rgb::MUTED);
                }
            }
            HeaderLayout::Left => {
                flow.paragraph(fields.name.trim(), NAME_SIZE, FontStyle::Bold, style.primary);
                if !contact.is_empty() {
                    flow.paragraph(&contact, CONTACT_SIZE, FontStyle::Regular, Rgb::MUTED);
                }
            }
        }

        self.rule(flow, style.accent);
    }

    /// Two columns: a fixed-width photo cell beside the name and contact cell.
    fn photo_header(&self, flow: &mut PageFlow, fields: &ReportFields, style: &StyleToken, photo: &PreparedPhoto) {
        flow.ensure_space(PHOTO_CELL_HEIGHT);

        let top = flow.cursor();
        let (width, height) = photo.fit_within(PHOTO_CELL_WIDTH, PHOTO_CELL_HEIGHT);
        flow.push(DrawOp::Photo {
            x: flow.left(),
            y: top - height,
            width,
            height,
        });

        let text_x = flow.left() + PHOTO_CELL_WIDTH + PHOTO_GAP;
        let text_width = flow.content_width() - PHOTO_CELL_WIDTH - PHOTO_GAP;

        flow.advance(12.0);
        flow.paragraph_at(text_x, text_width, fields.name.trim(), NAME_SIZE, FontStyle::Bold, style.primary);

        let contact = &fields.contact;
        for part in [&contact.email, &contact.phone, &contact.location]
            .into_iter()
            .chain(contact.links.iter())
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
        {
            flow.paragraph_at(text_x, text_width, part, CONTACT_SIZE, FontStyle::Regular, Rgb::MUTED);
        }

        let below_photo = top - height - ENTRY_GAP;
        if flow.cursor() > below_photo {
            flow.set_cursor(below_photo);
        }

        self.rule(flow, style.accent);
    }

    fn heading(&self, flow: &mut PageFlow, title: &str, style: &StyleToken) {
        // Keep the heading together with the first body line.
        let block = SECTION_GAP + HEADING_SIZE * LINE_SPACING + RULE_THICKNESS + 4.0 + BODY_SIZE * LINE_SPACING;
        if !flow.ensure_space(block) {
            flow.advance(SECTION_GAP);
        }

        flow.text_line(flow.left(), title, HEADING_SIZE, FontStyle::Bold, style.primary);
        self.rule(flow, style.accent);
    }

    fn rule(&self, flow: &mut PageFlow, color: Rgb) {
        flow.push(DrawOp::Rect {
            x: flow.left(),
            y: flow.cursor() - RULE_THICKNESS,
            width: flow.content_width(),
            height: RULE_THICKNESS,
            color,
        });
        flow.advance(RULE_THICKNESS + 4.0);
    }

    fn entry(&self, flow: &mut PageFlow, title: &str, period: &str, description: &str, style: &StyleToken) {
        // Title and period travel together.
        flow.ensure_space(TITLE_SIZE * LINE_SPACING + PERIOD_SIZE * LINE_SPACING);
        flow.paragraph(title, TITLE_SIZE, FontStyle::Bold, Rgb::TEXT);
        if !period.trim().is_empty() {
            flow.paragraph(period.trim(), PERIOD_SIZE, FontStyle::Italic, style.accent);
        }
        if !description.trim().is_empty() {
            flow.paragraph(description, BODY_SIZE, FontStyle::Regular, Rgb::TEXT);
        }
    }

    fn score_section(&self, flow: &mut PageFlow, result: &MatchResult, style: &StyleToken) {
        self.heading(flow, "Keyword Match", style);

        let tier = result.tier();
        flow.paragraph(
            &format!("Match score: {}% ({})", result.percentage(), tier.label()),
            TITLE_SIZE + 1.0,
            FontStyle::Bold,
            Rgb::TEXT,
        );

        flow.ensure_space(BAR_HEIGHT + 10.0);
        let bar_y = flow.cursor() - BAR_HEIGHT - 2.0;
        let bar_width = flow.content_width();
        flow.push(DrawOp::Rect {
            x: flow.left(),
            y: bar_y,
            width: bar_width,
            height: BAR_HEIGHT,
            color: Rgb::TRACK,
        });
        let filled = bar_width * result.score.clamp(0.0, 1.0) as f32;
        if filled > 0.0 {
            flow.push(DrawOp::Rect {
                x: flow.left(),
                y: bar_y,
                width: filled,
                height: BAR_HEIGHT,
                color: Rgb::for_tier(tier),
            });
        }
        flow.advance(BAR_HEIGHT + 10.0);

        let (matched, total) = result.coverage();
        self.keyword_list(
            flow,
            &format!("Matched keywords ({} of {})", matched, total),
            &result.matched,
            NO_MATCHED_TEXT,
        );
        flow.advance(ENTRY_GAP);
        self.keyword_list(
            flow,
            &format!("Missing keywords ({})", result.missing.len()),
            &result.missing,
            ALL_COVERED_TEXT,
        );
    }

    fn keyword_list(&self, flow: &mut PageFlow, title: &str, keywords: &[String], empty_text: &str) {
        flow.ensure_space(TITLE_SIZE * LINE_SPACING + BODY_SIZE * LINE_SPACING);
        flow.text_line(flow.left(), title, TITLE_SIZE, FontStyle::Bold, Rgb::TEXT);

        if keywords.is_empty() {
            flow.text_line(flow.left() + 12.0, empty_text, BODY_SIZE, FontStyle::Italic, Rgb::MUTED);
            return;
        }

        let indent = flow.left() + 12.0;
        let width = flow.content_width() - 12.0;
        for keyword in keywords.iter().take(self.max_listed_keywords) {
            flow.paragraph_at(indent, width, &format!("- {}", keyword), BODY_SIZE, FontStyle::Regular, Rgb::TEXT);
        }

        if keywords.len() > self.max_listed_keywords {
            flow.text_line(
                indent,
                &format!("... and {} more", keywords.len() - self.max_listed_keywords),
                BODY_SIZE,
                FontStyle::Italic,
                Rgb::MUTED,
            );
        }
    }

    /// "Page N of M" in the top margin, above the flow area.
    fn number_pages(&self, layout: &mut DocumentLayout) {
        let total = layout.pages.len();
        if total < 2 {
            return;
        }

        let y = self.page_height - self.top_margin / 2.0;
        for (index, page) in layout.pages.iter_mut().enumerate() {
            let text = format!("Page {} of {}", index + 1, total);
            let x = self.page_width - self.side_margin - text_width(&text, NOTE_SIZE, FontStyle::Regular);
            page.ops.push(DrawOp::Text {
                x,
                y,
                size: NOTE_SIZE,
                style: FontStyle::Regular,
                color: Rgb::MUTED,
                text,
            });
        }
    }

    fn write_pdf(&self, title: &str, layout: &DocumentLayout, photo: Option<&PreparedPhoto>) -> Result<Vec<u8>> {
        let page_width = Mm::from(Pt(layout.width));
        let page_height = Mm::from(Pt(layout.height));

        let (doc, first_page, first_layer) = PdfDocument::new(title, page_width, page_height, "Page 1");
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
            italic: doc.add_builtin_font(BuiltinFont::HelveticaOblique).map_err(pdf_error)?,
        };

        for (index, page) in layout.pages.iter().enumerate() {
            let (page_index, layer_index) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(page_width, page_height, format!("Page {}", index + 1))
            };
            let layer = doc.get_page(page_index).get_layer(layer_index);

            for op in &page.ops {
                match op {
                    DrawOp::Text {
                        x,
                        y,
                        size,
                        style,
                        color,
                        text,
                    } => {
                        layer.set_fill_color(pdf_color(*color));
                        layer.use_text(text.as_str(), *size, Mm::from(Pt(*x)), Mm::from(Pt(*y)), fonts.get(*style));
                    }
                    DrawOp::Rect {
                        x,
                        y,
                        width,
                        height,
                        color,
                    } => {
                        layer.set_fill_color(pdf_color(*color));
                        layer.add_rect(Rect::new(
                            Mm::from(Pt(*x)),
                            Mm::from(Pt(*y)),
                            Mm::from(Pt(x + width)),
                            Mm::from(Pt(y + height)),
                        ));
                    }
                    DrawOp::Photo { x, y, width, .. } => {
                        let Some(photo) = photo else { continue };
                        let (pixel_width, _) = photo.pixel_size();
                        let dpi = pixel_width as f32 * 72.0 / width.max(1.0);
                        Image::from_dynamic_image(&photo.image).add_to_layer(
                            layer.clone(),
                            ImageTransform {
                                translate_x: Some(Mm::from(Pt(*x))),
                                translate_y: Some(Mm::from(Pt(*y))),
                                dpi: Some(dpi),
                                ..Default::default()
                            },
                        );
                    }
                }
            }
        }

        doc.save_to_bytes().map_err(pdf_error)
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

fn pdf_color(color: Rgb) -> Color {
    Color::Rgb(PdfRgb::new(color.r, color.g, color.b, None))
}

fn pdf_error(err: printpdf::Error) -> CvMatcherError {
    CvMatcherError::OutputFormatting(format!("Failed to write PDF: {}", err))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::{ContactInfo, EducationEntry, ExperienceEntry};
    use printpdf::image_crate::{DynamicImage, RgbImage};

    fn renderer() -> ReportRenderer {
        ReportRenderer::default().with_generated_on(None)
    }

    fn fields() -> ReportFields {
        ReportFields {
            name: "Ana Torres".to_string(),
            contact: ContactInfo {
                email: "ana@example.com".to_string(),
                phone: "+54 341 555 0101".to_string(),
                location: "Rosario".to_string(),
                links: Vec::new(),
            },
            objective: "Join a data team building trustworthy reporting.".to_string(),
            summary: "Analyst with five years of SQL and Power BI work.".to_string(),
            experience: vec![ExperienceEntry {
                role: "Data Analyst".to_string(),
                organization: "Acme".to_string(),
                period: "2021 - 2024".to_string(),
                description: "Built dashboards for finance.".to_string(),
            }],
            education: vec![EducationEntry {
                degree: "BSc Statistics".to_string(),
                institution: "UNR".to_string(),
                period: "2015 - 2020".to_string(),
                details: String::new(),
            }],
            skills: vec!["SQL".to_string(), "Power BI".to_string()],
            certifications: Some("PL-300".to_string()),
            languages: Some("  ".to_string()),
            photo: None,
        }
    }

    fn result(matched: &[&str], missing: &[&str]) -> MatchResult {
        let total = matched.len() + missing.len();
        MatchResult {
            score: if total == 0 { 0.0 } else { matched.len() as f64 / total as f64 },
            matched: matched.iter().map(|s| s.to_string()).collect(),
            missing: missing.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn assert_within_margins(layout: &DocumentLayout, top_margin: f32) {
        for (page, y, text) in layout.text_runs() {
            if text.starts_with("Page ") && y > layout.height - top_margin {
                continue;
            }
            assert!(
                y >= layout.bottom_margin,
                "'{}' on page {} at {} is below the margin",
                text,
                page + 1,
                y
            );
        }
    }

    #[test]
    fn test_sections_in_order() {
        let prepared = renderer().layout(&fields(), None, &StyleToken::default());
        let texts: Vec<&str> = prepared.layout.text_runs().map(|(_, _, t)| t).collect();

        let position = |needle: &str| texts.iter().position(|t| *t == needle).unwrap();
        assert_eq!(position("Ana Torres"), 0);
        assert!(position("Objective") < position("Professional Summary"));
        assert!(position("Professional Summary") < position("Experience"));
        assert!(position("Experience") < position("Data Analyst - Acme"));
        assert!(position("Data Analyst - Acme") < position("2021 - 2024"));
        assert!(position("Education") < position("Skills"));
        assert!(position("Skills") < position("Certifications"));
        assert!(texts.contains(&"SQL | Power BI"));
        assert!(texts.contains(&"ana@example.com | +54 341 555 0101 | Rosario"));
    }

    #[test]
    fn test_profile_only_report_has_no_score_section() {
        let prepared = renderer().layout(&fields(), None, &StyleToken::default());
        assert!(!prepared.layout.contains_text("Keyword Match"));
        assert!(!prepared.layout.contains_text("Languages"));
        assert_eq!(prepared.layout.page_count(), 1);
    }

    #[test]
    fn test_empty_experience_omits_section() {
        let mut fields = fields();
        fields.experience.clear();
        fields.certifications = None;

        let prepared = renderer().layout(&fields, None, &StyleToken::default());
        assert!(!prepared.layout.contains_text("Experience"));
        assert!(!prepared.layout.contains_text("Certifications"));
        assert!(prepared.layout.contains_text("Education"));
    }

    #[test]
    fn test_score_section_fallbacks() {
        let full = result(&["SQL", "Power BI"], &[]);
        let prepared = renderer().layout(&fields(), Some(&full), &StyleToken::default());
        assert!(prepared.layout.contains_text("Keyword Match"));
        assert!(prepared.layout.contains_text("Match score: 100% (Strong match)"));
        assert!(prepared.layout.contains_text(ALL_COVERED_TEXT));
        assert!(!prepared.layout.contains_text(NO_MATCHED_TEXT));
        assert!(prepared.layout.contains_text("- SQL"));

        let none = result(&[], &["Tableau"]);
        let prepared = renderer().layout(&fields(), Some(&none), &StyleToken::default());
        assert!(prepared.layout.contains_text(NO_MATCHED_TEXT));
        assert!(prepared.layout.contains_text("- Tableau"));
        assert!(!prepared.layout.contains_text(ALL_COVERED_TEXT));
    }

    #[test]
    fn test_progress_bar_uses_tier_color() {
        let fair = result(&["SQL", "Excel", "Python"], &["Tableau", "R"]);
        let prepared = renderer().layout(&fields(), Some(&fair), &StyleToken::default());

        let bars: Vec<(f32, Rgb)> = prepared.layout.pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { width, height, color, .. } if *height == BAR_HEIGHT => Some((*width, *color)),
                _ => None,
            })
            .collect();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].1, Rgb::TRACK);
        assert_eq!(bars[1].1, Rgb::WARNING);
        assert!((bars[1].0 - bars[0].0 * 0.6).abs() < 1e-3);
    }

    #[test]
    fn test_zero_score_draws_only_track() {
        let zero = result(&[], &["Go"]);
        let prepared = renderer().layout(&fields(), Some(&zero), &StyleToken::default());
        let fills = prepared.layout.pages[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { color, .. } if *color == Rgb::ALERT))
            .count();
        assert_eq!(fills, 0);
    }

    #[test]
    fn test_keyword_lists_are_capped() {
        let missing: Vec<String> = (0..20).map(|i| format!("skill{}", i)).collect();
        let missing_refs: Vec<&str> = missing.iter().map(String::as_str).collect();
        let capped = result(&[], &missing_refs);

        let prepared = renderer().layout(&fields(), Some(&capped), &StyleToken::default());
        assert!(prepared.layout.contains_text("- skill14"));
        assert!(!prepared.layout.contains_text("- skill15"));
        assert!(prepared.layout.contains_text("... and 5 more"));
    }

    #[test]
    fn test_long_content_paginates_within_margins() {
        let mut fields = fields();
        fields.experience = (0..30)
            .map(|i| ExperienceEntry {
                role: format!("Engineer {}", i),
                organization: "Initech".to_string(),
                period: "2010 - 2012".to_string(),
                description: "Maintained batch jobs, wrote reports and reviewed pull requests for a large team. "
                    .repeat(3),
            })
            .collect();

        let config = crate::config::Config::default().layout;
        let score = result(&["Engineer"], &["COBOL"]);
        let prepared = renderer().layout(&fields, Some(&score), &StyleToken::default());

        assert!(prepared.layout.page_count() >= 2);
        assert_within_margins(&prepared.layout, config.top_margin);
        assert!(prepared.layout.contains_text("Engineer 29 - Initech"));
        assert!(prepared.layout.contains_text(&format!("Page 1 of {}", prepared.layout.page_count())));
    }

    #[test]
    fn test_bad_photo_falls_back_with_warning() {
        let fields = fields().with_photo(b"not an image".to_vec());
        let prepared = renderer().layout(&fields, None, &StyleToken::default());

        assert!(!prepared.layout.has_photo());
        assert!(prepared.photo.is_none());
        assert!(matches!(prepared.warnings.as_slice(), [RenderWarning::PhotoSkipped(_)]));
        assert!(prepared.layout.contains_text("Ana Torres"));
    }

    #[test]
    fn test_photo_header_uses_two_columns() {
        let photo =
            PreparedPhoto::from_image(DynamicImage::ImageRgb8(RgbImage::new(120, 150))).unwrap();
        let layout = renderer().layout_with_photo(&fields(), None, &StyleToken::default(), Some(&photo));

        assert!(layout.has_photo());
        let name_x = layout.pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { x, text, .. } if text == "Ana Torres" => Some(*x),
                _ => None,
            })
            .unwrap();
        assert!(name_x >= 56.0 + PHOTO_CELL_WIDTH);
        assert!(layout.contains_text("ana@example.com"));

        // The body starts below the photo cell.
        let photo_bottom = layout.pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Photo { y, .. } => Some(*y),
                _ => None,
            })
            .unwrap();
        let objective_y = layout
            .text_runs()
            .find(|(_, _, t)| *t == "Objective")
            .map(|(_, y, _)| y)
            .unwrap();
        assert!(objective_y < photo_bottom);
    }

    #[test]
    fn test_left_header_layout() {
        let style = StyleToken {
            layout: HeaderLayout::Left,
            ..StyleToken::default()
        };
        let prepared = renderer().layout(&fields(), None, &style);
        let name_x = prepared.layout.pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { x, text, .. } if text == "Ana Torres" => Some(*x),
                _ => None,
            })
            .unwrap();
        assert_eq!(name_x, 56.0);
    }

    #[test]
    fn test_generated_on_line() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let prepared = ReportRenderer::default()
            .with_generated_on(Some(date))
            .layout(&fields(), None, &StyleToken::default());
        assert!(prepared.layout.contains_text("Generated on 2026-10-14"));
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let score = result(&["SQL"], &["Tableau"]);
        let report = renderer().render(&fields(), Some(&score), &StyleToken::default()).unwrap();

        assert!(report.bytes.starts_with(b"%PDF"));
        assert_eq!(report.page_count, 1);
        assert!(report.warnings.is_empty());
    }
}
