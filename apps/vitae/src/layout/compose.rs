//! Flattens the renderer's block list into a sequence of styled, wrapped
//! lines ready for pagination. Sizes scale relative to the base font size the
//! same way the live preview styles do.

use crate::layout::font_metrics::{table_for, FontFamily, FontMetricTable};
use crate::layout::page::PageGeometry;
use crate::models::settings::ResumeSettings;
use crate::render::blocks::{HeaderBlock, SectionBlock};

// ────────────────────────────────────────────────────────────────────────────
// Line model
// ────────────────────────────────────────────────────────────────────────────

/// Palette slot a line is painted with; resolved against the theme at paint
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Primary,
    Secondary,
    Text,
    Accent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    Heading,
    Body,
}

/// One paintable line. `advance_pt` is the vertical space the line consumes,
/// including its share of leading; spacer lines have empty text and only an
/// advance.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledLine {
    pub text: String,
    /// Right-aligned companion text on the same baseline (date labels).
    /// Painted Secondary at `right_size_pt`, never wrapped.
    pub right_text: String,
    pub right_size_pt: f32,
    pub indent_pt: f32,
    pub size_pt: f32,
    pub advance_pt: f32,
    pub color: ColorRole,
    pub bold: bool,
    pub role: FontRole,
}

#[derive(Debug, Clone, Copy)]
struct LineStyle {
    size_pt: f32,
    color: ColorRole,
    bold: bool,
    role: FontRole,
    indent_pt: f32,
}

// ────────────────────────────────────────────────────────────────────────────
// Composer
// ────────────────────────────────────────────────────────────────────────────

struct Composer<'a> {
    geometry: &'a PageGeometry,
    heading: &'static FontMetricTable,
    body: &'static FontMetricTable,
    line_height: f32,
    scale: f32,
    gap_factor: f32,
    date_size: f32,
    lines: Vec<StyledLine>,
}

impl<'a> Composer<'a> {
    fn new(settings: &ResumeSettings, geometry: &'a PageGeometry) -> Self {
        // Preview styles scale from a 10pt baseline; the PDF keeps the same
        // ratios so both surfaces break lines in the same places.
        let base = settings.font_size * 0.75;
        let scale = base / 10.0;
        Composer {
            geometry,
            heading: table_for(FontFamily::from_name(&settings.theme.fonts.heading)),
            body: table_for(FontFamily::from_name(&settings.theme.fonts.body)),
            line_height: settings.line_height,
            scale,
            gap_factor: settings.theme.spacing.gap_factor(),
            date_size: 9.0 * scale,
            lines: Vec::new(),
        }
    }

    fn metrics(&self, role: FontRole) -> &'static FontMetricTable {
        match role {
            FontRole::Heading => self.heading,
            FontRole::Body => self.body,
        }
    }

    fn spacer(&mut self, gap_pt: f32) {
        let advance = gap_pt * self.gap_factor;
        if advance <= 0.0 {
            return;
        }
        self.lines.push(StyledLine {
            text: String::new(),
            right_text: String::new(),
            right_size_pt: 0.0,
            indent_pt: 0.0,
            size_pt: 0.0,
            advance_pt: advance,
            color: ColorRole::Text,
            bold: false,
            role: FontRole::Body,
        });
    }

    /// Word-wraps `text` into the content box and emits one line per wrap.
    /// Only the first wrapped line carries the right-aligned label.
    fn push(&mut self, text: &str, right_text: &str, style: LineStyle) {
        let metrics = self.metrics(style.role);
        let mut budget_pt = self.geometry.content_width_pt - style.indent_pt;
        if !right_text.is_empty() {
            let right_metrics = self.metrics(FontRole::Body);
            budget_pt -= right_metrics.measure_str(right_text) * self.date_size + 8.0;
        }
        let budget_em = (budget_pt / style.size_pt).max(1.0);
        let advance = style.size_pt * self.line_height;

        let wrapped = metrics.wrap_lines(text, budget_em);
        if wrapped.is_empty() && !right_text.is_empty() {
            // A date with no left text still occupies a line.
            self.emit(String::new(), right_text, style, advance);
            return;
        }
        for (i, line) in wrapped.into_iter().enumerate() {
            let right = if i == 0 { right_text } else { "" };
            self.emit(line, right, style, advance);
        }
    }

    fn emit(&mut self, text: String, right_text: &str, style: LineStyle, advance: f32) {
        self.lines.push(StyledLine {
            text,
            right_text: right_text.to_string(),
            right_size_pt: self.date_size,
            indent_pt: style.indent_pt,
            size_pt: style.size_pt,
            advance_pt: advance,
            color: style.color,
            bold: style.bold,
            role: style.role,
        });
    }

    fn bullets(&mut self, items: &[String], indent_pt: f32) {
        let style = LineStyle {
            size_pt: 9.0 * self.scale,
            color: ColorRole::Text,
            bold: false,
            role: FontRole::Body,
            indent_pt,
        };
        for item in items {
            if item.is_empty() {
                continue;
            }
            self.push(&format!("\u{2022} {item}"), "", style);
        }
    }

    fn section_title(&mut self, title: &str) {
        self.push(
            title,
            "",
            LineStyle {
                size_pt: 14.0 * self.scale,
                color: ColorRole::Primary,
                bold: true,
                role: FontRole::Heading,
                indent_pt: 0.0,
            },
        );
        self.spacer(6.0 * self.scale);
    }

    /// Entry heading with a right-aligned date and an optional verified mark.
    fn entry_heading(&mut self, text: &str, date: &str, size_pt: f32, verified: bool) {
        let label = if verified {
            format!("{text} \u{2713}")
        } else {
            text.to_string()
        };
        self.push(
            &label,
            date,
            LineStyle {
                size_pt,
                color: ColorRole::Text,
                bold: true,
                role: FontRole::Body,
                indent_pt: 0.0,
            },
        );
    }

    fn sub_line(&mut self, text: &str, color: ColorRole, size_pt: f32) {
        if text.is_empty() {
            return;
        }
        self.push(
            text,
            "",
            LineStyle {
                size_pt,
                color,
                bold: false,
                role: FontRole::Body,
                indent_pt: 0.0,
            },
        );
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Flattens header and body blocks into the line sequence the paginator
/// slices. Pure; an empty document yields an empty line list.
pub fn compose_lines(
    header: &HeaderBlock,
    blocks: &[SectionBlock],
    settings: &ResumeSettings,
    geometry: &PageGeometry,
) -> Vec<StyledLine> {
    let mut c = Composer::new(settings, geometry);
    let scale = c.scale;

    // Header: name, title, contact row, summary.
    let name = if header.full_name.is_empty() {
        "Your Name"
    } else {
        header.full_name.as_str()
    };
    c.push(
        name,
        "",
        LineStyle {
            size_pt: 24.0 * scale,
            color: ColorRole::Text,
            bold: true,
            role: FontRole::Heading,
            indent_pt: 0.0,
        },
    );
    if !header.title.is_empty() {
        c.sub_line(&header.title, ColorRole::Primary, 13.0 * scale);
    }
    if !header.contacts.is_empty() {
        let row = header.contacts.join(" \u{2022} ");
        c.sub_line(&row, ColorRole::Secondary, 9.0 * scale);
    }
    if !header.summary.is_empty() {
        c.spacer(6.0 * scale);
        c.sub_line(&header.summary, ColorRole::Text, 9.0 * scale);
    }
    c.spacer(20.0 * scale);

    for block in blocks {
        match block {
            SectionBlock::Experience { title, entries } => {
                c.section_title(title);
                for entry in entries {
                    c.entry_heading(&entry.position, &entry.date_range, 11.0 * scale, entry.verified);
                    c.sub_line(&entry.company_line, ColorRole::Secondary, 10.0 * scale);
                    c.bullets(&entry.bullets, 12.0);
                    c.spacer(12.0 * scale);
                }
            }
            SectionBlock::Education { title, entries } => {
                c.section_title(title);
                for entry in entries {
                    c.entry_heading(&entry.degree_line, &entry.date_range, 10.0 * scale, entry.verified);
                    c.sub_line(&entry.institution_line, ColorRole::Secondary, 9.0 * scale);
                    c.sub_line(&entry.gpa_line, ColorRole::Secondary, 9.0 * scale);
                    c.bullets(&entry.honors, 12.0);
                    c.spacer(8.0 * scale);
                }
            }
            SectionBlock::Projects { title, entries } => {
                c.section_title(title);
                for entry in entries {
                    c.entry_heading(&entry.name, &entry.date_range, 10.0 * scale, entry.verified);
                    c.sub_line(&entry.description, ColorRole::Text, 9.0 * scale);
                    if !entry.technologies.is_empty() {
                        let row = entry.technologies.join(" \u{2022} ");
                        c.sub_line(&row, ColorRole::Accent, 8.0 * scale);
                    }
                    c.bullets(&entry.highlights, 12.0);
                    c.spacer(10.0 * scale);
                }
            }
            SectionBlock::Skills { title, groups } => {
                c.section_title(title);
                for group in groups {
                    c.sub_line(
                        group.category.as_str(),
                        ColorRole::Secondary,
                        9.0 * scale,
                    );
                    let row = group.chips.join("  |  ");
                    c.sub_line(&row, ColorRole::Primary, 8.0 * scale);
                    c.spacer(8.0 * scale);
                }
            }
            SectionBlock::Certifications { title, entries } => {
                c.section_title(title);
                for entry in entries {
                    c.entry_heading(&entry.name, &entry.date_label, 10.0 * scale, entry.verified);
                    c.sub_line(&entry.issuer_line, ColorRole::Secondary, 9.0 * scale);
                    c.spacer(6.0 * scale);
                }
            }
            SectionBlock::Achievements { title, entries } => {
                c.section_title(title);
                for entry in entries {
                    c.entry_heading(&entry.title, &entry.date_label, 10.0 * scale, entry.verified);
                    c.sub_line(&entry.issuer, ColorRole::Secondary, 9.0 * scale);
                    c.sub_line(&entry.description, ColorRole::Text, 9.0 * scale);
                    c.spacer(8.0 * scale);
                }
            }
        }
        c.spacer(10.0 * scale);
    }

    c.lines
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
