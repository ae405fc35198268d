//! Paints a paginated layout into PDF bytes with printpdf builtin fonts.

use std::collections::HashMap;

use bytes::Bytes;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, Rgb};

use crate::errors::AppError;
use crate::layout::compose::{ColorRole, FontRole};
use crate::layout::font_metrics::{table_for, FontFamily};
use crate::layout::page::PageGeometry;
use crate::layout::paginate::PaginatedLayout;
use crate::models::settings::ResumeTheme;

const PT_TO_MM: f32 = 25.4 / 72.0;

fn mm(pt: f32) -> Mm {
    Mm(pt * PT_TO_MM)
}

/// Parses a `#rrggbb` hex color; anything malformed paints black rather than
/// failing the render.
fn parse_hex(hex: &str) -> (f32, f32, f32) {
    let raw = hex.trim_start_matches('#');
    if raw.len() != 6 {
        return (0.0, 0.0, 0.0);
    }
    let channel = |i: usize| {
        u8::from_str_radix(&raw[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .unwrap_or(0.0)
    };
    (channel(0), channel(2), channel(4))
}

fn resolve_color(role: ColorRole, theme: &ResumeTheme) -> Color {
    let hex = match role {
        ColorRole::Primary => &theme.colors.primary,
        ColorRole::Secondary => &theme.colors.secondary,
        ColorRole::Text => &theme.colors.text,
        ColorRole::Accent => &theme.colors.accent,
    };
    let (r, g, b) = parse_hex(hex);
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn builtin(family: FontFamily, bold: bool) -> BuiltinFont {
    match (family, bold) {
        (FontFamily::Helvetica, false) => BuiltinFont::Helvetica,
        (FontFamily::Helvetica, true) => BuiltinFont::HelveticaBold,
        (FontFamily::Times, false) => BuiltinFont::TimesRoman,
        (FontFamily::Times, true) => BuiltinFont::TimesBold,
        (FontFamily::Courier, false) => BuiltinFont::Courier,
        (FontFamily::Courier, true) => BuiltinFont::CourierBold,
    }
}

/// Lazily-registered builtin font refs, shared across pages.
struct FontSet {
    heading: FontFamily,
    body: FontFamily,
    cache: HashMap<(FontFamily, bool), IndirectFontRef>,
}

impl FontSet {
    fn new(theme: &ResumeTheme) -> Self {
        FontSet {
            heading: FontFamily::from_name(&theme.fonts.heading),
            body: FontFamily::from_name(&theme.fonts.body),
            cache: HashMap::new(),
        }
    }

    fn family_for(&self, role: FontRole) -> FontFamily {
        match role {
            FontRole::Heading => self.heading,
            FontRole::Body => self.body,
        }
    }

    fn get(
        &mut self,
        doc: &PdfDocumentReference,
        family: FontFamily,
        bold: bool,
    ) -> Result<IndirectFontRef, AppError> {
        if let Some(font) = self.cache.get(&(family, bold)) {
            return Ok(font.clone());
        }
        let font = doc
            .add_builtin_font(builtin(family, bold))
            .map_err(|e| AppError::Render(format!("failed to register builtin font: {e}")))?;
        self.cache.insert((family, bold), font.clone());
        Ok(font)
    }
}

/// Renders the layout into a complete PDF, one page per frame.
pub fn render_document(
    layout: &PaginatedLayout,
    geometry: &PageGeometry,
    theme: &ResumeTheme,
) -> Result<Bytes, AppError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Resume",
        mm(geometry.page_width_pt),
        mm(geometry.page_height_pt),
        "content",
    );
    let mut fonts = FontSet::new(theme);

    for (index, frame) in layout.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) =
                doc.add_page(mm(geometry.page_width_pt), mm(geometry.page_height_pt), "content");
            doc.get_page(page).get_layer(layer)
        };

        for positioned in &frame.lines {
            let line = &positioned.line;
            // Baseline sits one em below the line's top edge.
            let baseline_from_top = geometry.margin_pt + positioned.y_pt + line.size_pt;
            let y = mm(geometry.page_height_pt - baseline_from_top);

            if !line.text.is_empty() {
                let family = fonts.family_for(line.role);
                let font = fonts.get(&doc, family, line.bold)?;
                layer.set_fill_color(resolve_color(line.color, theme));
                layer.use_text(
                    line.text.clone(),
                    line.size_pt,
                    mm(geometry.margin_pt + line.indent_pt),
                    y,
                    &font,
                );
            }

            if !line.right_text.is_empty() {
                let family = fonts.family_for(FontRole::Body);
                let font = fonts.get(&doc, family, false)?;
                let width_pt =
                    table_for(family).measure_str(&line.right_text) * line.right_size_pt;
                let x = geometry.margin_pt + geometry.content_width_pt - width_pt;
                layer.set_fill_color(resolve_color(ColorRole::Secondary, theme));
                layer.use_text(line.right_text.clone(), line.right_size_pt, mm(x), y, &font);
            }
        }
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| AppError::Render(format!("failed to serialize PDF: {e}")))?;
    Ok(Bytes::from(bytes))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
