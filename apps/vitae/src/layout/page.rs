//! Fixed page geometry for the export artifact.

use crate::models::settings::ResumeSettings;

/// A4 in PostScript points.
pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Physical page dimensions and the usable content box, derived from the
/// fixed A4 size and the margin setting.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    /// Applied on all four sides.
    pub margin_pt: f32,
    pub content_width_pt: f32,
    pub content_height_pt: f32,
}

impl PageGeometry {
    pub fn from_settings(settings: &ResumeSettings) -> Self {
        // Clamp so a pathological margin can never produce a non-positive
        // content box.
        let margin = settings.margins.clamp(0.0, A4_WIDTH_PT / 2.0 - 10.0);
        PageGeometry {
            page_width_pt: A4_WIDTH_PT,
            page_height_pt: A4_HEIGHT_PT,
            margin_pt: margin,
            content_width_pt: A4_WIDTH_PT - 2.0 * margin,
            content_height_pt: A4_HEIGHT_PT - 2.0 * margin,
        }
    }
}
