//! Render settings: theme palette, typography roles, and page knobs.

use serde::{Deserialize, Serialize};

/// Named palette slots, as hex strings ("#2563eb").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub text: String,
    pub background: String,
    pub accent: String,
}

/// Font role assignments. Names are mapped onto the builtin PDF families
/// at export time (see `layout::font_metrics`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeFonts {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Compact,
    Normal,
    Relaxed,
}

impl Spacing {
    /// Multiplier applied to inter-item gaps at layout time.
    pub fn gap_factor(&self) -> f32 {
        match self {
            Spacing::Compact => 0.75,
            Spacing::Normal => 1.0,
            Spacing::Relaxed => 1.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeTheme {
    pub id: String,
    pub name: String,
    pub colors: ThemeColors,
    pub fonts: ThemeFonts,
    pub spacing: Spacing,
}

/// Theme plus the page-level knobs the export and preview honor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSettings {
    pub theme: ResumeTheme,
    /// Base font size in points; section styles scale relative to it.
    pub font_size: f32,
    /// Line height multiplier.
    pub line_height: f32,
    /// Page margin in points, applied on all four sides.
    pub margins: f32,
    #[serde(default = "default_true")]
    pub show_icons: bool,
    #[serde(default = "default_true")]
    pub show_verification_badges: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ResumeSettings {
    fn default() -> Self {
        ResumeSettings {
            theme: default_theme(),
            font_size: 14.0,
            line_height: 1.6,
            margins: 40.0,
            show_icons: true,
            show_verification_badges: true,
        }
    }
}

/// Partial update for [`ResumeSettings`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub theme: Option<ResumeTheme>,
    pub font_size: Option<f32>,
    pub line_height: Option<f32>,
    pub margins: Option<f32>,
    pub show_icons: Option<bool>,
    pub show_verification_badges: Option<bool>,
}

fn theme(id: &str, name: &str, colors: [&str; 5]) -> ResumeTheme {
    let [primary, secondary, text, background, accent] = colors;
    ResumeTheme {
        id: id.to_string(),
        name: name.to_string(),
        colors: ThemeColors {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            text: text.to_string(),
            background: background.to_string(),
            accent: accent.to_string(),
        },
        fonts: ThemeFonts {
            heading: "Helvetica".to_string(),
            body: "Helvetica".to_string(),
        },
        spacing: Spacing::Normal,
    }
}

pub fn default_theme() -> ResumeTheme {
    theme(
        "professional",
        "Professional Blue",
        ["#2563eb", "#64748b", "#1e293b", "#ffffff", "#3b82f6"],
    )
}

/// The six preset palettes offered by the theme customizer.
pub fn preset_themes() -> Vec<ResumeTheme> {
    vec![
        default_theme(),
        theme(
            "modern",
            "Modern Purple",
            ["#7c3aed", "#6b7280", "#111827", "#ffffff", "#8b5cf6"],
        ),
        theme(
            "elegant",
            "Elegant Black",
            ["#18181b", "#71717a", "#09090b", "#ffffff", "#3f3f46"],
        ),
        theme(
            "creative",
            "Creative Teal",
            ["#0d9488", "#64748b", "#0f172a", "#ffffff", "#14b8a6"],
        ),
        theme(
            "warm",
            "Warm Orange",
            ["#ea580c", "#78716c", "#1c1917", "#ffffff", "#f97316"],
        ),
        theme(
            "minimal",
            "Minimal Gray",
            ["#475569", "#94a3b8", "#1e293b", "#ffffff", "#64748b"],
        ),
    ]
}
