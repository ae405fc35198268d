//! Slices the composed line flow into consecutive page frames.

use crate::layout::compose::StyledLine;
use crate::layout::page::PageGeometry;

/// A line placed on a page, `y_pt` measured from the top of the content box.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub line: StyledLine,
    pub y_pt: f32,
}

/// One fixed-height page frame; the last frame may be shorter.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFrame {
    pub lines: Vec<PositionedLine>,
    /// Vertical space actually consumed on this frame.
    pub used_height_pt: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedLayout {
    pub pages: Vec<PageFrame>,
    pub total_height_pt: f32,
}

impl PaginatedLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Minimum one page even for an empty document:
/// `ceil(total_height / page_content_height).max(1)`.
pub fn estimated_page_count(total_height_pt: f32, content_height_pt: f32) -> usize {
    if content_height_pt <= 0.0 {
        return 1;
    }
    ((total_height_pt / content_height_pt).ceil() as usize).max(1)
}

/// Distributes lines across page frames. Lines are atomic: a line whose
/// advance would overflow the current frame starts the next one. Trailing
/// spacer lines never force an empty page.
pub fn paginate(lines: Vec<StyledLine>, geometry: &PageGeometry) -> PaginatedLayout {
    let content_height = geometry.content_height_pt;
    let total_height_pt: f32 = lines.iter().map(|l| l.advance_pt).sum();

    let mut pages: Vec<PageFrame> = Vec::new();
    let mut current: Vec<PositionedLine> = Vec::new();
    let mut cursor = 0.0_f32;

    for line in lines {
        if !current.is_empty() && cursor + line.advance_pt > content_height {
            pages.push(PageFrame {
                lines: std::mem::take(&mut current),
                used_height_pt: cursor,
            });
            cursor = 0.0;
            // A spacer at a page boundary is swallowed; the break itself is
            // the gap.
            if line.text.is_empty() && line.right_text.is_empty() {
                continue;
            }
        }
        let advance = line.advance_pt;
        current.push(PositionedLine { line, y_pt: cursor });
        cursor += advance;
    }

    if !current.is_empty() || pages.is_empty() {
        pages.push(PageFrame {
            lines: current,
            used_height_pt: cursor,
        });
    }

    PaginatedLayout {
        pages,
        total_height_pt,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
