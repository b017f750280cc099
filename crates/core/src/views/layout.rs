use folio_protocol::{SectionBounds, SectionId, Viewport};

use crate::content::PortfolioContent;
use crate::model::registry::SectionRegistry;
use crate::model::tracker::SectionLayout;

use super::canvas::LayoutMetrics;
use super::page::{SectionState, render_footer, render_section};

/// Vertical placement of every section in document coordinates.
///
/// Sections are stacked in registry order starting at 0, each as tall as its
/// rendered content (the hero at least one viewport). The footer follows the
/// last section and belongs to no section.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    sections: Vec<(SectionId, SectionBounds)>,
    footer: SectionBounds,
    viewport: Viewport,
}

impl PageLayout {
    pub fn compute(
        content: &PortfolioContent,
        registry: &SectionRegistry,
        state: &SectionState<'_>,
        metrics: &LayoutMetrics,
        viewport: &Viewport,
    ) -> Self {
        let mut top = 0.0;
        let sections = registry
            .iter()
            .map(|id| {
                let rendered = render_section(id, content, state, metrics, viewport, top);
                let bounds = SectionBounds::from_offset(top, rendered.height);
                top = bounds.bottom;
                (id.clone(), bounds)
            })
            .collect();
        let footer = render_footer(content, metrics, viewport.width, top);
        Self {
            sections,
            footer: SectionBounds::from_offset(top, footer.height),
            viewport: *viewport,
        }
    }

    pub fn sections(&self) -> &[(SectionId, SectionBounds)] {
        &self.sections
    }

    pub fn footer(&self) -> SectionBounds {
        self.footer
    }

    pub fn document_height(&self) -> f64 {
        self.footer.bottom
    }

    /// Largest scroll offset that still fills the viewport.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport.height).max(0.0)
    }

    pub fn clamp_scroll(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_scroll())
    }

    /// Whether the layout was computed for a differently sized viewport.
    pub fn is_stale(&self, viewport: &Viewport) -> bool {
        self.viewport.width != viewport.width || self.viewport.height != viewport.height
    }
}

impl SectionLayout for PageLayout {
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds> {
        self.sections.as_slice().bounds(id)
    }
}
