use std::collections::HashMap;

use folio_protocol::{SectionBounds, SectionId};
use tracing::debug;

use super::registry::SectionRegistry;

/// Height of the fixed header the probe compensates for, in pixels.
pub const DEFAULT_HEADER_OFFSET: f64 = 100.0;

/// Resolves the rendered geometry of a section.
///
/// `None` means the section is not laid out yet (not mounted); the tracker
/// skips it.
pub trait SectionLayout {
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds>;
}

impl SectionLayout for HashMap<SectionId, SectionBounds> {
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds> {
        self.get(id).copied()
    }
}

impl SectionLayout for [(SectionId, SectionBounds)] {
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds> {
        self.iter().find(|(s, _)| s == id).map(|(_, b)| *b)
    }
}

impl SectionLayout for Vec<(SectionId, SectionBounds)> {
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds> {
        self.as_slice().bounds(id)
    }
}

impl<L: SectionLayout + ?Sized> SectionLayout for &L {
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds> {
        (**self).bounds(id)
    }
}

/// Maps the scroll offset to the section under the header.
///
/// On every scroll event the probe (`offset + header_offset`) is tested
/// against each registered section in document order; the first section whose
/// half-open `[top, bottom)` interval contains it becomes active. When nothing
/// matches the previous section stays active.
#[derive(Debug, Clone)]
pub struct ActiveSectionTracker {
    registry: SectionRegistry,
    header_offset: f64,
    active: SectionId,
}

impl ActiveSectionTracker {
    pub fn new(registry: SectionRegistry, header_offset: f64) -> Self {
        let active = registry.first().clone();
        Self {
            registry,
            header_offset,
            active,
        }
    }

    pub fn active(&self) -> &SectionId {
        &self.active
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn header_offset(&self) -> f64 {
        self.header_offset
    }

    pub fn probe(&self, scroll_offset: f64) -> f64 {
        scroll_offset + self.header_offset
    }

    /// First section, in document order, containing `probe`.
    pub fn locate<L: SectionLayout + ?Sized>(&self, probe: f64, layout: &L) -> Option<&SectionId> {
        self.registry
            .iter()
            .find(|id| layout.bounds(id).is_some_and(|b| b.contains(probe)))
    }

    /// Handle one scroll event. Returns the new active section when it
    /// changed; repeated calls with the same inputs return `None`.
    pub fn on_scroll<L: SectionLayout + ?Sized>(
        &mut self,
        scroll_offset: f64,
        layout: &L,
    ) -> Option<SectionId> {
        let probe = self.probe(scroll_offset);
        let found = self.locate(probe, layout)?;
        if *found == self.active {
            return None;
        }
        let found = found.clone();
        debug!(from = %self.active, to = %found, probe, "active section changed");
        self.active = found.clone();
        Some(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn two_sections() -> (ActiveSectionTracker, Vec<(SectionId, SectionBounds)>) {
        let registry = SectionRegistry::new(["hero", "about"]).unwrap();
        let layout = vec![
            (SectionId::from("hero"), SectionBounds::new(0.0, 500.0)),
            (SectionId::from("about"), SectionBounds::new(500.0, 1200.0)),
        ];
        (ActiveSectionTracker::new(registry, DEFAULT_HEADER_OFFSET), layout)
    }

    #[test]
    fn defaults_to_first_section() {
        let (tracker, _) = two_sections();
        assert_eq!(tracker.active(), &"hero");
    }

    #[test]
    fn offset_450_selects_about() {
        let (mut tracker, layout) = two_sections();
        let changed = tracker.on_scroll(450.0, &layout);
        assert_eq!(changed.as_deref(), Some("about"));
        assert_eq!(tracker.active(), &"about");
    }

    #[test]
    fn offset_0_selects_hero() {
        let (mut tracker, layout) = two_sections();
        tracker.on_scroll(450.0, &layout);
        assert_eq!(tracker.on_scroll(0.0, &layout).as_deref(), Some("hero"));
    }

    #[test]
    fn boundary_belongs_to_lower_section() {
        let (mut tracker, layout) = two_sections();
        // probe 500 == about.top
        tracker.on_scroll(400.0, &layout);
        assert_eq!(tracker.active(), &"about");
        // probe 499 still in hero
        tracker.on_scroll(399.0, &layout);
        assert_eq!(tracker.active(), &"hero");
    }

    #[test]
    fn no_match_keeps_previous() {
        let (mut tracker, layout) = two_sections();
        tracker.on_scroll(450.0, &layout);
        assert_eq!(tracker.on_scroll(5_000.0, &layout), None);
        assert_eq!(tracker.active(), &"about");
        assert_eq!(tracker.on_scroll(-500.0, &layout), None);
        assert_eq!(tracker.active(), &"about");
    }

    #[test]
    fn repeated_event_is_not_a_change() {
        let (mut tracker, layout) = two_sections();
        assert!(tracker.on_scroll(450.0, &layout).is_some());
        assert!(tracker.on_scroll(450.0, &layout).is_none());
        assert_eq!(tracker.active(), &"about");
    }

    #[test]
    fn unmounted_sections_are_skipped() {
        let registry = SectionRegistry::new(["hero", "about", "skills"]).unwrap();
        let mut tracker = ActiveSectionTracker::new(registry, DEFAULT_HEADER_OFFSET);
        // "about" not laid out yet.
        let layout = vec![
            (SectionId::from("hero"), SectionBounds::new(0.0, 500.0)),
            (SectionId::from("skills"), SectionBounds::new(500.0, 900.0)),
        ];
        assert_eq!(tracker.on_scroll(450.0, &layout).as_deref(), Some("skills"));
    }

    #[test]
    fn overlapping_bounds_prefer_document_order() {
        let registry = SectionRegistry::new(["hero", "about"]).unwrap();
        let mut tracker = ActiveSectionTracker::new(registry, 0.0);
        let mut layout = HashMap::new();
        layout.insert(SectionId::from("about"), SectionBounds::new(0.0, 800.0));
        layout.insert(SectionId::from("hero"), SectionBounds::new(0.0, 600.0));
        tracker.on_scroll(300.0, &layout);
        assert_eq!(tracker.active(), &"hero");
        tracker.on_scroll(700.0, &layout);
        assert_eq!(tracker.active(), &"about");
    }

    fn contiguous(heights: &[u16]) -> Vec<(SectionId, SectionBounds)> {
        let mut top = 0.0;
        heights
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let bounds = SectionBounds::from_offset(top, f64::from(*h));
                top = bounds.bottom;
                (SectionId::from(format!("s{i}")), bounds)
            })
            .collect()
    }

    proptest! {
        #[test]
        fn selects_the_unique_containing_section(
            heights in prop::collection::vec(1u16..2_000, 1..10),
            offset in -200.0f64..25_000.0,
        ) {
            let layout = contiguous(&heights);
            let registry = SectionRegistry::new(layout.iter().map(|(id, _)| id.as_str())).unwrap();
            let mut tracker = ActiveSectionTracker::new(registry, DEFAULT_HEADER_OFFSET);
            let before = tracker.active().clone();
            tracker.on_scroll(offset, &layout);

            let probe = offset + DEFAULT_HEADER_OFFSET;
            let containing: Vec<&SectionId> = layout
                .iter()
                .filter(|(_, b)| b.contains(probe))
                .map(|(id, _)| id)
                .collect();
            prop_assert!(containing.len() <= 1);
            match containing.first() {
                Some(id) => prop_assert_eq!(tracker.active(), *id),
                None => prop_assert_eq!(tracker.active(), &before),
            }
        }

        #[test]
        fn second_identical_event_changes_nothing(
            heights in prop::collection::vec(1u16..2_000, 1..10),
            offset in 0.0f64..20_000.0,
        ) {
            let layout = contiguous(&heights);
            let registry = SectionRegistry::new(layout.iter().map(|(id, _)| id.as_str())).unwrap();
            let mut tracker = ActiveSectionTracker::new(registry, DEFAULT_HEADER_OFFSET);
            tracker.on_scroll(offset, &layout);
            let after_first = tracker.active().clone();
            prop_assert!(tracker.on_scroll(offset, &layout).is_none());
            prop_assert_eq!(tracker.active(), &after_first);
        }
    }
}
