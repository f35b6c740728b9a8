//! Selection of the "most in view" tutorial section.
//!
//! Observations come from a platform visibility mechanism (an
//! `IntersectionObserver` in the webview) as partial batches. The tracker
//! merges them into a per-section snapshot and picks a winner; it is
//! level-triggered, so coalesced or reordered batches are harmless.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::SectionId;

/// Distances closer than this (in px) are treated as a tie.
pub const TOP_TIE_TOLERANCE_PX: f64 = 1.0;

/// One observation of a section relative to the scroll root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionVisibility {
    pub id: SectionId,
    /// Section top edge minus scroll root top edge, in px.
    pub top_offset: f64,
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
}

impl SectionVisibility {
    #[must_use]
    pub fn new(id: SectionId, top_offset: f64, intersection_ratio: f64, is_intersecting: bool) -> Self {
        Self {
            id,
            top_offset,
            intersection_ratio,
            is_intersecting,
        }
    }

    fn is_candidate(&self) -> bool {
        self.is_intersecting && self.intersection_ratio > 0.0
    }

    fn distance(&self) -> f64 {
        self.top_offset.abs()
    }

    /// True when `self` should win over `other`.
    fn beats(&self, other: &Self) -> bool {
        let (a, b) = (self.distance(), other.distance());
        if (a - b).abs() <= TOP_TIE_TOLERANCE_PX {
            return self.intersection_ratio > other.intersection_ratio;
        }
        a < b
    }
}

/// Picks the intersecting section closest to the root's top edge.
///
/// Ties within [`TOP_TIE_TOLERANCE_PX`] prefer the higher intersection ratio,
/// then the earlier entry. Returns `None` when nothing intersects.
#[must_use]
pub fn select_most_visible<'a, I>(entries: I) -> Option<&'a SectionId>
where
    I: IntoIterator<Item = &'a SectionVisibility>,
{
    let mut best: Option<&SectionVisibility> = None;
    for entry in entries.into_iter().filter(|e| e.is_candidate()) {
        match best {
            Some(current) if !entry.beats(current) => {}
            _ => best = Some(entry),
        }
    }
    best.map(|entry| &entry.id)
}

/// Stateful tracker over an ordered list of target sections.
#[derive(Debug, Clone, Default)]
pub struct VisibilityTracker {
    targets: Vec<SectionId>,
    latest: HashMap<SectionId, SectionVisibility>,
    active: Option<SectionId>,
}

impl VisibilityTracker {
    #[must_use]
    pub fn new(targets: Vec<SectionId>) -> Self {
        Self {
            targets,
            latest: HashMap::new(),
            active: None,
        }
    }

    /// Last emitted active section.
    #[must_use]
    pub fn active(&self) -> Option<&SectionId> {
        self.active.as_ref()
    }

    /// Replace the observed targets (stack switch, scroll root change).
    ///
    /// Observations are dropped; the active id survives only if it is
    /// still a target.
    pub fn rebind(&mut self, targets: Vec<SectionId>) {
        self.latest.clear();
        if let Some(active) = self.active.as_ref() {
            if !targets.contains(active) {
                self.active = None;
            }
        }
        self.targets = targets;
    }

    /// Fold a batch of observations in and return the new active section,
    /// or `None` if it did not change.
    ///
    /// Observations for ids outside the target list are ignored. When no
    /// section intersects, the previous active section is kept.
    pub fn observe<I>(&mut self, batch: I) -> Option<SectionId>
    where
        I: IntoIterator<Item = SectionVisibility>,
    {
        for entry in batch {
            if self.targets.contains(&entry.id) {
                self.latest.insert(entry.id.clone(), entry);
            }
        }

        let ordered = self.targets.iter().filter_map(|id| self.latest.get(id));
        let winner = select_most_visible(ordered)?.clone();
        if self.active.as_ref() == Some(&winner) {
            return None;
        }
        self.active = Some(winner.clone());
        Some(winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &'static str) -> SectionId {
        SectionId::from_static(value)
    }

    fn seen(value: &'static str, top: f64, ratio: f64) -> SectionVisibility {
        SectionVisibility::new(id(value), top, ratio, ratio > 0.0)
    }

    fn tracker() -> VisibilityTracker {
        VisibilityTracker::new(vec![id("intro"), id("setup"), id("compose")])
    }

    #[test]
    fn only_intersecting_middle_section_wins() {
        let mut tracker = tracker();
        let emitted = tracker.observe([
            seen("intro", -900.0, 0.0),
            seen("setup", -40.0, 0.6),
            seen("compose", 800.0, 0.0),
        ]);
        assert_eq!(emitted, Some(id("setup")));
        assert_eq!(tracker.active(), Some(&id("setup")));
    }

    #[test]
    fn closest_top_edge_wins() {
        let entries = [seen("intro", -300.0, 0.2), seen("setup", 120.0, 0.9)];
        assert_eq!(select_most_visible(&entries), Some(&id("setup")));
    }

    #[test]
    fn near_ties_prefer_higher_ratio() {
        let entries = [seen("intro", 10.0, 0.3), seen("setup", -10.5, 0.8)];
        assert_eq!(select_most_visible(&entries), Some(&id("setup")));

        // outside the tolerance the distance decides, whatever the ratio
        let entries = [seen("intro", 10.0, 0.3), seen("setup", -12.0, 0.8)];
        assert_eq!(select_most_visible(&entries), Some(&id("intro")));
    }

    #[test]
    fn exact_ties_keep_document_order() {
        let entries = [seen("intro", 5.0, 0.5), seen("setup", 5.0, 0.5)];
        assert_eq!(select_most_visible(&entries), Some(&id("intro")));
    }

    #[test]
    fn flagged_intersecting_with_zero_ratio_is_skipped() {
        let entries = [SectionVisibility::new(id("intro"), 0.0, 0.0, true)];
        assert_eq!(select_most_visible(&entries), None);
    }

    #[test]
    fn no_intersection_keeps_previous_active() {
        let mut tracker = tracker();
        tracker.observe([seen("intro", 0.0, 1.0)]);
        let emitted = tracker.observe([seen("intro", -2000.0, 0.0)]);
        assert_eq!(emitted, None);
        assert_eq!(tracker.active(), Some(&id("intro")));
    }

    #[test]
    fn unchanged_winner_is_not_reemitted() {
        let mut tracker = tracker();
        assert_eq!(tracker.observe([seen("intro", 0.0, 1.0)]), Some(id("intro")));
        assert_eq!(tracker.observe([seen("intro", -20.0, 0.9)]), None);
    }

    #[test]
    fn partial_batches_merge_with_snapshot() {
        let mut tracker = tracker();
        tracker.observe([seen("intro", -200.0, 0.3), seen("setup", 50.0, 0.7)]);
        assert_eq!(tracker.active(), Some(&id("setup")));
        // only intro reports again; setup's last observation still counts
        assert_eq!(tracker.observe([seen("intro", -100.0, 0.5)]), None);
        assert_eq!(tracker.active(), Some(&id("setup")));
    }

    #[test]
    fn unknown_targets_are_ignored() {
        let mut tracker = tracker();
        assert_eq!(tracker.observe([seen("missing", 0.0, 1.0)]), None);
        assert_eq!(tracker.active(), None);
    }

    #[test]
    fn rebind_drops_stale_state() {
        let mut tracker = tracker();
        tracker.observe([seen("setup", 0.0, 1.0)]);
        tracker.rebind(vec![id("setup"), id("install")]);
        assert_eq!(tracker.active(), Some(&id("setup")));

        tracker.rebind(vec![id("install")]);
        assert_eq!(tracker.active(), None);
        assert_eq!(tracker.observe([seen("setup", 0.0, 1.0)]), None);
        assert_eq!(tracker.observe([seen("install", 0.0, 1.0)]), Some(id("install")));
    }
}
