use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::model::SectionId;

//
// ─── SECTION STATUS ───────────────────────────────────────────────────────────
//

/// Display classification of a section in the navigation outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionStatus {
    Completed,
    Current,
    Locked,
}

impl SectionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SectionStatus::Completed => "completed",
            SectionStatus::Current => "current",
            SectionStatus::Locked => "locked",
        }
    }
}

//
// ─── PROGRESS STATE ───────────────────────────────────────────────────────────
//

/// Completion record for a single stack.
///
/// Completed ids are kept in a set, so marking twice never duplicates an
/// entry. The record does not check ids against the stack's sections; see
/// [`ProgressState::summary`] for how unknown ids are treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    completed: BTreeSet<SectionId>,
    current: Option<SectionId>,
    last_updated: DateTime<Utc>,
}

impl ProgressState {
    /// Fresh state: nothing completed, no current section.
    #[must_use]
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            completed: BTreeSet::new(),
            current: None,
            last_updated: now,
        }
    }

    /// Rehydrate a state from persisted parts.
    #[must_use]
    pub fn from_persisted(
        completed: impl IntoIterator<Item = SectionId>,
        current: Option<SectionId>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            completed: completed.into_iter().collect(),
            current,
            last_updated,
        }
    }

    #[must_use]
    pub fn completed(&self) -> &BTreeSet<SectionId> {
        &self.completed
    }

    #[must_use]
    pub fn current(&self) -> Option<&SectionId> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    #[must_use]
    pub fn is_completed(&self, id: &SectionId) -> bool {
        self.completed.contains(id)
    }

    /// Adds `id` to the completed set. Re-marking only refreshes the timestamp.
    pub fn mark_complete(&mut self, id: SectionId, now: DateTime<Utc>) {
        self.completed.insert(id);
        self.last_updated = now;
    }

    /// Removes `id` from the completed set if present.
    pub fn unmark(&mut self, id: &SectionId, now: DateTime<Utc>) {
        self.completed.remove(id);
        self.last_updated = now;
    }

    pub fn set_current(&mut self, id: Option<SectionId>, now: DateTime<Utc>) {
        self.current = id;
        self.last_updated = now;
    }

    pub fn reset(&mut self, now: DateTime<Utc>) {
        *self = Self::empty(now);
    }

    /// `completed` wins over `current`; anything else is `locked`.
    #[must_use]
    pub fn section_status(&self, id: &SectionId) -> SectionStatus {
        if self.completed.contains(id) {
            SectionStatus::Completed
        } else if self.current.as_ref() == Some(id) {
            SectionStatus::Current
        } else {
            SectionStatus::Locked
        }
    }

    /// Derived counters against the stack's known section ids.
    ///
    /// Completed ids that are not in `known` (stale or corrupted records) are
    /// not counted, so the percentage never exceeds 100.
    #[must_use]
    pub fn summary(&self, known: &[SectionId]) -> ProgressSummary {
        let completed = known.iter().filter(|id| self.completed.contains(id)).count();
        ProgressSummary::new(completed, known.len())
    }
}

//
// ─── PROGRESS SUMMARY ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSummary {
    completed: usize,
    total: usize,
}

impl ProgressSummary {
    #[must_use]
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// `completed / total * 100`, or `0` for an empty stack.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }

    /// Percentage rounded to the nearest whole number, for labels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percentage_rounded(&self) -> u32 {
        self.percentage().round() as u32
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn id(value: &'static str) -> SectionId {
        SectionId::from_static(value)
    }

    #[test]
    fn marking_is_order_independent_and_idempotent() {
        let now = fixed_now();
        let mut a = ProgressState::empty(now);
        a.mark_complete(id("intro"), now);
        a.mark_complete(id("setup"), now);
        a.mark_complete(id("intro"), now);

        let mut b = ProgressState::empty(now);
        b.mark_complete(id("setup"), now);
        b.mark_complete(id("intro"), now);

        assert_eq!(a.completed(), b.completed());
        assert_eq!(a.completed().len(), 2);
    }

    #[test]
    fn remarking_refreshes_timestamp() {
        let now = fixed_now();
        let later = now + chrono::Duration::minutes(5);
        let mut state = ProgressState::empty(now);
        state.mark_complete(id("intro"), now);
        state.mark_complete(id("intro"), later);
        assert_eq!(state.completed().len(), 1);
        assert_eq!(state.last_updated(), later);
    }

    #[test]
    fn reset_clears_everything() {
        let now = fixed_now();
        let mut state = ProgressState::empty(now);
        state.mark_complete(id("intro"), now);
        state.set_current(Some(id("setup")), now);
        state.reset(now);
        assert!(state.completed().is_empty());
        assert_eq!(state.current(), None);
    }

    #[test]
    fn status_classification() {
        let now = fixed_now();
        let mut state = ProgressState::empty(now);
        state.mark_complete(id("intro"), now);
        state.mark_complete(id("setup"), now);
        assert_eq!(state.section_status(&id("compose")), SectionStatus::Locked);

        state.set_current(Some(id("compose")), now);
        assert_eq!(state.section_status(&id("compose")), SectionStatus::Current);
        assert_eq!(state.section_status(&id("intro")), SectionStatus::Completed);

        // completed takes precedence over current
        state.set_current(Some(id("intro")), now);
        assert_eq!(state.section_status(&id("intro")), SectionStatus::Completed);
        assert_eq!(SectionStatus::Locked.as_str(), "locked");
    }

    #[test]
    fn percentage_handles_empty_and_half() {
        assert_eq!(ProgressSummary::new(0, 0).percentage(), 0.0);
        assert_eq!(ProgressSummary::new(2, 4).percentage(), 50.0);
        assert_eq!(ProgressSummary::new(1, 3).percentage_rounded(), 33);
        assert!(!ProgressSummary::new(0, 0).is_complete());
        assert!(ProgressSummary::new(3, 3).is_complete());
    }

    #[test]
    fn summary_ignores_unknown_ids() {
        let now = fixed_now();
        let mut state = ProgressState::empty(now);
        state.mark_complete(id("intro"), now);
        state.mark_complete(id("removed-section"), now);
        let summary = state.summary(&[id("intro"), id("setup")]);
        assert_eq!(summary.completed(), 1);
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.percentage(), 50.0);
    }
}
