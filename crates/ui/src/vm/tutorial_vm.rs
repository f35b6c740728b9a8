use tutorial_core::model::{
    ProgressState, ProgressSummary, SectionId, SectionStatus, TutorialContent,
};

use crate::vm::time_fmt::format_datetime;

/// One row of the navigation outline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItemVm {
    pub id: SectionId,
    pub label: String,
    pub status: SectionStatus,
    pub active: bool,
}

impl NavItemVm {
    #[must_use]
    pub fn class(&self) -> String {
        let mut class = format!("nav-item status-{}", self.status.as_str());
        if self.active {
            class.push_str(" active");
        }
        class
    }

    #[must_use]
    pub fn marker(&self) -> &'static str {
        match self.status {
            SectionStatus::Completed => "✓",
            SectionStatus::Current => "▸",
            SectionStatus::Locked => "○",
        }
    }
}

#[must_use]
pub fn map_nav_items(
    content: &TutorialContent,
    state: &ProgressState,
    active: Option<&SectionId>,
) -> Vec<NavItemVm> {
    content
        .nav_entries()
        .into_iter()
        .map(|entry| NavItemVm {
            status: state.section_status(&entry.id),
            active: active == Some(&entry.id),
            id: entry.id,
            label: entry.label,
        })
        .collect()
}

/// Header progress bar.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressVm {
    pub summary: ProgressSummary,
    pub last_updated: String,
}

impl ProgressVm {
    #[must_use]
    pub fn percent_label(&self) -> String {
        format!("{}%", self.summary.percentage_rounded())
    }

    #[must_use]
    pub fn counts_label(&self) -> String {
        format!(
            "{} of {} sections complete",
            self.summary.completed(),
            self.summary.total()
        )
    }

    #[must_use]
    pub fn bar_style(&self) -> String {
        format!("width: {:.1}%;", self.summary.percentage())
    }
}

#[must_use]
pub fn map_progress(content: &TutorialContent, state: &ProgressState) -> ProgressVm {
    ProgressVm {
        summary: state.summary(&content.section_ids()),
        last_updated: format_datetime(state.last_updated()),
    }
}
