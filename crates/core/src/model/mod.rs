mod ids;
mod progress;
mod section;
mod stack;

pub use ids::{ParseSectionIdError, SectionId};
pub use progress::{ProgressState, ProgressSummary, SectionStatus};
pub use section::{
    CodeSample, InteractiveElement, NavEntry, SectionError, TutorialContent, TutorialSection,
};
pub use stack::{TutorialStack, UnknownStackError};
