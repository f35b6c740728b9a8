mod home;
mod progress;
mod state;
mod tutorial;

pub use home::HomeView;
pub use progress::{ProgressContext, ProgressProvider, use_progress};
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use tutorial::TutorialView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
