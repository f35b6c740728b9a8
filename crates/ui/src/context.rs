use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use services::{GrammarService, ProgressService};
use tutorial_core::ContentProvider;
use tutorial_core::model::TutorialStack;

pub trait UiApp: Send + Sync {
    /// Stack to open instead of the home page, if any.
    fn initial_stack(&self) -> Option<TutorialStack>;

    fn catalog(&self) -> Arc<dyn ContentProvider>;
    fn progress(&self) -> Arc<ProgressService>;
    fn grammars(&self) -> Arc<GrammarService>;
}

#[derive(Clone)]
pub struct AppContext {
    initial_stack: Option<TutorialStack>,
    open_initial_stack_once: Arc<AtomicBool>,

    catalog: Arc<dyn ContentProvider>,
    progress: Arc<ProgressService>,
    grammars: Arc<GrammarService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let initial_stack = app.initial_stack();

        Self {
            initial_stack,
            open_initial_stack_once: Arc::new(AtomicBool::new(initial_stack.is_some())),
            catalog: app.catalog(),
            progress: app.progress(),
            grammars: app.grammars(),
        }
    }

    /// The configured stack, handed out only on the first call.
    #[must_use]
    pub fn take_initial_stack(&self) -> Option<TutorialStack> {
        if self.open_initial_stack_once.swap(false, Ordering::AcqRel) {
            self.initial_stack
        } else {
            None
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<dyn ContentProvider> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn grammars(&self) -> Arc<GrammarService> {
        Arc::clone(&self.grammars)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
