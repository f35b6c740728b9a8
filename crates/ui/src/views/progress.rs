//! Per-stack progress shared with everything inside a tutorial page.

use std::future::Future;
use std::sync::Arc;

use dioxus::prelude::*;
use futures::StreamExt;
use futures::channel::mpsc::UnboundedReceiver;
use tracing::warn;

use services::{ProgressError, ProgressService, SectionCompleted};
use tutorial_core::model::{ProgressState, SectionId, TutorialStack};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};

/// Progress of one stack plus the operations that change it.
///
/// Operations run in the background; the `state` signal is replaced with
/// what the store holds once each write lands.
#[derive(Clone)]
pub struct ProgressContext {
    stack: TutorialStack,
    service: Arc<ProgressService>,
    state: Signal<Option<ProgressState>>,
    error: Signal<Option<ViewError>>,
}

impl ProgressContext {
    #[must_use]
    pub fn stack(&self) -> TutorialStack {
        self.stack
    }

    /// `None` until the stored record has been read.
    #[must_use]
    pub fn state(&self) -> Signal<Option<ProgressState>> {
        self.state
    }

    #[must_use]
    pub fn error(&self) -> Signal<Option<ViewError>> {
        self.error
    }

    pub fn mark_complete(&self, section_id: SectionId) {
        self.run(move |service, stack| async move {
            service.mark_section_complete(stack, section_id).await
        });
    }

    pub fn unmark(&self, section_id: SectionId) {
        self.run(move |service, stack| async move {
            service.unmark_section(stack, &section_id).await
        });
    }

    pub fn set_current(&self, section_id: Option<SectionId>) {
        self.run(move |service, stack| async move {
            service.set_current_section(stack, section_id).await
        });
    }

    pub fn reset(&self) {
        self.run(|service, stack| async move { service.reset(stack).await });
    }

    fn run<F, Fut>(&self, op: F)
    where
        F: FnOnce(Arc<ProgressService>, TutorialStack) -> Fut + 'static,
        Fut: Future<Output = Result<ProgressState, ProgressError>> + 'static,
    {
        let service = Arc::clone(&self.service);
        let stack = self.stack;
        let state = self.state;
        let error = self.error;
        spawn(async move {
            let result = op(service, stack).await;
            publish(stack, result, state, error);
        });
    }
}

fn publish(
    stack: TutorialStack,
    result: Result<ProgressState, ProgressError>,
    mut state: Signal<Option<ProgressState>>,
    mut error: Signal<Option<ViewError>>,
) {
    match result {
        Ok(next) => {
            state.set(Some(next));
            error.set(None);
        }
        Err(err) => {
            warn!(stack = %stack, error = %err, "progress update failed");
            error.set(Some(ViewError::Storage));
        }
    }
}

/// Progress of the stack rendered by the nearest `ProgressProvider`.
///
/// # Panics
///
/// Panics when called outside a `ProgressProvider`.
#[must_use]
pub fn use_progress() -> ProgressContext {
    try_use_context::<ProgressContext>()
        .expect("use_progress must be called inside a ProgressProvider")
}

/// Loads `stack`'s progress, provides it as `ProgressContext`, and folds
/// `SectionCompleted` messages sent by interactive content into it.
///
/// Key it by stack so switching stacks starts from a fresh load.
#[component]
pub fn ProgressProvider(stack: TutorialStack, children: Element) -> Element {
    let ctx = use_context::<AppContext>();
    let service = ctx.progress();
    let state = use_signal(|| None::<ProgressState>);
    let error = use_signal(|| None::<ViewError>);

    use_context_provider(|| ProgressContext {
        stack,
        service: Arc::clone(&service),
        state,
        error,
    });

    let mut resource = {
        let service = Arc::clone(&service);
        use_resource(move || {
            let service = Arc::clone(&service);
            let mut state = state;
            let mut error = error;
            async move {
                let loaded = service.load(stack).await.map_err(|err| {
                    warn!(stack = %stack, error = %err, "cannot load progress");
                    ViewError::Storage
                })?;
                // a write that finished first already published a newer state
                if state.peek().is_none() {
                    state.set(Some(loaded));
                }
                error.set(None);
                Ok::<_, ViewError>(())
            }
        })
    };

    use_coroutine(move |mut completions: UnboundedReceiver<SectionCompleted>| {
        let service = Arc::clone(&service);
        async move {
            while let Some(signal) = completions.next().await {
                let result = service.apply_completion(stack, signal).await;
                publish(stack, result, state, error);
            }
        }
    });

    let load_state = view_state_from_resource(&resource);
    let failure = match load_state {
        ViewState::Error(err) => Some(err),
        _ => error(),
    };

    rsx! {
        if let Some(err) = failure {
            div { class: "error progress-error",
                p { "{err.message()}" }
                button { onclick: move |_| resource.restart(), "Retry" }
            }
        }
        {children}
    }
}
