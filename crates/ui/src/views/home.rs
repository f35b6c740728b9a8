use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use tracing::warn;

use tutorial_core::model::{ProgressSummary, TutorialStack};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
struct StackCard {
    stack: TutorialStack,
    title: String,
    summary: String,
    progress: ProgressSummary,
}

impl StackCard {
    fn progress_label(&self) -> String {
        if self.progress.is_complete() {
            "Completed".to_owned()
        } else {
            format!("{}% complete", self.progress.percentage_rounded())
        }
    }
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    {
        let ctx = ctx.clone();
        use_effect(move || {
            if let Some(stack) = ctx.take_initial_stack() {
                navigator.replace(Route::tutorial(stack));
            }
        });
    }

    let catalog = ctx.catalog();
    let progress = ctx.progress();
    let mut resource = use_resource(move || {
        let catalog = catalog.clone();
        let progress = progress.clone();
        async move {
            let mut cards = Vec::with_capacity(TutorialStack::COUNT);
            for stack in TutorialStack::ALL {
                let content = catalog.content(stack);
                let summary = progress
                    .summary(stack, &content.section_ids())
                    .await
                    .map_err(|err| {
                        warn!(stack = %stack, error = %err, "cannot load stack progress");
                        ViewError::Storage
                    })?;
                cards.push(StackCard {
                    stack,
                    title: content.title().to_owned(),
                    summary: content.summary().to_owned(),
                    progress: summary,
                });
            }
            Ok::<_, ViewError>(cards)
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page home",
            h2 { "Tutorials" }
            p { class: "lede", "Pick a stack. Progress is saved on this device." }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(cards) => rsx! {
                    ul { class: "stack-grid",
                        for card in cards {
                            li { key: "{card.stack}", class: "stack-card",
                                Link { to: Route::tutorial(card.stack),
                                    h3 { "{card.title}" }
                                }
                                p { "{card.summary}" }
                                span { class: "stack-progress", "{card.progress_label()}" }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "error",
                        p { "{err.message()}" }
                        button { onclick: move |_| resource.restart(), "Retry" }
                    }
                },
            }
        }
    }
}
