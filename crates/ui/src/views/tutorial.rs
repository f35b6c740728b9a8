use chrono::{DateTime, Utc};
use dioxus::prelude::*;

use tutorial_core::model::{
    ProgressState, SectionId, SectionStatus, TutorialSection, TutorialStack,
};

use crate::components::{CodeSnippet, InteractiveBlock};
use crate::context::AppContext;
use crate::scripts::scroll_to_section;
use crate::views::progress::{ProgressProvider, use_progress};
use crate::visibility::{ScrollRoot, TUTORIAL_SCROLL_ID, use_active_section, use_layout_width};
use crate::vm::{NavItemVm, ProgressVm, map_nav_items, map_progress, markdown_to_html};

/// Tutorial page for a stack slug; unknown slugs show the default stack.
#[component]
pub fn TutorialView(stack: String) -> Element {
    let stack = TutorialStack::from_slug_or_default(&stack);

    rsx! {
        ProgressProvider { key: "{stack}", stack,
            TutorialPage { stack }
        }
    }
}

#[component]
fn TutorialPage(stack: TutorialStack) -> Element {
    let ctx = use_context::<AppContext>();
    let progress = use_progress();
    let content = ctx.catalog().content(stack).clone();

    let wide = use_layout_width();
    let is_wide = wide();
    let active = use_active_section(content.section_ids(), ScrollRoot::for_layout(is_wide));
    let active_id = active();

    let loaded = progress.state().cloned();
    // statuses render as locked until the stored record arrives
    let state = loaded
        .clone()
        .unwrap_or_else(|| ProgressState::empty(DateTime::<Utc>::UNIX_EPOCH));
    let nav_items = map_nav_items(&content, &state, active_id.as_ref());
    let header = loaded.as_ref().map(|state| map_progress(&content, state));
    let current = state.current().cloned();
    let layout_class = if is_wide {
        "tutorial tutorial-wide"
    } else {
        "tutorial tutorial-narrow"
    };

    rsx! {
        div { class: layout_class,
            aside { class: "tutorial-nav",
                h2 { "{stack.label()}" }
                ul { class: "nav-outline",
                    for item in nav_items {
                        NavLink { key: "{item.id}", item }
                    }
                }
            }
            div { id: TUTORIAL_SCROLL_ID, class: "tutorial-scroll",
                header { class: "tutorial-header",
                    h2 { "{content.title()}" }
                    p { class: "lede", "{content.summary()}" }
                    match header {
                        Some(vm) => rsx! {
                            ProgressHeader { vm, current }
                        },
                        None => rsx! {
                            p { class: "progress-loading", "Loading progress..." }
                        },
                    }
                }
                for section in content.sections() {
                    SectionBlock {
                        key: "{section.id()}",
                        section: section.clone(),
                        status: state.section_status(section.id()),
                        compact: !is_wide,
                    }
                }
            }
        }
    }
}

#[component]
fn ProgressHeader(vm: ProgressVm, current: Option<SectionId>) -> Element {
    let progress = use_progress();
    let percent = vm.percent_label();

    rsx! {
        div { class: "progress-header",
            div { class: "progress-bar",
                role: "progressbar",
                aria_valuenow: "{vm.summary.percentage_rounded()}",
                aria_valuemin: "0",
                aria_valuemax: "100",
                div { class: "progress-fill", style: vm.bar_style() }
            }
            p { class: "progress-counts", "{percent} · {vm.counts_label()}" }
            p { class: "progress-updated", "Last updated {vm.last_updated}" }
            div { class: "progress-actions",
                if let Some(current) = current {
                    button {
                        r#type: "button",
                        onclick: move |_| {
                            let target = current.to_string();
                            spawn(async move {
                                scroll_to_section(&target).await;
                            });
                        },
                        "Resume"
                    }
                }
                button {
                    r#type: "button",
                    class: "reset-button",
                    onclick: move |_| progress.reset(),
                    "Reset progress"
                }
            }
        }
    }
}

#[component]
fn NavLink(item: NavItemVm) -> Element {
    let progress = use_progress();
    let id = item.id.clone();

    rsx! {
        li { class: item.class(),
            button {
                r#type: "button",
                onclick: move |_| {
                    progress.set_current(Some(id.clone()));
                    let target = id.to_string();
                    spawn(async move {
                        scroll_to_section(&target).await;
                    });
                },
                span { class: "nav-marker", "{item.marker()}" }
                span { class: "nav-label", "{item.label}" }
            }
        }
    }
}

#[component]
fn SectionBlock(section: TutorialSection, status: SectionStatus, compact: bool) -> Element {
    let progress = use_progress();
    let id = section.id().clone();
    let completed = status == SectionStatus::Completed;
    let description = markdown_to_html(section.description());

    let on_toggle = {
        let id = id.clone();
        move |_: MouseEvent| {
            if completed {
                progress.unmark(id.clone());
            } else {
                progress.mark_complete(id.clone());
            }
        }
    };

    rsx! {
        section { id: "{id}", class: "tutorial-section status-{status.as_str()}",
            header { class: "section-header",
                h3 { "{section.title()}" }
                span { class: "status-badge", "{status.as_str()}" }
            }
            div { class: "section-description", dangerous_inner_html: "{description}" }
            if !section.bullets().is_empty() {
                ul { class: "section-bullets",
                    for (index, bullet) in section.bullets().iter().enumerate() {
                        li { key: "{index}", "{bullet}" }
                    }
                }
            }
            if let Some(code) = section.code() {
                CodeSnippet {
                    code: code.source().to_owned(),
                    language: code.language().to_owned(),
                    markup: code.is_markup(),
                    compact,
                }
            }
            if let Some(element) = section.interactive() {
                InteractiveBlock { section_id: id.clone(), element: element.clone(), completed }
            }
            div { class: "section-actions",
                button {
                    r#type: "button",
                    class: "mark-button",
                    onclick: on_toggle,
                    if completed { "Mark incomplete" } else { "Mark complete" }
                }
            }
        }
    }
}
