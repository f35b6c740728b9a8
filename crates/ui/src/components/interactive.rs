use dioxus::prelude::*;

use services::SectionCompleted;
use tutorial_core::model::{InteractiveElement, SectionId};

/// Checkpoint or quiz embedded in a section.
///
/// Completion is reported as a `SectionCompleted` message to the enclosing
/// progress provider; the element never touches storage itself.
#[component]
pub fn InteractiveBlock(section_id: SectionId, element: InteractiveElement, completed: bool) -> Element {
    match &element {
        InteractiveElement::Checkpoint {
            prompt,
            confirm_label,
        } => rsx! {
            Checkpoint {
                section_id,
                prompt: prompt.clone(),
                confirm_label: confirm_label.clone(),
                completed,
            }
        },
        InteractiveElement::Quiz { .. } => rsx! {
            Quiz { section_id, element: element.clone(), completed }
        },
    }
}

#[component]
fn Checkpoint(section_id: SectionId, prompt: String, confirm_label: String, completed: bool) -> Element {
    let completions = use_coroutine_handle::<SectionCompleted>();

    rsx! {
        div { class: "interactive checkpoint",
            p { "{prompt}" }
            button {
                r#type: "button",
                disabled: completed,
                onclick: move |_| {
                    completions.send(SectionCompleted {
                        section_id: section_id.clone(),
                    });
                },
                if completed { "Done" } else { "{confirm_label}" }
            }
        }
    }
}

#[component]
fn Quiz(section_id: SectionId, element: InteractiveElement, completed: bool) -> Element {
    let wrong_choice = use_signal(|| None::<usize>);
    let InteractiveElement::Quiz {
        question, options, ..
    } = &element
    else {
        return rsx! {};
    };

    rsx! {
        div { class: "interactive quiz",
            p { class: "quiz-question", "{question}" }
            ul { class: "quiz-options",
                for (index, label) in options.iter().enumerate() {
                    li { key: "{index}",
                        QuizOption {
                            section_id: section_id.clone(),
                            index,
                            label: label.clone(),
                            correct: element.accepts(Some(index)),
                            completed,
                            wrong_choice,
                        }
                    }
                }
            }
            if wrong_choice().is_some() && !completed {
                p { class: "quiz-feedback", "Not quite. Try another answer." }
            }
        }
    }
}

#[component]
fn QuizOption(
    section_id: SectionId,
    index: usize,
    label: String,
    correct: bool,
    completed: bool,
    wrong_choice: Signal<Option<usize>>,
) -> Element {
    let completions = use_coroutine_handle::<SectionCompleted>();
    let mut wrong_choice = wrong_choice;
    let class = if completed && correct {
        "quiz-option correct"
    } else if wrong_choice() == Some(index) {
        "quiz-option wrong"
    } else {
        "quiz-option"
    };

    rsx! {
        button {
            class,
            r#type: "button",
            disabled: completed,
            onclick: move |_| {
                if correct {
                    wrong_choice.set(None);
                    completions.send(SectionCompleted {
                        section_id: section_id.clone(),
                    });
                } else {
                    wrong_choice.set(Some(index));
                }
            },
            "{label}"
        }
    }
}
