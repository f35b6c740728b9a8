use std::time::Duration;

use dioxus::prelude::*;
use tracing::{debug, warn};

use services::GrammarError;
use tutorial_core::code::{HighlightedLine, display_text, plain_lines};

use crate::context::AppContext;
use crate::scripts::write_clipboard_text;

/// How long copy feedback stays before the button resets.
pub const COPY_FEEDBACK: Duration = Duration::from_millis(1500);

/// Compact snippets longer than this start collapsed.
pub const COLLAPSE_THRESHOLD_LINES: usize = 12;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CopyState {
    #[default]
    Idle,
    Copied,
    Failed,
}

impl CopyState {
    #[must_use]
    pub fn from_outcome(copied: bool) -> Self {
        if copied {
            CopyState::Copied
        } else {
            CopyState::Failed
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CopyState::Idle => "Copy",
            CopyState::Copied => "Copied!",
            CopyState::Failed => "Not copied",
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            CopyState::Idle => "copy-idle",
            CopyState::Copied => "copy-done",
            CopyState::Failed => "copy-failed",
        }
    }
}

/// Whether a snippet of `line_count` lines is folded.
#[must_use]
pub fn starts_collapsed(compact: bool, line_count: usize) -> bool {
    compact && line_count > COLLAPSE_THRESHOLD_LINES
}

/// Code sample with line numbers, lazy highlighting and a copy button.
///
/// With `markup` set, `code` is wrapper markup and is flattened before it is
/// highlighted or copied; otherwise it is shown and copied verbatim. The
/// plain text is shown until the grammar for `language` is available, and
/// stays plain if it never is.
#[component]
pub fn CodeSnippet(
    code: String,
    language: String,
    #[props(default)] markup: bool,
    #[props(default)] compact: bool,
) -> Element {
    let ctx = use_context::<AppContext>();
    let source = display_text(&code, markup);

    let highlighted = {
        let grammars = ctx.grammars();
        let source = source.clone();
        let language = language.clone();
        use_resource(move || {
            let grammars = grammars.clone();
            let source = source.clone();
            let language = language.clone();
            async move {
                match grammars.highlight(&source, &language).await {
                    Ok(lines) => Some(lines),
                    Err(GrammarError::Unsupported(_)) => {
                        debug!(language = %language, "no grammar, rendering plain text");
                        None
                    }
                    Err(err) => {
                        warn!(language = %language, error = %err, "grammar failed, rendering plain text");
                        None
                    }
                }
            }
        })
    };
    let lines: Vec<HighlightedLine> = highlighted
        .value()
        .read()
        .as_ref()
        .cloned()
        .flatten()
        .unwrap_or_else(|| plain_lines(&source));

    let mut expanded = use_signal(|| false);
    let total_lines = lines.len();
    let collapsible = starts_collapsed(compact, total_lines);
    let collapsed = collapsible && !expanded();
    let shown = if collapsed {
        COLLAPSE_THRESHOLD_LINES
    } else {
        total_lines
    };
    let numbered: Vec<(usize, HighlightedLine)> = lines
        .into_iter()
        .take(shown)
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .collect();

    let copy_state = use_signal(CopyState::default);
    let copy_generation = use_signal(|| 0_u64);
    let on_copy = move |_: MouseEvent| {
        let text = source.clone();
        let mut copy_state = copy_state;
        let mut copy_generation = copy_generation;
        spawn(async move {
            let copied = write_clipboard_text(&text).await;
            if !copied {
                warn!("clipboard write failed");
            }
            let generation = *copy_generation.peek() + 1;
            copy_generation.set(generation);
            copy_state.set(CopyState::from_outcome(copied));

            tokio::time::sleep(COPY_FEEDBACK).await;
            if *copy_generation.peek() == generation {
                copy_state.set(CopyState::Idle);
            }
        });
    };

    let compact_class = if compact { "compact" } else { "" };
    let state = copy_state();

    rsx! {
        div { class: "code-snippet {compact_class}",
            div { class: "code-toolbar",
                span { class: "code-language", "{language}" }
                button {
                    class: "copy-button {state.class()}",
                    r#type: "button",
                    onclick: on_copy,
                    "{state.label()}"
                }
            }
            pre { class: "code-body",
                code {
                    for (number, line) in numbered {
                        div { key: "{number}", class: "code-line",
                            span { class: "line-number", "{number}" }
                            span { class: "line-content",
                                for (index, token) in line.tokens.into_iter().enumerate() {
                                    span { key: "{index}", class: token.kind.class(), "{token.text}" }
                                }
                            }
                        }
                    }
                }
            }
            if collapsible {
                button {
                    class: "collapse-toggle",
                    r#type: "button",
                    onclick: move |_| expanded.set(!expanded()),
                    if collapsed {
                        "Show all {total_lines} lines"
                    } else {
                        "Show fewer lines"
                    }
                }
            }
        }
    }
}
