//! Webview binding of the section visibility tracker.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use dioxus::document::{self, eval};
use dioxus::prelude::*;
use tracing::{debug, warn};

use tutorial_core::model::SectionId;
use tutorial_core::visibility::{SectionVisibility, VisibilityTracker};

use crate::scripts::{disconnect_observer_script, media_query_script, section_observer_script};

/// Element that scrolls the tutorial body on wide layouts.
pub const TUTORIAL_SCROLL_ID: &str = "tutorial-scroll";

/// Viewport width (px) from which the side-by-side layout is used.
pub const WIDE_LAYOUT_MIN_WIDTH: u32 = 1024;

/// What the observed sections are measured against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrollRoot {
    /// The browser viewport.
    Document,
    /// A scrolling element, by DOM id.
    Element(String),
}

impl ScrollRoot {
    #[must_use]
    pub fn for_layout(wide: bool) -> Self {
        if wide {
            ScrollRoot::Element(TUTORIAL_SCROLL_ID.to_owned())
        } else {
            ScrollRoot::Document
        }
    }

    fn element_id(&self) -> Option<&str> {
        match self {
            ScrollRoot::Document => None,
            ScrollRoot::Element(id) => Some(id),
        }
    }
}

static NEXT_BINDING_KEY: AtomicU64 = AtomicU64::new(1);

/// Track which of `ids` is most in view under `root`.
///
/// The observer is re-bound whenever `ids` or `root` change and torn down
/// when the calling component unmounts. Ids without a rendered element are
/// skipped. The returned signal only changes when a different section wins;
/// it keeps its value while nothing intersects.
pub fn use_active_section(ids: Vec<SectionId>, root: ScrollRoot) -> Signal<Option<SectionId>> {
    let key = use_hook(|| NEXT_BINDING_KEY.fetch_add(1, Ordering::Relaxed));
    let document = use_hook(document::document);
    let binding = use_hook(|| Rc::new(RefCell::new(None::<Task>)));
    let mut active = use_signal(|| None::<SectionId>);
    let mut tracker = use_signal(VisibilityTracker::default);

    {
        let binding = Rc::clone(&binding);
        use_effect(use_reactive((&ids, &root), move |(ids, root)| {
            if let Some(previous) = binding.borrow_mut().take() {
                previous.cancel();
            }

            tracker.write().rebind(ids.clone());
            let retained = tracker.peek().active().cloned();
            if *active.peek() != retained {
                active.set(retained);
            }

            let ids_json = match serde_json::to_string(&ids) {
                Ok(json) => json,
                Err(err) => {
                    warn!(error = %err, "cannot encode observed section ids");
                    return;
                }
            };
            let script = section_observer_script(key, &ids_json, root.element_id());
            debug!(key, sections = ids.len(), root = ?root, "binding section observer");

            let task = spawn(async move {
                let mut tracker = tracker;
                let mut active = active;
                let mut channel = eval(&script);
                while let Ok(batch) = channel.recv::<Vec<SectionVisibility>>().await {
                    let changed = tracker.write().observe(batch);
                    if let Some(id) = changed {
                        active.set(Some(id));
                    }
                }
            });
            *binding.borrow_mut() = Some(task);
        }));
    }

    use_drop(move || {
        if let Some(task) = binding.borrow_mut().take() {
            task.cancel();
        }
        let _ = document.eval(disconnect_observer_script(key));
        debug!(key, "section observer released");
    });

    active
}

/// Viewport breakpoint shared by the layout with everything below it.
#[derive(Clone, Copy)]
pub struct WideLayout(pub Signal<bool>);

/// Listens for the `min_width` breakpoint once and provides it as
/// `WideLayout` to descendants.
pub fn provide_wide_layout(min_width: u32) -> Signal<bool> {
    let wide = use_wide_layout(min_width);
    use_context_provider(|| WideLayout(wide));
    wide
}

/// Breakpoint provided by the enclosing layout.
///
/// # Panics
///
/// Panics when no ancestor called `provide_wide_layout`.
#[must_use]
pub fn use_layout_width() -> Signal<bool> {
    use_context::<WideLayout>().0
}

/// Whether the viewport is at least `min_width` px wide, kept current.
///
/// Starts as `true` until the first report arrives.
fn use_wide_layout(min_width: u32) -> Signal<bool> {
    let wide = use_signal(|| true);
    use_future(move || async move {
        let mut wide = wide;
        let mut channel = eval(&media_query_script(min_width));
        while let Ok(matches) = channel.recv::<bool>().await {
            if *wide.peek() != matches {
                wide.set(matches);
            }
        }
    });
    wide
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_selects_scroll_root() {
        assert_eq!(
            ScrollRoot::for_layout(true),
            ScrollRoot::Element("tutorial-scroll".into())
        );
        assert_eq!(ScrollRoot::for_layout(false), ScrollRoot::Document);
        assert_eq!(ScrollRoot::Document.element_id(), None);
    }
}
