use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use tutorial_core::model::TutorialStack;

use crate::app::ThemeMode;
use crate::views::{HomeView, TutorialView};
use crate::visibility::{WIDE_LAYOUT_MIN_WIDTH, provide_wide_layout};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/tutorials/:stack", TutorialView)] Tutorial { stack: String },
}

impl Route {
    #[must_use]
    pub fn tutorial(stack: TutorialStack) -> Self {
        Route::Tutorial {
            stack: stack.slug().to_owned(),
        }
    }
}

#[component]
fn Layout() -> Element {
    let wide = provide_wide_layout(WIDE_LAYOUT_MIN_WIDTH);
    let layout_class = if wide() { "app app-wide" } else { "app app-narrow" };

    rsx! {
        div { class: layout_class,
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let mut theme = use_context::<Signal<ThemeMode>>();

    rsx! {
        nav { class: "sidebar",
            h1 { Link { to: Route::Home {}, "Tutorials" } }
            ul {
                for stack in TutorialStack::ALL {
                    li { key: "{stack}", Link { to: Route::tutorial(stack), "{stack.label()}" } }
                }
            }
            button {
                class: "theme-toggle",
                r#type: "button",
                onclick: move |_| {
                    let next = theme.peek().toggled();
                    theme.set(next);
                },
                "{theme().toggle_label()}"
            }
        }
    }
}
