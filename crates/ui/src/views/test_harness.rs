use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, Clock, GrammarService, ProgressService, SectionCompleted};
use storage::repository::{KeyValueStore, Storage};
use tutorial_core::model::{SectionId, TutorialStack};
use tutorial_core::time::fixed_now;
use tutorial_core::{ContentProvider, StaticCatalog};

use crate::components::CodeSnippet;
use crate::context::{UiApp, build_app_context};
use crate::views::{HomeView, ProgressProvider, TutorialView, use_progress};
use crate::visibility::WideLayout;

#[derive(Clone)]
struct TestApp {
    catalog: Arc<dyn ContentProvider>,
    progress: Arc<ProgressService>,
    grammars: Arc<GrammarService>,
}

impl UiApp for TestApp {
    fn initial_stack(&self) -> Option<TutorialStack> {
        None
    }

    fn catalog(&self) -> Arc<dyn ContentProvider> {
        Arc::clone(&self.catalog)
    }

    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    fn grammars(&self) -> Arc<GrammarService> {
        Arc::clone(&self.grammars)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    /// Tutorial page for a raw route slug.
    Tutorial(String),
    Snippet {
        code: String,
        language: String,
        markup: bool,
        compact: bool,
    },
    /// A `ProgressProvider` whose child reports `section` complete on mount.
    CompleteOnMount {
        stack: TutorialStack,
        section: SectionId,
    },
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    wide: bool,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    // stands in for the layout's breakpoint listener
    use_context_provider(|| WideLayout(Signal::new(props.wide)));
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Tutorial(stack) => rsx! { TutorialView { stack } },
        ViewKind::Snippet {
            code,
            language,
            markup,
            compact,
        } => rsx! { CodeSnippet { code, language, markup, compact } },
        ViewKind::CompleteOnMount { stack, section } => rsx! {
            ProgressProvider { stack,
                CompletionSender { section }
            }
        },
    }
}

#[component]
fn CompletionSender(section: SectionId) -> Element {
    let completions = use_coroutine_handle::<SectionCompleted>();
    let progress = use_progress();
    use_hook(|| {
        completions.send(SectionCompleted {
            section_id: section.clone(),
        });
    });
    let status = progress
        .state()
        .read()
        .as_ref()
        .map(|state| state.section_status(&section));

    rsx! {
        match status {
            Some(status) => rsx! {
                span { class: "sent-section status-{status.as_str()}" }
            },
            None => rsx! {
                span { class: "sent-section loading" }
            },
        }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub progress: Arc<ProgressService>,
    pub grammars: Arc<GrammarService>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive pending tasks a few rounds so chained resources resolve.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let storage = Storage::in_memory();
    setup_view_harness_with_store(view, Arc::clone(&storage.kv))
}

pub fn setup_narrow_view_harness(view: ViewKind) -> ViewHarness {
    let storage = Storage::in_memory();
    build_harness(view, Arc::clone(&storage.kv), false)
}

pub fn setup_view_harness_with_store(view: ViewKind, store: Arc<dyn KeyValueStore>) -> ViewHarness {
    build_harness(view, store, true)
}

fn build_harness(view: ViewKind, store: Arc<dyn KeyValueStore>, wide: bool) -> ViewHarness {
    let catalog: Arc<dyn ContentProvider> =
        Arc::new(StaticCatalog::load().expect("built-in catalog"));
    let services = AppServices::from_parts(
        Clock::fixed(fixed_now()),
        &Storage::from_store(store),
        catalog,
    );
    let progress = services.progress();
    let grammars = services.grammars();

    let app = Arc::new(TestApp {
        catalog: services.catalog(),
        progress: Arc::clone(&progress),
        grammars: Arc::clone(&grammars),
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view, wide });

    ViewHarness {
        dom,
        progress,
        grammars,
    }
}
