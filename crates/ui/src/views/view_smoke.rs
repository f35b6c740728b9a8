use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use storage::repository::{InMemoryKeyValueStore, KeyValueStore, StorageError};
use tutorial_core::model::{SectionId, TutorialStack};

use super::test_harness::{
    ViewKind, setup_narrow_view_harness, setup_view_harness, setup_view_harness_with_store,
};

fn id(value: &'static str) -> SectionId {
    SectionId::from_static(value)
}

fn snippet(code: &str, language: &str, compact: bool) -> ViewKind {
    ViewKind::Snippet {
        code: code.to_owned(),
        language: language.to_owned(),
        markup: false,
        compact,
    }
}

fn markup_snippet(code: &str, language: &str) -> ViewKind {
    ViewKind::Snippet {
        code: code.to_owned(),
        language: language.to_owned(),
        markup: true,
        compact: false,
    }
}

fn complete_on_mount(stack: TutorialStack, section: &'static str) -> ViewKind {
    ViewKind::CompleteOnMount {
        stack,
        section: id(section),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_stacks_with_progress() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness
        .progress
        .mark_section_complete(TutorialStack::Docker, id("intro"))
        .await
        .expect("mark intro");

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Containers with Docker"), "missing docker card in {html}");
    assert!(html.contains("33% complete"), "missing docker progress in {html}");
    assert!(html.contains("0% complete"), "missing untouched stack in {html}");
}

struct FailingStore;

#[async_trait::async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness_with_store(ViewKind::Home, Arc::new(FailingStore));
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("could not be saved or loaded"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn tutorial_view_smoke_renders_section_statuses() {
    let mut harness = setup_view_harness(ViewKind::Tutorial("docker".into()));
    let progress = Arc::clone(&harness.progress);
    progress
        .mark_section_complete(TutorialStack::Docker, id("intro"))
        .await
        .expect("mark intro");
    progress
        .mark_section_complete(TutorialStack::Docker, id("setup"))
        .await
        .expect("mark setup");
    progress
        .set_current_section(TutorialStack::Docker, Some(id("compose")))
        .await
        .expect("set current");

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("2 of 3 sections complete"), "missing counts in {html}");
    assert!(html.contains("67%"), "missing percentage in {html}");
    assert!(
        html.contains("tutorial-section status-current"),
        "missing current section in {html}"
    );
    assert!(
        html.contains("tutorial-section status-completed"),
        "missing completed section in {html}"
    );
    assert!(html.contains("Mark incomplete"), "missing unmark action in {html}");
    assert!(html.contains("Resume"), "missing resume action in {html}");
    assert!(html.contains("id=\"tutorial-scroll\""), "missing scroll root in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn tutorial_view_smoke_without_progress_is_all_locked() {
    let mut harness = setup_view_harness(ViewKind::Tutorial("sql".into()));
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("0 of "), "missing counts in {html}");
    assert!(!html.contains("status-completed"), "unexpected completion in {html}");
    assert!(!html.contains("Resume"), "unexpected resume in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn tutorial_view_smoke_unknown_stack_falls_back_to_node() {
    let mut harness = setup_view_harness(ViewKind::Tutorial("cobol".into()));
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Node.js from zero to API"), "missing node content in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn code_snippet_smoke_flattens_markup_into_numbered_lines() {
    let mut harness = setup_view_harness(markup_snippet(
        "<span class=\"x\">PERFORM</span> A.<br>STOP RUN.",
        "cobol",
    ));
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("PERFORM A."), "missing first line in {html}");
    assert!(html.contains("STOP RUN."), "missing second line in {html}");
    assert!(!html.contains("&lt;br"), "markup leaked into {html}");
    assert!(
        html.contains("<span class=\"line-number\">2</span>"),
        "missing line numbers in {html}"
    );
    assert!(html.contains(">Copy<"), "missing copy button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn code_snippet_smoke_highlights_with_cached_grammar() {
    let mut harness = setup_view_harness(snippet("const port = 3000;", "javascript", false));
    harness
        .grammars
        .load("javascript")
        .await
        .expect("javascript grammar");

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("tok-keyword"), "missing keyword token in {html}");
    assert!(html.contains("tok-number"), "missing number token in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn code_snippet_smoke_collapses_long_compact_snippets() {
    let code = (1..=20)
        .map(|n| format!("echo {n}"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut compact = setup_view_harness(snippet(&code, "bash", true));
    compact.rebuild();
    let html = compact.render();
    assert!(html.contains("Show all 20 lines"), "missing toggle in {html}");
    assert!(
        !html.contains("<span class=\"line-number\">13</span>"),
        "collapsed snippet shows too much: {html}"
    );

    let mut wide = setup_view_harness(snippet(&code, "bash", false));
    wide.rebuild();
    let html = wide.render();
    assert!(!html.contains("Show all"), "unexpected toggle in {html}");
    assert!(
        html.contains("<span class=\"line-number\">20</span>"),
        "missing last line in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn code_snippet_smoke_shows_plain_code_verbatim() {
    let mut harness = setup_view_harness(snippet("echo <b>bold</b> &amp; done", "cobol", false));
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"), "tags were stripped in {html}");
    assert!(html.contains("&amp;amp;"), "entity was decoded in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn completion_message_is_stored_for_the_provider_stack() {
    let mut harness = setup_view_harness(complete_on_mount(TutorialStack::Docker, "compose"));
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("sent-section status-completed"),
        "completion not rendered in {html}"
    );

    let docker = harness.progress.load(TutorialStack::Docker).await.expect("docker");
    assert!(docker.is_completed(&id("compose")));
    let node = harness.progress.load(TutorialStack::Node).await.expect("node");
    assert!(node.completed().is_empty(), "other stack changed: {node:?}");
}

/// Returns the first read's value late, after later writes have landed.
struct StaleFirstRead {
    inner: InMemoryKeyValueStore,
    first: AtomicBool,
}

#[async_trait::async_trait]
impl KeyValueStore for StaleFirstRead {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self.inner.get(key).await;
        if self.first.swap(false, Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(30)).await;
        }
        value
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}

#[tokio::test(flavor = "current_thread")]
async fn late_initial_load_does_not_overwrite_a_finished_write() {
    let store = Arc::new(StaleFirstRead {
        inner: InMemoryKeyValueStore::new(),
        first: AtomicBool::new(true),
    });
    let mut harness =
        setup_view_harness_with_store(complete_on_mount(TutorialStack::Sql, "queries"), store);
    harness.rebuild();
    harness.settle().await;
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("sent-section status-completed"),
        "stale load replaced the newer state in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn tutorial_view_smoke_marks_only_the_right_quiz_option() {
    let mut harness = setup_view_harness(ViewKind::Tutorial("linux".into()));
    harness
        .progress
        .mark_section_complete(TutorialStack::Linux, id("permissions"))
        .await
        .expect("mark permissions");

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert_eq!(
        html.matches("quiz-option correct").count(),
        1,
        "expected one correct option in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn tutorial_view_smoke_follows_the_layout_breakpoint() {
    let mut narrow = setup_narrow_view_harness(ViewKind::Tutorial("docker".into()));
    narrow.rebuild();
    narrow.settle().await;
    let html = narrow.render();
    assert!(html.contains("tutorial tutorial-narrow"), "not narrow: {html}");
    assert!(html.contains("code-snippet compact"), "snippets not compact: {html}");

    let mut wide = setup_view_harness(ViewKind::Tutorial("docker".into()));
    wide.rebuild();
    wide.settle().await;
    let html = wide.render();
    assert!(html.contains("tutorial tutorial-wide"), "not wide: {html}");
}
