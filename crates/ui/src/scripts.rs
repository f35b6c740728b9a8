use dioxus::document::eval;

/// Thresholds reported by the section observer.
pub const OBSERVER_THRESHOLDS: [f64; 6] = [0.0, 0.1, 0.25, 0.5, 0.75, 1.0];

/// Copy `text` to the system clipboard. Returns whether any path succeeded.
pub async fn write_clipboard_text(text: &str) -> bool {
    let script = write_clipboard_script(text);
    eval(&script).join::<bool>().await.unwrap_or(false)
}

pub async fn scroll_to_section(section_id: &str) {
    let script = scroll_to_section_script(section_id);
    let _ = eval(&script).await;
}

fn write_clipboard_script(text: &str) -> String {
    let text_literal = js_string_literal(text);
    format!(
        r#"
        const text = {text_literal};
        try {{
            if (window.isSecureContext && navigator.clipboard && navigator.clipboard.writeText) {{
                await navigator.clipboard.writeText(text);
                return true;
            }}
        }} catch (_) {{}}
        try {{
            const area = document.createElement("textarea");
            area.value = text;
            area.setAttribute("readonly", "");
            area.style.position = "fixed";
            area.style.top = "-1000px";
            area.style.opacity = "0";
            document.body.appendChild(area);
            area.select();
            const ok = document.execCommand("copy");
            document.body.removeChild(area);
            return !!ok;
        }} catch (_) {{
            return false;
        }}
        "#
    )
}

fn scroll_to_section_script(section_id: &str) -> String {
    let id_literal = js_string_literal(section_id);
    format!(
        r#"
        const el = document.getElementById({id_literal});
        if (el) {{ el.scrollIntoView({{ behavior: "smooth", block: "start" }}); }}
        "#
    )
}

/// Observer binding for `ids` under `root_id` (`None` = the viewport).
///
/// Streams `SectionVisibility` batches through `dioxus.send`. A binding with
/// the same `key` replaces the previous one; the script stays alive until
/// the Rust side sends on the channel or drops it.
pub(crate) fn section_observer_script(key: u64, ids_json: &str, root_id: Option<&str>) -> String {
    let root_literal = root_id.map_or_else(|| "null".to_owned(), js_string_literal);
    let thresholds = OBSERVER_THRESHOLDS
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"
        const key = "{key}";
        const ids = {ids_json};
        const rootId = {root_literal};
        const registry = window.__tutorialObservers || (window.__tutorialObservers = {{}});
        if (registry[key]) {{
            registry[key].disconnect();
            delete registry[key];
        }}
        const root = rootId === null ? null : document.getElementById(rootId);
        if (rootId !== null && !root) {{ return; }}
        const targets = ids
            .map((id) => document.getElementById(id))
            .filter((el) => el !== null);
        if (targets.length === 0) {{ return; }}
        const observer = new IntersectionObserver((entries) => {{
            const rootTop = root ? root.getBoundingClientRect().top : 0;
            dioxus.send(entries.map((entry) => ({{
                id: entry.target.id,
                topOffset: entry.boundingClientRect.top - rootTop,
                intersectionRatio: entry.intersectionRatio,
                isIntersecting: entry.isIntersecting,
            }})));
        }}, {{ root, threshold: [{thresholds}] }});
        targets.forEach((el) => observer.observe(el));
        registry[key] = observer;
        await dioxus.recv();
        if (registry[key] === observer) {{
            observer.disconnect();
            delete registry[key];
        }}
        "#
    )
}

pub(crate) fn disconnect_observer_script(key: u64) -> String {
    format!(
        r#"
        const registry = window.__tutorialObservers;
        if (registry && registry["{key}"]) {{
            registry["{key}"].disconnect();
            delete registry["{key}"];
        }}
        "#
    )
}

/// Streams `matches` for `(min-width: <min_width>px)` now and on every change.
pub(crate) fn media_query_script(min_width: u32) -> String {
    format!(
        r#"
        const query = window.matchMedia("(min-width: {min_width}px)");
        dioxus.send(query.matches);
        const onChange = (event) => dioxus.send(event.matches);
        query.addEventListener("change", onChange);
        await dioxus.recv();
        query.removeEventListener("change", onChange);
        "#
    )
}

pub(crate) fn js_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
