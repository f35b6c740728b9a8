/// Flattens a code sample that is wrapped in formatting markup.
///
/// Tags are dropped, `<br>` becomes a newline and the common HTML entities
/// are decoded. Only call this for sources known to be markup; plain code
/// goes through [`normalize_source`].
#[must_use]
pub fn flatten_markup(input: &str) -> String {
    let normalized = normalize_source(input);
    let mut out = String::with_capacity(normalized.len());
    let mut tag_buf = String::new();
    let mut in_tag = false;
    let mut chars = normalized.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_tag {
            if ch == '>' {
                in_tag = false;
                let tag = tag_buf.trim().trim_end_matches('/').trim().to_ascii_lowercase();
                if tag == "br" || tag.starts_with("br ") {
                    out.push('\n');
                }
                tag_buf.clear();
            } else {
                tag_buf.push(ch);
            }
            continue;
        }

        // `a < b` inside markup is a literal, not a tag
        let opens_tag = ch == '<'
            && chars
                .peek()
                .is_some_and(|next| next.is_ascii_alphabetic() || matches!(next, '/' | '!'));
        if opens_tag {
            in_tag = true;
            tag_buf.clear();
            continue;
        }

        out.push(ch);
    }

    // an unterminated tag was literal text after all
    if in_tag {
        out.push('<');
        out.push_str(&tag_buf);
    }

    decode_entities(&out)
}

/// Line-ending normalization for plain source; nothing else is touched.
#[must_use]
pub fn normalize_source(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

/// Text a reader sees for `source`: markup is flattened, plain code is only
/// line-normalized.
#[must_use]
pub fn display_text(source: &str, markup: bool) -> String {
    if markup {
        flatten_markup(source)
    } else {
        normalize_source(source)
    }
}

fn decode_entities(input: &str) -> String {
    input
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
