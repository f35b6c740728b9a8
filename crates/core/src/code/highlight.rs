use crate::code::Grammar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    String,
    Comment,
    Number,
    Punctuation,
    Plain,
}

impl TokenKind {
    /// CSS class suffix used by the snippet renderer.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            TokenKind::Keyword => "tok-keyword",
            TokenKind::String => "tok-string",
            TokenKind::Comment => "tok-comment",
            TokenKind::Number => "tok-number",
            TokenKind::Punctuation => "tok-punct",
            TokenKind::Plain => "tok-plain",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

/// One rendered line; never contains a newline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightedLine {
    pub tokens: Vec<Token>,
}

impl HighlightedLine {
    #[must_use]
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

/// Splits plain text into unstyled lines.
#[must_use]
pub fn plain_lines(source: &str) -> Vec<HighlightedLine> {
    source
        .split('\n')
        .map(|line| HighlightedLine {
            tokens: if line.is_empty() {
                Vec::new()
            } else {
                vec![Token {
                    kind: TokenKind::Plain,
                    text: line.to_owned(),
                }]
            },
        })
        .collect()
}

/// Lexes `source` with `grammar` and returns it split into lines.
///
/// Concatenating the token texts of every line, joined by `\n`, yields the
/// original source.
#[must_use]
pub fn highlight(source: &str, grammar: &Grammar) -> Vec<HighlightedLine> {
    split_lines(lex(source, grammar))
}

fn lex(source: &str, grammar: &Grammar) -> Vec<Token> {
    let rules = grammar.rules();
    let mut tokens: Vec<Token> = Vec::new();
    let mut pos = 0;

    while pos < source.len() {
        let rest = &source[pos..];
        let Some(ch) = rest.chars().next() else {
            break;
        };

        let (kind, len) = if let Some((open, close)) =
            rules.block_comment.filter(|(open, _)| rest.starts_with(*open))
        {
            let body = &rest[open.len()..];
            let len = body
                .find(close)
                .map_or(rest.len(), |end| open.len() + end + close.len());
            (TokenKind::Comment, len)
        } else if rules.line_comments.iter().any(|marker| rest.starts_with(*marker))
            && comment_can_start(source, pos)
        {
            (TokenKind::Comment, rest.find('\n').unwrap_or(rest.len()))
        } else if rules.quotes.contains(&ch) || rules.multiline_quotes.contains(&ch) {
            let multiline = rules.multiline_quotes.contains(&ch);
            (TokenKind::String, quoted_len(rest, ch, multiline))
        } else if ch.is_ascii_digit() {
            let len = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '.' || c == '_'))
                .unwrap_or(rest.len());
            (TokenKind::Number, len)
        } else if ch.is_alphabetic() || ch == '_' {
            let len = rest
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            let word = &rest[..len];
            let kind = if grammar.is_keyword(word) {
                TokenKind::Keyword
            } else {
                TokenKind::Plain
            };
            (kind, len)
        } else if ch.is_ascii_punctuation() {
            (TokenKind::Punctuation, 1)
        } else {
            (TokenKind::Plain, ch.len_utf8())
        };

        push_token(&mut tokens, kind, &rest[..len]);
        pos += len;
    }

    tokens
}

/// `#` only opens a comment at the start of a word (so `$#` or `a#b` stay code).
fn comment_can_start(source: &str, pos: usize) -> bool {
    source[..pos]
        .chars()
        .next_back()
        .is_none_or(char::is_whitespace)
        || !source[pos..].starts_with('#')
}

fn quoted_len(rest: &str, quote: char, multiline: bool) -> usize {
    let mut escaped = false;
    for (idx, c) in rest.char_indices().skip(1) {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '\n' if !multiline => return idx,
            c if c == quote => return idx + c.len_utf8(),
            _ => {}
        }
    }
    rest.len()
}

fn push_token(tokens: &mut Vec<Token>, kind: TokenKind, text: &str) {
    if let Some(last) = tokens.last_mut() {
        if last.kind == kind && matches!(kind, TokenKind::Plain | TokenKind::Punctuation) {
            last.text.push_str(text);
            return;
        }
    }
    tokens.push(Token {
        kind,
        text: text.to_owned(),
    });
}

fn split_lines(tokens: Vec<Token>) -> Vec<HighlightedLine> {
    let mut lines = vec![HighlightedLine::default()];
    for token in tokens {
        let mut parts = token.text.split('\n');
        if let Some(first) = parts.next() {
            append(&mut lines, token.kind, first);
        }
        for part in parts {
            lines.push(HighlightedLine::default());
            append(&mut lines, token.kind, part);
        }
    }
    lines
}

fn append(lines: &mut [HighlightedLine], kind: TokenKind, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(line) = lines.last_mut() {
        line.tokens.push(Token {
            kind,
            text: text.to_owned(),
        });
    }
}
