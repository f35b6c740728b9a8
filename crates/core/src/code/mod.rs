//! Code sample preparation: markup flattening and lexical highlighting.

mod flatten;
mod grammar;
mod highlight;

pub use flatten::{display_text, flatten_markup, normalize_source};
pub use grammar::{GRAMMARS, Grammar, GrammarRules, find_rules};
pub use highlight::{HighlightedLine, Token, TokenKind, highlight, plain_lines};
