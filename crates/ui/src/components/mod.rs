mod code_snippet;
mod interactive;

pub use code_snippet::{
    COLLAPSE_THRESHOLD_LINES, COPY_FEEDBACK, CodeSnippet, CopyState, starts_collapsed,
};
pub use interactive::InteractiveBlock;
