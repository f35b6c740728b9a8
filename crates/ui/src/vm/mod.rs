mod markdown_vm;
mod time_fmt;
mod tutorial_vm;

pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use time_fmt::format_datetime;
pub use tutorial_vm::{NavItemVm, ProgressVm, map_nav_items, map_progress};
