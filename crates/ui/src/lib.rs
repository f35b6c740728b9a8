pub mod app;
pub mod components;
pub mod context;
pub mod routes;
pub mod scripts;
pub mod views;
pub mod visibility;
pub mod vm;

pub use app::{App, ThemeMode};
pub use context::{AppContext, UiApp, build_app_context};
