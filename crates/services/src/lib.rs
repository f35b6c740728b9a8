#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod grammar_service;
pub mod progress_service;

pub use tutorial_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, GrammarError, ProgressError};
pub use grammar_service::GrammarService;
pub use progress_service::{ProgressService, SectionCompleted};
