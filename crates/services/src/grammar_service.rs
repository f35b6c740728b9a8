use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use tutorial_core::code::{Grammar, HighlightedLine, find_rules, highlight};

use crate::error::GrammarError;

/// Loads highlighting grammars on first use and caches them.
///
/// Grammars are compiled off the async executor, so a snippet's first
/// render never waits for them.
#[derive(Clone, Default)]
pub struct GrammarService {
    cache: Arc<RwLock<HashMap<&'static str, Arc<Grammar>>>>,
}

impl GrammarService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the grammar for a language tag (aliases allowed).
    ///
    /// # Errors
    ///
    /// Returns `GrammarError::Unsupported` for unknown languages and
    /// `GrammarError::LoadFailed` if compilation did not complete.
    pub async fn load(&self, language: &str) -> Result<Arc<Grammar>, GrammarError> {
        let rules = find_rules(language).ok_or_else(|| GrammarError::Unsupported(language.to_owned()))?;
        if let Some(hit) = self.cached(rules.name) {
            return Ok(hit);
        }

        let grammar = tokio::task::spawn_blocking(move || Grammar::compile(rules))
            .await
            .map_err(|err| GrammarError::LoadFailed(err.to_string()))?;
        let grammar = Arc::new(grammar);

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let entry = cache.entry(rules.name).or_insert_with(|| Arc::clone(&grammar));
        debug!(language = rules.name, "grammar loaded");
        Ok(Arc::clone(entry))
    }

    /// Load the grammar and highlight `source` with it.
    ///
    /// # Errors
    ///
    /// Returns `GrammarError` if the grammar cannot be loaded.
    pub async fn highlight(
        &self,
        source: &str,
        language: &str,
    ) -> Result<Vec<HighlightedLine>, GrammarError> {
        let grammar = self.load(language).await?;
        Ok(highlight(source, &grammar))
    }

    #[must_use]
    pub fn is_cached(&self, language: &str) -> bool {
        find_rules(language).is_some_and(|rules| self.cached(rules.name).is_some())
    }

    fn cached(&self, name: &'static str) -> Option<Arc<Grammar>> {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        cache.get(name).cloned()
    }
}
