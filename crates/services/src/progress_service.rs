use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use storage::repository::KeyValueStore;
use storage::{ProgressRecord, progress_key};
use tutorial_core::model::{ProgressState, ProgressSummary, SectionId, TutorialStack};

use crate::Clock;
use crate::error::ProgressError;

/// "Section completed" message sent by interactive content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCompleted {
    pub section_id: SectionId,
}

/// Per-stack tutorial progress backed by a key-value store.
///
/// Every mutation loads the stack's record, applies the change and writes
/// the whole record back before returning. Mutations of one stack are
/// serialized by that stack's lock; different stacks never wait on each
/// other.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    store: Arc<dyn KeyValueStore>,
    locks: Arc<[Mutex<()>; TutorialStack::COUNT]>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            clock,
            store,
            locks: Arc::new(std::array::from_fn(|_| Mutex::new(()))),
        }
    }

    /// Load a stack's progress.
    ///
    /// Returns fresh progress when nothing is stored or the stored record
    /// cannot be parsed; a broken record is discarded, not reported.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the store cannot be read.
    pub async fn load(&self, stack: TutorialStack) -> Result<ProgressState, ProgressError> {
        let now = self.clock.now();
        let Some(text) = self.store.get(&progress_key(stack)).await? else {
            return Ok(ProgressState::empty(now));
        };

        match ProgressRecord::decode(&text) {
            Ok(record) => Ok(record.into_state()),
            Err(err) => {
                warn!(stack = %stack, error = %err, "discarding unreadable progress record");
                Ok(ProgressState::empty(now))
            }
        }
    }

    /// Add `section_id` to the completed set and persist.
    ///
    /// Marking an already completed section only refreshes the timestamp.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the record cannot be read or written.
    pub async fn mark_section_complete(
        &self,
        stack: TutorialStack,
        section_id: SectionId,
    ) -> Result<ProgressState, ProgressError> {
        self.update(stack, move |state, now| state.mark_complete(section_id, now))
            .await
    }

    /// Overwrite the current section and persist. The completed set is untouched.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the record cannot be read or written.
    pub async fn set_current_section(
        &self,
        stack: TutorialStack,
        section_id: Option<SectionId>,
    ) -> Result<ProgressState, ProgressError> {
        self.update(stack, move |state, now| state.set_current(section_id, now))
            .await
    }

    /// Remove `section_id` from the completed set if present, and persist.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the record cannot be read or written.
    pub async fn unmark_section(
        &self,
        stack: TutorialStack,
        section_id: &SectionId,
    ) -> Result<ProgressState, ProgressError> {
        self.update(stack, |state, now| state.unmark(section_id, now))
            .await
    }

    /// Clear the stack back to fresh progress and persist.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the record cannot be written.
    pub async fn reset(&self, stack: TutorialStack) -> Result<ProgressState, ProgressError> {
        self.update(stack, |state, now| state.reset(now)).await
    }

    /// Fold a completion message from interactive content into `stack`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the record cannot be read or written.
    pub async fn apply_completion(
        &self,
        stack: TutorialStack,
        signal: SectionCompleted,
    ) -> Result<ProgressState, ProgressError> {
        self.mark_section_complete(stack, signal.section_id).await
    }

    /// Completion counters for `stack` against its known sections.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the store cannot be read.
    pub async fn summary(
        &self,
        stack: TutorialStack,
        known: &[SectionId],
    ) -> Result<ProgressSummary, ProgressError> {
        Ok(self.load(stack).await?.summary(known))
    }

    async fn update<F>(&self, stack: TutorialStack, apply: F) -> Result<ProgressState, ProgressError>
    where
        F: FnOnce(&mut ProgressState, DateTime<Utc>),
    {
        let _guard = self.locks[stack.index()].lock().await;
        let mut state = self.load(stack).await?;
        apply(&mut state, self.clock.now());

        let text = ProgressRecord::from_state(&state).encode()?;
        self.store.set(&progress_key(stack), &text).await?;
        debug!(
            stack = %stack,
            completed = state.completed().len(),
            "progress persisted"
        );
        Ok(state)
    }
}
