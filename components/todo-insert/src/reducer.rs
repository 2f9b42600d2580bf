//! Reducer logic for the todo insert form.
//!
//! `Change` replaces the field value. `Submit` hands the value to the
//! insertion callback, clears the field and prevents the event's default.
//! No validation happens here: empty text is submitted like any other.

use crate::types::{TodoInsertAction, TodoInsertState};
use composable_widgets_core::{SmallVec, effect::Effect, reducer::Reducer};
use std::sync::Arc;

/// Insertion callback supplied by whoever owns the todo list
///
/// Any `Fn(String) + Send + Sync` closure is an `Inserter`.
pub trait Inserter: Send + Sync {
    /// Receive one submitted value
    fn insert(&self, value: String);
}

impl<F> Inserter for F
where
    F: Fn(String) + Send + Sync,
{
    fn insert(&self, value: String) {
        self(value);
    }
}

/// Environment dependencies for the insert form
#[derive(Clone)]
pub struct TodoInsertEnvironment {
    /// Called once per submission with the submitted text
    pub on_insert: Arc<dyn Inserter>,
}

impl TodoInsertEnvironment {
    /// Creates a new `TodoInsertEnvironment`
    #[must_use]
    pub fn new(on_insert: impl Inserter + 'static) -> Self {
        Self {
            on_insert: Arc::new(on_insert),
        }
    }
}

impl std::fmt::Debug for TodoInsertEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoInsertEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the insert form
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoInsertReducer;

impl TodoInsertReducer {
    /// Creates a new `TodoInsertReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoInsertReducer {
    type State = TodoInsertState;
    type Action = TodoInsertAction;
    type Environment = TodoInsertEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoInsertAction::Change { value } => {
                state.value = value;
            },
            TodoInsertAction::Submit { event } => {
                let value = std::mem::take(&mut state.value);
                tracing::info!(len = value.len(), "Submitting todo");
                env.on_insert.insert(value);
                event.prevent_default();
            },
        }

        SmallVec::new()
    }
}
