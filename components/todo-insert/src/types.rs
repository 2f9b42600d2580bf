//! State and action types for the todo insert form.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// State of the insert form
///
/// Holds the text currently typed into the field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoInsertState {
    /// Current field value
    pub value: String,
}

impl TodoInsertState {
    /// Creates an empty form
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: String::new(),
        }
    }

    /// Returns `true` when nothing has been typed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// The host's submit event
///
/// Submitting a form normally triggers a navigation; the form prevents it
/// through this handle. Clones share one flag, so the caller keeps a clone
/// to observe what the reducer did.
#[derive(Clone, Debug, Default)]
pub struct SubmitEvent {
    default_prevented: Arc<AtomicBool>,
}

impl SubmitEvent {
    /// Creates an event whose default has not been prevented
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the default submission behaviour
    pub fn prevent_default(&self) {
        self.default_prevented.store(true, Ordering::Release);
    }

    /// Whether [`SubmitEvent::prevent_default`] has been called
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::Acquire)
    }
}

/// Actions the insert form handles
#[derive(Clone, Debug)]
pub enum TodoInsertAction {
    /// The text field changed
    Change {
        /// New field contents
        value: String,
    },

    /// The form was submitted
    Submit {
        /// Event whose default the form suppresses
        event: SubmitEvent,
    },
}

impl TodoInsertAction {
    /// Shorthand for a [`TodoInsertAction::Change`]
    #[must_use]
    pub fn change(value: impl Into<String>) -> Self {
        Self::Change {
            value: value.into(),
        }
    }

    /// Shorthand for a [`TodoInsertAction::Submit`] with a fresh event
    #[must_use]
    pub fn submit() -> Self {
        Self::Submit {
            event: SubmitEvent::new(),
        }
    }
}
