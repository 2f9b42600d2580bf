//! # Composable Widgets Testing
//!
//! Testing utilities and helpers for reducer-driven widgets.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then builder for reducers
//! - Assertion helpers for effects
//! - Recorders standing in for callbacks a widget's environment holds
//!
//! ## Example
//!
//! ```ignore
//! use composable_widgets_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(CounterReducer::new())
//!     .with_env(CounterEnvironment::new())
//!     .given_state(CounterState::default())
//!     .when_action(CounterAction::Increment)
//!     .then_state(|state| assert_eq!(state.value, 1))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations for testing.
pub mod mocks {
    use std::sync::{Arc, Mutex, PoisonError};

    /// Records every value handed to a callback
    ///
    /// Clones share the same log, so one clone can be moved into a callback
    /// while the test keeps another to inspect.
    ///
    /// # Example
    ///
    /// ```
    /// use composable_widgets_testing::mocks::CallRecorder;
    ///
    /// let recorder = CallRecorder::new();
    /// let callback = {
    ///     let recorder = recorder.clone();
    ///     move |value: String| recorder.record(value)
    /// };
    ///
    /// callback("Buy milk".to_string());
    /// assert_eq!(recorder.calls(), vec!["Buy milk".to_string()]);
    /// ```
    #[derive(Debug)]
    pub struct CallRecorder<T> {
        calls: Arc<Mutex<Vec<T>>>,
    }

    impl<T> CallRecorder<T> {
        /// Create an empty recorder
        #[must_use]
        pub fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Append one call
        pub fn record(&self, value: T) {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(value);
        }

        /// Number of calls recorded so far
        #[must_use]
        pub fn count(&self) -> usize {
            self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
        }
    }

    impl<T: Clone> CallRecorder<T> {
        /// Snapshot of every recorded call, oldest first
        #[must_use]
        pub fn calls(&self) -> Vec<T> {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    impl<T> Clone for CallRecorder<T> {
        fn clone(&self) -> Self {
            Self {
                calls: Arc::clone(&self.calls),
            }
        }
    }

    impl<T> Default for CallRecorder<T> {
        fn default() -> Self {
            Self::new()
        }
    }
}

// Re-export commonly used items
pub use mocks::CallRecorder;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_recorder_clones_share_log() {
        let recorder = CallRecorder::new();
        let other = recorder.clone();

        other.record(1);
        other.record(2);

        assert_eq!(recorder.count(), 2);
        assert_eq!(recorder.calls(), vec![1, 2]);
    }
}
