//! # Counter Widget
//!
//! A counter holding one integer, changed only through two named actions.
//!
//! - Pure state machine (no side effects)
//! - Actions arrive as `{"type": "INCREMENT"}` style objects or bare names
//! - Unknown action names are accepted and leave the state untouched
//!
//! ## Example
//!
//! ```no_run
//! use counter::{CounterAction, CounterEnvironment, CounterReducer, CounterState};
//! use composable_widgets_runtime::Store;
//!
//! # async fn example() -> Result<(), composable_widgets_runtime::StoreError> {
//! let store = Store::new(CounterState::default(), CounterReducer::new(), CounterEnvironment::new());
//!
//! store.send(CounterAction::Increment).await?;
//! let value = store.state(|s| s.value).await;
//! assert_eq!(value, 1);
//! # Ok(())
//! # }
//! ```

use composable_widgets_core::{SmallVec, effect::Effect, reducer::Reducer};
use serde::{Deserialize, Serialize};

/// Counter state
///
/// A single integer wrapped in a record, starting at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    /// Current counter value
    pub value: i64,
}

/// Counter actions
///
/// Serialized as an action object tagged by `type`. Any `type` other than
/// `INCREMENT` or `DECREMENT` decodes to [`CounterAction::Unrecognized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterAction {
    /// Add one to the value
    Increment,
    /// Subtract one from the value
    Decrement,
    /// Any action name the counter does not handle
    #[serde(other)]
    Unrecognized,
}

impl CounterAction {
    /// Map a bare action name to an action
    ///
    /// ```
    /// use counter::CounterAction;
    ///
    /// assert_eq!(CounterAction::from_type("INCREMENT"), CounterAction::Increment);
    /// assert_eq!(CounterAction::from_type("RESET"), CounterAction::Unrecognized);
    /// ```
    #[must_use]
    pub fn from_type(name: &str) -> Self {
        match name {
            "INCREMENT" => Self::Increment,
            "DECREMENT" => Self::Decrement,
            _ => Self::Unrecognized,
        }
    }

    /// The wire name of this action
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Increment => "INCREMENT",
            Self::Decrement => "DECREMENT",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}

/// Counter environment
///
/// The counter needs no dependencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterEnvironment;

impl CounterEnvironment {
    /// Create a new counter environment
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Counter reducer
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterReducer;

impl CounterReducer {
    /// Create a new counter reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CounterReducer {
    type State = CounterState;
    type Action = CounterAction;
    type Environment = CounterEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _environment: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CounterAction::Increment => {
                state.value = state.value.wrapping_add(1);
            },
            CounterAction::Decrement => {
                state.value = state.value.wrapping_sub(1);
            },
            CounterAction::Unrecognized => {},
        }

        tracing::debug!(action = action.type_name(), value = state.value, "Counter reduced");

        SmallVec::new()
    }
}

/// Control labels, in display order
pub const CONTROLS: [(&str, CounterAction); 2] =
    [("+1", CounterAction::Increment), ("-1", CounterAction::Decrement)];

/// Render the counter as text: the value line, then the two controls
#[must_use]
pub fn render(state: &CounterState) -> String {
    let controls = CONTROLS
        .iter()
        .map(|(label, _)| format!("[{label}]"))
        .collect::<Vec<_>>()
        .join(" ");

    format!("Current counter value is {}.\n{controls}", state.value)
}
