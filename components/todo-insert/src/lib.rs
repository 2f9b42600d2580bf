//! Todo insert form: a text field plus a submit control.
//!
//! The form owns the text being typed. On submit it hands the text to an
//! insertion callback supplied by its parent, clears the field and prevents
//! the submit event's default behaviour. What the parent does with the text
//! (appending to a list, persisting it) is up to the parent.
//!
//! # Quick Start
//!
//! ```no_run
//! use todo_insert::{TodoInsertAction, TodoInsertEnvironment, TodoInsertReducer, TodoInsertState};
//! use composable_widgets_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TodoInsertEnvironment::new(|value: String| println!("inserted {value}"));
//! let store = Store::new(TodoInsertState::new(), TodoInsertReducer::new(), env);
//!
//! store.send(TodoInsertAction::change("Buy milk")).await?;
//! store.send(TodoInsertAction::submit()).await?;
//!
//! assert!(store.state(TodoInsertState::is_empty).await);
//! # Ok(())
//! # }
//! ```

pub mod reducer;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use reducer::{Inserter, TodoInsertEnvironment, TodoInsertReducer};
pub use types::{SubmitEvent, TodoInsertAction, TodoInsertState};
pub use view::render;
