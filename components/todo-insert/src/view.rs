//! Text rendering of the insert form.

use crate::types::TodoInsertState;

/// Shown in the field while it is empty
pub const PLACEHOLDER: &str = "Enter a todo";

/// Label of the submit control
pub const SUBMIT_LABEL: &str = "+";

/// Render the form as one line: the field, then the submit control
///
/// An empty field shows the placeholder in parentheses.
#[must_use]
pub fn render(state: &TodoInsertState) -> String {
    if state.is_empty() {
        format!("[({PLACEHOLDER})] [{SUBMIT_LABEL}]")
    } else {
        format!("[{}] [{SUBMIT_LABEL}]", state.value)
    }
}
