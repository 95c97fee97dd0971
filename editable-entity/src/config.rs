use serde::{Deserialize, Serialize};

/// Message shown when a save fails.
pub const DEFAULT_SAVE_ERROR: &str = "There was an error saving!";

/// Message shown when a remove fails.
pub const DEFAULT_REMOVE_ERROR: &str = "There was an error removing the resource!";

/// Configuration for an [`EditableEntity`](crate::EditableEntity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// User-facing message stored in `status().error` after a failed save.
    pub save_error_message: String,
    /// User-facing message stored in `status().error` after a failed remove.
    pub remove_error_message: String,
    /// Submit `attributes.<field>` containers whole when one of their
    /// sub-fields changed.
    pub complete_complex_fields: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            save_error_message: DEFAULT_SAVE_ERROR.to_string(),
            remove_error_message: DEFAULT_REMOVE_ERROR.to_string(),
            complete_complex_fields: true,
        }
    }
}
