/// State management module
///
/// This module handles all application state, including:
/// - The selected image working set and its ordering (selection.rs)
/// - Cancellation tokens for in-flight async work (cancel.rs)
/// - The persisted theme preference (theme.rs)

pub mod cancel;
pub mod selection;
pub mod theme;
