/// UI panels
///
/// The window is three side-by-side panels: file upload and selection on
/// the left, the live preview and render controls in the middle, and the
/// collage configuration on the right.

pub mod config;
pub mod preview;
pub mod upload;
