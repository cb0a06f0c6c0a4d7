/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Accepting control changes; the preview follows every change
    Editing,
    Quit,
}
