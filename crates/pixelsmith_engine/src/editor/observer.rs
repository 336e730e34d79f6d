use crate::Size;

/// What kind of change happened to the canvas content
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentChange {
    /// Cells were painted, erased or filled
    Pixels,
    /// The canvas got new dimensions
    Resized(Size),
    /// Components were placed, moved or removed
    Components,
    /// Undo or redo restored an earlier state
    History,
    /// Canvas content was replaced wholesale
    Cleared,
    /// A guide line moved or changed visibility
    ReferenceLines,
}

impl ContentChange {
    /// True for changes that alter what `composite()` returns
    pub fn affects_export(&self) -> bool {
        !matches!(self, ContentChange::ReferenceLines)
    }
}

/// Receives notifications from an [`super::EditorSession`]
///
/// The export code generator listens here to regenerate its output.
pub trait EditorObserver {
    fn content_changed(&mut self, change: ContentChange);

    /// A non-fatal problem the user should see
    fn user_message(&mut self, _message: &str) {}
}
