use crate::motion::profile::MotionFrame;

/// Host-issued gallery commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryCommand {
    Advance,
    Retreat,
    ToggleZoom,
    SetDialogOpen(bool),
    MarkFailed,
}

/// Load failure notification from the image-loading collaborator, carrying
/// the reference that failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFailed(pub String);

/// Normalized scroll progress pushed by the viewport tracker.
#[derive(Debug, Clone, Copy)]
pub struct ScrollTick(pub f32);

/// Snapshot emitted to the hosting view after every state change.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryFrame {
    /// Reference the host should display (the placeholder while failed).
    pub source: String,
    /// Alt-text label in the `<name> - Photo <n>` form.
    pub label: String,
    /// Zero-based cursor position.
    pub index: usize,
    /// Number of images in the gallery.
    pub count: usize,
    pub zoomed: bool,
    pub dialog_open: bool,
    pub failed: bool,
    /// Presentation values for the current scroll position.
    pub motion: MotionFrame,
}
