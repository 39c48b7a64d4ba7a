//! Image sequence and lightbox state for the hero banner.

use crate::error::Error;

/// Ordered, immutable set of image references shown by the gallery.
///
/// The primary portrait always occupies slot zero, so a set built with
/// [`ImageSet::new`] is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSet {
    refs: Vec<String>,
}

impl ImageSet {
    /// Build the set from the primary reference plus any additional ones.
    pub fn new(primary: impl Into<String>, additional: &[String]) -> Self {
        let mut refs = Vec::with_capacity(1 + additional.len());
        refs.push(primary.into());
        refs.extend(additional.iter().cloned());
        Self { refs }
    }

    /// Construct from an already-ordered list.
    ///
    /// # Errors
    /// Returns [`Error::EmptyGallery`] if `refs` is empty.
    pub fn from_vec(refs: Vec<String>) -> Result<Self, Error> {
        if refs.is_empty() {
            return Err(Error::EmptyGallery);
        }
        Ok(Self { refs })
    }

    /// Number of references contained.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.refs.len()
    }

    /// Whether the set is empty. Always `false` for sets built through the
    /// public constructors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Borrow the reference at `idx`, if in range.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.refs.get(idx).map(String::as_str)
    }

    /// Borrow the internal list (read-only).
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.refs
    }
}

/// Lightbox state machine: wrapping cursor plus zoom, dialog and error flags.
///
/// Every operation is total. Cursor movement wraps in both directions and
/// clears the zoom and error flags, which are scoped to a single image view.
/// The dialog flag is independent of the rest.
#[derive(Debug, Clone)]
pub struct GalleryState {
    images: ImageSet,
    cursor: usize,
    zoomed: bool,
    dialog_open: bool,
    failed: bool,
}

impl GalleryState {
    /// Start at the primary image with every flag cleared.
    #[must_use]
    pub const fn new(images: ImageSet) -> Self {
        Self {
            images,
            cursor: 0,
            zoomed: false,
            dialog_open: false,
            failed: false,
        }
    }

    /// Move to the next image, wrapping at the end.
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.images.len();
        self.leave_image();
    }

    /// Move to the previous image, wrapping past the start.
    pub fn retreat(&mut self) {
        let n = self.images.len();
        self.cursor = (self.cursor + n - 1) % n;
        self.leave_image();
    }

    // Per-image flags do not survive navigation.
    fn leave_image(&mut self) {
        self.zoomed = false;
        self.failed = false;
    }

    /// Flip the zoom flag for the current image.
    pub const fn toggle_zoom(&mut self) {
        self.zoomed = !self.zoomed;
    }

    /// Open or close the lightbox dialog.
    pub const fn set_dialog_open(&mut self, open: bool) {
        self.dialog_open = open;
    }

    /// Record that the current reference could not be loaded. Repeated calls
    /// are no-ops.
    pub const fn mark_failed(&mut self) {
        self.failed = true;
    }

    /// The reference at the cursor.
    #[must_use]
    pub fn current_image(&self) -> &str {
        self.images.as_slice()[self.cursor].as_str()
    }

    /// Zero-based cursor position.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of images in the gallery.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the gallery holds no images. Unreachable through the public
    /// constructors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub const fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    #[must_use]
    pub const fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.failed
    }
}
