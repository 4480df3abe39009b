use tracing::trace;

use super::NavKey;

/// The cursor is always inside `0..images.len()` when there is at least one
/// image; an empty gallery stays at index 0 and cannot be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryState<T> {
    images: Vec<T>,
    current_index: usize,
    open: bool,
}

impl<T> Default for GalleryState<T> {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            current_index: 0,
            open: false,
        }
    }
}

impl<T> GalleryState<T> {
    pub fn new(images: Vec<T>) -> Self {
        Self {
            images,
            current_index: 0,
            open: false,
        }
    }

    pub fn images(&self) -> &[T] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&T> {
        self.images.get(self.current_index)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn keyboard_attached(&self) -> bool {
        self.open
    }

    pub fn set_images(&mut self, images: Vec<T>) {
        self.images = images;
        self.current_index = 0;
        if self.images.is_empty() {
            self.open = false;
        }
    }

    pub fn push(&mut self, image: T) {
        self.images.push(image);
    }

    /// Opens the viewer at `at`; returns false (and stays closed) when the
    /// index does not name an image.
    pub fn open(&mut self, at: usize) -> bool {
        if at >= self.images.len() {
            return false;
        }
        self.current_index = at;
        self.open = true;
        trace!(index = at, "gallery opened");
        true
    }

    pub fn close(&mut self) {
        if self.open {
            trace!(index = self.current_index, "gallery closed");
        }
        self.open = false;
    }

    pub fn next(&mut self) -> usize {
        if !self.images.is_empty() {
            self.current_index = (self.current_index + 1) % self.images.len();
        }
        self.current_index
    }

    pub fn prev(&mut self) -> usize {
        let len = self.images.len();
        if len != 0 {
            self.current_index = (self.current_index + len - 1) % len;
        }
        self.current_index
    }

    pub fn set_index(&mut self, index: usize) {
        if index < self.images.len() {
            self.current_index = index;
        }
    }

    /// Applies a key press; returns whether the key was consumed.
    pub fn handle_key(&mut self, key: NavKey) -> bool {
        if !self.keyboard_attached() {
            return false;
        }
        match key {
            NavKey::ArrowLeft => {
                self.prev();
            }
            NavKey::ArrowRight => {
                self.next();
            }
            NavKey::Escape => self.close(),
        }
        true
    }
}
