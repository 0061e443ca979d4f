//! Visibility and selected-record holder for an editing surface.

/// Whether an edit surface is shown and which record it edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditModal<T> {
    visible: bool,
    data: Option<T>,
}

impl<T> Default for EditModal<T> {
    fn default() -> Self {
        Self {
            visible: false,
            data: None,
        }
    }
}

impl<T> EditModal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Record being edited, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Opens the surface on `data`.
    pub fn show(&mut self, data: T) {
        self.data = Some(data);
        self.visible = true;
    }

    /// Flips visibility. The selected record is kept so a reopened surface
    /// resumes on it.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Hides the surface. Idempotent.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Swaps the selected record without touching visibility.
    pub fn replace_data(&mut self, data: T) {
        self.data = Some(data);
    }

    /// Hides the surface and releases the selected record.
    pub fn take_data(&mut self) -> Option<T> {
        self.visible = false;
        self.data.take()
    }
}
