use std::cell::RefCell;

use crate::display::DisplaySurface;

/// The single status line. A new message replaces the old one; nothing is queued.
#[derive(Debug, Default)]
pub struct MessageSlot {
    text: RefCell<Option<String>>,
}

impl MessageSlot {
    pub fn show<D: DisplaySurface + ?Sized>(&self, display: &D, text: &str) {
        *self.text.borrow_mut() = Some(text.to_string());
        display.show_message(text);
    }

    pub fn hide<D: DisplaySurface + ?Sized>(&self, display: &D) {
        self.text.borrow_mut().take();
        display.hide_message();
    }

    /// Text currently visible, if any.
    pub fn current(&self) -> Option<String> {
        self.text.borrow().clone()
    }
}
