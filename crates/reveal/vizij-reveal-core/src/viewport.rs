//! Viewport samples read at decision time and on every scroll notification.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub height: f32,
    pub scroll_top: f32,
}

impl Viewport {
    pub fn new(height: f32, scroll_top: f32) -> Self {
        Self { height, scroll_top }
    }

    /// True when the element's top edge lies inside the first screenful.
    /// Uses the viewport height only, so it is evaluated against the page as
    /// loaded rather than the current scroll position.
    #[inline]
    pub fn is_in_initial_view(&self, offset_top: f32) -> bool {
        self.height > offset_top
    }

    /// True once the bottom edge of the viewport reached the element's top.
    #[inline]
    pub fn has_crossed(&self, offset_top: f32) -> bool {
        self.scroll_top + self.height >= offset_top
    }

    pub fn scrolled_to(self, scroll_top: f32) -> Self {
        Self { scroll_top, ..self }
    }
}
