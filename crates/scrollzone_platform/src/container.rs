//! Scrollable container abstraction

use crate::geometry::Rect;

/// A DOM-like scrollable element
///
/// Mirrors the subset of `Element` the controller needs: the bounding box in
/// pointer coordinates, read/write scroll offsets, and the scroll/client
/// extents used to bound those offsets. Methods take `&self` because hosts
/// hand out shared element references; implementations use interior
/// mutability for the offsets.
pub trait ScrollContainer {
    /// Current bounding box (queried fresh; never cached across frames)
    fn bounding_rect(&self) -> Rect;

    /// Horizontal scroll offset
    fn scroll_left(&self) -> f32;

    /// Set the horizontal scroll offset
    fn set_scroll_left(&self, value: f32);

    /// Vertical scroll offset
    fn scroll_top(&self) -> f32;

    /// Set the vertical scroll offset
    fn set_scroll_top(&self, value: f32);

    /// Total scrollable content width
    fn scroll_width(&self) -> f32;

    /// Total scrollable content height
    fn scroll_height(&self) -> f32;

    /// Visible viewport width
    fn client_width(&self) -> f32;

    /// Visible viewport height
    fn client_height(&self) -> f32;

    /// Largest valid horizontal offset (never negative)
    fn max_scroll_left(&self) -> f32 {
        (self.scroll_width() - self.client_width()).max(0.0)
    }

    /// Largest valid vertical offset (never negative)
    fn max_scroll_top(&self) -> f32 {
        (self.scroll_height() - self.client_height()).max(0.0)
    }
}
