//! The boundary between the bridge and the owning menu.
//!
//! The menu owns its item list, geometry, focus tracking, and native window;
//! the bridge consumes all of that through [`MenuHost`]. The trait is
//! deliberately narrow: read access plus one deferred message-post
//! primitive. The bridge holds no copies of item data: every protocol call
//! reads the live state through the host, so rebuilt menus are picked up
//! without any synchronization step.

use crate::geometry::{CoordinateSpace, Point, Rect};
use crate::item::MenuItemDescriptor;

/// Read access to the owning menu plus the deferred activation primitive.
///
/// # Contract
///
/// * Item indices are 0-based and stable while the menu is open; the host
///   must not renumber items while an accessibility client may be
///   mid-navigation.
/// * `focused_index`, when present, refers to an existing item.
/// * `post_activation` must **not** run the item's callback synchronously.
///   It enqueues a message for the window's own message loop; the host's
///   message handler runs the callback when the message is delivered, after
///   the current call stack has fully unwound.
pub trait MenuHost {
    /// The menu's configured accessible name.
    fn menu_name(&self) -> Option<String>;

    /// Number of visible items.
    fn item_count(&self) -> usize;

    /// The descriptor for the item at `index`, if in range.
    fn item(&self, index: usize) -> Option<MenuItemDescriptor>;

    /// The hot-tracked/focused item, if any.
    fn focused_index(&self) -> Option<usize>;

    /// The rectangle of the item at `index` in the requested space.
    fn item_bounds(&self, index: usize, space: CoordinateSpace) -> Option<Rect>;

    /// The menu window's client rectangle, in client coordinates.
    fn client_bounds(&self) -> Option<Rect>;

    /// Convert a screen point into client coordinates.
    ///
    /// Returns `None` when the window is gone and no conversion exists.
    fn screen_to_client(&self, point: Point) -> Option<Point>;

    /// Whether the menu window accepts input.
    fn is_window_enabled(&self) -> bool;

    /// Whether the menu window is visible on screen.
    fn is_window_visible(&self) -> bool;

    /// The composed help/tooltip text for the item at `index`.
    ///
    /// The composition rule (shortcut suffixes, wrapping) belongs to the
    /// menu, not the bridge.
    fn item_help(&self, index: usize) -> Option<String>;

    /// Enqueue a deferred activation of the item at `index`.
    ///
    /// Returns `false` if the message could not be posted (window gone,
    /// queue full). Must never invoke the callback inline.
    fn post_activation(&self, index: usize) -> bool;
}
