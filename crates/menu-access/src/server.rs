//! Accessibility server for an owner-drawn popup menu.
//!
//! [`MenuAccessibility`] answers the full accessibility protocol surface
//! (name, description, role, state, help, keyboard shortcut, default
//! action, location, navigation, hit-testing, invocation) against the live
//! item list of its [`MenuHost`], and forwards anything it does not model
//! to the window's standard accessible object through
//! [`StandardObjectCache`].
//!
//! # Child identifiers
//!
//! Every operation takes a [`ChildId`]: `ChildId::SELF` addresses the menu
//! container, `1..=item_count` address items in display order. Identifiers
//! outside that range never index into the item list; they are delegated to
//! the standard object where delegation is legal, and rejected otherwise.
//!
//! # Deferred invocation
//!
//! `invoke` never runs an item's callback inline. An accessibility request
//! can arrive on a call stack that is already inside the menu's own message
//! processing; running arbitrary item code there could reenter menu state
//! mid-read or block the calling thread. The server posts an activation
//! message through the host and returns; the callback runs once the
//! window's message loop picks the message up.
//!
//! # Example
//!
//! ```ignore
//! use menu_access::{ChildId, MenuAccessibility, NavDirection};
//!
//! let server = MenuAccessibility::new(menu_host, standard_factory);
//!
//! let first = server.navigate(NavDirection::FirstChild, ChildId::SELF);
//! let name = first.and_then(|child| server.name(child));
//! ```

use std::thread::ThreadId;

use crate::error::{AccessError, AccessResult};
use crate::fallback::{StandardAccessible, StandardAccessibleFactory, StandardObjectCache};
use crate::geometry::{CoordinateSpace, Point, Rect};
use crate::host::MenuHost;
use crate::protocol::{ChildId, NavDirection, Role, StateFlags};

/// Log target for server diagnostics.
const LOG_TARGET: &str = "menu_access::server";

/// Description reported for the menu container.
const MENU_DESCRIPTION: &str = "Popup menu";

/// Resolution of a child identifier against the live item list.
enum Resolved {
    /// The menu container itself.
    Menu,
    /// A 0-based in-range item index.
    Item(usize),
    /// Outside the item range; delegate or reject.
    Invalid,
}

/// Debug-only guard that protocol calls stay on the menu's owning thread.
///
/// Accessibility dispatch marshals calls onto the thread that owns the
/// window, so a call from anywhere else indicates a wiring bug in the
/// embedder.
#[derive(Clone, Copy)]
struct ThreadAffinity {
    thread_id: ThreadId,
}

impl ThreadAffinity {
    fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    #[inline]
    fn debug_assert_same_thread(&self) {
        if cfg!(debug_assertions) && std::thread::current().id() != self.thread_id {
            panic!("menu accessibility call arrived on a foreign thread");
        }
    }
}

/// The accessibility server for one popup menu.
///
/// Created when the menu is constructed and attached to a window; torn down
/// (releasing the cached standard object) when the menu closes. The server
/// reads all menu state live through `H` and owns nothing but the fallback
/// cache.
pub struct MenuAccessibility<H: MenuHost> {
    host: H,
    fallback: StandardObjectCache,
    affinity: ThreadAffinity,
}

impl<H: MenuHost> MenuAccessibility<H> {
    /// Create a server for `host`, with `factory` producing the fallback
    /// standard object on first need.
    pub fn new(host: H, factory: impl StandardAccessibleFactory + 'static) -> Self {
        Self {
            host,
            fallback: StandardObjectCache::new(factory),
            affinity: ThreadAffinity::current(),
        }
    }

    /// The owning menu's host interface.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The fallback cache (exposed for teardown coordination and tests).
    pub fn fallback(&self) -> &StandardObjectCache {
        &self.fallback
    }

    /// Release the cached standard object. Idempotent; also runs on drop.
    pub fn release_fallback(&self) {
        self.fallback.release();
    }

    // =========================================================================
    // Identifier resolution
    // =========================================================================

    fn resolve(&self, child: ChildId) -> Resolved {
        if child.is_self() {
            return Resolved::Menu;
        }
        match child.index() {
            Some(index) if index < self.host.item_count() => Resolved::Item(index),
            _ => Resolved::Invalid,
        }
    }

    fn delegate<R>(&self, f: impl FnOnce(&dyn StandardAccessible) -> Option<R>) -> Option<R> {
        self.fallback.with_object(f)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Number of protocol children (= number of menu items).
    pub fn child_count(&self) -> usize {
        self.affinity.debug_assert_same_thread();
        self.host.item_count()
    }

    // =========================================================================
    // Descriptive queries
    // =========================================================================

    /// Accessible name: the menu's configured name for `SELF`, the item's
    /// display text (mnemonic markup stripped unless flagged raw) for items.
    pub fn name(&self, child: ChildId) -> Option<String> {
        self.affinity.debug_assert_same_thread();
        match self.resolve(child) {
            Resolved::Menu => self.host.menu_name(),
            Resolved::Item(index) => self.host.item(index).map(|item| item.display_text()),
            Resolved::Invalid => self.delegate(|standard| standard.name(child)),
        }
    }

    /// Accessible value: the menu model has none.
    pub fn value(&self, child: ChildId) -> Option<String> {
        self.affinity.debug_assert_same_thread();
        let _ = child;
        None
    }

    /// Focused child: the menu model does not answer protocol focus.
    pub fn focus(&self) -> Option<ChildId> {
        self.affinity.debug_assert_same_thread();
        None
    }

    /// Selected child: the menu model has no protocol selection.
    pub fn selection(&self) -> Option<ChildId> {
        self.affinity.debug_assert_same_thread();
        None
    }

    /// Accessible description: fixed for `SELF`, none for items.
    pub fn description(&self, child: ChildId) -> Option<String> {
        self.affinity.debug_assert_same_thread();
        match self.resolve(child) {
            Resolved::Menu => Some(MENU_DESCRIPTION.to_string()),
            Resolved::Item(_) => None,
            Resolved::Invalid => self.delegate(|standard| standard.description(child)),
        }
    }

    /// Accessibility role of the addressed element.
    pub fn role(&self, child: ChildId) -> Option<Role> {
        self.affinity.debug_assert_same_thread();
        match self.resolve(child) {
            Resolved::Menu => Some(Role::PopupMenu),
            Resolved::Item(index) => self.host.item(index).map(|item| {
                if item.separator {
                    Role::Separator
                } else {
                    Role::MenuItem
                }
            }),
            Resolved::Invalid => self.delegate(|standard| standard.role(child)),
        }
    }

    /// Computed state union for the addressed element.
    pub fn state(&self, child: ChildId) -> StateFlags {
        self.affinity.debug_assert_same_thread();
        match self.resolve(child) {
            Resolved::Menu => {
                let mut state = StateFlags::empty();
                if !self.host.is_window_enabled() {
                    state |= StateFlags::UNAVAILABLE;
                }
                if !self.host.is_window_visible() {
                    state |= StateFlags::INVISIBLE;
                }
                state
            }
            Resolved::Item(index) => {
                let Some(item) = self.host.item(index) else {
                    return StateFlags::empty();
                };
                let mut state = StateFlags::empty();
                if !self.host.is_window_enabled() || item.disabled {
                    state |= StateFlags::UNAVAILABLE;
                }
                if self.host.focused_index() == Some(index) {
                    state |= StateFlags::FOCUSED | StateFlags::HOT_TRACKED;
                }
                if item.checked {
                    state |= StateFlags::CHECKED;
                }
                if item.submenu {
                    state |= StateFlags::HAS_POPUP;
                }
                state
            }
            Resolved::Invalid => self
                .delegate(|standard| standard.state(child))
                .unwrap_or_else(StateFlags::empty),
        }
    }

    /// Help text: the host-composed tooltip for items, none for `SELF`.
    pub fn help(&self, child: ChildId) -> Option<String> {
        self.affinity.debug_assert_same_thread();
        match self.resolve(child) {
            Resolved::Menu => None,
            Resolved::Item(index) => self.host.item_help(index),
            Resolved::Invalid => self.delegate(|standard| standard.help(child)),
        }
    }

    /// Keyboard shortcut: the item's mnemonic character, if its text carries
    /// one and is not flagged raw.
    pub fn keyboard_shortcut(&self, child: ChildId) -> Option<String> {
        self.affinity.debug_assert_same_thread();
        match self.resolve(child) {
            Resolved::Menu => None,
            Resolved::Item(index) => self
                .host
                .item(index)
                .and_then(|item| item.mnemonic_char())
                .map(|ch| ch.to_string()),
            Resolved::Invalid => self.delegate(|standard| standard.keyboard_shortcut(child)),
        }
    }

    /// Default-action name: "Open" for submenus, "Execute" for leaf items,
    /// none when the item carries no activation callback.
    pub fn default_action(&self, child: ChildId) -> Option<String> {
        self.affinity.debug_assert_same_thread();
        match self.resolve(child) {
            Resolved::Menu => None,
            Resolved::Item(index) => self
                .host
                .item(index)
                .and_then(|item| item.default_action_name())
                .map(String::from),
            Resolved::Invalid => self.delegate(|standard| standard.default_action(child)),
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Screen rectangle of the addressed element.
    ///
    /// The menu container's rectangle is the window's, which the standard
    /// object already reports correctly, so `SELF` delegates.
    pub fn location(&self, child: ChildId) -> Option<Rect> {
        self.affinity.debug_assert_same_thread();
        match self.resolve(child) {
            Resolved::Item(index) => self.host.item_bounds(index, CoordinateSpace::Screen),
            Resolved::Menu | Resolved::Invalid => self.delegate(|standard| standard.location(child)),
        }
    }

    /// Resolve a screen point to the element occupying it.
    ///
    /// Inside the client area the answer is the first (smallest-index) item
    /// whose rectangle contains the point (item rectangles are ordered and
    /// non-overlapping), or `SELF` for client-area padding. Points outside
    /// the client area are delegated.
    pub fn hit_test(&self, screen_point: Point) -> Option<ChildId> {
        self.affinity.debug_assert_same_thread();
        if let Some(client_point) = self.host.screen_to_client(screen_point)
            && let Some(client) = self.host.client_bounds()
            && client.contains(client_point)
        {
            for index in 0..self.host.item_count() {
                if let Some(bounds) = self.host.item_bounds(index, CoordinateSpace::Client)
                    && bounds.contains(client_point)
                {
                    return Some(ChildId::from_index(index));
                }
            }
            return Some(ChildId::SELF);
        }
        self.delegate(|standard| standard.hit_test(screen_point))
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate from `start` in `direction`.
    ///
    /// The menu answers the logical directions over its own items; boundary
    /// moves return `None` ("no target"). Every other combination is
    /// delegated to the standard object.
    pub fn navigate(&self, direction: NavDirection, start: ChildId) -> Option<ChildId> {
        self.affinity.debug_assert_same_thread();
        let count = self.host.item_count();
        match (self.resolve(start), direction) {
            (Resolved::Menu, NavDirection::FirstChild) => {
                (count > 0).then(|| ChildId::from_index(0))
            }
            (Resolved::Menu, NavDirection::LastChild) => {
                (count > 0).then(|| ChildId::from_index(count - 1))
            }
            (Resolved::Item(index), NavDirection::Next) => {
                (index + 1 < count).then(|| ChildId::from_index(index + 1))
            }
            (Resolved::Item(index), NavDirection::Previous) => {
                (index > 0).then(|| ChildId::from_index(index - 1))
            }
            _ => self.delegate(|standard| standard.navigate(direction, start)),
        }
    }

    // =========================================================================
    // Invocation
    // =========================================================================

    /// Invoke the item's default action, deferred.
    ///
    /// Items without an activation callback are a no-op. For items with one,
    /// the activation is posted to the window's message queue and this call
    /// returns immediately; the callback runs no earlier than the next
    /// message-loop iteration, after this call stack has unwound.
    pub fn invoke(&self, child: ChildId) -> AccessResult<()> {
        self.affinity.debug_assert_same_thread();
        match self.resolve(child) {
            Resolved::Menu => Err(AccessError::Unsupported),
            Resolved::Invalid => Err(AccessError::InvalidChild(child)),
            Resolved::Item(index) => {
                let Some(item) = self.host.item(index) else {
                    return Err(AccessError::InvalidChild(child));
                };
                if !item.has_default_action() {
                    return Ok(());
                }
                if !self.host.post_activation(index) {
                    // Fire-and-forget click semantics: a lost post is logged,
                    // not surfaced to the assistive client.
                    tracing::warn!(
                        target: LOG_TARGET,
                        "failed to post activation for item {index}"
                    );
                }
                Ok(())
            }
        }
    }

    // =========================================================================
    // Unsupported protocol features
    // =========================================================================

    /// Modify the protocol selection; never supported by the menu model.
    pub fn select(&self, child: ChildId) -> AccessResult<()> {
        self.affinity.debug_assert_same_thread();
        let _ = child;
        Err(AccessError::Unsupported)
    }

    /// Help-topic lookup; never supported by the menu model.
    pub fn help_topic(&self, child: ChildId) -> AccessResult<(String, i32)> {
        self.affinity.debug_assert_same_thread();
        let _ = child;
        Err(AccessError::Unsupported)
    }

    /// Write the accessible name; never supported by the menu model.
    pub fn set_name(&self, child: ChildId, name: &str) -> AccessResult<()> {
        self.affinity.debug_assert_same_thread();
        let _ = (child, name);
        Err(AccessError::Unsupported)
    }

    /// Write the accessible value; never supported by the menu model.
    pub fn set_value(&self, child: ChildId, value: &str) -> AccessResult<()> {
        self.affinity.debug_assert_same_thread();
        let _ = (child, value);
        Err(AccessError::Unsupported)
    }
}
