//! Accessibility bridge for owner-drawn popup menus.
//!
//! An owner-drawn menu is invisible to screen readers: the OS sees one
//! opaque window where the user sees a list of items. This crate exposes
//! such a menu through the standard accessibility query/navigation protocol
//! so assistive clients can enumerate, describe, locate, and activate items
//! exactly as they would in a native menu control.
//!
//! # Architecture
//!
//! - [`MenuAccessibility`] answers every protocol query (name, role, state,
//!   navigation, hit-testing, invocation, ...) from the live item list of a
//!   [`MenuHost`], the narrow interface the owning menu implements.
//! - [`StandardObjectCache`] lazily wraps the OS default accessible object
//!   for the menu's window and answers everything the item model does not
//!   cover: parent navigation, out-of-range child identifiers, screen
//!   points outside the client area.
//! - [`platform`] selects the OS backend: on Windows the standard object
//!   and the deferred activation post are real; elsewhere delegation
//!   degrades to empty answers.
//!
//! Invocation is always deferred: `invoke` posts a message through the host
//! and returns, so an item's callback never runs inside the accessibility
//! call that requested it.
//!
//! # Example
//!
//! ```ignore
//! use menu_access::{ChildId, MenuAccessibility, NavDirection, platform};
//!
//! let factory = platform::standard_factory_for_window(window_handle);
//! let server = MenuAccessibility::new(menu_host, factory);
//!
//! let first = server.navigate(NavDirection::FirstChild, ChildId::SELF);
//! if let Some(child) = first {
//!     println!("first item: {:?}", server.name(child));
//! }
//! ```

pub mod error;
pub mod fallback;
pub mod geometry;
pub mod host;
pub mod item;
pub mod mnemonic;
pub mod platform;
pub mod protocol;
pub mod server;

pub use error::{AccessError, AccessResult};
pub use fallback::{
    StandardAccessible, StandardAccessibleFactory, StandardObjectCache, UnavailableFactory,
};
pub use geometry::{CoordinateSpace, Point, Rect};
pub use host::MenuHost;
pub use item::{ItemActivation, MenuItemDescriptor};
pub use mnemonic::MnemonicText;
pub use protocol::{ChildId, NavDirection, Role, StateFlags};
pub use server::MenuAccessibility;
