//! Protocol vocabulary shared by the server and the fallback object.
//!
//! The accessibility protocol addresses a window's content through *child
//! identifiers*: `0` means the queried object itself, positive values are
//! 1-based child indices. Roles, states, and navigation directions are
//! numeric constants defined by the OS contract; the types here carry them
//! in a typed form and expose the raw values for the platform layer.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

// ============================================================================
// ChildId
// ============================================================================

/// A protocol-level reference to the menu itself or one of its items.
///
/// The wire format is a plain integer: `0` is the container, `1..=n` are the
/// items in display order. [`ChildId`] keeps that representation so values
/// can pass through to the standard object unchanged, and offers checked
/// conversion to the crate's internal 0-based indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildId(u32);

impl ChildId {
    /// The container itself (child identifier `0`).
    pub const SELF: ChildId = ChildId(0);

    /// Wrap a raw protocol child identifier.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The protocol identifier for the item at a 0-based internal index.
    pub const fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// The raw protocol value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whether this identifier refers to the container itself.
    pub const fn is_self(self) -> bool {
        self.0 == 0
    }

    /// The 0-based internal index, if this identifier refers to a child.
    ///
    /// The result is *not* range-checked against any item list; callers
    /// validate against the live item count.
    pub const fn index(self) -> Option<usize> {
        match self.0 {
            0 => None,
            raw => Some(raw as usize - 1),
        }
    }
}

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_self() {
            write!(f, "self")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

// ============================================================================
// Role
// ============================================================================

/// The accessibility role reported for an element.
///
/// Numeric values match the native `ROLE_SYSTEM_*` constants so the platform
/// layer converts without a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The popup menu container.
    PopupMenu,
    /// A regular menu entry.
    MenuItem,
    /// A visual divider between item groups.
    Separator,
    /// A role reported by the standard object for delegated children.
    System(u32),
}

impl Role {
    /// The native numeric value for this role.
    pub const fn system_value(self) -> u32 {
        match self {
            Role::PopupMenu => 0x0B,
            Role::MenuItem => 0x0C,
            Role::Separator => 0x15,
            Role::System(raw) => raw,
        }
    }
}

// ============================================================================
// StateFlags
// ============================================================================

/// Bit union of accessibility state flags.
///
/// Values match the native `STATE_SYSTEM_*` constants. States are computed
/// per query, never stored, and combine freely.
///
/// # Example
///
/// ```
/// use menu_access::StateFlags;
///
/// let state = StateFlags::FOCUSED | StateFlags::HOT_TRACKED;
/// assert!(state.contains(StateFlags::FOCUSED));
/// assert!(!state.contains(StateFlags::CHECKED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StateFlags(u32);

impl StateFlags {
    /// The element is disabled and does not accept interaction.
    pub const UNAVAILABLE: StateFlags = StateFlags(0x0000_0001);

    /// The element has keyboard focus.
    pub const FOCUSED: StateFlags = StateFlags(0x0000_0004);

    /// The element's checkmark is set.
    pub const CHECKED: StateFlags = StateFlags(0x0000_0010);

    /// The element is highlighted under the pointer or selection.
    pub const HOT_TRACKED: StateFlags = StateFlags(0x0000_0080);

    /// The element is not visible on screen.
    pub const INVISIBLE: StateFlags = StateFlags(0x0000_8000);

    /// Activating the element opens a nested popup.
    pub const HAS_POPUP: StateFlags = StateFlags(0x4000_0000);

    /// No flags set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Reconstruct flags from a raw native state mask.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw native state mask.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether no flags are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every flag in `other` is also set in `self`.
    pub const fn contains(self, other: StateFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for StateFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        StateFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for StateFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

// ============================================================================
// NavDirection
// ============================================================================

/// A navigation direction in the accessibility protocol.
///
/// The menu answers the logical directions (`FirstChild`, `LastChild`,
/// `Next`, `Previous`) from its own item list; spatial directions and
/// anything else are delegated to the standard object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
    Next,
    Previous,
    FirstChild,
    LastChild,
}

impl NavDirection {
    /// The native `NAVDIR_*` value for this direction.
    pub const fn system_value(self) -> u32 {
        match self {
            NavDirection::Up => 1,
            NavDirection::Down => 2,
            NavDirection::Left => 3,
            NavDirection::Right => 4,
            NavDirection::Next => 5,
            NavDirection::Previous => 6,
            NavDirection::FirstChild => 7,
            NavDirection::LastChild => 8,
        }
    }

    /// Convert a native `NAVDIR_*` value, if it is one we recognize.
    pub const fn from_system_value(value: u32) -> Option<Self> {
        match value {
            1 => Some(NavDirection::Up),
            2 => Some(NavDirection::Down),
            3 => Some(NavDirection::Left),
            4 => Some(NavDirection::Right),
            5 => Some(NavDirection::Next),
            6 => Some(NavDirection::Previous),
            7 => Some(NavDirection::FirstChild),
            8 => Some(NavDirection::LastChild),
            _ => None,
        }
    }
}
