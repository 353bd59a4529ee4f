//! Windows backend: the OS standard accessible object and message posting.
//!
//! This module binds the crate's protocol types to the native contract:
//! [`WindowAccessibleFactory`] produces the default client-area accessible
//! object for a window, [`StandardWindowAccessible`] forwards the
//! [`StandardAccessible`] read surface to it, and [`ActivationChannel`]
//! gives hosts the deferred message-post primitive used by `invoke`.
//! Releasing the object is dropping it: the COM reference is released when
//! the last handle goes away.

use std::sync::Arc;

use raw_window_handle::RawWindowHandle;
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::Accessibility::{CreateStdAccessibleObject, IAccessible, NotifyWinEvent};
use windows::Win32::UI::WindowsAndMessaging::{
    EVENT_OBJECT_FOCUS, OBJID_CLIENT, PostMessageW, WM_APP,
};
use windows::core::{BSTR, Interface, VARIANT};

use crate::error::{AccessError, AccessResult};
use crate::fallback::{StandardAccessible, StandardAccessibleFactory, UnavailableFactory};
use crate::geometry::{Point, Rect};
use crate::protocol::{ChildId, NavDirection, Role, StateFlags};

/// Log target for backend diagnostics.
const LOG_TARGET: &str = "menu_access::platform";

/// Default window message carrying a deferred item activation.
///
/// Hosts that already use messages in the `WM_APP` range can pick another
/// value via [`ActivationChannel::with_message`].
pub const ACTIVATION_MESSAGE: u32 = WM_APP + 0x00A5;

// ============================================================================
// VARIANT conversion
// ============================================================================

fn child_variant(child: ChildId) -> VARIANT {
    VARIANT::from(child.raw() as i32)
}

fn variant_child(value: &VARIANT) -> Option<ChildId> {
    // VT_EMPTY ("no target") and object answers both fail the conversion.
    let raw = i32::try_from(value).ok()?;
    u32::try_from(raw).ok().map(ChildId::from_raw)
}

fn bstr_to_option(value: BSTR) -> Option<String> {
    let text = value.to_string();
    (!text.is_empty()).then_some(text)
}

// ============================================================================
// StandardWindowAccessible
// ============================================================================

/// The OS default accessible object for a window's client area.
pub struct StandardWindowAccessible {
    inner: IAccessible,
}

impl StandardAccessible for StandardWindowAccessible {
    fn name(&self, child: ChildId) -> Option<String> {
        let var = child_variant(child);
        unsafe { self.inner.get_accName(&var) }.ok().and_then(bstr_to_option)
    }

    fn description(&self, child: ChildId) -> Option<String> {
        let var = child_variant(child);
        unsafe { self.inner.get_accDescription(&var) }
            .ok()
            .and_then(bstr_to_option)
    }

    fn role(&self, child: ChildId) -> Option<Role> {
        let var = child_variant(child);
        let role = unsafe { self.inner.get_accRole(&var) }.ok()?;
        i32::try_from(&role).ok().map(|raw| Role::System(raw as u32))
    }

    fn state(&self, child: ChildId) -> Option<StateFlags> {
        let var = child_variant(child);
        let state = unsafe { self.inner.get_accState(&var) }.ok()?;
        i32::try_from(&state)
            .ok()
            .map(|raw| StateFlags::from_bits(raw as u32))
    }

    fn help(&self, child: ChildId) -> Option<String> {
        let var = child_variant(child);
        unsafe { self.inner.get_accHelp(&var) }.ok().and_then(bstr_to_option)
    }

    fn keyboard_shortcut(&self, child: ChildId) -> Option<String> {
        let var = child_variant(child);
        unsafe { self.inner.get_accKeyboardShortcut(&var) }
            .ok()
            .and_then(bstr_to_option)
    }

    fn default_action(&self, child: ChildId) -> Option<String> {
        let var = child_variant(child);
        unsafe { self.inner.get_accDefaultAction(&var) }
            .ok()
            .and_then(bstr_to_option)
    }

    fn location(&self, child: ChildId) -> Option<Rect> {
        let var = child_variant(child);
        let (mut left, mut top, mut width, mut height) = (0, 0, 0, 0);
        unsafe {
            self.inner
                .accLocation(&mut left, &mut top, &mut width, &mut height, &var)
        }
        .ok()?;
        Some(Rect::new(left, top, width, height))
    }

    fn navigate(&self, direction: NavDirection, start: ChildId) -> Option<ChildId> {
        let var = child_variant(start);
        let target =
            unsafe { self.inner.accNavigate(direction.system_value() as i32, &var) }.ok()?;
        variant_child(&target)
    }

    fn hit_test(&self, point: Point) -> Option<ChildId> {
        let target = unsafe { self.inner.accHitTest(point.x, point.y) }.ok()?;
        variant_child(&target)
    }
}

// ============================================================================
// WindowAccessibleFactory
// ============================================================================

/// Produces the standard accessible object for a window handle.
pub struct WindowAccessibleFactory {
    hwnd: HWND,
}

impl WindowAccessibleFactory {
    /// Create a factory for the given window.
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    /// Create a factory from a raw window handle.
    ///
    /// Fails with [`AccessError::Unavailable`] when the handle is not a
    /// Win32 window.
    pub fn from_window_handle(handle: RawWindowHandle) -> AccessResult<Self> {
        match handle {
            RawWindowHandle::Win32(win32) => Ok(Self::new(HWND(
                win32.hwnd.get() as *mut core::ffi::c_void
            ))),
            _ => Err(AccessError::Unavailable(
                "not a Win32 window handle".into(),
            )),
        }
    }
}

impl StandardAccessibleFactory for WindowAccessibleFactory {
    fn create(&self) -> AccessResult<Arc<dyn StandardAccessible>> {
        let mut created: Option<IAccessible> = None;
        unsafe {
            CreateStdAccessibleObject(
                self.hwnd,
                OBJID_CLIENT.0,
                &IAccessible::IID,
                &mut created as *mut _ as *mut *mut core::ffi::c_void,
            )
        }
        .map_err(|err| AccessError::Unavailable(err.to_string()))?;

        match created {
            Some(inner) => Ok(Arc::new(StandardWindowAccessible { inner })),
            None => Err(AccessError::Unavailable(
                "standard accessible object was not produced".into(),
            )),
        }
    }
}

/// Build the standard-object factory for the menu's native window.
pub fn standard_factory_for_window(handle: RawWindowHandle) -> Box<dyn StandardAccessibleFactory> {
    match WindowAccessibleFactory::from_window_handle(handle) {
        Ok(factory) => Box::new(factory),
        Err(err) => {
            tracing::warn!(target: LOG_TARGET, "no standard object factory: {err}");
            Box::new(UnavailableFactory::new(err.to_string()))
        }
    }
}

// ============================================================================
// Activation posting
// ============================================================================

/// Deferred activation delivery through the window's message queue.
///
/// A host's `post_activation` forwards to [`ActivationChannel::post`]; its
/// window procedure matches [`ActivationChannel::message`] and runs the
/// item's callback with the index from
/// [`ActivationChannel::index_from_wparam`].
pub struct ActivationChannel {
    hwnd: HWND,
    message: u32,
}

impl ActivationChannel {
    /// Create a channel using [`ACTIVATION_MESSAGE`].
    pub fn new(hwnd: HWND) -> Self {
        Self::with_message(hwnd, ACTIVATION_MESSAGE)
    }

    /// Create a channel with a custom `WM_APP`-range message.
    pub fn with_message(hwnd: HWND, message: u32) -> Self {
        Self { hwnd, message }
    }

    /// The window message this channel posts.
    pub fn message(&self) -> u32 {
        self.message
    }

    /// Post a deferred activation of the item at `index`.
    ///
    /// Returns `false` when the post fails (window destroyed, queue full).
    pub fn post(&self, index: usize) -> bool {
        let posted =
            unsafe { PostMessageW(self.hwnd, self.message, WPARAM(index), LPARAM(0)) }.is_ok();
        if !posted {
            tracing::warn!(target: LOG_TARGET, "activation post failed for item {index}");
        }
        posted
    }

    /// Recover the item index from a received activation message.
    pub fn index_from_wparam(wparam: WPARAM) -> usize {
        wparam.0
    }
}

// ============================================================================
// Focus announcements
// ============================================================================

/// Announce a focus transition to assistive clients.
///
/// Hosts call this when hot-tracking moves to another item (or to
/// `ChildId::SELF` when the menu itself gains focus), so screen readers
/// re-query and announce the newly focused element.
pub fn announce_focus(hwnd: HWND, child: ChildId) {
    unsafe { NotifyWinEvent(EVENT_OBJECT_FOCUS, hwnd, OBJID_CLIENT.0, child.raw() as i32) };
}
