//! Fallback delegation to the window's standard accessible object.
//!
//! The bridge models exactly one thing: the menu's flat item list. Anything
//! outside that (parent navigation, out-of-range child identifiers, screen
//! points beyond the client area) is answered by the OS-provided accessible
//! object for the menu's window. [`StandardObjectCache`] creates that object
//! lazily on first need, hands out shared handles for the duration of a
//! delegated call, and guarantees it is released exactly once, even when the
//! owner forgets explicit teardown and the cache is dropped.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{AccessError, AccessResult};
use crate::geometry::{Point, Rect};
use crate::protocol::{ChildId, NavDirection, Role, StateFlags};

/// Log target for fallback diagnostics.
const LOG_TARGET: &str = "menu_access::fallback";

// ============================================================================
// StandardAccessible
// ============================================================================

/// The read surface of a fallback accessible object.
///
/// Every method is child-scoped and defaults to "no answer", which is what a
/// degraded or absent fallback reports. The Windows backend overrides the
/// full surface by forwarding to the OS object; test doubles override only
/// what a test observes.
#[allow(unused_variables)]
pub trait StandardAccessible {
    /// Accessible name of the addressed element.
    fn name(&self, child: ChildId) -> Option<String> {
        None
    }

    /// Accessible description of the addressed element.
    fn description(&self, child: ChildId) -> Option<String> {
        None
    }

    /// Role of the addressed element.
    fn role(&self, child: ChildId) -> Option<Role> {
        None
    }

    /// State of the addressed element.
    fn state(&self, child: ChildId) -> Option<StateFlags> {
        None
    }

    /// Help text of the addressed element.
    fn help(&self, child: ChildId) -> Option<String> {
        None
    }

    /// Keyboard shortcut of the addressed element.
    fn keyboard_shortcut(&self, child: ChildId) -> Option<String> {
        None
    }

    /// Default-action name of the addressed element.
    fn default_action(&self, child: ChildId) -> Option<String> {
        None
    }

    /// Screen rectangle of the addressed element.
    fn location(&self, child: ChildId) -> Option<Rect> {
        None
    }

    /// Navigate from `start` in `direction`.
    fn navigate(&self, direction: NavDirection, start: ChildId) -> Option<ChildId> {
        None
    }

    /// Resolve a screen point to an element.
    fn hit_test(&self, point: Point) -> Option<ChildId> {
        None
    }
}

// ============================================================================
// StandardAccessibleFactory
// ============================================================================

/// Produces the fallback accessible object on first need.
///
/// Closures returning `AccessResult<Arc<dyn StandardAccessible>>` implement
/// this trait directly.
pub trait StandardAccessibleFactory {
    /// Create the fallback object.
    ///
    /// Fails with [`AccessError::Unavailable`] when the window handle is
    /// invalid or the OS call fails; callers treat that as "no fallback
    /// available" and answer empty.
    fn create(&self) -> AccessResult<Arc<dyn StandardAccessible>>;
}

impl<F> StandardAccessibleFactory for F
where
    F: Fn() -> AccessResult<Arc<dyn StandardAccessible>>,
{
    fn create(&self) -> AccessResult<Arc<dyn StandardAccessible>> {
        self()
    }
}

impl StandardAccessibleFactory for Box<dyn StandardAccessibleFactory> {
    fn create(&self) -> AccessResult<Arc<dyn StandardAccessible>> {
        (**self).create()
    }
}

/// A factory for platforms or windows without a standard accessible object.
///
/// Every `create` call fails with [`AccessError::Unavailable`], so all
/// delegated queries degrade to empty results.
pub struct UnavailableFactory {
    reason: String,
}

impl UnavailableFactory {
    /// Create a factory that always reports the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl StandardAccessibleFactory for UnavailableFactory {
    fn create(&self) -> AccessResult<Arc<dyn StandardAccessible>> {
        Err(AccessError::Unavailable(self.reason.clone()))
    }
}

// ============================================================================
// StandardObjectCache
// ============================================================================

enum Slot {
    /// Not created yet; the next `get` runs the factory.
    Empty,
    /// Created and cached.
    Ready(Arc<dyn StandardAccessible>),
    /// Released; the cache stays closed for the rest of its life.
    Released,
}

/// Lazily-created, exclusively-owned cache of the fallback object.
///
/// Handles are handed out as `Arc` clones so a delegated call in flight
/// keeps the object alive even if `release` runs concurrently with it;
/// release then merely drops the cache's own reference, and the OS object
/// goes away when the in-flight call finishes.
pub struct StandardObjectCache {
    factory: Box<dyn StandardAccessibleFactory>,
    slot: Mutex<Slot>,
}

impl StandardObjectCache {
    /// Create a cache around the given factory. Nothing is created yet.
    pub fn new(factory: impl StandardAccessibleFactory + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            slot: Mutex::new(Slot::Empty),
        }
    }

    /// Get the fallback object, creating it on first call.
    ///
    /// Fails with [`AccessError::Unavailable`] when the factory fails or the
    /// cache has already been released.
    pub fn get(&self) -> AccessResult<Arc<dyn StandardAccessible>> {
        {
            let slot = self.slot.lock();
            match &*slot {
                Slot::Ready(object) => return Ok(object.clone()),
                Slot::Released => {
                    return Err(AccessError::Unavailable(
                        "standard object already released".into(),
                    ));
                }
                Slot::Empty => {}
            }
        }

        // The lock is never held across the factory call: creating the OS
        // object can dispatch messages that reenter the accessibility
        // server on this same thread.
        let created = self.factory.create()?;

        let mut slot = self.slot.lock();
        match &*slot {
            Slot::Ready(existing) => Ok(existing.clone()),
            Slot::Released => Err(AccessError::Unavailable(
                "standard object released during creation".into(),
            )),
            Slot::Empty => {
                *slot = Slot::Ready(created.clone());
                Ok(created)
            }
        }
    }

    /// Run a closure against the fallback object, swallowing unavailability.
    ///
    /// This is the delegation policy in one place: a missing fallback turns
    /// into an empty answer, never an error visible to the assistive client.
    pub fn with_object<R>(&self, f: impl FnOnce(&dyn StandardAccessible) -> Option<R>) -> Option<R> {
        match self.get() {
            Ok(object) => f(object.as_ref()),
            Err(err) => {
                tracing::debug!(target: LOG_TARGET, "delegation skipped: {err}");
                None
            }
        }
    }

    /// Whether the fallback object currently exists.
    pub fn is_created(&self) -> bool {
        matches!(&*self.slot.lock(), Slot::Ready(_))
    }

    /// Whether the cache has been released.
    pub fn is_released(&self) -> bool {
        matches!(&*self.slot.lock(), Slot::Released)
    }

    /// Release the fallback object.
    ///
    /// Idempotent: the first call drops the cached handle (releasing the OS
    /// object once no delegated call still holds it), later calls are
    /// no-ops. Called from `Drop` if the owner never released explicitly.
    pub fn release(&self) {
        let mut slot = self.slot.lock();
        if matches!(&*slot, Slot::Ready(_)) {
            tracing::debug!(target: LOG_TARGET, "standard object released");
        }
        *slot = Slot::Released;
    }
}

impl Drop for StandardObjectCache {
    fn drop(&mut self) {
        self.release();
    }
}
