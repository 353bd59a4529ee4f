//! Platform backends for the standard accessible object.
//!
//! The bridge's delegation target is OS-provided: on Windows it is the
//! default client-area accessible object for the menu's window. Other
//! platforms have no equivalent for this protocol, so they get a stub
//! factory whose creations fail as unavailable; every delegated query then
//! degrades to an empty answer, which is the documented fallback policy.

use raw_window_handle::RawWindowHandle;

use crate::fallback::StandardAccessibleFactory;

#[cfg(target_os = "windows")]
pub mod windows;
#[cfg(target_os = "windows")]
use windows as backend;

#[cfg(not(target_os = "windows"))]
mod stub;
#[cfg(not(target_os = "windows"))]
use stub as backend;

/// Build the standard-object factory for the menu's native window.
///
/// The returned factory defers all OS work to its first `create` call; a
/// handle of the wrong kind for the platform yields a factory whose
/// creations fail as unavailable rather than an error here.
pub fn standard_factory_for_window(handle: RawWindowHandle) -> Box<dyn StandardAccessibleFactory> {
    backend::standard_factory_for_window(handle)
}
