//! Stub backend for platforms without a standard accessible object.

use raw_window_handle::RawWindowHandle;

use crate::fallback::{StandardAccessibleFactory, UnavailableFactory};

pub fn standard_factory_for_window(handle: RawWindowHandle) -> Box<dyn StandardAccessibleFactory> {
    let _ = handle;
    Box::new(UnavailableFactory::new(
        "no standard accessible object on this platform",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccessError;
    use raw_window_handle::WebWindowHandle;

    #[test]
    fn test_stub_factory_reports_unavailable() {
        let factory = standard_factory_for_window(RawWindowHandle::Web(WebWindowHandle::new(1)));
        let err = factory.create().err().expect("stub has no fallback");
        assert!(matches!(err, AccessError::Unavailable(_)));
    }
}
