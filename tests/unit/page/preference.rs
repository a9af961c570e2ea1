use super::*;
use crate::dom::document::Document;
use crate::foundation::core::Viewport;

fn host(signal: Option<bool>) -> Host {
    Host::new(Document::new(), Viewport::default()).with_reduced_motion(signal)
}

#[test]
fn follows_the_media_signal() {
    assert!(MotionPreference::detect(&host(Some(true))).reduced_motion());
    assert!(MotionPreference::detect(&host(Some(false))).allows_motion());
}

#[test]
fn unavailable_signal_allows_motion() {
    let pref = MotionPreference::detect(&host(None));
    assert!(!pref.reduced_motion());
    assert!(pref.allows_motion());
}
