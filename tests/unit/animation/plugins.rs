use super::*;

#[test]
fn registration_happens_once_per_process() {
    let first = ensure_registered();
    let second = ensure_registered();
    assert!(std::ptr::eq(first, second));
    assert!(is_registered());
    assert!(first.contains("scroll-trigger"));
    assert!(!first.contains("physics"));
    assert_eq!(first.names().len(), 2);
}

#[test]
fn parsing_an_ease_resolves_through_the_registry() {
    let ease: Ease = "elastic.out(1, 0.5)".parse().unwrap();
    assert!(is_registered());
    let build = ensure_registered().ease("elastic.out").unwrap();
    assert_eq!(build("elastic.out", &[1.0, 0.5]).unwrap(), ease);
    assert!(ensure_registered().ease("bounce.out").is_none());
    assert!("bounce.out".parse::<Ease>().is_err());
}

#[test]
fn every_registered_name_parses() {
    let set = ensure_registered();
    assert_eq!(set.ease_names().count(), 20);
    for name in set.ease_names() {
        let ease: Ease = name.parse().unwrap();
        assert_eq!(ease.apply(1.0), 1.0, "{name}");
        let build = set.ease(name).unwrap();
        assert!(build(name, &[1.0, 2.0, 3.0]).is_err(), "{name} rejects extra arguments");
    }
}
