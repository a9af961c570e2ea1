use super::*;

#[test]
fn viewport_parses_and_displays() {
    let vp: Viewport = "1200x800".parse().unwrap();
    assert_eq!(vp, Viewport::new(1200, 800));
    assert_eq!(vp.to_string(), "1200x800");
    assert!("1200".parse::<Viewport>().is_err());
    assert!("ax800".parse::<Viewport>().is_err());
}

#[test]
fn viewport_aspect_guards_zero_height() {
    assert_eq!(Viewport::new(800, 600).aspect(), Some(800.0 / 600.0));
    assert_eq!(Viewport::new(800, 0).aspect(), None);
    assert!(Viewport::new(0, 10).is_empty());
}

#[test]
fn rgb_hex_roundtrips_through_serde() {
    let c = Rgb8::parse_hex("#16a34a").unwrap();
    assert_eq!(c, Rgb8::from_hex_u32(0x16a34a));
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "\"#16a34a\"");
    let back: Rgb8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
    assert!(Rgb8::parse_hex("#16a3").is_err());
}
