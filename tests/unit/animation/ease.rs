use super::*;

const NAMED: [&str; 13] = [
    "linear",
    "power1.in",
    "power1.out",
    "power1.inOut",
    "power2.in",
    "power2.out",
    "power2.inOut",
    "power3.in",
    "power3.out",
    "power3.inOut",
    "back.out(1.7)",
    "elastic.out(1, 0.5)",
    "elastic.out(1.2, 0.3)",
];

#[test]
fn endpoints_are_exact_for_every_named_curve() {
    for name in NAMED {
        let ease: Ease = name.parse().unwrap();
        assert_eq!(ease.apply(0.0), 0.0, "{name} at 0");
        assert_eq!(ease.apply(1.0), 1.0, "{name} at 1");
        assert_eq!(ease.apply(-3.0), 0.0, "{name} below range");
        assert_eq!(ease.apply(7.0), 1.0, "{name} above range");
    }
}

#[test]
fn power_curves_follow_their_polynomials() {
    let t: f64 = 0.3;
    assert!((Ease::OutQuad.apply(t) - (1.0 - 0.7f64.powi(2))).abs() < 1e-12);
    assert!((Ease::OutCubic.apply(t) - (1.0 - 0.7f64.powi(3))).abs() < 1e-12);
    assert!((Ease::OutQuart.apply(t) - (1.0 - 0.7f64.powi(4))).abs() < 1e-12);
    assert!((Ease::InOutCubic.apply(0.5) - 0.5).abs() < 1e-12);
}

#[test]
fn back_out_overshoots_before_settling() {
    let ease: Ease = "back.out(1.7)".parse().unwrap();
    assert_eq!(ease, Ease::BackOut(1.7));
    let peak = (1..100)
        .map(|i| ease.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
}

#[test]
fn elastic_out_oscillates_around_one() {
    let ease: Ease = "elastic.out(1, 0.5)".parse().unwrap();
    assert_eq!(
        ease,
        Ease::ElasticOut {
            amplitude: 1.0,
            period: 0.5
        }
    );
    let samples: Vec<f64> = (1..100).map(|i| ease.apply(f64::from(i) / 100.0)).collect();
    assert!(samples.iter().any(|v| *v > 1.0));
    assert!(samples.iter().any(|v| *v < 1.0));
}

#[test]
fn parses_aliases_and_defaults() {
    assert_eq!("none".parse::<Ease>().unwrap(), Ease::Linear);
    assert_eq!("power2".parse::<Ease>().unwrap(), Ease::OutCubic);
    assert_eq!("back.out".parse::<Ease>().unwrap(), Ease::BackOut(1.70158));
    assert_eq!(
        " elastic.out( 1 ) ".parse::<Ease>().unwrap(),
        Ease::ElasticOut {
            amplitude: 1.0,
            period: 0.3
        }
    );
    assert_eq!(Ease::default(), Ease::OutQuad);
}

#[test]
fn rejects_bad_identifiers() {
    for bad in [
        "bounce.out",
        "power1.out(2)",
        "back.out(x)",
        "back.out(1.7",
        "elastic.out(1, 0)",
        "elastic.out(1, 2, 3)",
    ] {
        let err = bad.parse::<Ease>().unwrap_err();
        assert!(err.to_string().starts_with("animation error:"), "{bad}: {err}");
    }
}

#[test]
fn serde_uses_identifier_strings() {
    let json = serde_json::to_string(&Ease::BackOut(1.7)).unwrap();
    assert_eq!(json, "\"back.out(1.7)\"");
    let ease: Ease = serde_json::from_str("\"power3.out\"").unwrap();
    assert_eq!(ease, Ease::OutQuart);
    assert!(serde_json::from_str::<Ease>("\"wobble\"").is_err());
    for name in NAMED {
        let ease: Ease = name.parse().unwrap();
        assert_eq!(ease.to_string().parse::<Ease>().unwrap(), ease);
    }
}
