use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::animation::plugins::{self, EaseBuilder};
use crate::foundation::error::{VerdantError, VerdantResult};

const BACK_OVERSHOOT: f64 = 1.70158;
const ELASTIC_AMPLITUDE: f64 = 1.0;
const ELASTIC_PERIOD: f64 = 0.3;

/// Named easing curve.
///
/// Written with GSAP-style identifiers: `linear`, `power1.out`, `power3.inOut`,
/// `back.out(1.7)`, `elastic.out(1, 0.5)`. `powerN` without a direction means `.out`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Ease {
    Linear,
    InQuad,
    #[default]
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    /// Overshoots past 1 by an amount controlled by the parameter, then settles.
    BackOut(f64),
    ElasticOut { amplitude: f64, period: f64 },
}

impl Ease {
    /// Maps linear progress to eased progress. Input is clamped to `[0, 1]`; both endpoints
    /// are returned exactly.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t).powi(2),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
            Self::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u.powi(3) + s * u.powi(2)
            }
            Self::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }

    fn validate(self) -> VerdantResult<Self> {
        match self {
            Self::BackOut(s) if !s.is_finite() => Err(VerdantError::animation(
                "back overshoot must be finite",
            )),
            Self::ElasticOut { amplitude, period }
                if !amplitude.is_finite() || !period.is_finite() || period <= 0.0 =>
            {
                Err(VerdantError::animation(
                    "elastic amplitude must be finite and period positive",
                ))
            }
            other => Ok(other),
        }
    }
}

fn elastic_out(t: f64, amplitude: f64, period: f64) -> f64 {
    // Amplitudes below 1 would make asin undefined; the curve treats them as 1.
    let a = amplitude.max(1.0);
    let s = period / (2.0 * PI) * (1.0 / a).asin();
    a * 2f64.powf(-10.0 * t) * ((t - s) * (2.0 * PI) / period).sin() + 1.0
}

fn fixed(name: &str, args: &[f64], ease: Ease) -> VerdantResult<Ease> {
    if args.is_empty() {
        Ok(ease)
    } else {
        Err(VerdantError::animation(format!("ease '{name}' takes no arguments")))
    }
}

fn build_back_out(name: &str, args: &[f64]) -> VerdantResult<Ease> {
    match args {
        [] => Ok(Ease::BackOut(BACK_OVERSHOOT)),
        [s] => Ok(Ease::BackOut(*s)),
        _ => Err(VerdantError::animation(format!("'{name}' takes one argument"))),
    }
}

fn build_elastic_out(name: &str, args: &[f64]) -> VerdantResult<Ease> {
    let (amplitude, period) = match args {
        [] => (ELASTIC_AMPLITUDE, ELASTIC_PERIOD),
        [a] => (*a, ELASTIC_PERIOD),
        [a, p] => (*a, *p),
        _ => {
            return Err(VerdantError::animation(format!(
                "'{name}' takes at most two arguments"
            )));
        }
    };
    Ok(Ease::ElasticOut { amplitude, period })
}

/// The GSAP names installed by [`plugins::ensure_registered`]. `powerN` without a direction
/// means `.out`.
pub(crate) fn builtin_eases() -> Vec<(&'static str, EaseBuilder)> {
    let eases: &[(&'static str, EaseBuilder)] = &[
        ("linear", |n: &str, a: &[f64]| fixed(n, a, Ease::Linear)),
        ("none", |n: &str, a: &[f64]| fixed(n, a, Ease::Linear)),
        ("power0", |n: &str, a: &[f64]| fixed(n, a, Ease::Linear)),
        ("power0.out", |n: &str, a: &[f64]| fixed(n, a, Ease::Linear)),
        ("power1", |n: &str, a: &[f64]| fixed(n, a, Ease::OutQuad)),
        ("power1.out", |n: &str, a: &[f64]| fixed(n, a, Ease::OutQuad)),
        ("power1.in", |n: &str, a: &[f64]| fixed(n, a, Ease::InQuad)),
        ("power1.inOut", |n: &str, a: &[f64]| fixed(n, a, Ease::InOutQuad)),
        ("power2", |n: &str, a: &[f64]| fixed(n, a, Ease::OutCubic)),
        ("power2.out", |n: &str, a: &[f64]| fixed(n, a, Ease::OutCubic)),
        ("power2.in", |n: &str, a: &[f64]| fixed(n, a, Ease::InCubic)),
        ("power2.inOut", |n: &str, a: &[f64]| fixed(n, a, Ease::InOutCubic)),
        ("power3", |n: &str, a: &[f64]| fixed(n, a, Ease::OutQuart)),
        ("power3.out", |n: &str, a: &[f64]| fixed(n, a, Ease::OutQuart)),
        ("power3.in", |n: &str, a: &[f64]| fixed(n, a, Ease::InQuart)),
        ("power3.inOut", |n: &str, a: &[f64]| fixed(n, a, Ease::InOutQuart)),
        ("back", build_back_out),
        ("back.out", build_back_out),
        ("elastic", build_elastic_out),
        ("elastic.out", build_elastic_out),
    ];
    eases.to_vec()
}

fn parse_args(name: &str, args: Option<&str>) -> VerdantResult<Vec<f64>> {
    let Some(args) = args else {
        return Ok(Vec::new());
    };
    if args.trim().is_empty() {
        return Ok(Vec::new());
    }
    args.split(',')
        .map(|a| {
            a.trim().parse::<f64>().map_err(|_| {
                VerdantError::animation(format!("ease '{name}' has a non-numeric argument '{a}'"))
            })
        })
        .collect()
}

impl FromStr for Ease {
    type Err = VerdantError;

    fn from_str(s: &str) -> VerdantResult<Self> {
        let s = s.trim();
        let (name, args) = match s.split_once('(') {
            Some((name, rest)) => {
                let inner = rest.strip_suffix(')').ok_or_else(|| {
                    VerdantError::animation(format!("ease '{s}' is missing ')'"))
                })?;
                (name.trim(), Some(inner))
            }
            None => (s, None),
        };
        let args = parse_args(name, args)?;
        let build = plugins::ensure_registered()
            .ease(name)
            .ok_or_else(|| VerdantError::animation(format!("unknown ease \"{name}\"")))?;
        build(name, &args)?.validate()
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::InQuad => f.write_str("power1.in"),
            Self::OutQuad => f.write_str("power1.out"),
            Self::InOutQuad => f.write_str("power1.inOut"),
            Self::InCubic => f.write_str("power2.in"),
            Self::OutCubic => f.write_str("power2.out"),
            Self::InOutCubic => f.write_str("power2.inOut"),
            Self::InQuart => f.write_str("power3.in"),
            Self::OutQuart => f.write_str("power3.out"),
            Self::InOutQuart => f.write_str("power3.inOut"),
            Self::BackOut(s) => write!(f, "back.out({s})"),
            Self::ElasticOut { amplitude, period } => {
                write!(f, "elastic.out({amplitude}, {period})")
            }
        }
    }
}

impl serde::Serialize for Ease {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Ease {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
