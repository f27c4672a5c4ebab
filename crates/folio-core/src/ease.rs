use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which end of the curve the acceleration sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    In,
    Out,
    InOut,
}

/// Easing curves.
///
/// `Power(n, _)` raises progress to the power `n + 1`, so `power1` is
/// quadratic and `power4` quintic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    Linear,
    Power(u8, Direction),
}

impl Ease {
    pub const POWER2_OUT: Ease = Ease::Power(2, Direction::Out);
    pub const POWER2_IN_OUT: Ease = Ease::Power(2, Direction::InOut);
    pub const POWER3_OUT: Ease = Ease::Power(3, Direction::Out);

    /// Map linear progress in `[0, 1]` to eased progress
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Ease::Linear => t,
            Ease::Power(power, direction) => {
                let exponent = i32::from(power) + 1;
                match direction {
                    Direction::In => t.powi(exponent),
                    Direction::Out => 1.0 - (1.0 - t).powi(exponent),
                    Direction::InOut => {
                        if t < 0.5 {
                            (2.0 * t).powi(exponent) / 2.0
                        } else {
                            1.0 - (2.0 * (1.0 - t)).powi(exponent) / 2.0
                        }
                    }
                }
            }
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Power(1, Direction::Out)
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::Linear => write!(f, "linear"),
            Ease::Power(power, Direction::In) => write!(f, "power{}.in", power),
            Ease::Power(power, Direction::Out) => write!(f, "power{}.out", power),
            Ease::Power(power, Direction::InOut) => write!(f, "power{}.inOut", power),
        }
    }
}

impl FromStr for Ease {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower == "linear" || lower == "none" {
            return Ok(Ease::Linear);
        }

        let invalid = || {
            format!(
                "Invalid ease: {}. Use linear or powerN.in/out/inOut with N from 1 to 4",
                s
            )
        };

        let rest = lower.strip_prefix("power").ok_or_else(invalid)?;
        let (power, direction) = match rest.split_once('.') {
            Some((power, direction)) => (power, direction),
            None => (rest, "out"),
        };
        let power: u8 = power.parse().map_err(|_| invalid())?;
        if !(1..=4).contains(&power) {
            return Err(invalid());
        }
        let direction = match direction {
            "in" => Direction::In,
            "out" => Direction::Out,
            "inout" => Direction::InOut,
            _ => return Err(invalid()),
        };
        Ok(Ease::Power(power, direction))
    }
}

impl TryFrom<String> for Ease {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(ease: Ease) -> Self {
        ease.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_fixed() {
        for ease in [
            Ease::Linear,
            Ease::POWER2_OUT,
            Ease::POWER2_IN_OUT,
            Ease::POWER3_OUT,
            Ease::Power(4, Direction::In),
        ] {
            assert_eq!(ease.apply(0.0), 0.0, "{}", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{}", ease);
        }
    }

    #[test]
    fn test_apply_clamps() {
        assert_eq!(Ease::POWER3_OUT.apply(-1.0), 0.0);
        assert_eq!(Ease::POWER3_OUT.apply(2.0), 1.0);
        assert_eq!(Ease::Linear.apply(f64::NAN), 0.0);
    }

    #[test]
    fn test_curve_shapes() {
        // power2 is cubic
        assert!((Ease::Power(2, Direction::In).apply(0.5) - 0.125).abs() < 1e-12);
        assert!((Ease::POWER2_OUT.apply(0.5) - 0.875).abs() < 1e-12);
        // in-out is symmetric around the midpoint
        assert!((Ease::POWER2_IN_OUT.apply(0.5) - 0.5).abs() < 1e-12);
        let a = Ease::POWER2_IN_OUT.apply(0.2);
        let b = Ease::POWER2_IN_OUT.apply(0.8);
        assert!((a + b - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_round_trip_names() {
        assert_eq!("power2.inOut".parse::<Ease>().unwrap(), Ease::POWER2_IN_OUT);
        assert_eq!("Power3.Out".parse::<Ease>().unwrap(), Ease::POWER3_OUT);
        assert_eq!("power2".parse::<Ease>().unwrap(), Ease::POWER2_OUT);
        assert_eq!("none".parse::<Ease>().unwrap(), Ease::Linear);
        assert_eq!(Ease::POWER2_IN_OUT.to_string(), "power2.inOut");
    }

    #[test]
    fn test_parse_invalid() {
        assert!("bounce".parse::<Ease>().is_err());
        assert!("power9.out".parse::<Ease>().is_err());
        assert!("power2.sideways".parse::<Ease>().is_err());
    }
}
