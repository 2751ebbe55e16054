//! Effect names and the RGB color some effects carry

use std::fmt;

use crate::operation::ValidationError;

/// A non-image display mode
///
/// The device knows a fixed set of effects; names it may add later are kept
/// verbatim in [`Effect::Other`] and sent through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Effect {
    None,
    Off,
    Rainbow,
    Solid,
    Chase,
    Accel,
    Other(String),
}

impl Effect {
    pub fn as_str(&self) -> &str {
        match self {
            Effect::None => "none",
            Effect::Off => "off",
            Effect::Rainbow => "rainbow",
            Effect::Solid => "solid",
            Effect::Chase => "chase",
            Effect::Accel => "accel",
            Effect::Other(name) => name,
        }
    }

    /// Whether the device expects an `r,g,b` triple with this effect
    pub fn takes_color(&self) -> bool {
        matches!(self, Effect::Solid | Effect::Chase)
    }
}

impl From<&str> for Effect {
    fn from(name: &str) -> Self {
        match name {
            "none" => Effect::None,
            "off" => Effect::Off,
            "rainbow" => Effect::Rainbow,
            "solid" => Effect::Solid,
            "chase" => Effect::Chase,
            "accel" => Effect::Accel,
            other => Effect::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An 8-bit-per-channel color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` (or bare `RRGGBB`) hex triplet, either case
    pub fn from_hex(hex: &str) -> Result<Self, ValidationError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        // from_str_radix would accept a leading '+', so check the digits first
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ValidationError::invalid_value(
                "color",
                hex,
                "expected a #RRGGBB hex triplet",
            ));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ValidationError::invalid_value("color", hex, "expected a #RRGGBB hex triplet"))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("#FF00A0", Rgb::new(255, 0, 160))]
    #[case("#ff00a0", Rgb::new(255, 0, 160))]
    #[case("FF00A0", Rgb::new(255, 0, 160))]
    #[case("#000000", Rgb::new(0, 0, 0))]
    #[case("#ffffff", Rgb::new(255, 255, 255))]
    #[case("#0a0B0c", Rgb::new(10, 11, 12))]
    fn test_from_hex(#[case] hex: &str, #[case] expected: Rgb) {
        assert_eq!(Rgb::from_hex(hex).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("#")]
    #[case("#FFF")]
    #[case("#FF00A0FF")]
    #[case("#GG0000")]
    #[case("#+F00A0")]
    #[case("#FF 0A0")]
    #[case("#ÿÿÿ")]
    fn test_from_hex_rejects_malformed(#[case] hex: &str) {
        let error = Rgb::from_hex(hex).unwrap_err();
        assert_eq!(error.parameter(), "color");
    }

    #[rstest]
    #[case("solid", Effect::Solid, true)]
    #[case("chase", Effect::Chase, true)]
    #[case("none", Effect::None, false)]
    #[case("rainbow", Effect::Rainbow, false)]
    #[case("accel", Effect::Accel, false)]
    #[case("off", Effect::Off, false)]
    #[case("sparkle", Effect::Other("sparkle".to_string()), false)]
    fn test_effect_names(#[case] name: &str, #[case] expected: Effect, #[case] colored: bool) {
        let effect = Effect::from(name);
        assert_eq!(effect, expected);
        assert_eq!(effect.takes_color(), colored);
        assert_eq!(effect.as_str(), name);
    }

    proptest! {
        #[test]
        fn prop_hex_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let color = Rgb::new(r, g, b);
            prop_assert_eq!(Rgb::from_hex(&color.to_hex()).unwrap(), color);
            prop_assert_eq!(Rgb::from_hex(&color.to_hex().to_uppercase()).unwrap(), color);
        }
    }
}
