//! Enumerated order options
//!
//! Drink temperature and sweetness, and the pickup method attached to an order.
//! On the wire each option is the locale label the Order Submission API expects;
//! on the command line the kebab-case English name is accepted as well.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Unrecognised option value
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid {kind}: {value}")]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseOptionError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Drink temperature
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Temperature {
    #[serde(rename = "正常冰")]
    NormalIce,
    #[serde(rename = "少冰")]
    LessIce,
    #[serde(rename = "微冰")]
    LightIce,
    #[serde(rename = "去冰")]
    NoIce,
    #[serde(rename = "溫")]
    Warm,
    #[serde(rename = "熱")]
    Hot,
}

impl Temperature {
    pub fn all() -> &'static [Temperature] {
        &[
            Temperature::NormalIce,
            Temperature::LessIce,
            Temperature::LightIce,
            Temperature::NoIce,
            Temperature::Warm,
            Temperature::Hot,
        ]
    }

    /// Label sent to the API
    pub fn label(&self) -> &'static str {
        match self {
            Temperature::NormalIce => "正常冰",
            Temperature::LessIce => "少冰",
            Temperature::LightIce => "微冰",
            Temperature::NoIce => "去冰",
            Temperature::Warm => "溫",
            Temperature::Hot => "熱",
        }
    }

    /// Command-line name
    pub fn name(&self) -> &'static str {
        match self {
            Temperature::NormalIce => "normal-ice",
            Temperature::LessIce => "less-ice",
            Temperature::LightIce => "light-ice",
            Temperature::NoIce => "no-ice",
            Temperature::Warm => "warm",
            Temperature::Hot => "hot",
        }
    }
}

impl FromStr for Temperature {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Temperature::all()
            .iter()
            .copied()
            .find(|t| t.label() == s || t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseOptionError::new("temperature", s))
    }
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Drink sweetness
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sweetness {
    #[serde(rename = "正常糖")]
    NormalSugar,
    #[serde(rename = "少糖")]
    LessSugar,
    #[serde(rename = "半糖")]
    HalfSugar,
    #[serde(rename = "微糖")]
    LightSugar,
    #[serde(rename = "無糖")]
    NoSugar,
}

impl Sweetness {
    pub fn all() -> &'static [Sweetness] {
        &[
            Sweetness::NormalSugar,
            Sweetness::LessSugar,
            Sweetness::HalfSugar,
            Sweetness::LightSugar,
            Sweetness::NoSugar,
        ]
    }

    /// Label sent to the API
    pub fn label(&self) -> &'static str {
        match self {
            Sweetness::NormalSugar => "正常糖",
            Sweetness::LessSugar => "少糖",
            Sweetness::HalfSugar => "半糖",
            Sweetness::LightSugar => "微糖",
            Sweetness::NoSugar => "無糖",
        }
    }

    /// Command-line name
    pub fn name(&self) -> &'static str {
        match self {
            Sweetness::NormalSugar => "normal-sugar",
            Sweetness::LessSugar => "less-sugar",
            Sweetness::HalfSugar => "half-sugar",
            Sweetness::LightSugar => "light-sugar",
            Sweetness::NoSugar => "no-sugar",
        }
    }
}

impl FromStr for Sweetness {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Sweetness::all()
            .iter()
            .copied()
            .find(|v| v.label() == s || v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseOptionError::new("sweetness", s))
    }
}

impl std::fmt::Display for Sweetness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Temperature and sweetness chosen for a drink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrinkOptions {
    pub temperature: Temperature,
    pub sweetness: Sweetness,
}

/// The options preselected on the order form
impl Default for DrinkOptions {
    fn default() -> Self {
        Self::new(Temperature::NormalIce, Sweetness::NormalSugar)
    }
}

impl DrinkOptions {
    pub fn new(temperature: Temperature, sweetness: Sweetness) -> Self {
        Self {
            temperature,
            sweetness,
        }
    }
}

/// How the customer collects the order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum PickupMethod {
    #[default]
    #[serde(rename = "內用")]
    DineIn,
    #[serde(rename = "外帶")]
    Takeout,
}

impl PickupMethod {
    pub fn all() -> &'static [PickupMethod] {
        &[PickupMethod::DineIn, PickupMethod::Takeout]
    }

    /// Label sent to the API
    pub fn label(&self) -> &'static str {
        match self {
            PickupMethod::DineIn => "內用",
            PickupMethod::Takeout => "外帶",
        }
    }

    /// Command-line name
    pub fn name(&self) -> &'static str {
        match self {
            PickupMethod::DineIn => "dine-in",
            PickupMethod::Takeout => "takeout",
        }
    }
}

impl FromStr for PickupMethod {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PickupMethod::all()
            .iter()
            .copied()
            .find(|p| p.label() == s || p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseOptionError::new("pickup method", s))
    }
}

impl std::fmt::Display for PickupMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_or_label() {
        assert_eq!("less-ice".parse::<Temperature>().unwrap(), Temperature::LessIce);
        assert_eq!("少冰".parse::<Temperature>().unwrap(), Temperature::LessIce);
        assert_eq!("HOT".parse::<Temperature>().unwrap(), Temperature::Hot);
        assert_eq!("半糖".parse::<Sweetness>().unwrap(), Sweetness::HalfSugar);
        assert_eq!("no-sugar".parse::<Sweetness>().unwrap(), Sweetness::NoSugar);
        assert_eq!("外帶".parse::<PickupMethod>().unwrap(), PickupMethod::Takeout);
        assert_eq!(" dine-in ".parse::<PickupMethod>().unwrap(), PickupMethod::DineIn);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "lukewarm".parse::<Temperature>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid temperature: lukewarm");

        assert!("extra-sugar".parse::<Sweetness>().is_err());
        assert!("delivery".parse::<PickupMethod>().is_err());
        assert!("".parse::<PickupMethod>().is_err());
    }

    #[test]
    fn test_serialize_uses_wire_label() {
        assert_eq!(serde_json::to_string(&Temperature::NoIce).unwrap(), r#""去冰""#);
        assert_eq!(serde_json::to_string(&Sweetness::LightSugar).unwrap(), r#""微糖""#);
        assert_eq!(serde_json::to_string(&PickupMethod::DineIn).unwrap(), r#""內用""#);
    }

    #[test]
    fn test_label_matches_serde() {
        for t in Temperature::all() {
            assert_eq!(serde_json::to_value(t).unwrap(), t.label());
        }
        for s in Sweetness::all() {
            assert_eq!(serde_json::to_value(s).unwrap(), s.label());
        }
    }

    #[test]
    fn test_default_pickup_is_dine_in() {
        assert_eq!(PickupMethod::default(), PickupMethod::DineIn);
    }
}
