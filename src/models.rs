use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    #[default]
    Dark,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Mode::Light),
            "dark" => Some(Mode::Dark),
            _ => None,
        }
    }

    pub fn from_checked(checked: bool) -> Self {
        if checked { Mode::Dark } else { Mode::Light }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|gender| gender.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    pub const LBS_PER_KG: f64 = 2.20462;

    pub fn parse(value: &str) -> Self {
        if value == "lbs" { WeightUnit::Lbs } else { WeightUnit::Kg }
    }

    pub fn to_kg(self, weight: f64) -> f64 {
        match self {
            WeightUnit::Kg => weight,
            WeightUnit::Lbs => weight / Self::LBS_PER_KG,
        }
    }
}

/// Body sent to `POST /api/calculate`. Weight is always kilograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub weight: f64,
    pub gender: String,
    pub current_drinks: i64,
}

/// What the calculation endpoint answers with. The error shape is tried
/// first so a body carrying `error` is never read as a success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CalculationResponse {
    Failure {
        error: String,
    },
    Success {
        drinks_to_reach_target: f64,
        time_to_sober: f64,
    },
}

/// Raw fields of the BAC form, named as the page names its inputs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BacForm {
    #[serde(default)]
    pub weight: String,
    #[serde(rename = "weight-unit", default)]
    pub weight_unit: String,
    pub gender: Option<String>,
    #[serde(rename = "current-drinks", default)]
    pub current_drinks: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ModeForm {
    #[serde(rename = "mode-switch")]
    pub mode_switch: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    pub theme: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}
