//! Core types for the Maintenance Strategy Advisor
//!
//! The five categorical questions of the strategy selector, and the
//! strategies it can recommend.

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Importance of the asset to safety, production, or legal compliance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Criticality {
    /// Generator, main transformer, turbine
    #[serde(alias = "high")]
    High,
    /// HVAC motor, feedwater pump, cooling fan
    #[serde(alias = "medium")]
    Medium,
    /// Lights, admin printers
    #[serde(alias = "low")]
    Low,
}

/// Physical conditions around the asset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Heat, vibration, dust, chemicals
    #[serde(alias = "harsh")]
    Harsh,
    /// Typical plant conditions
    #[serde(alias = "normal")]
    Normal,
    /// Lab or server room
    #[serde(alias = "clean")]
    Clean,
}

/// How often the asset fails, ideally taken from CMMS history
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FailureHistory {
    #[serde(alias = "frequent")]
    Frequent,
    #[serde(alias = "occasional")]
    Occasional,
    #[serde(alias = "rare")]
    Rare,
}

/// Cost level, used for both maintenance cost and downtime cost
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CostLevel {
    #[serde(alias = "high")]
    High,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "low")]
    Low,
}

/// Answers to the five selector questions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RecommendationInput {
    pub criticality: Criticality,
    pub environment: Environment,
    pub failure_history: FailureHistory,
    pub maintenance_cost: CostLevel,
    pub downtime_cost: CostLevel,
}

/// A maintenance strategy the selector can recommend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    RunToFailure,
    ConditionBased,
    TimeBased,
    ReliabilityCentered,
    Preventive,
}

/// Result of the strategy selector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub strategy: Strategy,
    /// Human-readable label, e.g. "Condition-Based Maintenance (CBM)"
    pub label: String,
    pub rationale: String,
    pub examples: String,
}

impl Recommendation {
    pub fn new(strategy: Strategy, rationale: &str, examples: &str) -> Self {
        Self {
            strategy,
            label: format!("{} ({})", strategy.name(), strategy.abbreviation()),
            rationale: rationale.to_string(),
            examples: examples.to_string(),
        }
    }
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::RunToFailure => "Run-to-Failure",
            Strategy::ConditionBased => "Condition-Based Maintenance",
            Strategy::TimeBased => "Time-Based Maintenance",
            Strategy::ReliabilityCentered => "Reliability-Centered Maintenance",
            Strategy::Preventive => "Preventive Maintenance",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Strategy::RunToFailure => "RTF",
            Strategy::ConditionBased => "CBM",
            Strategy::TimeBased => "TBM",
            Strategy::ReliabilityCentered => "RCM",
            Strategy::Preventive => "PM",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Strategy::RunToFailure => "🛑",
            Strategy::ConditionBased => "📊",
            Strategy::TimeBased => "📅",
            Strategy::ReliabilityCentered => "🔄",
            Strategy::Preventive => "🔁",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.abbreviation())
    }
}

// ============================================================================
// PARSING - case-insensitive level names from flags and tool arguments
// ============================================================================

fn parse_level<T: Copy>(
    field: &'static str,
    expected: &'static str,
    value: &str,
    table: &[(&str, T)],
) -> Result<T, InputError> {
    let wanted = value.trim().to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == wanted)
        .map(|(_, level)| *level)
        .ok_or_else(|| InputError::UnknownLevel {
            field,
            value: value.to_string(),
            expected,
        })
}

impl FromStr for Criticality {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_level(
            "criticality",
            "High, Medium, Low",
            s,
            &[
                ("high", Criticality::High),
                ("medium", Criticality::Medium),
                ("low", Criticality::Low),
            ],
        )
    }
}

impl FromStr for Environment {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_level(
            "environment",
            "Harsh, Normal, Clean",
            s,
            &[
                ("harsh", Environment::Harsh),
                ("normal", Environment::Normal),
                ("clean", Environment::Clean),
            ],
        )
    }
}

impl FromStr for FailureHistory {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_level(
            "failure history",
            "Frequent, Occasional, Rare",
            s,
            &[
                ("frequent", FailureHistory::Frequent),
                ("occasional", FailureHistory::Occasional),
                ("rare", FailureHistory::Rare),
            ],
        )
    }
}

impl FromStr for CostLevel {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_level(
            "cost level",
            "High, Medium, Low",
            s,
            &[
                ("high", CostLevel::High),
                ("medium", CostLevel::Medium),
                ("low", CostLevel::Low),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_parse_case_insensitively() {
        assert_eq!("HIGH".parse::<Criticality>().unwrap(), Criticality::High);
        assert_eq!(" harsh ".parse::<Environment>().unwrap(), Environment::Harsh);
        assert_eq!("Rare".parse::<FailureHistory>().unwrap(), FailureHistory::Rare);
        assert_eq!("medium".parse::<CostLevel>().unwrap(), CostLevel::Medium);
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let err = "extreme".parse::<Criticality>().unwrap_err();
        assert_eq!(
            err,
            InputError::UnknownLevel {
                field: "criticality",
                value: "extreme".to_string(),
                expected: "High, Medium, Low",
            }
        );
        assert!("dusty".parse::<Environment>().is_err());
    }

    #[test]
    fn test_recommendation_label() {
        let rec = Recommendation::new(Strategy::ReliabilityCentered, "why", "what");
        assert_eq!(rec.label, "Reliability-Centered Maintenance (RCM)");
        assert_eq!(Strategy::RunToFailure.to_string(), "Run-to-Failure (RTF)");
    }

    #[test]
    fn test_input_deserializes_lowercase_aliases() {
        let input: RecommendationInput = serde_json::from_str(
            r#"{"criticality":"high","environment":"Clean","failure_history":"occasional",
                "maintenance_cost":"Low","downtime_cost":"medium"}"#,
        )
        .unwrap();
        assert_eq!(input.criticality, Criticality::High);
        assert_eq!(input.environment, Environment::Clean);
        assert_eq!(input.downtime_cost, CostLevel::Medium);
    }

    #[test]
    fn test_strategy_serializes_kebab_case() {
        let json = serde_json::to_string(&Strategy::ConditionBased).unwrap();
        assert_eq!(json, "\"condition-based\"");
    }
}
