//! Strategy Recommendation Engine
//!
//! A priority-ordered rule table over the five selector answers.
//! Rules overlap on purpose: the first rule whose predicate holds wins,
//! and later rules are never consulted. Anything no rule claims falls
//! through to Preventive Maintenance.

use crate::types::*;
use serde::{Deserialize, Serialize};

/// One row of the rule table
pub struct Rule {
    pub name: &'static str,
    pub condition: &'static str,
    pub matches: fn(&RecommendationInput) -> bool,
    pub strategy: Strategy,
    pub rationale: &'static str,
    pub examples: &'static str,
}

/// Ordered rules. Order is significant.
pub static RULES: [Rule; 4] = [
    Rule {
        name: "run-to-failure",
        condition: "criticality = Low AND failure history = Rare",
        matches: |i| i.criticality == Criticality::Low && i.failure_history == FailureHistory::Rare,
        strategy: Strategy::RunToFailure,
        rationale: "Non-critical asset with rare failures. Let it run until it fails.",
        examples: "Small lights, backup indicators.",
    },
    Rule {
        name: "condition-based",
        condition: "criticality = High AND environment = Harsh AND failure history != Rare",
        matches: |i| {
            i.criticality == Criticality::High
                && i.environment == Environment::Harsh
                && i.failure_history != FailureHistory::Rare
        },
        strategy: Strategy::ConditionBased,
        rationale: "Critical asset in harsh conditions benefits from monitoring sensors.",
        examples: "Pumps with vibration sensors, motors with IR thermography.",
    },
    Rule {
        name: "time-based",
        condition: "criticality = Medium AND failure history = Frequent",
        matches: |i| {
            i.criticality == Criticality::Medium && i.failure_history == FailureHistory::Frequent
        },
        strategy: Strategy::TimeBased,
        rationale: "Frequent failures warrant a routine schedule.",
        examples: "Monthly maintenance of air filters.",
    },
    Rule {
        name: "reliability-centered",
        condition: "criticality = High AND downtime cost = High AND maintenance cost = High",
        matches: |i| {
            i.criticality == Criticality::High
                && i.downtime_cost == CostLevel::High
                && i.maintenance_cost == CostLevel::High
        },
        strategy: Strategy::ReliabilityCentered,
        rationale: "Critical and costly failures justify detailed RCM analysis.",
        examples: "Turbine system, excitation panel.",
    },
];

/// Catch-all when no rule matches
pub static FALLBACK: Rule = Rule {
    name: "preventive",
    condition: "otherwise",
    matches: |_| true,
    strategy: Strategy::Preventive,
    rationale: "Standard scheduled checks fit this scenario.",
    examples: "Lubrication plans, visual inspections.",
};

impl Rule {
    fn recommendation(&self) -> Recommendation {
        Recommendation::new(self.strategy, self.rationale, self.examples)
    }
}

/// Pick the first matching rule
fn select(input: &RecommendationInput) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| (rule.matches)(input))
        .unwrap_or(&FALLBACK)
}

/// Recommend a maintenance strategy for the given answers
pub fn recommend(input: &RecommendationInput) -> Recommendation {
    let rule = select(input);
    tracing::debug!(rule = rule.name, ?input, "strategy rule selected");
    rule.recommendation()
}

/// How a single rule fared against the input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleTrace {
    pub priority: usize,
    pub rule: String,
    pub condition: String,
    pub strategy: Strategy,
    pub matched: bool,
    /// Matched, but an earlier rule already won
    pub shadowed: bool,
}

/// Recommendation plus the full rule evaluation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Explanation {
    pub input: RecommendationInput,
    pub recommendation: Recommendation,
    pub winning_rule: String,
    pub trace: Vec<RuleTrace>,
}

/// Evaluate every rule (not just up to the winner) so the caller can see
/// which later rules were shadowed by an earlier match.
pub fn explain(input: &RecommendationInput) -> Explanation {
    let winner = select(input);
    let mut won = false;

    let trace = RULES
        .iter()
        .chain(std::iter::once(&FALLBACK))
        .enumerate()
        .map(|(idx, rule)| {
            let matched = (rule.matches)(input);
            let shadowed = matched && won;
            if matched {
                won = true;
            }
            RuleTrace {
                priority: idx + 1,
                rule: rule.name.to_string(),
                condition: rule.condition.to_string(),
                strategy: rule.strategy,
                matched,
                shadowed,
            }
        })
        .collect();

    Explanation {
        input: *input,
        recommendation: winner.recommendation(),
        winning_rule: winner.name.to_string(),
        trace,
    }
}
