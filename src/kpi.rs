//! Maintenance KPI calculators
//!
//! Six independent formulas. Every division goes through [`safe_divide`],
//! so a zero (or negative) denominator hides the metric instead of
//! producing inf/NaN.

use serde::{Deserialize, Serialize};

/// Raw figures entered by the user. Non-negative by convention; nothing
/// here enforces it, and no cross-field checks are made
/// (completed > scheduled is accepted as-is).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KpiInputs {
    /// Total uptime (hours)
    pub uptime: f64,
    /// Number of failures
    pub failures: f64,
    /// Total downtime (hours)
    pub downtime: f64,
    /// Number of repairs
    pub repairs: f64,
    /// Total maintenance cost ($)
    pub cost: f64,
    /// Total output (MWh, tons, ...)
    pub output: f64,
    pub scheduled_jobs: f64,
    /// Jobs completed on time
    pub completed_jobs: f64,
    pub planned_budget: f64,
    pub actual_spend: f64,
}

impl Default for KpiInputs {
    /// Worked example shown by the calculator before the user types anything
    fn default() -> Self {
        Self {
            uptime: 1000.0,
            failures: 5.0,
            downtime: 50.0,
            repairs: 5.0,
            cost: 15000.0,
            output: 1000.0,
            scheduled_jobs: 120.0,
            completed_jobs: 108.0,
            planned_budget: 20000.0,
            actual_spend: 18500.0,
        }
    }
}

/// Computed KPIs. `None` means the denominator guard failed and the
/// metric is not shown.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct KpiReport {
    /// Hours
    pub mtbf: Option<f64>,
    /// Hours
    pub mttr: Option<f64>,
    /// Ratio in [0, 1]; display as a percentage
    pub availability: Option<f64>,
    /// Currency per unit of output
    pub cost_per_unit: Option<f64>,
    /// Percent
    pub schedule_compliance: Option<f64>,
    /// Percent; negative is underspend
    pub budget_variance: Option<f64>,
}

/// Divide, or `None` when the denominator is not strictly positive.
pub fn safe_divide(numerator: f64, denominator: f64) -> Option<f64> {
    // `> 0.0` is false for NaN as well
    if denominator > 0.0 {
        Some(numerator / denominator)
    } else {
        None
    }
}

/// Mean Time Between Failures
pub fn mtbf(uptime: f64, failures: f64) -> Option<f64> {
    safe_divide(uptime, failures)
}

/// Mean Time To Repair
pub fn mttr(downtime: f64, repairs: f64) -> Option<f64> {
    safe_divide(downtime, repairs)
}

/// Uptime / (uptime + downtime), equivalently MTBF / (MTBF + MTTR)
pub fn availability(uptime: f64, downtime: f64) -> Option<f64> {
    safe_divide(uptime, uptime + downtime)
}

pub fn cost_per_unit(cost: f64, output: f64) -> Option<f64> {
    safe_divide(cost, output)
}

pub fn schedule_compliance(completed: f64, scheduled: f64) -> Option<f64> {
    safe_divide(completed, scheduled).map(|ratio| ratio * 100.0)
}

/// (actual - planned) / planned x 100
pub fn budget_variance(actual: f64, planned: f64) -> Option<f64> {
    safe_divide(actual - planned, planned).map(|ratio| ratio * 100.0)
}

/// Compute all six KPIs. None depends on another's result.
pub fn evaluate(inputs: &KpiInputs) -> KpiReport {
    let report = KpiReport {
        mtbf: mtbf(inputs.uptime, inputs.failures),
        mttr: mttr(inputs.downtime, inputs.repairs),
        availability: availability(inputs.uptime, inputs.downtime),
        cost_per_unit: cost_per_unit(inputs.cost, inputs.output),
        schedule_compliance: schedule_compliance(inputs.completed_jobs, inputs.scheduled_jobs),
        budget_variance: budget_variance(inputs.actual_spend, inputs.planned_budget),
    };

    let omitted = report.omitted();
    if !omitted.is_empty() {
        tracing::debug!(?omitted, "KPIs omitted: non-positive denominator");
    }

    report
}

impl KpiReport {
    /// Display lines for the metrics that could be computed, in
    /// calculator order.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(v) = self.mtbf {
            lines.push(format!("MTBF = {:.2} hours", v));
        }
        if let Some(v) = self.mttr {
            lines.push(format!("MTTR = {:.2} hours", v));
        }
        if let Some(v) = self.availability {
            lines.push(format!("Availability = {:.2}%", v * 100.0));
        }
        if let Some(v) = self.cost_per_unit {
            lines.push(format!("Cost per unit = ${:.2}", v));
        }
        if let Some(v) = self.schedule_compliance {
            lines.push(format!("Schedule Compliance = {:.2}%", v));
        }
        if let Some(v) = self.budget_variance {
            lines.push(format!("Budget Variance = {:.2}%", v));
        }

        lines
    }

    /// Names of metrics that were hidden by a denominator guard
    pub fn omitted(&self) -> Vec<&'static str> {
        [
            ("mtbf", self.mtbf),
            ("mttr", self.mttr),
            ("availability", self.availability),
            ("cost_per_unit", self.cost_per_unit),
            ("schedule_compliance", self.schedule_compliance),
            ("budget_variance", self.budget_variance),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_sample_values() {
        let report = evaluate(&KpiInputs::default());

        assert!(close(report.mtbf.unwrap(), 200.0));
        assert!(close(report.mttr.unwrap(), 10.0));
        assert!(close(report.availability.unwrap(), 1000.0 / 1050.0));
        assert!(close(report.cost_per_unit.unwrap(), 15.0));
        assert!(close(report.schedule_compliance.unwrap(), 90.0));
        assert!(close(report.budget_variance.unwrap(), -7.5));
    }

    #[test]
    fn test_sample_display_lines() {
        let lines = evaluate(&KpiInputs::default()).lines();
        assert_eq!(
            lines,
            vec![
                "MTBF = 200.00 hours",
                "MTTR = 10.00 hours",
                "Availability = 95.24%",
                "Cost per unit = $15.00",
                "Schedule Compliance = 90.00%",
                "Budget Variance = -7.50%",
            ]
        );
    }

    #[test]
    fn test_safe_divide_guards() {
        assert_eq!(safe_divide(10.0, 0.0), None);
        assert_eq!(safe_divide(10.0, -2.0), None);
        assert_eq!(safe_divide(10.0, f64::NAN), None);
        assert_eq!(safe_divide(10.0, 4.0), Some(2.5));
        assert_eq!(safe_divide(0.0, 4.0), Some(0.0));
    }

    #[test]
    fn test_zero_denominators_omit_metrics() {
        let inputs = KpiInputs {
            failures: 0.0,
            repairs: 0.0,
            output: 0.0,
            scheduled_jobs: 0.0,
            planned_budget: 0.0,
            ..KpiInputs::default()
        };
        let report = evaluate(&inputs);

        assert_eq!(report.mtbf, None);
        assert_eq!(report.mttr, None);
        assert_eq!(report.cost_per_unit, None);
        assert_eq!(report.schedule_compliance, None);
        assert_eq!(report.budget_variance, None);
        // Availability only depends on uptime + downtime
        assert!(report.availability.is_some());
        assert_eq!(report.lines(), vec!["Availability = 95.24%"]);
        assert_eq!(
            report.omitted(),
            vec![
                "mtbf",
                "mttr",
                "cost_per_unit",
                "schedule_compliance",
                "budget_variance"
            ]
        );
    }

    #[test]
    fn test_availability_needs_some_time() {
        assert_eq!(availability(0.0, 0.0), None);
        assert_eq!(availability(0.0, 10.0), Some(0.0));
    }

    #[test]
    fn test_overspend_is_positive() {
        let v = budget_variance(25000.0, 20000.0).unwrap();
        assert!(close(v, 25.0));
    }

    #[test]
    fn test_no_cross_field_validation() {
        // More jobs completed than scheduled is reported as-is
        let v = schedule_compliance(130.0, 120.0).unwrap();
        assert!(v > 100.0);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let inputs = KpiInputs {
            uptime: 720.0,
            downtime: 12.5,
            ..KpiInputs::default()
        };
        let first = evaluate(&inputs);
        for _ in 0..10 {
            assert_eq!(evaluate(&inputs), first);
        }
    }

    #[test]
    fn test_partial_json_uses_sample_defaults() {
        let inputs: KpiInputs = serde_json::from_str(r#"{"failures": 0}"#).unwrap();
        assert_eq!(inputs.uptime, 1000.0);
        assert_eq!(evaluate(&inputs).mtbf, None);

        let json = serde_json::to_value(evaluate(&inputs)).unwrap();
        assert!(json["mtbf"].is_null());
    }
}
