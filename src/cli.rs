//! Command-line flag parsing
//!
//! Flags are `--name=value` or `--name value`. Everything here turns raw
//! strings into typed inputs and reports problems as [`InputError`].

use crate::error::InputError;
use crate::kpi::KpiInputs;
use crate::types::RecommendationInput;
use std::str::FromStr;

/// Value of `--name`, in either `--name=value` or `--name value` form
pub fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    let long = format!("--{}", name);
    let prefix = format!("--{}=", name);

    for (i, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            return Some(value);
        }
        if *arg == long {
            return args
                .get(i + 1)
                .filter(|next| !next.starts_with("--"))
                .map(|s| s.as_str());
        }
    }
    None
}

pub fn has_flag(args: &[String], name: &str) -> bool {
    let long = format!("--{}", name);
    args.iter().any(|a| *a == long)
}

fn required<T>(args: &[String], name: &'static str) -> Result<T, InputError>
where
    T: FromStr<Err = InputError>,
{
    flag_value(args, name)
        .ok_or(InputError::MissingFlag(name))?
        .parse()
}

/// `--criticality --environment --failure-history --maintenance-cost --downtime-cost`
pub fn recommendation_input(args: &[String]) -> Result<RecommendationInput, InputError> {
    Ok(RecommendationInput {
        criticality: required(args, "criticality")?,
        environment: required(args, "environment")?,
        failure_history: required(args, "failure-history")?,
        maintenance_cost: required(args, "maintenance-cost")?,
        downtime_cost: required(args, "downtime-cost")?,
    })
}

fn number(args: &[String], name: &str, default: f64) -> Result<f64, InputError> {
    match flag_value(args, name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| InputError::InvalidNumber {
                field: name.to_string(),
                value: raw.to_string(),
            }),
    }
}

/// KPI figures from flags; anything not given keeps the worked example
pub fn kpi_inputs(args: &[String]) -> Result<KpiInputs, InputError> {
    let d = KpiInputs::default();
    Ok(KpiInputs {
        uptime: number(args, "uptime", d.uptime)?,
        failures: number(args, "failures", d.failures)?,
        downtime: number(args, "downtime", d.downtime)?,
        repairs: number(args, "repairs", d.repairs)?,
        cost: number(args, "cost", d.cost)?,
        output: number(args, "output", d.output)?,
        scheduled_jobs: number(args, "scheduled", d.scheduled_jobs)?,
        completed_jobs: number(args, "completed", d.completed_jobs)?,
        planned_budget: number(args, "budget", d.planned_budget)?,
        actual_spend: number(args, "actual", d.actual_spend)?,
    })
}

/// Drop the flags every command accepts (`--json`, `--port`) so the
/// command and its positional arguments can be matched by position.
pub fn strip_global_flags(args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut iter = args.iter().peekable();

    while let Some(arg) = iter.next() {
        if arg == "--json" || arg.starts_with("--port=") {
            continue;
        }
        if arg == "--port" {
            // `--port N`
            iter.next_if(|next| !next.starts_with("--"));
            continue;
        }
        out.push(arg.clone());
    }
    out
}

/// First argument that is not a flag
pub fn positional(args: &[String]) -> Option<&str> {
    args.iter()
        .map(|s| s.as_str())
        .find(|a| !a.starts_with("--"))
}

/// Topic name for `topics`, ignoring any flags around it
pub fn topic_arg(args: &[String]) -> Option<&str> {
    positional(args)
}

/// Split `--answers=b,c,-,a` into positional entries
pub fn split_answers(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}
