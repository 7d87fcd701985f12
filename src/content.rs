//! Reference material: maintenance types, the strategy comparison table,
//! condition monitoring techniques, and the D-I-P-F and bathtub curves.
//!
//! Pure static content. Nothing here is computed; it exists so the CLI
//! and tool interface can show the same guide the selector is built on.

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sections of the guide
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Overview,
    Comparison,
    Monitoring,
    Dipf,
    Bathtub,
    About,
}

impl Topic {
    pub const ALL: [Topic; 6] = [
        Topic::Overview,
        Topic::Comparison,
        Topic::Monitoring,
        Topic::Dipf,
        Topic::Bathtub,
        Topic::About,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Topic::Overview => "overview",
            Topic::Comparison => "comparison",
            Topic::Monitoring => "monitoring",
            Topic::Dipf => "dipf",
            Topic::Bathtub => "bathtub",
            Topic::About => "about",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Topic::Overview => "Types of Maintenance",
            Topic::Comparison => "Comparative Table of Maintenance Strategies",
            Topic::Monitoring => "Condition Monitoring Techniques",
            Topic::Dipf => "D-I-P-F Curve: Detection, Indication, Prediction, and Failure",
            Topic::Bathtub => "Bathtub Curve",
            Topic::About => "About This App",
        }
    }
}

impl FromStr for Topic {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        match wanted.as_str() {
            "overview" | "types" => Ok(Topic::Overview),
            "comparison" | "table" => Ok(Topic::Comparison),
            "monitoring" | "cm" => Ok(Topic::Monitoring),
            "dipf" | "d-i-p-f" => Ok(Topic::Dipf),
            "bathtub" => Ok(Topic::Bathtub),
            "about" => Ok(Topic::About),
            _ => Err(InputError::UnknownTopic(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceType {
    pub name: String,
    pub aka: Option<String>,
    pub definition: String,
    pub goal: String,
    pub advantages: String,
    pub disadvantages: String,
    pub best_for: String,
    pub examples: Option<String>,
}

/// Row of the comparison table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub strategy: String,
    pub definition: String,
    pub trigger: String,
    pub tools: String,
    pub advantages: String,
    pub disadvantages: String,
    pub best_use_case: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringTechnique {
    pub name: String,
    pub detects: String,
    pub tools: Option<String>,
    pub applications: String,
}

/// A stage of the D-I-P-F progression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DipfStage {
    pub letter: char,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BathtubPhase {
    pub name: String,
    pub failure_rate: String,
    pub causes: String,
    pub actions: String,
}

/// A rendered section: title, body lines, and an optional illustration
/// referenced by file name only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicPage {
    pub topic: Topic,
    pub title: String,
    pub body: Vec<String>,
    pub image: Option<String>,
}

fn s(text: &str) -> String {
    text.to_string()
}

pub fn maintenance_types() -> Vec<MaintenanceType> {
    vec![
        MaintenanceType {
            name: s("Corrective Maintenance (CM)"),
            aka: Some(s("Breakdown or Run-to-Failure")),
            definition: s("Maintenance performed only after equipment fails."),
            goal: s("Restore functionality post-failure."),
            advantages: s("No planning cost, simple."),
            disadvantages: s("High risk, unplanned downtime, costly in critical systems."),
            best_for: s("Low-value, non-critical assets."),
            examples: Some(s("Light bulbs, decorative motors.")),
        },
        MaintenanceType {
            name: s("Preventive Maintenance (PM)"),
            aka: None,
            definition: s("Periodic maintenance at fixed time or usage intervals regardless of asset condition."),
            goal: s("Prevent unexpected failures."),
            advantages: s("Reduces failure risk, easy to plan."),
            disadvantages: s("May result in unnecessary maintenance and costs."),
            best_for: s("Assets with predictable wear."),
            examples: Some(s("Replacing filters, monthly cleaning, oil changes.")),
        },
        MaintenanceType {
            name: s("Predictive Maintenance (PdM or CBM)"),
            aka: None,
            definition: s("Uses real-time condition monitoring (vibration, temperature, oil analysis) to decide when to maintain."),
            goal: s("Optimize timing of interventions."),
            advantages: s("Prevents both under- and over-maintenance."),
            disadvantages: s("Requires sensors and diagnostics."),
            best_for: s("High-value, rotating, or critical machines."),
            examples: Some(s("Vibration analysis for motors, DGA for transformers.")),
        },
        MaintenanceType {
            name: s("Proactive Maintenance"),
            aka: None,
            definition: s("Focuses on root cause elimination: redesigns, training, better lubrication, etc."),
            goal: s("Stop failure before it begins."),
            advantages: s("Long-term reliability improvement."),
            disadvantages: s("Requires deep failure analysis."),
            best_for: s("Plants with high reliability goals."),
            examples: None,
        },
        MaintenanceType {
            name: s("Reliability-Centered Maintenance (RCM)"),
            aka: None,
            definition: s("Structured analysis method to select the best maintenance approach for each failure mode."),
            goal: s("Balance safety, availability, and cost."),
            advantages: s("Risk-based, asset-specific."),
            disadvantages: s("Time-consuming and analytical."),
            best_for: s("Critical industries (power, aviation, oil & gas)."),
            examples: None,
        },
        MaintenanceType {
            name: s("Prescriptive Maintenance (AI-driven)"),
            aka: None,
            definition: s("Uses machine learning to recommend what action to take based on data."),
            goal: s("Automate decisions using historical and real-time data."),
            advantages: s("High efficiency, ideal for digital plants."),
            disadvantages: s("Requires data integration, algorithm training."),
            best_for: s("Industry 4.0, digital twins."),
            examples: None,
        },
    ]
}

pub fn comparison_table() -> Vec<StrategyComparison> {
    let row = |strategy: &str,
               definition: &str,
               trigger: &str,
               tools: &str,
               advantages: &str,
               disadvantages: &str,
               best_use_case: &str| {
        StrategyComparison {
            strategy: s(strategy),
            definition: s(definition),
            trigger: s(trigger),
            tools: s(tools),
            advantages: s(advantages),
            disadvantages: s(disadvantages),
            best_use_case: s(best_use_case),
        }
    };

    vec![
        row(
            "Corrective",
            "Performed after failure occurs",
            "Failure happens",
            "Manual repair, fault diagnosis",
            "Simple, no upfront cost",
            "High downtime, costly failures",
            "Low-value, non-critical assets",
        ),
        row(
            "Preventive",
            "Scheduled at regular intervals",
            "Time or usage interval",
            "Calendar-based schedules",
            "Reduces surprise failures",
            "Can cause over-maintenance",
            "Equipment with predictable aging",
        ),
        row(
            "Predictive",
            "Based on actual condition data",
            "Condition thresholds",
            "Sensors, condition monitoring",
            "Targets real issues, efficient",
            "Requires instrumentation, analysis",
            "Rotating/high-value machinery",
        ),
        row(
            "Proactive",
            "Eliminates root causes before failure",
            "Root cause identification",
            "RCA, FMEA, tribology",
            "Improves long-term reliability",
            "Needs deep technical insights",
            "Recurring or systemic issues",
        ),
        row(
            "Prescriptive",
            "Uses AI to predict & prescribe actions",
            "Data-driven prediction",
            "Machine learning, digital twins",
            "Optimizes decisions automatically",
            "Complex implementation, data needs",
            "Smart/digitalized operations",
        ),
        row(
            "RCM",
            "Selects best strategy by criticality",
            "Function/failure analysis",
            "FMEA, reliability modeling",
            "Balances risk, cost, and performance",
            "Time-consuming analysis",
            "Critical assets with high consequences",
        ),
    ]
}

pub fn monitoring_techniques() -> Vec<MonitoringTechnique> {
    vec![
        MonitoringTechnique {
            name: s("Vibration Analysis"),
            detects: s("Imbalance, misalignment, bearing failure (FFT frequency spectrum)"),
            tools: Some(s("Accelerometers, online monitoring systems")),
            applications: s("Generators, turbines, motors, pumps"),
        },
        MonitoringTechnique {
            name: s("Infrared Thermography"),
            detects: s("Overheating, phase imbalance, loose connections"),
            tools: Some(s("Thermal cameras")),
            applications: s("Transformers, switchgears, motors"),
        },
        MonitoringTechnique {
            name: s("Oil Analysis (including DGA)"),
            detects: s("Viscosity, density, flash point, moisture, oxidation, breakdown voltage, gas generation"),
            tools: Some(s("Laboratory instruments")),
            applications: s("Transformers, turbines, engines, gearboxes"),
        },
        MonitoringTechnique {
            name: s("Ultrasound Monitoring"),
            detects: s("Air/gas leaks, bearing wear, arcing"),
            tools: Some(s("Ultrasonic detectors")),
            applications: s("Pneumatic circuits, electrical cabinets"),
        },
        MonitoringTechnique {
            name: s("Electrical Signature Analysis (ESA)"),
            detects: s("Rotor bar faults, stator issues"),
            tools: None,
            applications: s("Motors, generators"),
        },
    ]
}

pub fn dipf_stages() -> Vec<DipfStage> {
    vec![
        DipfStage {
            letter: 'D',
            name: s("Detection"),
            description: s("Early changes or weak signals, often invisible to operators, picked up by advanced condition monitoring or machine learning."),
        },
        DipfStage {
            letter: 'I',
            name: s("Indication"),
            description: s("Observable symptoms such as noise, heat, or vibration appear. Alerts may be triggered."),
        },
        DipfStage {
            letter: 'P',
            name: s("Prediction"),
            description: s("Enough data to estimate remaining useful life (RUL) or time to failure with predictive models."),
        },
        DipfStage {
            letter: 'F',
            name: s("Failure"),
            description: s("The asset fails or reaches a critical point where performance is lost or unsafe."),
        },
    ]
}

pub fn bathtub_phases() -> Vec<BathtubPhase> {
    vec![
        BathtubPhase {
            name: s("Infant Mortality"),
            failure_rate: s("High, decreasing"),
            causes: s("Design or manufacturing flaws, installation defects, improper commissioning."),
            actions: s("Early inspections/testing, burn-in."),
        },
        BathtubPhase {
            name: s("Useful Life"),
            failure_rate: s("Constant, low"),
            causes: s("Random external events, process upsets, improper maintenance/operation, human errors."),
            actions: s("Condition monitoring, scheduled PM, proper operation, training."),
        },
        BathtubPhase {
            name: s("Wear-Out"),
            failure_rate: s("Increasing"),
            causes: s("Fatigue, aging, erosion, corrosion."),
            actions: s("Overhaul, replacement, RCM."),
        },
    ]
}

/// Render a topic as plain text lines
pub fn page(topic: Topic) -> TopicPage {
    let mut body = Vec::new();
    let mut image = None;

    match topic {
        Topic::Overview => {
            for (i, t) in maintenance_types().iter().enumerate() {
                match &t.aka {
                    Some(aka) => body.push(format!("{}. {} (also: {})", i + 1, t.name, aka)),
                    None => body.push(format!("{}. {}", i + 1, t.name)),
                }
                body.push(format!("   Definition:    {}", t.definition));
                body.push(format!("   Goal:          {}", t.goal));
                body.push(format!("   Advantages:    {}", t.advantages));
                body.push(format!("   Disadvantages: {}", t.disadvantages));
                body.push(format!("   Best for:      {}", t.best_for));
                if let Some(examples) = &t.examples {
                    body.push(format!("   Examples:      {}", examples));
                }
            }
            body.push(s("Choosing the right strategy depends on asset criticality, failure behavior, cost, and available technology."));
        }
        Topic::Comparison => {
            for row in comparison_table() {
                body.push(row.strategy.clone());
                body.push(format!("   Definition:    {}", row.definition));
                body.push(format!("   Trigger:       {}", row.trigger));
                body.push(format!("   Tools:         {}", row.tools));
                body.push(format!("   Advantages:    {}", row.advantages));
                body.push(format!("   Disadvantages: {}", row.disadvantages));
                body.push(format!("   Best use case: {}", row.best_use_case));
            }
        }
        Topic::Monitoring => {
            body.push(s("Condition monitoring measures parameters that reflect asset health so faults are caught before they become failures."));
            for (i, t) in monitoring_techniques().iter().enumerate() {
                body.push(format!("{}. {}", i + 1, t.name));
                body.push(format!("   Detects:      {}", t.detects));
                if let Some(tools) = &t.tools {
                    body.push(format!("   Tools:        {}", tools));
                }
                body.push(format!("   Applications: {}", t.applications));
            }
            body.push(s("Best practice: combine techniques, train technicians, and analyze trends over time."));
        }
        Topic::Dipf => {
            for stage in dipf_stages() {
                body.push(format!("{} ({}): {}", stage.letter, stage.name, stage.description));
            }
            body.push(s("The window between detection and failure is when proactive maintenance avoids unplanned downtime."));
            body.push(s("The earlier the detection, the wider the window for predictive maintenance."));
            image = Some(s("dipf_curve_example.png"));
        }
        Topic::Bathtub => {
            for (i, phase) in bathtub_phases().iter().enumerate() {
                body.push(format!("{}. {} ({})", i + 1, phase.name, phase.failure_rate));
                body.push(format!("   Causes:  {}", phase.causes));
                body.push(format!("   Actions: {}", phase.actions));
            }
            body.push(s("Use this curve to match strategy with lifecycle stage."));
            image = Some(s("bathtub_curve_example.png"));
        }
        Topic::About => {
            body.push(s("An educational guide to maintenance types, strategy selection, reliability curves and maintenance KPIs."));
            body.push(s("Content by Eng. Mohammed Assaf (CMRP, CEPSS), power plant electrical maintenance engineer."));
        }
    }

    TopicPage {
        topic,
        title: topic.title().to_string(),
        body,
        image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_tables_are_complete() {
        assert_eq!(maintenance_types().len(), 6);
        assert_eq!(comparison_table().len(), 6);
        assert_eq!(monitoring_techniques().len(), 5);
        assert_eq!(dipf_stages().len(), 4);
        assert_eq!(bathtub_phases().len(), 3);
    }

    #[test]
    fn test_topic_ids_round_trip() {
        for topic in Topic::ALL {
            assert_eq!(topic.id().parse::<Topic>().unwrap(), topic);
        }
        assert_eq!("TABLE".parse::<Topic>().unwrap(), Topic::Comparison);
        assert!("history".parse::<Topic>().is_err());
    }

    #[test]
    fn test_curve_pages_reference_images() {
        assert_eq!(page(Topic::Dipf).image.as_deref(), Some("dipf_curve_example.png"));
        assert_eq!(page(Topic::Bathtub).image.as_deref(), Some("bathtub_curve_example.png"));
        assert!(page(Topic::Overview).image.is_none());
    }

    #[test]
    fn test_every_page_has_body() {
        for topic in Topic::ALL {
            let p = page(topic);
            assert!(!p.body.is_empty(), "{} is empty", topic.id());
            assert_eq!(p.title, topic.title());
        }
    }
}
