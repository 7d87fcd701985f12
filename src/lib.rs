//! Maintenance Strategy Advisor
//!
//! An educational toolkit for maintenance engineering: a rule-based
//! strategy selector, maintenance KPI calculators, a scored knowledge quiz,
//! and the reference guide they are built on.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use maintenance_advisor::*;
//!
//! // Strategy selector
//! let rec = recommend(&RecommendationInput {
//!     criticality: Criticality::High,
//!     environment: Environment::Harsh,
//!     failure_history: FailureHistory::Frequent,
//!     maintenance_cost: CostLevel::High,
//!     downtime_cost: CostLevel::High,
//! });
//! assert_eq!(rec.strategy, Strategy::ConditionBased);
//!
//! // KPIs
//! let report = kpi::evaluate(&KpiInputs::default());
//! assert_eq!(report.lines()[0], "MTBF = 200.00 hours");
//!
//! // Quiz: build the bank once, share it
//! let bank = QuestionBank::standard();
//! let mut session = QuizSession::new(&bank);
//! session.select(0, "b")?;
//! assert!(session.feedback().is_none());
//! let report = session.submit();
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │      CLI  /  interactive quiz  /  HTTP JSON-RPC       │
//! └───────┬──────────────────┬──────────────────┬────────┘
//!         ▼                  ▼                  ▼
//!   recommend()         kpi::evaluate()     quiz::score()
//!   ordered rules       safe_divide()       QuestionBank
//! ```
//!
//! The three evaluators share no state and never fail; all validation
//! happens while parsing user input.

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod kpi;
pub mod mcp;
pub mod quiz;
pub mod recommend;
pub mod server;
pub mod types;

// Core types
pub use error::InputError;
pub use types::*;

// Evaluators
pub use kpi::{safe_divide, KpiInputs, KpiReport};
pub use quiz::{QuestionBank, QuizAttempt, QuizQuestion, QuizReport, QuizSession, QuestionResult};
pub use recommend::{explain, recommend, Explanation, RuleTrace};

// Configuration
pub use config::AdvisorConfig;

// Reference guide
pub use content::{Topic, TopicPage};
