//! Input validation errors
//!
//! Everything that can go wrong happens at the boundary, while turning
//! user text into typed inputs. The evaluators themselves never fail.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid {field}: '{value}' (expected one of: {expected})")]
    UnknownLevel {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("Missing required flag: --{0}")]
    MissingFlag(&'static str),
    #[error("Invalid number for --{field}: '{value}'")]
    InvalidNumber { field: String, value: String },
    #[error("Question {index} does not exist (bank has {total} questions)")]
    QuestionOutOfRange { index: usize, total: usize },
    #[error("'{answer}' is not an option for question {question}")]
    UnknownOption { question: usize, answer: String },
    #[error("Expected at most {total} answers, got {given}")]
    TooManyAnswers { given: usize, total: usize },
    #[error("Unknown topic: '{0}'")]
    UnknownTopic(String),
}

pub type Result<T> = std::result::Result<T, InputError>;
