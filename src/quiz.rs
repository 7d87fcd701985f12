//! Maintenance Knowledge Quiz
//!
//! A fixed bank of 25 multiple-choice questions, an attempt that maps
//! question positions to chosen option text, and a scorer. Nothing is
//! scored until the attempt is submitted.

use crate::error::{InputError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One multiple-choice question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizQuestion {
    pub text: String,
    pub options: [String; 4],
    /// Index into `options`, always 0..=3
    pub correct_index: usize,
    pub explanation: String,
}

impl QuizQuestion {
    fn new(text: &str, options: [&str; 4], correct_index: usize, explanation: &str) -> Self {
        debug_assert!(correct_index < 4);
        Self {
            text: text.to_string(),
            options: options.map(String::from),
            correct_index,
            explanation: explanation.to_string(),
        }
    }

    pub fn correct_answer(&self) -> &str {
        &self.options[self.correct_index]
    }

    /// Resolve user input to one of this question's options.
    ///
    /// Accepts a letter (`a`-`d`), a number (`1`-`4`), or the option text
    /// (case-insensitive). Returns the canonical option text.
    pub fn resolve(&self, answer: &str) -> Option<&str> {
        let answer = answer.trim();
        let lower = answer.to_lowercase();

        let by_position = match lower.as_str() {
            "a" | "1" => Some(0),
            "b" | "2" => Some(1),
            "c" | "3" => Some(2),
            "d" | "4" => Some(3),
            _ => None,
        };
        if let Some(idx) = by_position {
            return Some(&self.options[idx]);
        }

        self.options
            .iter()
            .find(|opt| opt.to_lowercase() == lower)
            .map(|opt| opt.as_str())
    }
}

/// The read-only question set. Build once, share by reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<QuizQuestion>,
}

impl QuestionBank {
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }

    /// The built-in 25-question bank
    pub fn standard() -> Self {
        let questions = vec![
            QuizQuestion::new(
                "Which maintenance strategy involves fixing equipment only after a breakdown?",
                ["Preventive", "Corrective", "Predictive", "Proactive"],
                1,
                "Corrective maintenance is performed only after a failure occurs.",
            ),
            QuizQuestion::new(
                "MTBF stands for:",
                [
                    "Mean Time Before Failure",
                    "Maximum Test Base Factor",
                    "Mean Time Between Failures",
                    "Machine Tolerance Based Function",
                ],
                2,
                "MTBF is the average time between failures, used as a reliability indicator.",
            ),
            QuizQuestion::new(
                "What does infrared thermography detect in electrical systems?",
                ["Current leakage", "Oil level", "Overheating or hotspots", "Gas buildup"],
                2,
                "IR thermography identifies heat anomalies that indicate potential failure points.",
            ),
            QuizQuestion::new(
                "Which method detects bearing wear through sound?",
                ["Thermal imaging", "Ultrasound monitoring", "Infrared scanning", "Oil sampling"],
                1,
                "Ultrasound detects high-frequency sounds from worn bearings and leaks.",
            ),
            QuizQuestion::new(
                "CBM stands for:",
                [
                    "Corrective Based Monitoring",
                    "Condition Based Maintenance",
                    "Continuous Battery Maintenance",
                    "Certified Breakdown Model",
                ],
                1,
                "CBM relies on actual equipment condition to determine maintenance needs.",
            ),
            QuizQuestion::new(
                "What is the purpose of proactive maintenance?",
                [
                    "Replace all components regularly",
                    "React after failure",
                    "Eliminate root causes of failure",
                    "Ignore minor defects",
                ],
                2,
                "Proactive maintenance eliminates root causes before failure occurs.",
            ),
            QuizQuestion::new(
                "A bathtub curve shows:",
                [
                    "Temperature rise",
                    "Maintenance cost trend",
                    "Failure rate over time",
                    "Lubricant viscosity",
                ],
                2,
                "It represents failure rate across asset lifecycle: early, steady, and wear-out.",
            ),
            QuizQuestion::new(
                "DGA in transformer oil analysis stands for:",
                [
                    "Dynamic Gas Analysis",
                    "Dissolved Gas Analysis",
                    "Delayed Gasket Actuation",
                    "Divergent Ground Alignment",
                ],
                1,
                "DGA analyzes gases dissolved in oil to detect incipient transformer faults.",
            ),
            QuizQuestion::new(
                "The wear-out period of an asset is characterized by:",
                [
                    "Low failure rate",
                    "Sudden voltage spikes",
                    "High and increasing failure rate",
                    "Noisy operations",
                ],
                2,
                "Failures increase due to age-related wear and fatigue.",
            ),
            QuizQuestion::new(
                "Which KPI shows how much of the scheduled work was done?",
                ["MTTR", "MTBF", "Schedule Compliance", "Availability"],
                2,
                "Schedule Compliance measures % of jobs completed on time.",
            ),
            QuizQuestion::new(
                "RCM aims to:",
                [
                    "Reduce staffing levels",
                    "Select optimal strategy per failure mode",
                    "Use one strategy for all equipment",
                    "Eliminate the need for monitoring",
                ],
                1,
                "RCM chooses maintenance strategy based on risk and function.",
            ),
            QuizQuestion::new(
                "Electrical Signature Analysis is mainly used for:",
                ["Pipe thickness", "Bearing vibration", "Motor diagnostics", "Gas insulation"],
                2,
                "ESA identifies motor faults via voltage/current waveform analysis.",
            ),
            QuizQuestion::new(
                "Which maintenance type uses AI to decide timing/actions?",
                ["Prescriptive", "Preventive", "Proactive", "Corrective"],
                0,
                "Prescriptive maintenance uses AI models to recommend actions.",
            ),
            QuizQuestion::new(
                "Which of the following is NOT a condition monitoring technique?",
                ["Vibration analysis", "Infrared scan", "Painting", "Oil analysis"],
                2,
                "Painting is not a diagnostic method.",
            ),
            QuizQuestion::new(
                "Which KPI combines MTTR and MTBF?",
                ["Efficiency", "Cost ratio", "Availability", "Utilization"],
                2,
                "Availability = MTBF / (MTBF + MTTR), a core reliability metric.",
            ),
            QuizQuestion::new(
                "Why is MTTR important?",
                [
                    "It shows productivity",
                    "It tracks job frequency",
                    "It measures repair efficiency",
                    "It increases OEE",
                ],
                2,
                "MTTR indicates how quickly a system is restored after failure.",
            ),
            QuizQuestion::new(
                "Which curve phase is best for predictive maintenance?",
                ["Wear-out", "Useful life", "Infant mortality", "Shutdown"],
                1,
                "During useful life, predictive monitoring is most valuable.",
            ),
            QuizQuestion::new(
                "Which is a disadvantage of PM?",
                [
                    "Reduces risk",
                    "May cause over-maintenance",
                    "Requires sensors",
                    "Needs trained experts",
                ],
                1,
                "PM may be done too often, wasting resources.",
            ),
            QuizQuestion::new(
                "In CBM, what triggers action?",
                ["Calendar date", "Runtime hours", "Sensor-based data", "Weather forecast"],
                2,
                "CBM relies on actual asset condition from sensors.",
            ),
            QuizQuestion::new(
                "Best maintenance for LED light in office:",
                ["RCM", "CBM", "RTF", "PdM"],
                2,
                "Low-cost non-critical items are ideal for Run-to-Failure.",
            ),
            QuizQuestion::new(
                "OEE includes:",
                [
                    "Availability, performance, quality",
                    "Load, fuel, temperature",
                    "Speed, torque, voltage",
                    "Time, cost, effort",
                ],
                0,
                "OEE is a productivity metric: A × P × Q.",
            ),
            QuizQuestion::new(
                "A CMMS is used for:",
                [
                    "Cooling motors",
                    "Measuring voltage",
                    "Managing maintenance tasks",
                    "Oil filtration",
                ],
                2,
                "CMMS software schedules, tracks, and documents maintenance.",
            ),
            QuizQuestion::new(
                "Which asset benefits most from RCM?",
                ["Office printer", "Emergency diesel generator", "Desk lamp", "UPS outlet"],
                1,
                "Critical systems with safety/operational impact need RCM.",
            ),
            QuizQuestion::new(
                "A low MTBF indicates:",
                [
                    "Good reliability",
                    "Frequent failures",
                    "High maintenance budget",
                    "Efficient planning",
                ],
                1,
                "Lower MTBF means failures are occurring often.",
            ),
            QuizQuestion::new(
                "What type of maintenance is usually lowest cost upfront?",
                ["RCM", "Preventive", "Corrective", "Predictive"],
                2,
                "Corrective has no planning cost—only when failure happens.",
            ),
        ];

        Self { questions }
    }
}

/// Selected option text per question position
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizAttempt {
    selections: HashMap<usize, String>,
}

impl QuizAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer for `index` after checking it against the bank.
    /// Returns the canonical option text that was stored.
    pub fn select(&mut self, bank: &QuestionBank, index: usize, answer: &str) -> Result<String> {
        let question = bank.get(index).ok_or(InputError::QuestionOutOfRange {
            index: index + 1,
            total: bank.len(),
        })?;
        let option = question
            .resolve(answer)
            .ok_or_else(|| InputError::UnknownOption {
                question: index + 1,
                answer: answer.to_string(),
            })?
            .to_string();
        self.selections.insert(index, option.clone());
        Ok(option)
    }

    /// Forget the answer for `index`
    pub fn clear(&mut self, index: usize) {
        self.selections.remove(&index);
    }

    /// Build an attempt from positional answers. Blank entries and `-`
    /// leave that question unanswered.
    pub fn from_answers<S: AsRef<str>>(bank: &QuestionBank, answers: &[S]) -> Result<Self> {
        if answers.len() > bank.len() {
            return Err(InputError::TooManyAnswers {
                given: answers.len(),
                total: bank.len(),
            });
        }

        let mut attempt = Self::new();
        for (index, answer) in answers.iter().enumerate() {
            let answer = answer.as_ref().trim();
            if answer.is_empty() || answer == "-" {
                continue;
            }
            attempt.select(bank, index, answer)?;
        }
        Ok(attempt)
    }

    pub fn selection(&self, index: usize) -> Option<&str> {
        self.selections.get(&index).map(|s| s.as_str())
    }

    pub fn answered(&self) -> usize {
        self.selections.len()
    }
}

/// Feedback for one question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionResult {
    /// 1-based question number
    pub number: usize,
    pub question: String,
    pub selected: Option<String>,
    pub correct_answer: String,
    pub correct: bool,
    pub explanation: String,
}

/// Outcome of a submitted attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizReport {
    pub score: usize,
    pub total: usize,
    pub results: Vec<QuestionResult>,
}

impl QuizReport {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.score as f64 / self.total as f64 * 100.0
        }
    }
}

/// Score an attempt against the bank. An unanswered question never
/// equals the correct answer, so it counts as wrong.
pub fn score(bank: &QuestionBank, attempt: &QuizAttempt) -> QuizReport {
    let results: Vec<QuestionResult> = bank
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = attempt.selection(index);
            let correct_answer = question.correct_answer();
            QuestionResult {
                number: index + 1,
                question: question.text.clone(),
                selected: selected.map(String::from),
                correct_answer: correct_answer.to_string(),
                correct: selected == Some(correct_answer),
                explanation: question.explanation.clone(),
            }
        })
        .collect();

    let score = results.iter().filter(|r| r.correct).count();
    tracing::debug!(score, total = bank.len(), answered = attempt.answered(), "quiz scored");

    QuizReport {
        score,
        total: bank.len(),
        results,
    }
}

/// Answer collection with a submit gate: feedback stays hidden until
/// `submit()`. Changing an answer afterwards hides it again until the
/// next submit.
pub struct QuizSession<'a> {
    bank: &'a QuestionBank,
    attempt: QuizAttempt,
    submitted: bool,
}

impl<'a> QuizSession<'a> {
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self {
            bank,
            attempt: QuizAttempt::new(),
            submitted: false,
        }
    }

    /// Start from answers collected elsewhere, still unsubmitted
    pub fn with_attempt(bank: &'a QuestionBank, attempt: QuizAttempt) -> Self {
        Self {
            bank,
            attempt,
            submitted: false,
        }
    }

    pub fn bank(&self) -> &'a QuestionBank {
        self.bank
    }

    pub fn select(&mut self, index: usize, answer: &str) -> Result<String> {
        let option = self.attempt.select(self.bank, index, answer)?;
        self.submitted = false;
        Ok(option)
    }

    pub fn clear(&mut self, index: usize) {
        self.attempt.clear(index);
        self.submitted = false;
    }

    pub fn attempt(&self) -> &QuizAttempt {
        &self.attempt
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn submit(&mut self) -> QuizReport {
        self.submitted = true;
        score(self.bank, &self.attempt)
    }

    /// The report, or `None` while unsubmitted
    pub fn feedback(&self) -> Option<QuizReport> {
        self.submitted.then(|| score(self.bank, &self.attempt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn correct_answers(bank: &QuestionBank) -> Vec<String> {
        bank.questions()
            .iter()
            .map(|q| q.correct_answer().to_string())
            .collect()
    }

    fn wrong_answers(bank: &QuestionBank) -> Vec<String> {
        bank.questions()
            .iter()
            .map(|q| q.options[(q.correct_index + 1) % 4].clone())
            .collect()
    }

    #[test]
    fn test_standard_bank_shape() {
        let bank = QuestionBank::standard();
        assert_eq!(bank.len(), 25);
        for q in bank.questions() {
            assert!(q.correct_index < 4);
            assert!(!q.explanation.is_empty());
        }
    }

    #[test]
    fn test_all_correct_scores_full_marks() {
        let bank = QuestionBank::standard();
        let attempt = QuizAttempt::from_answers(&bank, &correct_answers(&bank)).unwrap();
        let report = score(&bank, &attempt);

        assert_eq!(report.score, 25);
        assert_eq!(report.total, 25);
        assert!(report.results.iter().all(|r| r.correct));
        assert_eq!(report.percent(), 100.0);
    }

    #[test]
    fn test_all_wrong_scores_zero() {
        let bank = QuestionBank::standard();
        let attempt = QuizAttempt::from_answers(&bank, &wrong_answers(&bank)).unwrap();
        let report = score(&bank, &attempt);

        assert_eq!(report.score, 0);
        assert!(report.results.iter().all(|r| !r.correct));
    }

    #[test]
    fn test_missing_selection_counts_as_wrong() {
        let bank = QuestionBank::standard();
        let report = score(&bank, &QuizAttempt::new());

        assert_eq!(report.score, 0);
        assert_eq!(report.results.len(), 25);
        assert!(report.results.iter().all(|r| r.selected.is_none()));
        assert_eq!(report.results[0].correct_answer, "Corrective");
    }

    #[test]
    fn test_letters_numbers_and_text_resolve() {
        let bank = QuestionBank::standard();
        let q = bank.get(0).unwrap();

        assert_eq!(q.resolve("b"), Some("Corrective"));
        assert_eq!(q.resolve("B"), Some("Corrective"));
        assert_eq!(q.resolve("2"), Some("Corrective"));
        assert_eq!(q.resolve("corrective"), Some("Corrective"));
        assert_eq!(q.resolve("e"), None);
        assert_eq!(q.resolve("Reactive"), None);
    }

    #[test]
    fn test_partial_answers_with_skips() {
        let bank = QuestionBank::standard();
        // Q1 correct (b), Q2 skipped, Q3 correct (c), Q4 wrong (a)
        let attempt = QuizAttempt::from_answers(&bank, &["b", "-", "c", "a"]).unwrap();
        let report = score(&bank, &attempt);

        assert_eq!(attempt.answered(), 3);
        assert_eq!(report.score, 2);
        assert!(report.results[1].selected.is_none());
        assert!(!report.results[3].correct);
        assert_eq!(report.results[3].selected.as_deref(), Some("Thermal imaging"));
    }

    #[test]
    fn test_invalid_selection_rejected() {
        let bank = QuestionBank::standard();

        let err = QuizAttempt::from_answers(&bank, &["z"]).unwrap_err();
        assert_eq!(
            err,
            InputError::UnknownOption {
                question: 1,
                answer: "z".to_string()
            }
        );

        let mut attempt = QuizAttempt::new();
        let err = attempt.select(&bank, 25, "a").unwrap_err();
        assert_eq!(err, InputError::QuestionOutOfRange { index: 26, total: 25 });

        let too_many = vec!["a"; 26];
        assert!(matches!(
            QuizAttempt::from_answers(&bank, &too_many),
            Err(InputError::TooManyAnswers { given: 26, total: 25 })
        ));
    }

    #[test]
    fn test_no_feedback_before_submit() {
        let bank = QuestionBank::standard();
        let mut session = QuizSession::new(&bank);

        for (i, answer) in correct_answers(&bank).iter().enumerate() {
            session.select(i, answer).unwrap();
        }
        assert!(!session.is_submitted());
        assert!(session.feedback().is_none());

        let report = session.submit();
        assert_eq!(report.score, 25);
        assert_eq!(session.feedback(), Some(report));
    }

    #[test]
    fn test_session_from_collected_answers() {
        let bank = QuestionBank::standard();
        let attempt = QuizAttempt::from_answers(&bank, &["2", "-", "", "b"]).unwrap();
        let mut session = QuizSession::with_attempt(&bank, attempt);

        assert_eq!(session.attempt().answered(), 2);
        assert!(session.feedback().is_none());
        assert_eq!(session.submit().score, 2);
    }

    #[test]
    fn test_explanations_keep_source_wording() {
        let bank = QuestionBank::standard();
        assert_eq!(bank.len(), 25);
        assert_eq!(
            bank.questions()[24].explanation,
            "Corrective has no planning cost\u{2014}only when failure happens."
        );
    }

    #[test]
    fn test_changing_answer_withdraws_feedback() {
        let bank = QuestionBank::standard();
        let mut session = QuizSession::new(&bank);

        session.select(0, "b").unwrap();
        session.submit();
        assert_eq!(session.feedback().unwrap().score, 1);

        session.select(0, "a").unwrap();
        assert!(session.feedback().is_none());
        assert_eq!(session.submit().score, 0);

        session.clear(0);
        assert!(session.feedback().is_none());
    }

    #[test]
    fn test_scoring_is_per_question() {
        let bank = QuestionBank::standard();
        let mut forward = QuizAttempt::new();
        let mut backward = QuizAttempt::new();

        for i in 0..bank.len() {
            forward.select(&bank, i, "c").unwrap();
        }
        for i in (0..bank.len()).rev() {
            backward.select(&bank, i, "c").unwrap();
        }
        assert_eq!(score(&bank, &forward), score(&bank, &backward));
    }
}
