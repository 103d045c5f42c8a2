//! Score Calculator — pure conversion of raw quiz answers into normalized
//! per-category scores and an overall awareness percentage.
//!
//! Answers arrive as 1–5 Likert values grouped by category. Each category
//! score is the answer mean scaled onto a 10-point scale and rounded to one
//! decimal; the awareness score normalizes the sum of all five category
//! scores to an integer percentage. No I/O — persistence is the caller's job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The five fixed self-assessment categories, in benchmark-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Communication,
    EmotionalIntelligence,
    ProblemSolving,
    Leadership,
    Resilience,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Communication,
        Category::EmotionalIntelligence,
        Category::ProblemSolving,
        Category::Leadership,
        Category::Resilience,
    ];

    /// The key used for this category in request and response payloads.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Category::Communication => "communication",
            Category::EmotionalIntelligence => "emotional-intelligence",
            Category::ProblemSolving => "problem-solving",
            Category::Leadership => "leadership",
            Category::Resilience => "resilience",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("missing answers for category '{0}'")]
    MissingCategory(&'static str),

    #[error("no answers submitted for category '{0}'")]
    EmptyCategory(&'static str),

    #[error("answer {value} for category '{category}' is outside the 1-5 scale")]
    OutOfRange { category: &'static str, value: i64 },
}

/// Result of scoring one submitted quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    /// Final score per category, 2.0–10.0 at one-decimal precision.
    pub scores: BTreeMap<Category, f64>,
    /// Overall awareness percentage, 0–100.
    pub awareness_score: u8,
}

/// Converts raw Likert answers into the final score report.
///
/// Every one of the five categories must be present with a non-empty answer
/// sequence of values in 1..=5; anything else is rejected rather than
/// producing out-of-range output.
pub fn calculate_scores(
    answers: &BTreeMap<Category, Vec<i64>>,
) -> Result<ScoreReport, ScoringError> {
    let mut scores = BTreeMap::new();
    let mut total = 0.0_f64;

    for category in Category::ALL {
        let raw = answers
            .get(&category)
            .ok_or(ScoringError::MissingCategory(category.wire_name()))?;

        if raw.is_empty() {
            return Err(ScoringError::EmptyCategory(category.wire_name()));
        }
        for &value in raw {
            if !(1..=5).contains(&value) {
                return Err(ScoringError::OutOfRange {
                    category: category.wire_name(),
                    value,
                });
            }
        }

        let mean = raw.iter().sum::<i64>() as f64 / raw.len() as f64;
        // 1–5 mean mapped onto a 2–10 scale, one decimal place.
        let score = round_one_decimal(mean * 2.0);
        total += score;
        scores.insert(category, score);
    }

    // Five categories at 10 points each make 50 the maximum total.
    let awareness_score = (total / 50.0 * 100.0).round() as u8;

    Ok(ScoreReport {
        scores,
        awareness_score,
    })
}

fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
