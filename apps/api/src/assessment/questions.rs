use serde::Serialize;

use crate::assessment::scoring::Category;

/// Likert answer labels in submission order; position N maps to raw value N+1.
pub const LIKERT_OPTIONS: [&str; 5] = [
    "Strongly Disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly Agree",
];

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: u32,
    pub category: Category,
    pub text: &'static str,
    pub options: [&'static str; 5],
}

/// The static self-assessment quiz: two statements per category.
pub fn question_bank() -> Vec<Question> {
    let statements: [(Category, &'static str); 10] = [
        (
            Category::Communication,
            "When presenting to a group, I feel confident and articulate.",
        ),
        (
            Category::ProblemSolving,
            "I enjoy breaking down complex problems into manageable parts.",
        ),
        (
            Category::Leadership,
            "I take initiative to lead projects and motivate team members.",
        ),
        (
            Category::EmotionalIntelligence,
            "I can easily recognize and understand the emotions of others.",
        ),
        (
            Category::Resilience,
            "I bounce back quickly from setbacks and disappointments.",
        ),
        (
            Category::Communication,
            "I can explain technical concepts to non-technical audiences effectively.",
        ),
        (
            Category::ProblemSolving,
            "I remain calm and analytical when facing unexpected challenges.",
        ),
        (
            Category::Leadership,
            "I actively seek opportunities to mentor and guide others.",
        ),
        (
            Category::EmotionalIntelligence,
            "I am aware of how my emotions affect my behavior and decisions.",
        ),
        (
            Category::Resilience,
            "I view failures as learning opportunities and adapt my approach accordingly.",
        ),
    ];

    statements
        .into_iter()
        .enumerate()
        .map(|(index, (category, text))| Question {
            id: index as u32 + 1,
            category,
            text,
            options: LIKERT_OPTIONS,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_questions_per_category() {
        let bank = question_bank();
        assert_eq!(bank.len(), 10);
        for category in Category::ALL {
            let count = bank.iter().filter(|q| q.category == category).count();
            assert_eq!(count, 2, "{}", category.wire_name());
        }
    }

    #[test]
    fn test_question_ids_are_sequential() {
        let ids: Vec<u32> = question_bank().iter().map(|q| q.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
    }
}
