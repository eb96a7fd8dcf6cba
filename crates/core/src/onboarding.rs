//! Onboarding chat script and answer validation.
//!
//! The chat asks four fixed questions in order; the four answers are
//! folded into the cold-start prompt and the learner's initial summary.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

/// Questions asked by the onboarding chat, in order.
pub const ONBOARDING_QUESTIONS: [&str; 4] = [
    "Hi! Let's set up your learning journey. Can you tell me a bit about your current experience or share your resume summary?",
    "Great! What skills or topics do you want to focus on learning?",
    "What skill gaps are you trying to fill?",
    "Awesome! What are your main goals or areas you want to improve?",
];

/// Short labels for each answer, used in prompts and summaries.
pub const ANSWER_LABELS: [&str; 4] = [
    "Experience/Resume Summary",
    "Skills/Topics to focus on",
    "Skill gaps",
    "Goals to improve",
];

/// Maximum length of a single answer in characters.
pub const MAX_ANSWER_LENGTH: usize = 4_000;

// ---------------------------------------------------------------------------
// Answers
// ---------------------------------------------------------------------------

/// The four ordered onboarding answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingAnswers {
    pub background: String,
    pub focus_skills: String,
    pub skill_gaps: String,
    pub goals: String,
}

impl OnboardingAnswers {
    /// Build from the raw answer list sent by the chat client.
    ///
    /// Requires exactly four answers, each non-blank and within
    /// [`MAX_ANSWER_LENGTH`].
    pub fn from_slice(answers: &[String]) -> Result<Self, CoreError> {
        let [background, focus_skills, skill_gaps, goals] = answers else {
            return Err(CoreError::Validation(format!(
                "Please provide all {} answers (got {})",
                ONBOARDING_QUESTIONS.len(),
                answers.len()
            )));
        };

        for (label, answer) in ANSWER_LABELS.iter().zip(answers) {
            if answer.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "Answer for '{label}' must not be empty"
                )));
            }
            if answer.len() > MAX_ANSWER_LENGTH {
                return Err(CoreError::Validation(format!(
                    "Answer for '{label}' exceeds maximum length of {MAX_ANSWER_LENGTH} characters (got {})",
                    answer.len()
                )));
            }
        }

        Ok(Self {
            background: background.trim().to_string(),
            focus_skills: focus_skills.trim().to_string(),
            skill_gaps: skill_gaps.trim().to_string(),
            goals: goals.trim().to_string(),
        })
    }

    /// Answers in question order.
    pub fn as_array(&self) -> [&str; 4] {
        [
            self.background.as_str(),
            self.focus_skills.as_str(),
            self.skill_gaps.as_str(),
            self.goals.as_str(),
        ]
    }

    /// Initial rolling summary stored on the learner profile.
    pub fn summary(&self) -> String {
        ANSWER_LABELS
            .iter()
            .zip(self.as_array())
            .map(|(label, answer)| format!("{label}: {answer}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The skill-gap answer split into individual gaps, in the order given.
    ///
    /// Commas, semicolons and line breaks separate entries; blank entries
    /// are dropped.
    pub fn skill_gap_list(&self) -> Vec<String> {
        self.skill_gaps
            .split([',', ';', '\n'])
            .map(str::trim)
            .filter(|gap| !gap.is_empty())
            .map(String::from)
            .collect()
    }
}
