//! Prompt construction for lesson generation.
//!
//! Every prompt has the same layout: a mode-specific introduction, the
//! lesson JSON schema, the generation rules, then an `Input Variables`
//! section listing the caller's context verbatim. Nested values are
//! rendered as literal JSON text.

use serde::Serialize;

use crate::lesson::{Lesson, Quiz, Theory};
use crate::onboarding::{OnboardingAnswers, ANSWER_LABELS};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

const COLD_START_INTRO: &str = "\
You are an AI learning path generator for a personalized micro-learning platform.
The employee has answered the onboarding questions listed under Input Variables.
Generate a personalized learning path and the first lesson.";

const AD_HOC_INTRO: &str = "\
You are an AI lesson generator for a personalized micro-learning platform.
Generate a new lesson for a user based on their learning goals, current skill mastery, and preferred topic.";

const CONTINUATION_INTRO: &str = "\
You are an AI lesson generator for a personalized micro-learning platform.
The employee has just completed the lesson listed under Input Variables.
Based on their learning summary and that lesson, generate the NEXT lesson.";

/// Output schema. `<lesson_id>`, `<user_id>` and `<created_at>` are
/// substituted per prompt.
const LESSON_SCHEMA: &str = r#"The lesson must be a single JSON object with this exact structure:

{
  "lessonId": "<lesson_id>",
  "userId": "<user_id>",
  "topic": "<lesson_topic>",
  "subTopics": ["<subtopic_1>", "<subtopic_2>"],
  "theories": [
    {"title": "<theory_title>", "content": "<theory_content>"}
  ],
  "quiz": {
    "isVisible": false,
    "attemptsMade": 0,
    "maxAttempts": 3,
    "question": "<quiz_question>",
    "options": ["<option1>", "<option2>", "<option3>"],
    "correctAnswer": <index_of_correct_option>,
    "difficulty": "<Easy/Medium/Hard>"
  },
  "durationMinutes": 5,
  "level": "<Beginner/Intermediate/Advanced>",
  "feedback": "",
  "createdAt": "<created_at>"
}"#;

const COMMON_RULES: [&str; 5] = [
    "Generate exactly 3 concise theories (~5 min reading in total).",
    "Include exactly 1 quiz with exactly 3 options; mark the correct answer index 0-based.",
    "Quiz hidden initially (isVisible: false, attemptsMade: 0).",
    "Duration at most 5 minutes.",
    "Output ONLY valid JSON, no extra text and no Markdown fences.",
];

const PLACEHOLDER_LESSON_ID: &str = "LESSON#<unique_id>";
const PLACEHOLDER_CREATED_AT: &str = "<ISO_timestamp>";

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// The parts of a finished lesson that feed the continuation prompt.
#[derive(Debug, Clone, Copy)]
pub struct CompletedLesson<'a> {
    pub lesson_id: &'a str,
    pub topic: &'a str,
    pub theories: &'a [Theory],
    pub quiz: &'a Quiz,
}

impl<'a> From<&'a Lesson> for CompletedLesson<'a> {
    fn from(lesson: &'a Lesson) -> Self {
        Self {
            lesson_id: &lesson.lesson_id,
            topic: &lesson.topic,
            theories: &lesson.theories,
            quiz: &lesson.quiz,
        }
    }
}

/// Which prompt to build, with the variables that mode requires.
#[derive(Debug, Clone, Copy)]
pub enum PromptContext<'a> {
    /// First lesson, straight from the onboarding answers.
    ColdStart {
        owner_id: &'a str,
        answers: &'a OnboardingAnswers,
        current_level: &'a str,
    },
    /// One-off lesson from explicit learner attributes.
    AdHoc {
        owner_id: &'a str,
        current_level: &'a str,
        skill_gaps: &'a [String],
        interests: &'a [String],
        goals: &'a str,
    },
    /// Successor to a lesson the learner just finished.
    Continuation {
        owner_id: &'a str,
        summary: &'a str,
        completed: CompletedLesson<'a>,
        next_lesson_id: &'a str,
        created_at: Timestamp,
    },
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the full prompt text for `context`. Pure.
pub fn build_prompt(context: &PromptContext<'_>) -> String {
    let (intro, topic_rule, owner_id, lesson_id, created_at) = match context {
        PromptContext::ColdStart { owner_id, .. } => (
            COLD_START_INTRO,
            "Level matches the employee's current level; use the employee's answers to decide the topic.",
            *owner_id,
            PLACEHOLDER_LESSON_ID.to_string(),
            PLACEHOLDER_CREATED_AT.to_string(),
        ),
        PromptContext::AdHoc { owner_id, .. } => (
            AD_HOC_INTRO,
            "Lesson level matches the user's current level; use their interests, skill gaps, and goals to decide the topic.",
            *owner_id,
            PLACEHOLDER_LESSON_ID.to_string(),
            PLACEHOLDER_CREATED_AT.to_string(),
        ),
        PromptContext::Continuation {
            owner_id,
            next_lesson_id,
            created_at,
            ..
        } => (
            CONTINUATION_INTRO,
            "Level matches the employee's skill level based on their summary and last lesson; pick a logical next topic that builds on the completed lesson.",
            *owner_id,
            (*next_lesson_id).to_string(),
            created_at.to_rfc3339(),
        ),
    };

    let schema = LESSON_SCHEMA
        .replace("<lesson_id>", &lesson_id)
        .replace("<user_id>", owner_id)
        .replace("<created_at>", &created_at);

    let rules = COMMON_RULES
        .iter()
        .copied()
        .chain(std::iter::once(topic_rule))
        .enumerate()
        .map(|(i, rule)| format!("{}. {rule}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{intro}\n\n{schema}\n\nRules:\n{rules}\n\nInput Variables:\n{}\n\nGenerate the lesson now:",
        render_variables(context)
    )
}

/// Render the context section, one `- name: value` line per variable.
fn render_variables(context: &PromptContext<'_>) -> String {
    let lines: Vec<String> = match context {
        PromptContext::ColdStart {
            owner_id,
            answers,
            current_level,
        } => {
            let mut lines = vec![
                format!("- userId: {owner_id}"),
                format!("- currentLevel: {current_level}"),
            ];
            lines.extend(
                ANSWER_LABELS
                    .iter()
                    .zip(answers.as_array())
                    .enumerate()
                    .map(|(i, (label, answer))| format!("- {}. {label}: {answer}", i + 1)),
            );
            lines
        }
        PromptContext::AdHoc {
            owner_id,
            current_level,
            skill_gaps,
            interests,
            goals,
        } => vec![
            format!("- userId: {owner_id}"),
            format!("- currentLevel: {current_level}"),
            format!("- skillGaps: {}", to_json_text(skill_gaps)),
            format!("- interests: {}", to_json_text(interests)),
            format!("- goals: {goals}"),
        ],
        PromptContext::Continuation {
            owner_id,
            summary,
            completed,
            ..
        } => vec![
            format!("- userId: {owner_id}"),
            format!("- learningSummary: \"{summary}\""),
            format!("- completedLessonId: {}", completed.lesson_id),
            format!("- completedTopic: {}", completed.topic),
            format!("- completedTheories: {}", to_json_text(completed.theories)),
            format!("- completedQuiz: {}", to_json_text(completed.quiz)),
        ],
    };
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Daily email lesson
// ---------------------------------------------------------------------------

/// Topic used for the daily lesson when the learner has no recorded skill gaps.
pub const DAILY_FALLBACK_TOPIC: &str = "Productivity Tips";

/// The daily lesson covers the learner's first skill gap.
pub fn daily_topic(skill_gaps: &[String]) -> &str {
    skill_gaps
        .iter()
        .map(|gap| gap.trim())
        .find(|gap| !gap.is_empty())
        .unwrap_or(DAILY_FALLBACK_TOPIC)
}

/// Prompt for the short plain-text lesson sent by email.
///
/// Unlike [`build_prompt`] the model is asked for prose, not JSON.
pub fn build_daily_prompt(topic: &str) -> String {
    format!(
        "You are a friendly corporate trainer.\n\
         Create a 5-minute micro-lesson on '{topic}' for a busy professional.\n\
         Include:\n\
         - Simple definition\n\
         - One real-world example\n\
         - One practical tip they can use today\n\
         Keep it under 200 words. No markdown. No bullet points. Just plain, clear, friendly text, \
         and use emoji to make the text look friendly."
    )
}

fn to_json_text<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}
