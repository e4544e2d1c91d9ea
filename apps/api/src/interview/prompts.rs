// All LLM prompt constants for the interview module.
// Reuses cross-cutting fragments from llm_client::prompts.

use std::collections::HashMap;

use crate::interview::types::{Difficulty, InterviewType};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// Placeholder paired with a question the candidate skipped.
pub const NO_ANSWER_PLACEHOLDER: &str = "No answer provided";

/// Synthetic user turn that opens an interview with an empty history.
pub const OPENING_INSTRUCTION: &str = "Please start the interview. Greet the candidate \
    briefly and ask the first question.";

/// Question generation system prompt.
/// Replace: {type_label}, {difficulty_label}, {count}, {json_only}
const QUESTIONS_SYSTEM_TEMPLATE: &str = r#"You are an experienced interview coach preparing a candidate for a job interview.

Generate exactly {count} interview questions covering {type_label} topics, pitched at {difficulty_label}.

Return ONLY a JSON array of {count} question strings, for example:
["First question?", "Second question?"]

{json_only}"#;

/// Replace: {count}, {type}, {difficulty}
const QUESTIONS_USER_TEMPLATE: &str =
    "Generate {count} {type} interview questions at {difficulty} difficulty.";

/// Conversational interviewer system prompt.
/// Replace: {type_label}, {difficulty_label}
const CONVERSATION_SYSTEM_TEMPLATE: &str = r#"You are a friendly, professional interviewer conducting a live mock interview focused on {type_label} questions at {difficulty_label}.

Rules:
1. Ask exactly ONE question at a time and wait for the candidate's answer.
2. After each answer, give a brief acknowledgment or ask a short follow-up before moving on.
3. Keep every reply concise: one or two sentences.
4. Do not lecture or reveal model answers.
5. When enough ground has been covered, thank the candidate and conclude the interview naturally."#;

/// Answer evaluation system prompt.
/// Replace: {type_label}, {difficulty_label}, {json_only}
const FEEDBACK_SYSTEM_TEMPLATE: &str = r#"You are an expert interview coach evaluating a candidate's answers to {type_label} interview questions at {difficulty_label}.

Evaluate each answer for correctness, depth, clarity and structure. Be constructive and specific.

Return ONLY a JSON object with this EXACT schema:
{
  "feedback": {
    "<question text>": "<feedback for that answer>"
  },
  "overall_score": 75,
  "overall_feedback": "<two or three sentence summary>"
}

overall_score is an integer from 0 to 100.

{json_only}"#;

pub fn questions_system_prompt(kind: InterviewType, difficulty: Difficulty, count: usize) -> String {
    QUESTIONS_SYSTEM_TEMPLATE
        .replace("{type_label}", kind.label())
        .replace("{difficulty_label}", difficulty.label())
        .replace("{count}", &count.to_string())
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
}

pub fn questions_user_prompt(kind: InterviewType, difficulty: Difficulty, count: usize) -> String {
    QUESTIONS_USER_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{type}", kind.as_str())
        .replace("{difficulty}", difficulty.as_str())
}

pub fn conversation_system_prompt(kind: InterviewType, difficulty: Difficulty) -> String {
    CONVERSATION_SYSTEM_TEMPLATE
        .replace("{type_label}", kind.label())
        .replace("{difficulty_label}", difficulty.label())
}

pub fn feedback_system_prompt(kind: InterviewType, difficulty: Difficulty) -> String {
    FEEDBACK_SYSTEM_TEMPLATE
        .replace("{type_label}", kind.label())
        .replace("{difficulty_label}", difficulty.label())
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
}

/// Lists every question with its 1-based ordinal and the paired answer.
pub fn feedback_user_prompt(questions: &[String], answers: &HashMap<String, String>) -> String {
    let mut prompt = String::from("Please evaluate the following interview answers:\n");

    for (i, question) in questions.iter().enumerate() {
        let answer = answers
            .get(question)
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .unwrap_or(NO_ANSWER_PLACEHOLDER);
        prompt.push_str(&format!("\n{}. Question: {}\nAnswer: {}\n", i + 1, question, answer));
    }

    prompt
}
