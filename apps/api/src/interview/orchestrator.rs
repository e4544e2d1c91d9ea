//! Interview orchestrator — question generation, conversational turns and answer scoring.
//!
//! Flow per call: build prompts → one chat completion → parse → fallback.
//!
//! None of the public operations can fail. A missing API key, a transport
//! error, a non-2xx status or unusable output all resolve to a valid value
//! tagged with the tier that produced it. The orchestrator keeps no state
//! between calls; conversation history is supplied by the caller every time.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::interview::defaults::{default_questions, FALLBACK_FOLLOW_UP, FALLBACK_GREETING};
use crate::interview::parsing::{
    fallback_feedback, parse_feedback, parse_question_array, parse_question_lines,
};
use crate::interview::prompts::{
    conversation_system_prompt, feedback_system_prompt, feedback_user_prompt,
    questions_system_prompt, questions_user_prompt, OPENING_INSTRUCTION,
};
use crate::interview::types::{
    ConversationTurn, Difficulty, FeedbackResult, Generated, InterviewType, Provenance,
};
use crate::llm_client::{ChatCompletion, ChatMessage, ChatRequest, LlmError};

const QUESTIONS_TEMPERATURE: f32 = 0.7;
const QUESTIONS_MAX_TOKENS: u32 = 2000;
const CONVERSATION_TEMPERATURE: f32 = 0.8;
const CONVERSATION_MAX_TOKENS: u32 = 300;
const FEEDBACK_TEMPERATURE: f32 = 0.7;
const FEEDBACK_MAX_TOKENS: u32 = 2000;

#[derive(Clone)]
pub struct InterviewOrchestrator {
    llm: Arc<dyn ChatCompletion>,
}

impl InterviewOrchestrator {
    pub fn new(llm: Arc<dyn ChatCompletion>) -> Self {
        Self { llm }
    }

    /// Returns at most `count` questions: parsed JSON, then heuristic lines,
    /// then the built-in table for `(kind, difficulty)`.
    pub async fn generate_questions(
        &self,
        kind: InterviewType,
        difficulty: Difficulty,
        count: usize,
    ) -> Generated<Vec<String>> {
        if count == 0 {
            return Generated::new(Vec::new(), Provenance::Fallback);
        }

        let request = ChatRequest {
            messages: vec![
                ChatMessage::system(questions_system_prompt(kind, difficulty, count)),
                ChatMessage::user(questions_user_prompt(kind, difficulty, count)),
            ],
            temperature: QUESTIONS_TEMPERATURE,
            max_tokens: QUESTIONS_MAX_TOKENS,
        };

        if let Some(raw) = self.complete("question generation", &request).await {
            if let Some(questions) = parse_question_array(&raw, count) {
                return Generated::new(questions, Provenance::Model);
            }

            let questions = parse_question_lines(&raw, count);
            if !questions.is_empty() {
                debug!(
                    "Question reply was not a JSON array; recovered {} by line heuristics",
                    questions.len()
                );
                return Generated::new(questions, Provenance::Heuristic);
            }

            debug!("Question reply held no usable questions; using defaults");
        }

        Generated::new(
            default_questions(kind, difficulty, count),
            Provenance::Fallback,
        )
    }

    /// Produces the interviewer's next line given the full dialogue so far.
    pub async fn get_conversational_response(
        &self,
        history: &[ConversationTurn],
        kind: InterviewType,
        difficulty: Difficulty,
        is_initial: bool,
    ) -> Generated<String> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(conversation_system_prompt(kind, difficulty)));
        messages.extend(history.iter().map(ChatMessage::from));
        if history.is_empty() && is_initial {
            messages.push(ChatMessage::user(OPENING_INSTRUCTION));
        }

        let request = ChatRequest {
            messages,
            temperature: CONVERSATION_TEMPERATURE,
            max_tokens: CONVERSATION_MAX_TOKENS,
        };

        if let Some(raw) = self.complete("conversation", &request).await {
            let reply = raw.trim();
            if !reply.is_empty() {
                return Generated::new(reply.to_string(), Provenance::Model);
            }
            warn!("Conversation reply was blank; using fallback");
        }

        let fallback = if is_initial {
            FALLBACK_GREETING
        } else {
            FALLBACK_FOLLOW_UP
        };
        Generated::new(fallback.to_string(), Provenance::Fallback)
    }

    /// Scores every answer. Unanswered questions are sent as "No answer provided".
    pub async fn generate_feedback(
        &self,
        questions: &[String],
        answers: &HashMap<String, String>,
        kind: InterviewType,
        difficulty: Difficulty,
    ) -> Generated<FeedbackResult> {
        let request = ChatRequest {
            messages: vec![
                ChatMessage::system(feedback_system_prompt(kind, difficulty)),
                ChatMessage::user(feedback_user_prompt(questions, answers)),
            ],
            temperature: FEEDBACK_TEMPERATURE,
            max_tokens: FEEDBACK_MAX_TOKENS,
        };

        if let Some(raw) = self.complete("feedback", &request).await {
            if let Some(result) = parse_feedback(&raw) {
                return Generated::new(result, Provenance::Model);
            }
            debug!("Feedback reply was not a JSON object; using fallback");
        }

        Generated::new(fallback_feedback(), Provenance::Fallback)
    }

    /// One best-effort completion. Failures are logged and collapse to `None`.
    async fn complete(&self, purpose: &str, request: &ChatRequest) -> Option<String> {
        match self.llm.complete(request).await {
            Ok(text) => Some(text),
            Err(LlmError::MissingApiKey) => {
                warn!("No API key configured; skipping {purpose} call");
                None
            }
            Err(e) => {
                error!("LLM {purpose} call failed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::interview::defaults::{FALLBACK_OVERALL_FEEDBACK, FALLBACK_OVERALL_SCORE};
    use crate::llm_client::Role;

    /// Replies with the same scripted outcome to every request and records what it was sent.
    struct ScriptedLlm {
        reply: Option<String>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedLlm {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(text.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        /// Behaves like a client with no API key.
        fn offline() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn last_request(&self) -> ChatRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl ChatCompletion for ScriptedLlm {
        async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            self.reply.clone().ok_or(LlmError::MissingApiKey)
        }
    }

    /// Fails every call as a provider outage would.
    struct FailingLlm;

    #[async_trait]
    impl ChatCompletion for FailingLlm {
        async fn complete(&self, _request: &ChatRequest) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "upstream unavailable".to_string(),
            })
        }
    }

    fn orchestrator(llm: Arc<dyn ChatCompletion>) -> InterviewOrchestrator {
        InterviewOrchestrator::new(llm)
    }

    fn turn(role: Role, content: &str) -> ConversationTurn {
        ConversationTurn {
            role,
            content: content.to_string(),
        }
    }

    // ── generate_questions ──────────────────────────────────────────────────

    #[tokio::test]
    async fn test_offline_questions_are_first_defaults() {
        let result = orchestrator(ScriptedLlm::offline())
            .generate_questions(InterviewType::Technical, Difficulty::Beginner, 3)
            .await;
        assert_eq!(result.source, Provenance::Fallback);
        assert_eq!(
            result.value,
            default_questions(InterviewType::Technical, Difficulty::Beginner, 3)
        );
        assert_eq!(result.value.len(), 3);
    }

    #[tokio::test]
    async fn test_fenced_json_reply_is_parsed() {
        let result = orchestrator(ScriptedLlm::replying("```json\n[\"Q1?\", \"Q2?\"]\n```"))
            .generate_questions(InterviewType::Mixed, Difficulty::Intermediate, 5)
            .await;
        assert_eq!(result.source, Provenance::Model);
        assert_eq!(result.value, vec!["Q1?".to_string(), "Q2?".to_string()]);
    }

    #[tokio::test]
    async fn test_free_text_reply_uses_heuristics() {
        let result = orchestrator(ScriptedLlm::replying(
            "1. What is a closure?\n2. Explain hoisting.",
        ))
        .generate_questions(InterviewType::Technical, Difficulty::Beginner, 5)
        .await;
        assert_eq!(result.source, Provenance::Heuristic);
        assert_eq!(
            result.value,
            vec!["What is a closure?".to_string(), "Explain hoisting.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unusable_reply_falls_back_to_defaults() {
        let result = orchestrator(ScriptedLlm::replying("Sorry, I can't."))
            .generate_questions(InterviewType::Behavioral, Difficulty::Advanced, 2)
            .await;
        assert_eq!(result.source, Provenance::Fallback);
        assert_eq!(
            result.value,
            default_questions(InterviewType::Behavioral, Difficulty::Advanced, 2)
        );
    }

    #[tokio::test]
    async fn test_provider_error_falls_back_to_defaults() {
        let result = orchestrator(Arc::new(FailingLlm))
            .generate_questions(InterviewType::Mixed, Difficulty::Beginner, 4)
            .await;
        assert_eq!(result.source, Provenance::Fallback);
        assert_eq!(result.value.len(), 4);
    }

    #[tokio::test]
    async fn test_question_count_bounds_hold_for_every_combination() {
        let orchestrator = orchestrator(ScriptedLlm::offline());
        for kind in InterviewType::ALL {
            for difficulty in Difficulty::ALL {
                for count in 1..=20 {
                    let result = orchestrator.generate_questions(kind, difficulty, count).await;
                    assert!(result.value.len() <= count);
                    assert!(!result.value.is_empty());
                    assert!(result.value.iter().all(|q| !q.trim().is_empty()));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_questions_request_parameters() {
        let llm = ScriptedLlm::replying("[\"Q?\"]");
        orchestrator(llm.clone())
            .generate_questions(InterviewType::Technical, Difficulty::Advanced, 7)
            .await;

        let request = llm.last_request();
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(request.max_tokens, 2000);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert!(request.messages[0].content.contains("exactly 7"));
        assert_eq!(request.messages[1].role, Role::User);
    }

    #[tokio::test]
    async fn test_zero_count_makes_no_call() {
        let llm = ScriptedLlm::replying("[\"Q?\"]");
        let result = orchestrator(llm.clone())
            .generate_questions(InterviewType::Technical, Difficulty::Beginner, 0)
            .await;
        assert!(result.value.is_empty());
        assert!(llm.requests.lock().unwrap().is_empty());
    }

    // ── get_conversational_response ─────────────────────────────────────────

    #[tokio::test]
    async fn test_offline_initial_turn_is_greeting() {
        let result = orchestrator(ScriptedLlm::offline())
            .get_conversational_response(&[], InterviewType::Technical, Difficulty::Beginner, true)
            .await;
        assert_eq!(result.source, Provenance::Fallback);
        assert_eq!(result.value, FALLBACK_GREETING);
        assert!(result.value.contains('?'));
    }

    #[tokio::test]
    async fn test_offline_follow_up_ignores_history() {
        let orchestrator = orchestrator(Arc::new(FailingLlm));
        let short = vec![turn(Role::User, "I like Rust.")];
        let long = vec![
            turn(Role::Assistant, "Tell me about yourself."),
            turn(Role::User, "I build backend services."),
            turn(Role::Assistant, "What languages?"),
            turn(Role::User, "Mostly Rust and Go."),
        ];

        for history in [short, long] {
            let result = orchestrator
                .get_conversational_response(
                    &history,
                    InterviewType::Behavioral,
                    Difficulty::Intermediate,
                    false,
                )
                .await;
            assert_eq!(result.value, FALLBACK_FOLLOW_UP);
        }
    }

    #[tokio::test]
    async fn test_initial_empty_history_gets_opening_turn() {
        let llm = ScriptedLlm::replying("  Hi! Could you introduce yourself?  \n");
        let result = orchestrator(llm.clone())
            .get_conversational_response(&[], InterviewType::Mixed, Difficulty::Beginner, true)
            .await;
        assert_eq!(result.source, Provenance::Model);
        assert_eq!(result.value, "Hi! Could you introduce yourself?");

        let request = llm.last_request();
        assert!((request.temperature - 0.8).abs() < f32::EPSILON);
        assert_eq!(request.max_tokens, 300);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[1], ChatMessage::user(OPENING_INSTRUCTION));
    }

    #[tokio::test]
    async fn test_history_is_forwarded_verbatim() {
        let llm = ScriptedLlm::replying("Interesting. Why Rust?");
        let history = vec![
            turn(Role::Assistant, "Welcome! What do you work on?"),
            turn(Role::User, "  Embedded firmware, mostly.  "),
        ];
        orchestrator(llm.clone())
            .get_conversational_response(
                &history,
                InterviewType::Technical,
                Difficulty::Advanced,
                true,
            )
            .await;

        let request = llm.last_request();
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[1], ChatMessage::from(&history[0]));
        assert_eq!(request.messages[2].content, "  Embedded firmware, mostly.  ");
    }

    #[tokio::test]
    async fn test_blank_reply_uses_fallback() {
        let result = orchestrator(ScriptedLlm::replying("   \n"))
            .get_conversational_response(
                &[turn(Role::User, "Done.")],
                InterviewType::Technical,
                Difficulty::Beginner,
                false,
            )
            .await;
        assert_eq!(result.source, Provenance::Fallback);
        assert_eq!(result.value, FALLBACK_FOLLOW_UP);
    }

    // ── generate_feedback ───────────────────────────────────────────────────

    #[tokio::test]
    async fn test_offline_feedback_is_neutral_fallback() {
        let questions = vec!["What is a closure?".to_string()];
        let result = orchestrator(ScriptedLlm::offline())
            .generate_feedback(
                &questions,
                &HashMap::new(),
                InterviewType::Technical,
                Difficulty::Beginner,
            )
            .await;
        assert_eq!(result.source, Provenance::Fallback);
        assert!(result.value.feedback.is_empty());
        assert_eq!(result.value.overall_score, FALLBACK_OVERALL_SCORE);
        assert_eq!(result.value.overall_feedback, FALLBACK_OVERALL_FEEDBACK);
    }

    #[tokio::test]
    async fn test_well_formed_feedback_passes_through() {
        let llm = ScriptedLlm::replying(
            r#"{"feedback":{"Q1":"good"},"overall_score":88,"overall_feedback":"solid"}"#,
        );
        let questions = vec!["Q1".to_string()];
        let mut answers = HashMap::new();
        answers.insert("Q1".to_string(), "An answer".to_string());

        let result = orchestrator(llm.clone())
            .generate_feedback(&questions, &answers, InterviewType::Mixed, Difficulty::Advanced)
            .await;
        assert_eq!(result.source, Provenance::Model);
        assert_eq!(result.value.feedback.get("Q1").map(String::as_str), Some("good"));
        assert_eq!(result.value.overall_score, 88);
        assert_eq!(result.value.overall_feedback, "solid");

        let request = llm.last_request();
        assert!(request.messages[1].content.contains("1. Question: Q1\nAnswer: An answer"));
    }

    #[tokio::test]
    async fn test_prose_feedback_falls_back() {
        let result = orchestrator(ScriptedLlm::replying("Great job overall!"))
            .generate_feedback(
                &["Q1".to_string()],
                &HashMap::new(),
                InterviewType::Behavioral,
                Difficulty::Beginner,
            )
            .await;
        assert_eq!(result.source, Provenance::Fallback);
        assert_eq!(result.value.overall_score, 70);
    }

    #[tokio::test]
    async fn test_identical_inputs_give_identical_outputs() {
        let llm = ScriptedLlm::replying("1. What is a closure?\n2. Explain hoisting.");
        let orchestrator = orchestrator(llm);

        let first = orchestrator
            .generate_questions(InterviewType::Technical, Difficulty::Beginner, 5)
            .await;
        let second = orchestrator
            .generate_questions(InterviewType::Technical, Difficulty::Beginner, 5)
            .await;
        assert_eq!(first, second);

        let questions = vec!["Q1".to_string()];
        let a = orchestrator
            .generate_feedback(&questions, &HashMap::new(), InterviewType::Mixed, Difficulty::Beginner)
            .await;
        let b = orchestrator
            .generate_feedback(&questions, &HashMap::new(), InterviewType::Mixed, Difficulty::Beginner)
            .await;
        assert_eq!(a, b);
    }
}
