//! Static content served when the model is unavailable or its reply is unusable.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::interview::types::{Difficulty, InterviewType};

/// Neutral score reported when feedback could not be generated.
pub const FALLBACK_OVERALL_SCORE: u8 = 70;

pub const FALLBACK_OVERALL_FEEDBACK: &str = "Detailed AI feedback is unavailable right now. \
    Your answers have been recorded; review each one for clarity, structure and concrete \
    examples, and try again later for a full evaluation.";

pub const FALLBACK_GREETING: &str = "Hello, and welcome to your mock interview! I'm glad \
    you could join me today. To get started, could you tell me a little about yourself and \
    your background?";

pub const FALLBACK_FOLLOW_UP: &str =
    "Thank you for that answer. Could you tell me more about that?";

type QuestionTable = HashMap<(InterviewType, Difficulty), &'static [&'static str]>;

static DEFAULT_QUESTIONS: Lazy<QuestionTable> = Lazy::new(|| {
    use Difficulty::*;
    use InterviewType::*;

    let mut table: QuestionTable = HashMap::new();

    table.insert(
        (Technical, Beginner),
        &[
            "What is the difference between a compiled and an interpreted language?",
            "Can you explain what a variable is and how scope affects it?",
            "What is the difference between an array and a linked list?",
            "What does version control mean, and why do teams use Git?",
            "How would you explain what an API is to a non-technical person?",
            "What is the difference between a stack and a queue?",
            "What are the basic HTTP methods and when would you use each?",
        ],
    );
    table.insert(
        (Technical, Intermediate),
        &[
            "How would you design a RESTful API for a simple blogging platform?",
            "What is the difference between SQL and NoSQL databases, and when would you choose each?",
            "How do you approach debugging a performance problem in a web application?",
            "Can you explain how indexes speed up database queries and what they cost?",
            "What are the SOLID principles, and how have you applied one of them?",
            "How would you write tests for code that depends on an external service?",
            "What is the difference between authentication and authorization?",
        ],
    );
    table.insert(
        (Technical, Advanced),
        &[
            "How would you design a URL shortening service that handles millions of requests per day?",
            "What trade-offs does the CAP theorem force on a distributed database?",
            "How would you migrate a monolith to microservices without downtime?",
            "How do you guarantee consistency across services without distributed transactions?",
            "How would you design a rate limiter for a public API?",
            "Walk me through how you would diagnose a memory leak in a long-running production service.",
            "How would you design a caching strategy for a read-heavy system, and how do you handle invalidation?",
        ],
    );
    table.insert(
        (Behavioral, Beginner),
        &[
            "Tell me about yourself and what interests you about this role.",
            "Describe a time you worked as part of a team. What was your contribution?",
            "How do you prioritize your work when you have several tasks due at once?",
            "Tell me about a time you learned something new quickly.",
            "What are your greatest strengths and one area you are working to improve?",
            "Why are you interested in working for our company?",
            "How do you handle feedback on your work?",
        ],
    );
    table.insert(
        (Behavioral, Intermediate),
        &[
            "Tell me about a time you disagreed with a teammate. How did you resolve it?",
            "Describe a project that did not go as planned. What did you learn?",
            "Give an example of a time you had to meet a tight deadline. How did you manage it?",
            "Tell me about a time you took initiative beyond your assigned responsibilities.",
            "How do you explain a complex technical decision to a non-technical stakeholder?",
            "Describe a situation where you had to adapt to a significant change at work.",
            "Tell me about a mistake you made and how you handled it.",
        ],
    );
    table.insert(
        (Behavioral, Advanced),
        &[
            "Tell me about a time you led a team through a difficult or ambiguous project.",
            "Describe a time you had to influence a decision without formal authority.",
            "How have you handled an underperforming team member?",
            "Tell me about a strategic decision you made that turned out to be wrong. What did you do?",
            "Describe how you balanced competing priorities from multiple senior stakeholders.",
            "Tell me about a time you had to deliver difficult news to your team or leadership.",
            "How have you built a culture of accountability on a team you led?",
        ],
    );
    table.insert(
        (Mixed, Beginner),
        &[
            "Tell me about yourself and how you got into software development.",
            "What programming language are you most comfortable with, and why?",
            "Describe a small project you built. What problem did it solve?",
            "How do you approach learning a new technology?",
            "What is the difference between front-end and back-end development?",
            "Tell me about a time you asked for help on a problem. How did it go?",
            "What does writing clean code mean to you?",
        ],
    );
    table.insert(
        (Mixed, Intermediate),
        &[
            "Walk me through a technical project you are proud of and the decisions you made.",
            "How do you decide between building a feature quickly and building it to last?",
            "Tell me about a production bug you fixed. How did you find the root cause?",
            "How do you review a teammate's code, and what do you look for?",
            "How would you design the data model for an online bookstore?",
            "Describe a time you had to learn an unfamiliar codebase quickly.",
            "How do you keep your technical skills current?",
        ],
    );
    table.insert(
        (Mixed, Advanced),
        &[
            "Describe the most complex system you have designed. What would you change today?",
            "How do you make architectural decisions when requirements are still uncertain?",
            "Tell me about a time you had to balance technical debt against product deadlines.",
            "How would you design a notification system that serves email, SMS and push at scale?",
            "How do you mentor engineers while still delivering on your own commitments?",
            "Tell me about a cross-team technical initiative you drove from idea to adoption.",
            "How do you evaluate whether to adopt a new technology across an organization?",
        ],
    );

    table
});

/// Built-in questions for `(kind, difficulty)`, at most `count` of them, in table order.
pub fn default_questions(kind: InterviewType, difficulty: Difficulty, count: usize) -> Vec<String> {
    DEFAULT_QUESTIONS
        .get(&(kind, difficulty))
        .map(|questions| {
            questions
                .iter()
                .take(count)
                .map(|q| q.to_string())
                .collect()
        })
        .unwrap_or_default()
}
