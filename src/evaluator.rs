//! Answer evaluation: builds a single prompt embedding the question, the
//! reference answer and the student's submission, and returns the model's raw
//! text reply unmodified. The `Score:` line in that reply is advisory output
//! from the model, not a guaranteed format; `extract_score` is the defensive
//! parser for consumers that want the number.

use crate::clients::gemini::GeminiClient;
use crate::core::LowLevelClient;
use crate::error::AIError;
use tracing::{info, instrument, warn};

/// Evaluates student answers by delegating to an external text-generation
/// service. Holds no client when construction failed at startup; every call
/// then fails with `AIError::Unavailable` instead of crashing the session.
#[derive(Debug, Clone)]
pub struct AnswerEvaluator<C: LowLevelClient> {
    client: Option<C>,
}

impl AnswerEvaluator<Box<dyn LowLevelClient>> {
    /// Build an evaluator from the environment. A missing credential is
    /// logged and yields an unavailable evaluator, not an error.
    pub fn from_env() -> Self {
        match GeminiClient::from_env() {
            Some(client) => Self::new(Box::new(client) as Box<dyn LowLevelClient>),
            None => {
                warn!("No Gemini credential; answer evaluation disabled for this session");
                Self::unavailable()
            }
        }
    }
}

impl<C: LowLevelClient> AnswerEvaluator<C> {
    pub fn new(client: C) -> Self {
        Self { client: Some(client) }
    }

    pub fn unavailable() -> Self {
        Self { client: None }
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// Evaluate a student answer against the current question and its
    /// reference answer. Returns the raw model text; one network call per
    /// invocation, no retries.
    #[instrument(skip(self, question, reference_answer, student_answer), fields(answer_len = student_answer.len()))]
    pub async fn evaluate(
        &self,
        question: &str,
        reference_answer: &str,
        student_answer: &str,
    ) -> Result<String, AIError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| AIError::Unavailable("evaluator has no client".to_string()))?;

        let prompt = build_evaluation_prompt(question, reference_answer, student_answer);
        let response = client.ask_raw(prompt).await?;
        info!(response_len = response.len(), "Evaluation completed");
        Ok(response)
    }
}

fn build_evaluation_prompt(question: &str, reference_answer: &str, student_answer: &str) -> String {
    format!(
        "Question: {question}\n\
         Reference answer: {reference_answer}\n\
         Student answer: {student_answer}\n\
         \n\
         First, figure out whether 'Student answer' is an attempt at responding to the 'Question'.\n\
         - If it is not: you are a normal conversational assistant and should keep the conversation going.\n\
         - If it is: you are an ML examiner and should respond the following way:\n\
           Evaluate the student's answer for correctness, completeness, and precision.\n\
           Explain briefly what is missing or incorrect.\n\
           Then provide a numeric score from 0 to 100 (using the reference answer as the baseline) in the format:\n\
           Score: <number>\n\
           Feedback: <short explanation>\n"
    )
}

/// Pull the advisory `Score: <integer 0-100>` value out of an evaluation
/// reply. Anything missing, malformed or out of range is simply "no score
/// available" — never an error.
pub fn extract_score(text: &str) -> Option<u8> {
    for line in text.lines() {
        let Some(rest) = line.trim().strip_prefix("Score:") else {
            continue;
        };
        let token = rest.trim().split_whitespace().next().unwrap_or("");
        let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            continue;
        }
        match digits.parse::<u32>() {
            Ok(value) if value <= 100 => return Some(value as u8),
            _ => continue,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_all_three_inputs() {
        let prompt = build_evaluation_prompt(
            "What is overfitting?",
            "When a model fits noise in training data.",
            "idk",
        );
        assert!(prompt.contains("Question: What is overfitting?"));
        assert!(prompt.contains("Reference answer: When a model fits noise in training data."));
        assert!(prompt.contains("Student answer: idk"));
        assert!(prompt.contains("Score: <number>"));
    }

    #[test]
    fn extract_score_parses_plain_score_line() {
        let text = "Good attempt but incomplete.\nScore: 85\nFeedback: mention noise.";
        assert_eq!(extract_score(text), Some(85));
    }

    #[test]
    fn extract_score_tolerates_trailing_punctuation() {
        assert_eq!(extract_score("Score: 70."), Some(70));
        assert_eq!(extract_score("  Score: 100/100"), Some(100));
    }

    #[test]
    fn extract_score_rejects_junk_and_out_of_range() {
        assert_eq!(extract_score("Score: eleventy"), None);
        assert_eq!(extract_score("Score: 150"), None);
        assert_eq!(extract_score("no score here at all"), None);
        assert_eq!(extract_score(""), None);
    }
}
