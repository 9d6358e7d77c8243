//! Conversational replies: restates a fixed helpful-assistant instruction,
//! serializes the turn history as role-labeled lines and issues one call to
//! the same text-generation service the evaluator uses.

use crate::clients::gemini::GeminiClient;
use crate::core::LowLevelClient;
use crate::error::AIError;
use crate::transcript::Turn;
use std::fmt::Write as _;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct Responder<C: LowLevelClient> {
    client: Option<C>,
}

impl Responder<Box<dyn LowLevelClient>> {
    /// Build a responder from the environment. Missing credential disables
    /// conversation replies for the session rather than failing startup.
    pub fn from_env() -> Self {
        match GeminiClient::from_env() {
            Some(client) => Self::new(Box::new(client) as Box<dyn LowLevelClient>),
            None => {
                warn!("No Gemini credential; conversational replies disabled for this session");
                Self::unavailable()
            }
        }
    }
}

impl<C: LowLevelClient> Responder<C> {
    pub fn new(client: C) -> Self {
        Self { client: Some(client) }
    }

    pub fn unavailable() -> Self {
        Self { client: None }
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// Produce a reply to the latest message given the prior turn history.
    #[instrument(skip(self, latest_message, history), fields(history_len = history.len()))]
    pub async fn respond(&self, latest_message: &str, history: &[Turn]) -> Result<String, AIError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| AIError::Unavailable("responder has no client".to_string()))?;

        let prompt = build_conversation_prompt(latest_message, history);
        let response = client.ask_raw(prompt).await?;
        info!(response_len = response.len(), "Conversational reply completed");
        Ok(response)
    }
}

fn build_conversation_prompt(latest_message: &str, history: &[Turn]) -> String {
    let mut prompt = String::from(
        "You are a helpful conversational assistant in a machine-learning tutoring session.\n\
         Continue the conversation naturally.\n\n\
         Conversation so far:\n",
    );
    for turn in history {
        let _ = writeln!(prompt, "{}: {}", turn.role, turn.content);
    }
    let _ = writeln!(prompt, "\nUser just said: {latest_message}");
    prompt.push_str("Respond appropriately.\n");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Role;

    #[test]
    fn prompt_renders_role_labeled_history() {
        let history = vec![
            Turn::new(Role::User, "hi"),
            Turn::new(Role::Assistant, "hello!"),
        ];
        let prompt = build_conversation_prompt("what is a tensor?", &history);
        assert!(prompt.contains("user: hi"));
        assert!(prompt.contains("assistant: hello!"));
        assert!(prompt.contains("User just said: what is a tensor?"));
    }
}
