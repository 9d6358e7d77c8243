use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::{core::LowLevelClient, error::AIError};

/// Mock client for testing that returns a fixed canned response
#[derive(Debug, Clone, Default)]
pub struct MockVoid;

#[async_trait]
impl LowLevelClient for MockVoid {
    async fn ask_raw(&self, _prompt: String) -> Result<String, AIError> {
        Ok("(mock reply)".to_string())
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        Box::new(self.clone())
    }
}

/// A scripted reply for `MockClient`
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    Error(String),
}

/// Shared handle used to script a `MockClient` and inspect the prompts it saw
#[derive(Debug, Default)]
pub struct MockHandle {
    responses: Mutex<VecDeque<MockResponse>>,
    prompts: Mutex<Vec<String>>,
}

impl MockHandle {
    /// Queue a successful text reply
    pub fn push_response(&self, text: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Text(text.into()));
    }

    /// Queue a failing reply
    pub fn push_error(&self, message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(message.into()));
    }

    /// All prompts the client has been asked so far, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of calls the client has received
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

/// Mock client with a controllable handle: replies are consumed from the
/// scripted queue, falling back to a canned text when the queue is empty.
#[derive(Debug, Clone)]
pub struct MockClient {
    handle: Arc<MockHandle>,
}

impl MockClient {
    pub fn new() -> (Self, Arc<MockHandle>) {
        let handle = Arc::new(MockHandle::default());
        (Self { handle: handle.clone() }, handle)
    }

    pub fn with_responses(responses: Vec<MockResponse>) -> (Self, Arc<MockHandle>) {
        let (client, handle) = Self::new();
        {
            let mut queue = handle.responses.lock().unwrap();
            queue.extend(responses);
        }
        (client, handle)
    }
}

#[async_trait]
impl LowLevelClient for MockClient {
    async fn ask_raw(&self, prompt: String) -> Result<String, AIError> {
        self.handle.prompts.lock().unwrap().push(prompt);

        let next = self.handle.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Text(text)) => Ok(text),
            Some(MockResponse::Error(message)) => Err(AIError::Mock(message)),
            None => Ok("(mock reply)".to_string()),
        }
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        Box::new(self.clone())
    }
}
