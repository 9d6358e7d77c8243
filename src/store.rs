use crate::error::StoreError;
use rand::Rng;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// One question/reference-answer pair. Immutable once loaded; identified by
/// its position in the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub answer: String,
}

/// Fixed collection of question/answer pairs loaded once at startup.
#[derive(Debug, Clone)]
pub struct QuestionStore {
    records: Vec<QuestionRecord>,
}

impl QuestionStore {
    /// Load the store from a JSON file holding an array of
    /// `{question, answer}` objects.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let records: Vec<QuestionRecord> = serde_json::from_str(&raw)?;
        info!(path = %path.as_ref().display(), count = records.len(), "Loaded question store");
        Ok(Self { records })
    }

    /// Build a store directly from records, mainly for tests.
    pub fn from_records(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }

    /// Select a record index uniformly at random over `[0, len)`.
    pub fn choose_random(&self) -> Result<usize, StoreError> {
        if self.records.is_empty() {
            return Err(StoreError::Empty);
        }
        Ok(rand::thread_rng().gen_range(0..self.records.len()))
    }

    /// Select a random record and return it together with its index.
    pub fn choose_random_record(&self) -> Result<(usize, &QuestionRecord), StoreError> {
        let index = self.choose_random()?;
        let record = self.records.get(index).ok_or(StoreError::Empty)?;
        Ok((index, record))
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
