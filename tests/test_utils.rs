use std::sync::Arc;

use ml_tutor::clients::mock::{MockClient, MockHandle};
use ml_tutor::{AnswerEvaluator, Master, QuestionRecord, QuestionStore, Responder};

/// A small fixed store for orchestration tests
pub fn sample_records() -> Vec<QuestionRecord> {
    vec![
        QuestionRecord {
            question: "What is overfitting?".to_string(),
            answer: "When a model fits noise in training data.".to_string(),
        },
        QuestionRecord {
            question: "What is gradient descent?".to_string(),
            answer: "Iterative optimization following the negative gradient.".to_string(),
        },
        QuestionRecord {
            question: "What is regularization?".to_string(),
            answer: "A complexity penalty added to the loss.".to_string(),
        },
    ]
}

/// Orchestrator backed by a scripted mock client, plus its handle
pub fn master_with_mock(records: Vec<QuestionRecord>) -> (Master<MockClient>, Arc<MockHandle>) {
    let (client, handle) = MockClient::new();
    let master = Master::new(
        QuestionStore::from_records(records),
        AnswerEvaluator::new(client.clone()),
        Responder::new(client),
    );
    (master, handle)
}

/// Orchestrator whose evaluator and responder never got a client, as happens
/// when the credential is missing at startup
pub fn master_unavailable(records: Vec<QuestionRecord>) -> Master<MockClient> {
    Master::new(
        QuestionStore::from_records(records),
        AnswerEvaluator::unavailable(),
        Responder::unavailable(),
    )
}
