pub mod clients;
pub mod config;
pub mod core;
pub mod error;
pub mod evaluator;
pub mod responder;
pub mod session;
pub mod store;
pub mod transcript;

// Convenient re-exports
pub use evaluator::{extract_score, AnswerEvaluator};
pub use responder::Responder;
pub use session::{Master, Mode, SessionEvent, SessionState};
pub use store::{QuestionRecord, QuestionStore};
pub use transcript::{Role, Transcript, Turn};
