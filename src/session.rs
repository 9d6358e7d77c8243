//! Session orchestration: the turn-taking state machine that decides whether
//! each user message is an answer to score, feedback to acknowledge, or plain
//! conversation to reply to.
//!
//! All session-scoped state lives in an explicit [`SessionState`] value owned
//! by the [`Master`]; the presentation loop owns the transcript and invokes
//! the orchestrator with one [`SessionEvent`] per user action. A service
//! failure during a single call is reported as a warning turn and never
//! corrupts the state.

use crate::core::LowLevelClient;
use crate::error::SessionError;
use crate::evaluator::AnswerEvaluator;
use crate::responder::Responder;
use crate::store::{QuestionRecord, QuestionStore};
use crate::transcript::{Transcript, Turn};
use tracing::{debug, info, warn};

/// Orchestration mode for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Quiz,
    Conversation,
}

/// Session-scoped mutable state, mutated exclusively by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub mode: Mode,
    pub current_question: Option<usize>,
    pub awaiting_answer: bool,
    pub awaiting_feedback: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            mode: Mode::Conversation,
            current_question: None,
            awaiting_answer: false,
            awaiting_feedback: false,
        }
    }
}

/// One user action, dispatched by the presentation loop.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    UserMessage(String),
    ToggleMode,
    ClearHistory,
}

/// The session orchestrator. Owns the question pointer and mode flags and
/// dispatches each incoming user turn to the evaluator, the responder, or a
/// new question selection.
pub struct Master<C: LowLevelClient> {
    store: QuestionStore,
    evaluator: AnswerEvaluator<C>,
    responder: Responder<C>,
    state: SessionState,
}

impl<C: LowLevelClient> Master<C> {
    pub fn new(
        store: QuestionStore,
        evaluator: AnswerEvaluator<C>,
        responder: Responder<C>,
    ) -> Self {
        info!(question_count = store.len(), "Creating session orchestrator");
        Self {
            store,
            evaluator,
            responder,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The record the next evaluation call would score against, if any.
    pub fn current_record(&self) -> Option<&QuestionRecord> {
        self.state.current_question.and_then(|index| self.store.get(index))
    }

    /// Evaluate a student answer against the currently selected question.
    /// Fails with `NoQuestionSelected` when no question has been chosen yet.
    pub async fn evaluate_current(&self, student_answer: &str) -> Result<String, SessionError> {
        let index = self
            .state
            .current_question
            .ok_or(SessionError::NoQuestionSelected)?;
        let record = self.store.get(index).ok_or(SessionError::NoQuestionSelected)?;
        let feedback = self
            .evaluator
            .evaluate(&record.question, &record.answer, student_answer)
            .await?;
        Ok(feedback)
    }

    /// Handle one user action. At most one outbound service call is issued per
    /// event; new turns are appended to the transcript in order.
    pub async fn handle_event(
        &mut self,
        transcript: &mut Transcript,
        event: SessionEvent,
    ) -> Result<(), SessionError> {
        match event {
            SessionEvent::UserMessage(text) => self.handle_user_message(transcript, text).await,
            SessionEvent::ToggleMode => self.toggle_mode(transcript),
            SessionEvent::ClearHistory => {
                info!("Clearing transcript");
                transcript.clear();
                Ok(())
            }
        }
    }

    async fn handle_user_message(
        &mut self,
        transcript: &mut Transcript,
        text: String,
    ) -> Result<(), SessionError> {
        match self.state.mode {
            Mode::Conversation => {
                // History as it stood before this message; the prompt carries
                // the latest message separately.
                let history = transcript.turns().to_vec();
                transcript.append(Turn::user(text.as_str()));
                match self.responder.respond(&text, &history).await {
                    Ok(reply) => transcript.append(Turn::assistant(reply)),
                    Err(e) => {
                        warn!(error = %e, "Conversational reply failed");
                        transcript.append(Turn::assistant(format!(
                            "I could not generate a reply right now ({e}). Please try again."
                        )));
                    }
                }
                Ok(())
            }
            Mode::Quiz => {
                transcript.append(Turn::user(text.as_str()));
                if self.state.awaiting_answer {
                    self.score_answer(transcript, &text).await;
                    Ok(())
                } else if self.state.awaiting_feedback {
                    // Feedback-on-the-feedback: acknowledged, not evaluated.
                    debug!("Acknowledging feedback and advancing to next question");
                    transcript.append(Turn::assistant(
                        "Thanks for the feedback! Here comes the next question.",
                    ));
                    self.state.awaiting_feedback = false;
                    self.pose_question(transcript)
                } else {
                    // Idle in quiz mode: pose the first question.
                    self.pose_question(transcript)
                }
            }
        }
    }

    async fn score_answer(&mut self, transcript: &mut Transcript, answer: &str) {
        match self.evaluate_current(answer).await {
            Ok(feedback) => {
                transcript.append(Turn::assistant(feedback));
                self.state.awaiting_answer = false;
                self.state.awaiting_feedback = true;
            }
            Err(e) => {
                // Leave awaiting_answer set so the user may resubmit.
                warn!(error = %e, "Answer evaluation failed");
                transcript.append(Turn::assistant(format!(
                    "I could not evaluate your answer right now ({e}). Please try again."
                )));
            }
        }
    }

    /// Choose a new random question, record it as current and post it.
    pub fn pose_question(&mut self, transcript: &mut Transcript) -> Result<(), SessionError> {
        let (index, record) = self.store.choose_random_record()?;
        debug!(index, "Posing new question");
        self.state.current_question = Some(index);
        self.state.awaiting_answer = true;
        self.state.awaiting_feedback = false;
        transcript.append(Turn::assistant(record.question.clone()));
        Ok(())
    }

    fn toggle_mode(&mut self, transcript: &mut Transcript) -> Result<(), SessionError> {
        self.state.awaiting_answer = false;
        self.state.awaiting_feedback = false;

        match self.state.mode {
            Mode::Quiz => {
                self.state.mode = Mode::Conversation;
                self.state.current_question = None;
                info!("Switched to conversation mode");
                transcript.append(Turn::assistant(
                    "Switched to conversation mode. Ask me anything.",
                ));
                Ok(())
            }
            Mode::Conversation => {
                if self.store.is_empty() {
                    // Quiz mode is unusable without questions; stay put.
                    warn!("Question store is empty; staying in conversation mode");
                    transcript.append(Turn::assistant(
                        "No questions are available, so quiz mode is disabled. Staying in conversation mode.",
                    ));
                    return Ok(());
                }
                self.state.mode = Mode::Quiz;
                info!("Switched to quiz mode");
                transcript.append(Turn::assistant(
                    "Switched to quiz mode. Answer the question below.",
                ));
                self.pose_question(transcript)
            }
        }
    }
}
