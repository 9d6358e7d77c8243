//! Terminal presentation loop for the ML tutor: renders turns, accepts input,
//! toggles mode and exports the transcript. One synchronous pass per user
//! action; all state mutation goes through the session orchestrator.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use ml_tutor::clients::{ClientType, FlexibleClient, GeminiClient};
use ml_tutor::error::StoreError;
use ml_tutor::{AnswerEvaluator, Master, Mode, QuestionStore, Responder, SessionEvent, Transcript};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StartMode {
    Quiz,
    Chat,
}

#[derive(Debug, Parser)]
#[command(name = "tutor", about = "Interactive ML quiz chatbot")]
struct Args {
    /// Path to the question dataset (JSON array of {question, answer})
    #[arg(long, default_value = "data/questions.json")]
    dataset: PathBuf,

    /// Starting mode
    #[arg(long, value_enum, default_value = "chat")]
    mode: StartMode,

    /// Backend client: gemini or mock (default: gemini when GEMINI_API_KEY is set)
    #[arg(long)]
    client: Option<String>,

    /// Override the Gemini model identifier
    #[arg(long)]
    model: Option<String>,
}

/// One parsed input line. Anything starting with `/` must be a known
/// command; it is never forwarded to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Quit,
    History,
    Export(String),
    Clear,
    Quiz,
    Chat,
    Message(String),
    Unknown(String),
}

fn parse_line(line: &str) -> Command {
    if !line.starts_with('/') {
        return Command::Message(line.to_string());
    }
    match line.split_whitespace().collect::<Vec<_>>().as_slice() {
        ["/quit"] | ["/exit"] => Command::Quit,
        ["/history"] => Command::History,
        ["/export"] => Command::Export("chat_history.json".to_string()),
        ["/export", path] => Command::Export((*path).to_string()),
        ["/clear"] => Command::Clear,
        ["/quiz"] => Command::Quiz,
        ["/chat"] => Command::Chat,
        _ => Command::Unknown(line.to_string()),
    }
}

fn build_client(args: &Args) -> Option<FlexibleClient> {
    let client_type = match &args.client {
        Some(raw) => match ClientType::parse(raw) {
            Ok(t) => t,
            Err(e) => {
                warn!(error = %e, "Falling back to default client selection");
                ClientType::default()
            }
        },
        None => ClientType::default(),
    };

    match client_type {
        ClientType::Gemini => GeminiClient::from_env().map(|client| {
            let client = match &args.model {
                Some(model) => client.with_model(model.clone()),
                None => client,
            };
            FlexibleClient::new(Box::new(client))
        }),
        ClientType::Mock => Some(FlexibleClient::mock().0),
    }
}

fn print_new_turns(transcript: &Transcript, from: usize) {
    for turn in &transcript.turns()[from..] {
        println!("{}> {}", turn.role, turn.content);
    }
}

fn print_history(transcript: &Transcript) {
    if transcript.is_empty() {
        println!("No messages yet. Start a conversation first.");
        return;
    }
    for turn in transcript.turns() {
        println!("[{}] {}: {}", turn.time, turn.role, turn.content);
    }
}

fn export_history(transcript: &Transcript, path: &str) -> anyhow::Result<()> {
    let json = transcript.to_json().context("failed to serialize transcript")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {path}"))?;
    println!("Transcript exported to {path}");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let store = match QuestionStore::load(&args.dataset) {
        Ok(store) => store,
        Err(e @ (StoreError::Io(_) | StoreError::Malformed(_))) => {
            if args.mode == StartMode::Quiz {
                bail!("cannot start in quiz mode: {e}");
            }
            warn!(error = %e, "Dataset unavailable; quiz mode disabled");
            QuestionStore::from_records(Vec::new())
        }
        Err(e) => bail!(e),
    };

    let (evaluator, responder) = match build_client(&args) {
        Some(client) => (AnswerEvaluator::new(client.clone()), Responder::new(client)),
        None => {
            warn!("No usable client; evaluator and responder are unavailable");
            (AnswerEvaluator::unavailable(), Responder::unavailable())
        }
    };

    let mut master = Master::new(store, evaluator, responder);
    let mut transcript = Transcript::new();

    println!("ML Tutor (quiz and chat demo)");
    println!("Commands: /quiz /chat /clear /history /export [path] /quit");

    if args.mode == StartMode::Quiz {
        let before = transcript.len();
        master.handle_event(&mut transcript, SessionEvent::ToggleMode).await?;
        print_new_turns(&transcript, before);
    }

    let stdin = std::io::stdin();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event = match parse_line(line) {
            Command::Quit => break,
            Command::History => {
                print_history(&transcript);
                continue;
            }
            Command::Export(path) => {
                export_history(&transcript, &path)?;
                continue;
            }
            Command::Clear => {
                master
                    .handle_event(&mut transcript, SessionEvent::ClearHistory)
                    .await?;
                println!("Chat history cleared");
                continue;
            }
            Command::Quiz if master.state().mode == Mode::Quiz => {
                println!("Already in quiz mode");
                continue;
            }
            Command::Chat if master.state().mode == Mode::Conversation => {
                println!("Already in conversation mode");
                continue;
            }
            Command::Quiz | Command::Chat => SessionEvent::ToggleMode,
            Command::Unknown(raw) => {
                println!("Unrecognized command: {raw}");
                println!("Commands: /quiz /chat /clear /history /export [path] /quit");
                continue;
            }
            Command::Message(text) => SessionEvent::UserMessage(text),
        };

        let before = transcript.len();
        if let Err(e) = master.handle_event(&mut transcript, event).await {
            warn!(error = %e, "Event handling failed");
            println!("error: {e}");
            continue;
        }
        print_new_turns(&transcript, before);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_line, Command};

    #[test]
    fn plain_text_becomes_a_message() {
        assert_eq!(
            parse_line("what is a tensor?"),
            Command::Message("what is a tensor?".to_string())
        );
    }

    #[test]
    fn known_commands_parse() {
        assert_eq!(parse_line("/quit"), Command::Quit);
        assert_eq!(parse_line("/exit"), Command::Quit);
        assert_eq!(parse_line("/history"), Command::History);
        assert_eq!(parse_line("/clear"), Command::Clear);
        assert_eq!(parse_line("/quiz"), Command::Quiz);
        assert_eq!(parse_line("/chat"), Command::Chat);
        assert_eq!(
            parse_line("/export"),
            Command::Export("chat_history.json".to_string())
        );
        assert_eq!(
            parse_line("/export out.json"),
            Command::Export("out.json".to_string())
        );
    }

    #[test]
    fn unknown_slash_input_is_never_a_message() {
        assert_eq!(parse_line("/foo"), Command::Unknown("/foo".to_string()));
        assert_eq!(
            parse_line("/quiz extra words"),
            Command::Unknown("/quiz extra words".to_string())
        );
        assert_eq!(
            parse_line("/export too many args"),
            Command::Unknown("/export too many args".to_string())
        );
    }
}
