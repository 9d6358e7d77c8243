use ml_tutor::{Role, Transcript, Turn};

#[test]
fn export_round_trips() {
    let mut transcript = Transcript::new();
    transcript.append(Turn::user("what is a tensor?"));
    transcript.append(Turn::assistant("a multi-dimensional array"));
    transcript.append(Turn::user("thanks"));

    let json = transcript.to_json().unwrap();
    let parsed = Transcript::from_json(&json).unwrap();
    assert_eq!(parsed, transcript);
}

#[test]
fn empty_transcript_round_trips() {
    let transcript = Transcript::new();
    let json = transcript.to_json().unwrap();
    let parsed = Transcript::from_json(&json).unwrap();
    assert!(parsed.is_empty());
    assert_eq!(parsed, transcript);
}

#[test]
fn export_uses_lowercase_roles_and_time_field() {
    let mut transcript = Transcript::new();
    transcript.append(Turn::new(Role::User, "hi"));
    transcript.append(Turn::new(Role::Assistant, "hello"));

    let json = transcript.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let turns = value.as_array().unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0]["role"], "user");
    assert_eq!(turns[1]["role"], "assistant");
    assert!(turns[0]["content"].is_string());
    assert!(turns[0]["time"].is_string());
}

#[test]
fn turns_are_ordered_and_append_only() {
    let mut transcript = Transcript::new();
    for i in 0..5 {
        transcript.append(Turn::user(format!("message {i}")));
    }
    let contents: Vec<_> = transcript.turns().iter().map(|t| t.content.clone()).collect();
    assert_eq!(
        contents,
        vec!["message 0", "message 1", "message 2", "message 3", "message 4"]
    );
}

#[test]
fn clear_empties_the_transcript_wholesale() {
    let mut transcript = Transcript::new();
    transcript.append(Turn::user("a"));
    transcript.append(Turn::assistant("b"));
    transcript.clear();
    assert!(transcript.is_empty());
    assert_eq!(transcript.len(), 0);
}

#[test]
fn turn_timestamps_are_rfc3339() {
    let turn = Turn::user("hello");
    assert!(chrono::DateTime::parse_from_rfc3339(&turn.time).is_ok());
}
