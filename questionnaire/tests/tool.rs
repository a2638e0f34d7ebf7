//! Integration tests for the agent-facing tool adapter

use std::time::Duration;

use example_questionnaires::{color, kickoff};
use questionnaire::{
    ClientQuestionnaire, DEFAULT_AUTHOR, Response, SchemaError, Selection, SessionError,
    SessionOptions, TOOL_NAME, TestSurface, ask_client, ask_client_async,
};
use serde_json::json;

#[test]
fn test_raw_schema_round_trip() {
    let surface = TestSurface::submitting(
        Response::new(vec![Selection::new().with_checked([1])]).with_comment("thanks"),
    );

    let transcript = ask_client(color::raw(), &surface, SessionOptions::default()).unwrap();

    assert_eq!(
        transcript,
        "Client answers to the questionnaire \"T\":\n\nColor?\n  * Blue\n\nClient comments:\nthanks"
    );
}

#[test]
fn test_missing_author_falls_back_to_default() {
    let raw = kickoff::raw_without_author();
    let questionnaire = {
        let mut raw = raw.clone();
        questionnaire::apply_defaults(&mut raw);
        questionnaire::validate(&raw).unwrap()
    };

    assert_eq!(questionnaire.author(), DEFAULT_AUTHOR);
    assert_eq!(questionnaire.title(), kickoff::TITLE);
    assert_eq!(questionnaire.len(), 4);
    assert!(questionnaire.questions()[3].options().is_empty());

    let surface = TestSurface::submitting(Response::blank(&questionnaire));
    assert!(ask_client(raw, &surface, SessionOptions::default()).is_ok());
}

#[test]
fn test_schema_errors_are_reported_before_rendering() {
    let surface = TestSurface::submitting(Response::default());

    let err = ask_client(
        json!({ "title": "T", "questions": "nope" }),
        &surface,
        SessionOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        SessionError::Schema(SchemaError::InvalidField {
            field: "questions",
            ..
        })
    ));
    assert_eq!(surface.renders(), 0);
    assert_eq!(surface.disposals(), 0);
}

#[test]
fn test_missing_questions_are_not_defaulted() {
    let surface = TestSurface::submitting(Response::default());

    let err = ask_client(json!({}), &surface, SessionOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        SessionError::Schema(SchemaError::MissingField("questions"))
    ));
}

#[test]
fn test_blank_question_text_is_rejected() {
    let surface = TestSurface::submitting(Response::default());

    let err = ask_client(
        json!({ "questions": [{ "question": "Ok?" }, { "question": "   " }] }),
        &surface,
        SessionOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        SessionError::Schema(SchemaError::EmptyQuestion { index: 1 })
    ));
}

#[test]
fn test_tool_wrapper() {
    let tool = ClientQuestionnaire::new(TestSurface::abandoning())
        .with_options(SessionOptions::new().with_timeout(Duration::from_secs(5)));

    assert_eq!(tool.name(), TOOL_NAME);
    assert!(!tool.description().is_empty());

    let err = tool.run(color::raw()).unwrap_err();
    assert!(err.is_abandoned());
    assert_eq!(tool.surface().disposals(), 1);
}

#[test]
fn test_tool_wrapper_times_out() {
    let tool = ClientQuestionnaire::new(TestSurface::silent())
        .with_options(SessionOptions::new().with_timeout(Duration::from_millis(20)));

    let err = tool.run(color::raw()).unwrap_err();
    assert!(err.is_timed_out());
    assert_eq!(err.to_string(), "no submission within 20ms");
}

#[tokio::test]
async fn test_async_host_gets_transcript() {
    let surface = TestSurface::submitting(
        Response::new(vec![Selection::new().with_checked([0])]).with_comment("thanks"),
    );

    let transcript = ask_client_async(color::raw(), &surface, SessionOptions::default())
        .await
        .unwrap();

    assert_eq!(
        transcript,
        "Client answers to the questionnaire \"T\":\n\nColor?\n  * Red\n\nClient comments:\nthanks"
    );
    assert_eq!(surface.disposals(), 1);
}

#[tokio::test]
async fn test_tool_wrapper_async_with_timeout() {
    let tool = ClientQuestionnaire::new(TestSurface::abandoning())
        .with_options(SessionOptions::new().with_timeout(Duration::from_secs(1)));

    let err = tool.run_async(color::raw()).await.unwrap_err();
    assert!(err.is_abandoned());
    assert_eq!(tool.surface().disposals(), 1);
}

#[tokio::test]
async fn test_blocking_call_inside_runtime_is_refused() {
    let surface = TestSurface::submitting(Response::new(vec![Selection::new()]));

    let err = ask_client(color::raw(), &surface, SessionOptions::default()).unwrap_err();

    assert!(matches!(err, SessionError::BlockingInRuntime));
    assert_eq!(surface.renders(), 0);
}

#[tokio::test]
async fn test_blocking_tool_run_with_timeout_inside_runtime_is_refused() {
    let tool = ClientQuestionnaire::new(TestSurface::abandoning())
        .with_options(SessionOptions::new().with_timeout(Duration::from_secs(1)));

    let err = tool.run(color::raw()).unwrap_err();
    assert!(matches!(err, SessionError::BlockingInRuntime));
    assert_eq!(tool.surface().renders(), 0);
}

#[tokio::test]
async fn test_schema_errors_win_over_runtime_check() {
    let surface = TestSurface::submitting(Response::default());

    let err = ask_client(json!({}), &surface, SessionOptions::default()).unwrap_err();
    assert!(matches!(err, SessionError::Schema(_)));
}
