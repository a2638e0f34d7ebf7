//! Integration tests for questionnaire sessions

use std::thread;
use std::time::Duration;

use example_questionnaires::{color_preference, no_questions, open_ended, project_kickoff};
use questionnaire::{
    Response, ResponseError, Selection, Session, SessionError, SessionOptions, SessionState,
    TestSurface,
};

#[test]
fn test_submitted_response_becomes_transcript() {
    let surface = TestSurface::submitting(
        Response::new(vec![Selection::new().with_checked([1]).with_custom_text("")])
            .with_comment("thanks"),
    );

    let transcript = Session::open(color_preference().unwrap(), &surface)
        .unwrap()
        .await_result()
        .unwrap();

    assert_eq!(
        transcript,
        "Client answers to the questionnaire \"T\":\n\nColor?\n  * Blue\n\nClient comments:\nthanks"
    );
    assert_eq!(surface.renders(), 1);
    assert_eq!(surface.disposals(), 1);
}

#[test]
fn test_kickoff_transcript() {
    let surface = TestSurface::submitting(
        Response::new(vec![
            Selection::new().with_checked([3, 0]),
            Selection::new()
                .with_checked([2])
                .with_custom_text("  Faster pages  "),
            Selection::new(),
            Selection::new().with_custom_text("Dana from marketing"),
        ])
        .with_comment("  Call me if anything is unclear.\nThanks!  "),
    );

    let transcript = Session::open(project_kickoff().unwrap(), &surface)
        .unwrap()
        .await_result()
        .unwrap();

    assert_eq!(
        transcript,
        "Client answers to the questionnaire \"Website redesign kickoff\":\n\
         \n\
         Which pages should be redesigned first?\n\
         \x20 * Home\n\
         \x20 * Contact\n\
         \n\
         What is the main goal of the redesign?\n\
         \x20 * Modern look and feel\n\
         \x20 + Faster pages\n\
         \n\
         Which launch window works for you?\n\
         \n\
         Who should approve the final designs?\n\
         \x20 + Dana from marketing\n\
         \n\
         Client comments:\n\
         Call me if anything is unclear.\n\
         Thanks!"
    );
}

#[test]
fn test_open_ended_questions_accept_free_text_only() {
    let surface = TestSurface::submitting(Response::new(vec![
        Selection::new().with_custom_text("Pairing"),
        Selection::new(),
    ]));

    let transcript = Session::open(open_ended().unwrap(), &surface)
        .unwrap()
        .await_result()
        .unwrap();

    assert_eq!(
        transcript,
        "Client answers to the questionnaire \"Retrospective\":\n\nWhat went well?\n  + Pairing\n\nWhat should change?"
    );
}

#[test]
fn test_empty_questionnaire_yields_header_only() {
    let surface = TestSurface::submitting(Response::default());

    let transcript = Session::open(no_questions(), &surface)
        .unwrap()
        .await_result()
        .unwrap();

    assert_eq!(transcript, "Client answers to the questionnaire \"T\":");
}

#[test]
fn test_abandoned_form_fails() {
    let surface = TestSurface::abandoning();

    let err = Session::open(color_preference().unwrap(), &surface)
        .unwrap()
        .await_result()
        .unwrap_err();

    assert!(err.is_abandoned());
    assert_eq!(surface.disposals(), 1);
}

#[test]
fn test_dropped_sink_counts_as_abandoned() {
    let surface = TestSurface::dropping();

    let err = Session::open(color_preference().unwrap(), &surface)
        .unwrap()
        .await_result()
        .unwrap_err();

    assert!(matches!(err, SessionError::Abandoned));
    assert_eq!(surface.disposals(), 1);
}

#[test]
fn test_abandon_then_submit_stays_abandoned() {
    let surface = TestSurface::abandoning().with_duplicate_completion();

    let err = Session::open(color_preference().unwrap(), &surface)
        .unwrap()
        .await_result()
        .unwrap_err();

    assert!(err.is_abandoned());
    assert_eq!(surface.renders(), 1);
    assert_eq!(surface.disposals(), 1);
}

#[test]
fn test_duplicate_completion_is_discarded() {
    let surface = TestSurface::submitting(Response::new(vec![
        Selection::new().with_checked([0]),
    ]))
    .with_duplicate_completion();

    let transcript = Session::open(color_preference().unwrap(), &surface)
        .unwrap()
        .await_result()
        .unwrap();

    assert_eq!(
        transcript,
        "Client answers to the questionnaire \"T\":\n\nColor?\n  * Red"
    );
    assert_eq!(surface.disposals(), 1);
}

#[test]
fn test_delayed_submission_from_another_thread() {
    let surface = TestSurface::submitting(Response::new(vec![
        Selection::new().with_checked([0, 1]),
    ]))
    .with_delay(Duration::from_millis(50));

    let transcript = Session::open(color_preference().unwrap(), &surface)
        .unwrap()
        .await_result()
        .unwrap();

    assert_eq!(
        transcript,
        "Client answers to the questionnaire \"T\":\n\nColor?\n  * Red\n  * Blue"
    );
}

#[test]
fn test_silent_surface_times_out() {
    let surface = TestSurface::silent();
    let options = SessionOptions::new().with_timeout(Duration::from_millis(20));

    let err = Session::open_with(color_preference().unwrap(), &surface, options)
        .unwrap()
        .await_result()
        .unwrap_err();

    assert!(err.is_timed_out());
    assert!(matches!(err, SessionError::TimedOut(limit) if limit == Duration::from_millis(20)));
    assert_eq!(surface.disposals(), 1);
}

#[test]
fn test_submission_within_timeout_succeeds() {
    let surface = TestSurface::submitting(Response::blank(&color_preference().unwrap()))
        .with_delay(Duration::from_millis(10));
    let options = SessionOptions::new().with_timeout(Duration::from_secs(10));

    let transcript = Session::open_with(color_preference().unwrap(), &surface, options)
        .unwrap()
        .await_result()
        .unwrap();

    assert_eq!(transcript, "Client answers to the questionnaire \"T\":\n\nColor?");
}

#[test]
fn test_render_failure_is_reported_without_disposal() {
    let surface = TestSurface::failing("no display");

    let err = Session::open(color_preference().unwrap(), &surface)
        .err()
        .unwrap();

    assert!(matches!(err, SessionError::Surface(_)));
    assert!(err.to_string().contains("no display"));
    assert_eq!(surface.renders(), 0);
    assert_eq!(surface.disposals(), 0);
}

#[test]
fn test_mismatched_response_is_rejected_and_disposed() {
    let surface = TestSurface::submitting(Response::new(vec![
        Selection::new().with_checked([5]),
    ]));

    let err = Session::open(color_preference().unwrap(), &surface)
        .unwrap()
        .await_result()
        .unwrap_err();

    assert!(matches!(
        err,
        SessionError::InvalidResponse(ResponseError::OptionOutOfRange {
            question: 0,
            option: 5,
            available: 2,
        })
    ));
    assert_eq!(surface.disposals(), 1);
}

#[test]
fn test_state_reports_progress_without_blocking() {
    let surface = TestSurface::submitting(Response::blank(&color_preference().unwrap()))
        .with_delay(Duration::from_millis(30));

    let mut session = Session::open(color_preference().unwrap(), &surface).unwrap();
    assert_eq!(session.questionnaire().title(), "T");

    let mut state = session.state();
    while !state.is_resolved() {
        thread::sleep(Duration::from_millis(5));
        state = session.state();
    }
    assert_eq!(state, SessionState::Submitted);
    assert_eq!(session.state(), SessionState::Submitted);

    // The completion observed by `state` is not lost.
    let transcript = session.await_result().unwrap();
    assert_eq!(transcript, "Client answers to the questionnaire \"T\":\n\nColor?");
    assert_eq!(surface.disposals(), 1);
}

#[test]
fn test_state_sees_abandonment() {
    let surface = TestSurface::abandoning();
    let mut session = Session::open(color_preference().unwrap(), &surface).unwrap();

    assert_eq!(session.state(), SessionState::Abandoned);
    assert!(session.await_result().unwrap_err().is_abandoned());
}

#[test]
fn test_dropping_an_unfinished_session_disposes_the_surface() {
    let surface = TestSurface::silent();

    let mut session = Session::open(color_preference().unwrap(), &surface).unwrap();
    assert_eq!(session.state(), SessionState::Pending);
    drop(session);

    assert_eq!(surface.renders(), 1);
    assert_eq!(surface.disposals(), 1);
}

#[test]
fn test_surface_can_be_reused_across_sessions() {
    let surface = TestSurface::submitting(Response::blank(&color_preference().unwrap()));

    for _ in 0..3 {
        Session::open(color_preference().unwrap(), &surface)
            .unwrap()
            .await_result()
            .unwrap();
    }

    assert_eq!(surface.renders(), 3);
    assert_eq!(surface.disposals(), 3);
}

#[tokio::test]
async fn test_async_wait() {
    let surface = TestSurface::submitting(Response::new(vec![
        Selection::new().with_checked([1]),
    ]))
    .with_delay(Duration::from_millis(10));

    let transcript = Session::open(color_preference().unwrap(), &surface)
        .unwrap()
        .wait()
        .await
        .unwrap();

    assert_eq!(
        transcript,
        "Client answers to the questionnaire \"T\":\n\nColor?\n  * Blue"
    );
}

#[tokio::test]
async fn test_async_wait_times_out() {
    let surface = TestSurface::silent();
    let options = SessionOptions::new().with_timeout(Duration::from_millis(20));

    let err = Session::open_with(color_preference().unwrap(), &surface, options)
        .unwrap()
        .wait()
        .await
        .unwrap_err();

    assert!(err.is_timed_out());
    assert_eq!(surface.disposals(), 1);
}

#[tokio::test]
async fn test_blocking_wait_inside_runtime_fails_and_disposes() {
    let surface = TestSurface::silent();

    let err = Session::open(color_preference().unwrap(), &surface)
        .unwrap()
        .await_result()
        .unwrap_err();

    assert!(matches!(err, SessionError::BlockingInRuntime));
    assert_eq!(surface.renders(), 1);
    assert_eq!(surface.disposals(), 1);
}
