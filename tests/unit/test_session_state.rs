//! Unit tests for the session state machine

use mcstarter::models::{SessionInput, Transition};
use mcstarter::{ServerStatus, SessionState};

fn open_session() -> SessionState {
    let mut session = SessionState::new();
    session.apply(SessionInput::Start);
    session.apply(SessionInput::Ready);
    session
}

#[test]
fn test_initial_state() {
    let session = SessionState::new();
    assert_eq!(session.status(), ServerStatus::Closed);
    assert!(session.online_players().is_empty());
    assert!(session.opened_at.is_none());
}

#[test]
fn test_full_lifecycle() {
    let mut session = SessionState::new();

    assert_eq!(
        session.apply(SessionInput::Start),
        Some(Transition {
            from: ServerStatus::Closed,
            to: ServerStatus::Opening
        })
    );
    assert_eq!(
        session.apply(SessionInput::Ready).map(|t| t.to),
        Some(ServerStatus::Open)
    );
    assert!(session.opened_at.is_some());
    assert_eq!(
        session.apply(SessionInput::StopRequested).map(|t| t.to),
        Some(ServerStatus::Closing)
    );
    assert_eq!(
        session.apply(SessionInput::ProcessExited).map(|t| t.to),
        Some(ServerStatus::Closed)
    );
}

#[test]
fn test_inputs_that_do_not_apply() {
    let mut session = SessionState::new();
    assert!(session.apply(SessionInput::Ready).is_none());
    assert!(session.apply(SessionInput::StopRequested).is_none());
    assert!(session.apply(SessionInput::ProcessExited).is_none());

    session.apply(SessionInput::Start);
    assert!(session.apply(SessionInput::Start).is_none());
    assert!(session.apply(SessionInput::StopRequested).is_none());
    assert_eq!(session.status(), ServerStatus::Opening);
}

#[test]
fn test_exit_from_any_running_state() {
    for steps in [1, 2, 3] {
        let mut session = SessionState::new();
        let inputs = [SessionInput::Start, SessionInput::Ready, SessionInput::StopRequested];
        for input in inputs.iter().take(steps) {
            session.apply(*input);
        }
        let transition = session.apply(SessionInput::ProcessExited).unwrap();
        assert_eq!(transition.to, ServerStatus::Closed);
        assert_eq!(transition.notice(), Some("The server has closed"));
    }
}

#[test]
fn test_notices() {
    let opening = Transition {
        from: ServerStatus::Closed,
        to: ServerStatus::Opening,
    };
    let open = Transition {
        from: ServerStatus::Opening,
        to: ServerStatus::Open,
    };
    assert_eq!(opening.notice(), Some("Initializing server..."));
    assert_eq!(open.notice(), None);
}

#[test]
fn test_join_is_idempotent() {
    let mut session = open_session();
    assert!(session.player_joined("Steve"));
    assert!(!session.player_joined("Steve"));
    assert_eq!(session.online_players(), vec!["Steve".to_string()]);
    assert_eq!(session.player_count(), 1);
}

#[test]
fn test_leave_absent_player_is_noop() {
    let mut session = open_session();
    session.player_joined("Alex");
    assert!(!session.player_left("Steve"));
    assert_eq!(session.online_players(), vec!["Alex".to_string()]);
    assert!(session.player_left("Alex"));
    assert!(session.online_players().is_empty());
}

#[test]
fn test_close_clears_players() {
    let mut session = open_session();
    session.player_joined("Steve");
    session.player_joined("Alex");
    session.apply(SessionInput::ProcessExited);
    assert!(session.is_closed());
    assert!(session.online_players().is_empty());
}

#[test]
fn test_snapshot_is_detached() {
    let mut session = open_session();
    session.player_joined("Steve");
    let mut snapshot = session.online_players();
    snapshot.push("Intruder".to_string());
    assert_eq!(session.player_count(), 1);
}
