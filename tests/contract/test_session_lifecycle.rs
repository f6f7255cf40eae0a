//! Contract Tests for Session Lifecycle
//!
//! These tests drive the session driver directly with lines, exit
//! notifications and kills, and check the status transitions, player
//! tracking and the exact order of published events.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use mcstarter::supervisor::{OutputStream, ServerEventBus, SessionDriver};
use mcstarter::{ServerConfiguration, ServerEvent, ServerStatus};
use test_utils::{describe, without_notices, SCENARIO_LINES};

fn new_driver() -> (SessionDriver, mcstarter::ServerEventSubscription) {
    let bus = ServerEventBus::new(256);
    let events = bus.subscribe();
    (SessionDriver::new(bus), events)
}

fn config() -> ServerConfiguration {
    ServerConfiguration::new("java", "/srv/mc/server.jar")
}

#[test]
fn test_end_to_end_event_sequence() {
    let (driver, mut events) = new_driver();
    let generation = driver.begin(&config(), None).unwrap();

    for line in SCENARIO_LINES {
        driver.process_line(generation, OutputStream::Stdout, line);
    }

    let observed: Vec<String> = without_notices(events.drain()).iter().map(describe).collect();
    assert_eq!(
        observed,
        vec![
            "status:opening".to_string(),
            "message:info:Starting".to_string(),
            "status:open".to_string(),
            "message:info:Done (5.2s)! For help, type \"help\"".to_string(),
            "joined:Steve".to_string(),
            "message:info:Steve[/127.0.0.1:52314] logged in with entity id 42".to_string(),
            "left:Steve".to_string(),
            "message:info:Steve lost connection: disconnect".to_string(),
        ]
    );
    assert!(driver.online_players().is_empty());
    assert_eq!(driver.status(), ServerStatus::Open);
}

#[test]
fn test_notices_accompany_opening_and_closing() {
    let (driver, mut events) = new_driver();
    let generation = driver.begin(&config(), None).unwrap();
    driver.process_exited(generation);

    let observed: Vec<String> = events.drain().iter().map(describe).collect();
    assert_eq!(
        observed,
        vec![
            "notice:Initializing server...",
            "status:opening",
            "notice:The server has closed",
            "status:closed",
        ]
    );
}

#[test]
fn test_start_while_running_is_noop() {
    let (driver, mut events) = new_driver();
    let generation = driver.begin(&config(), Some(1)).unwrap();
    events.drain();

    assert!(driver.begin(&config(), Some(2)).is_none());
    driver.process_line(generation, OutputStream::Stdout, SCENARIO_LINES[1]);
    assert!(driver.begin(&config(), Some(3)).is_none());

    assert_eq!(driver.generation(), generation);
    assert!(!events
        .drain()
        .contains(&ServerEvent::StatusChanged(ServerStatus::Opening)));
}

#[test]
fn test_kill_from_every_state_clears_players() {
    for target in [ServerStatus::Opening, ServerStatus::Open, ServerStatus::Closing] {
        let (driver, mut events) = new_driver();
        let generation = driver.begin(&config(), None).unwrap();
        if target != ServerStatus::Opening {
            driver.process_line(generation, OutputStream::Stdout, SCENARIO_LINES[1]);
            driver.process_line(generation, OutputStream::Stdout, SCENARIO_LINES[2]);
            assert_eq!(driver.online_players(), vec!["Steve".to_string()]);
        }
        if target == ServerStatus::Closing {
            assert!(driver.request_stop());
        }
        assert_eq!(driver.status(), target);
        events.drain();

        assert!(driver.force_close());
        assert_eq!(driver.status(), ServerStatus::Closed);
        assert!(driver.online_players().is_empty());
        assert_eq!(
            without_notices(events.drain()),
            vec![ServerEvent::StatusChanged(ServerStatus::Closed)]
        );

        // The killed process's exit arrives late and is ignored
        assert!(!driver.process_exited(generation));
        assert!(events.drain().is_empty());
    }
}

#[test]
fn test_lines_after_close_are_dropped() {
    let (driver, mut events) = new_driver();
    let generation = driver.begin(&config(), None).unwrap();
    driver.process_exited(generation);
    events.drain();

    driver.process_line(generation, OutputStream::Stderr, SCENARIO_LINES[0]);
    assert!(events.drain().is_empty());
}

#[test]
fn test_restart_gets_fresh_session() {
    let (driver, _events) = new_driver();
    let first = driver.begin(&config(), None).unwrap();
    driver.process_line(first, OutputStream::Stdout, SCENARIO_LINES[1]);
    driver.process_line(first, OutputStream::Stdout, SCENARIO_LINES[2]);
    driver.process_exited(first);

    let second = driver.begin(&config(), None).unwrap();
    assert!(second > first);
    assert_eq!(driver.status(), ServerStatus::Opening);
    assert!(driver.online_players().is_empty());
}

#[test]
fn test_ready_only_once() {
    let (driver, mut events) = new_driver();
    let generation = driver.begin(&config(), None).unwrap();
    driver.process_line(generation, OutputStream::Stdout, SCENARIO_LINES[1]);
    driver.process_line(generation, OutputStream::Stdout, SCENARIO_LINES[1]);

    let opens = events
        .drain()
        .into_iter()
        .filter(|e| *e == ServerEvent::StatusChanged(ServerStatus::Open))
        .count();
    assert_eq!(opens, 1);
}

#[test]
fn test_stop_only_from_open() {
    let (driver, mut events) = new_driver();
    assert!(!driver.request_stop());

    let generation = driver.begin(&config(), None).unwrap();
    assert!(!driver.request_stop());
    assert_eq!(driver.status(), ServerStatus::Opening);

    driver.process_line(generation, OutputStream::Stdout, SCENARIO_LINES[1]);
    events.drain();
    assert!(driver.request_stop());
    assert_eq!(
        events.drain(),
        vec![ServerEvent::StatusChanged(ServerStatus::Closing)]
    );
}

#[test]
fn test_command_block_suppression_follows_config() {
    let mut echoing = config();
    echoing.ignore_command_blocks = false;

    let (driver, mut events) = new_driver();
    let generation = driver.begin(&echoing, None).unwrap();
    driver.process_line(generation, OutputStream::Stdout, SCENARIO_LINES[1]);
    events.drain();

    driver.process_line(
        generation,
        OutputStream::Stdout,
        "[10:05:00] [INFO]: [Builder] Set the time to 0",
    );
    let observed = events.drain();
    assert_eq!(observed.len(), 1);
    assert!(matches!(&observed[0], ServerEvent::Message(m) if m.text == "[Builder] Set the time to 0"));
}
