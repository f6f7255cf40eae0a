//! Unit tests for the log line classifier

use mcstarter::models::{Dialect, LineEvent};
use mcstarter::{ClassifyContext, LogLevel, LogLineClassifier, ServerStatus};

fn opening() -> ClassifyContext {
    ClassifyContext::new(ServerStatus::Opening, true)
}

fn open() -> ClassifyContext {
    ClassifyContext::new(ServerStatus::Open, true)
}

#[cfg(test)]
mod dialect_tests {
    use super::*;

    #[test]
    fn test_bracketed_clock_info() {
        let parsed = LogLineClassifier::new().classify("[08:15:42] [INFO]: msg", &opening());
        assert_eq!(parsed.timestamp_text, "[08:15:42]");
        assert_eq!(parsed.level, LogLevel::Info);
        assert_eq!(parsed.message, "msg");
        assert!(!parsed.rejected);
    }

    #[test]
    fn test_full_date_server_thread_warn() {
        let parsed = LogLineClassifier::new()
            .classify("2016-02-01 10:00:00 [Server thread/WARN]: msg", &opening());
        assert_eq!(parsed.timestamp_text, "2016-02-01 10:00:00");
        assert_eq!(parsed.level, LogLevel::Warn);
        assert_eq!(parsed.level_name_raw, "WARN");
        assert_eq!(parsed.message, "msg");
        assert_eq!(parsed.dialect, Dialect::DateTime);
    }

    #[test]
    fn test_spigot_error() {
        let parsed = LogLineClassifier::new().classify("[10:00:00 ERROR]: boom", &opening());
        assert_eq!(parsed.level, LogLevel::Error);
        assert_eq!(parsed.message, "boom");
        assert_eq!(parsed.dialect, Dialect::Spigot);
    }

    #[test]
    fn test_warning_token_keeps_raw_name() {
        let parsed = LogLineClassifier::new().classify("[10:00:00] [WARNING]: low memory", &open());
        assert_eq!(parsed.level, LogLevel::Warn);
        assert_eq!(parsed.level_name_raw, "WARNING");
    }

    #[test]
    fn test_shutdown_thread() {
        let parsed = LogLineClassifier::new()
            .classify("[23:59:59] [Server Shutdown Thread/INFO]: Stopping server", &open());
        assert_eq!(parsed.level, LogLevel::Info);
        assert_eq!(parsed.message, "Stopping server");
    }

    #[test]
    fn test_unrecognized_line_passes_through() {
        let line = "Loading libraries, please wait...";
        let parsed = LogLineClassifier::new().classify(line, &open());
        assert!(parsed.timestamp_text.is_empty());
        assert!(parsed.level_name_raw.is_empty());
        assert_eq!(parsed.level, LogLevel::Unknown);
        assert_eq!(parsed.message, line);
        assert!(!parsed.rejected);
        assert!(parsed.event.is_none());
    }

    #[test]
    fn test_indented_timestamp_is_not_a_timestamp() {
        let line = " [10:00:00] [INFO]: Done (1.0s)!";
        let parsed = LogLineClassifier::new().classify(line, &opening());
        assert_eq!(parsed.message, line);
        assert!(parsed.event.is_none());
    }

    #[test]
    fn test_timestamp_with_unknown_token() {
        let parsed = LogLineClassifier::new().classify("[10:00:00] [TRACE]: chatter  ", &open());
        assert_eq!(parsed.timestamp_text, "[10:00:00]");
        assert_eq!(parsed.level, LogLevel::Unknown);
        assert_eq!(parsed.message, "[TRACE]: chatter");
    }

    #[test]
    fn test_level_needs_exactly_one_space() {
        let parsed = LogLineClassifier::new().classify("[10:00:00]  [INFO]: two spaces", &open());
        assert!(!parsed.has_level());
        assert!(parsed.has_timestamp());
    }

    #[test]
    fn test_unicode_is_preserved() {
        let parsed =
            LogLineClassifier::new().classify("[10:00:00] [INFO]: <Jörg> grüße ✓", &open());
        assert_eq!(parsed.message, "<Jörg> grüße ✓");
    }
}

#[cfg(test)]
mod event_tests {
    use super::*;

    #[test]
    fn test_ready_detection() {
        let parsed = LogLineClassifier::new()
            .classify("[10:00:05] [INFO]: Done (5.2s)! For help, type \"help\"", &opening());
        assert_eq!(parsed.event, Some(LineEvent::Ready));
    }

    #[test]
    fn test_ready_ignored_when_open() {
        let parsed = LogLineClassifier::new().classify("[10:00:05] [INFO]: Done (5.2s)!", &open());
        assert!(parsed.event.is_none());
    }

    #[test]
    fn test_legacy_ready_without_separator() {
        let parsed =
            LogLineClassifier::new().classify("[10:00:00] [INFO] Done (3s)", &opening());
        assert_eq!(parsed.message, "Done (3s)");
        assert_eq!(parsed.event, Some(LineEvent::Ready));
    }

    #[test]
    fn test_spigot_ready() {
        let parsed = LogLineClassifier::new()
            .classify("[10:00:05 INFO]: Done (12.004s)! For help, type \"help\"", &opening());
        assert_eq!(parsed.event, Some(LineEvent::Ready));
    }

    #[test]
    fn test_chat_cannot_fake_ready() {
        let parsed = LogLineClassifier::new()
            .classify("[10:00:05] [INFO]: <Mallory> Done (1s)!", &opening());
        assert!(parsed.event.is_none());
    }

    #[test]
    fn test_player_join_and_leave() {
        let classifier = LogLineClassifier::new();
        let joined = classifier.classify(
            "[10:00:10] [INFO]: Steve[/127.0.0.1:52314] logged in with entity id 42",
            &open(),
        );
        assert_eq!(joined.event, Some(LineEvent::PlayerJoined("Steve".to_string())));

        let left = classifier.classify("[10:00:20] [INFO]: Steve lost connection: disconnect", &open());
        assert_eq!(left.event, Some(LineEvent::PlayerLeft("Steve".to_string())));
    }

    #[test]
    fn test_join_with_space_before_address() {
        let parsed = LogLineClassifier::new()
            .classify("2013-05-01 12:00:00 [INFO] Notch [/10.0.0.5:1234] logged in", &open());
        assert_eq!(parsed.event, Some(LineEvent::PlayerJoined("Notch".to_string())));
    }

    #[test]
    fn test_players_ignored_while_opening() {
        let parsed = LogLineClassifier::new()
            .classify("[10:00:10] [INFO]: Steve[/127.0.0.1:52314] logged in", &opening());
        assert!(parsed.event.is_none());
    }

    #[test]
    fn test_chat_cannot_fake_leave() {
        let parsed = LogLineClassifier::new()
            .classify("[10:00:20] [INFO]: <Mallory> Steve lost connection", &open());
        assert!(parsed.event.is_none());
    }
}

#[cfg(test)]
mod command_block_tests {
    use super::*;

    #[test]
    fn test_server_identity_is_kept() {
        let parsed = LogLineClassifier::new().classify("[10:00:00] [INFO]: [@]: did something", &open());
        assert!(!parsed.rejected);
        assert_eq!(parsed.message, "[@]: did something");
    }

    #[test]
    fn test_server_name_is_kept() {
        let parsed = LogLineClassifier::new().classify("[10:00:00] [INFO]: [Server] Hello", &open());
        assert!(!parsed.rejected);
    }

    #[test]
    fn test_other_token_is_rejected() {
        let parsed =
            LogLineClassifier::new().classify("[10:00:00] [INFO]: [SomePlayer]: did something", &open());
        assert!(parsed.rejected);
        assert!(parsed.event.is_none());
    }

    #[test]
    fn test_rejection_needs_suppression_enabled() {
        let ctx = ClassifyContext::new(ServerStatus::Open, false);
        let parsed =
            LogLineClassifier::new().classify("[10:00:00] [INFO]: [SomePlayer]: did something", &ctx);
        assert!(!parsed.rejected);
    }

    #[test]
    fn test_rejection_only_while_open() {
        let parsed = LogLineClassifier::new()
            .classify("[10:00:00] [INFO]: [SomePlayer]: did something", &opening());
        assert!(!parsed.rejected);
    }

    #[test]
    fn test_bracket_away_from_index_is_kept() {
        let parsed = LogLineClassifier::new()
            .classify("[10:00:00] [INFO]: <Alex> [SomePlayer] hi", &open());
        assert!(!parsed.rejected);
    }
}
