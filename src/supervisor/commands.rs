//! Console commands understood by a vanilla server

use std::fmt;

/// A command typed into the server console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerCommand {
    Stop,
    Say(String),
    Kick(String),
    Ban(String),
    Pardon(String),
    Op(String),
    Deop(String),
    ToggleRain,
    SetDay,
    SetNight,
    SaveAll,
}

impl fmt::Display for ServerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerCommand::Stop => f.write_str("stop"),
            ServerCommand::Say(message) => write!(f, "say {}", message),
            ServerCommand::Kick(player) => write!(f, "kick {}", player),
            ServerCommand::Ban(player) => write!(f, "ban {}", player),
            ServerCommand::Pardon(player) => write!(f, "pardon {}", player),
            ServerCommand::Op(player) => write!(f, "op {}", player),
            ServerCommand::Deop(player) => write!(f, "deop {}", player),
            ServerCommand::ToggleRain => f.write_str("toggledownfall"),
            ServerCommand::SetDay => f.write_str("time set 0"),
            ServerCommand::SetNight => f.write_str("time set 14000"),
            ServerCommand::SaveAll => f.write_str("save-all"),
        }
    }
}
