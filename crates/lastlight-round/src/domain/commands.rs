//! Commands accepted by the round engine.

/// Command to start a fresh game or resume the saved one.
#[derive(Debug, Clone)]
pub struct StartGame {
    /// Identity of the user issuing the command.
    pub initiator: String,
    /// Resume from the saved snapshot instead of starting fresh.
    pub resume: bool,
}

/// Command to stop the active game between phases.
#[derive(Debug, Clone)]
pub struct TerminateGame {
    /// Identity of the user issuing the command.
    pub requested_by: String,
}

/// Command to change the pacing of the active game.
#[derive(Debug, Clone)]
pub struct SetSpeed {
    /// Requested multiplier; normalized on application.
    pub multiplier: f64,
}

/// Prefix of chat-text commands.
pub const CHAT_PREFIX: &str = "!lastlight";

/// A command typed into the chat channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    Start,
    Resume,
    Stop,
    Speed(f64),
    Help,
}

impl ChatCommand {
    /// Parses `!lastlight <verb> [arg]`. Returns `None` for messages that are
    /// not addressed to the game; unknown verbs parse as [`ChatCommand::Help`].
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut words = text.split_whitespace();
        if !words.next()?.eq_ignore_ascii_case(CHAT_PREFIX) {
            return None;
        }
        let verb = words.next().map(str::to_lowercase);
        let command = match verb.as_deref() {
            Some("start") => Self::Start,
            Some("resume") => Self::Resume,
            Some("stop" | "end") => Self::Stop,
            Some("speed") => match words.next().map(|w| w.trim_end_matches('x').parse::<f64>()) {
                Some(Ok(multiplier)) => Self::Speed(multiplier),
                _ => Self::Help,
            },
            _ => Self::Help,
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_verbs() {
        assert_eq!(ChatCommand::parse("!lastlight start"), Some(ChatCommand::Start));
        assert_eq!(ChatCommand::parse("!LastLight Resume"), Some(ChatCommand::Resume));
        assert_eq!(ChatCommand::parse("!lastlight stop"), Some(ChatCommand::Stop));
        assert_eq!(
            ChatCommand::parse("!lastlight speed 1.5x"),
            Some(ChatCommand::Speed(1.5))
        );
    }

    #[test]
    fn test_parse_ignores_other_messages_and_defaults_to_help() {
        assert_eq!(ChatCommand::parse("hello there"), None);
        assert_eq!(ChatCommand::parse(""), None);
        assert_eq!(ChatCommand::parse("!lastlight"), Some(ChatCommand::Help));
        assert_eq!(ChatCommand::parse("!lastlight speed fast"), Some(ChatCommand::Help));
        assert_eq!(ChatCommand::parse("!lastlight dance"), Some(ChatCommand::Help));
    }
}
