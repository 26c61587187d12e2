//! In-game command parsing.
//!
//! The companion plugin forwards raw command input from players; the bridge
//! only understands `reply` (alias `r`). Anything else is ignored silently.

/// A recognized in-game command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InGameCommand {
    /// `reply <message>` / `r <message>`: send to the player's reply target.
    Reply { message: String },
}

/// Parse raw player command input.
///
/// The message is the remainder of the input, greedily captured. Returns
/// `None` for unknown commands or a missing message.
pub fn parse(input: &str) -> Option<InGameCommand> {
    let input = input.trim().trim_start_matches('/');
    let (name, rest) = match input.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (input, ""),
    };

    match name.to_lowercase().as_str() {
        "reply" | "r" if !rest.is_empty() => Some(InGameCommand::Reply {
            message: rest.to_string(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply() {
        assert_eq!(
            parse("reply hello there"),
            Some(InGameCommand::Reply {
                message: "hello there".to_string()
            })
        );
    }

    #[test]
    fn test_parse_alias() {
        assert_eq!(
            parse("r hi"),
            Some(InGameCommand::Reply {
                message: "hi".to_string()
            })
        );
    }

    #[test]
    fn test_message_captured_greedily() {
        assert_eq!(
            parse("reply one  two   three"),
            Some(InGameCommand::Reply {
                message: "one  two   three".to_string()
            })
        );
    }

    #[test]
    fn test_leading_slash_stripped() {
        assert_eq!(
            parse("/reply hey"),
            Some(InGameCommand::Reply {
                message: "hey".to_string()
            })
        );
    }

    #[test]
    fn test_missing_message() {
        assert_eq!(parse("reply"), None);
        assert_eq!(parse("reply   "), None);
        assert_eq!(parse("r"), None);
    }

    #[test]
    fn test_unknown_command_ignored() {
        assert_eq!(parse("home"), None);
        assert_eq!(parse("msg Steve hi"), None);
        assert_eq!(parse(""), None);
    }
}
