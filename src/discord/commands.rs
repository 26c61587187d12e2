//! Slash command definitions and argument extraction.

use serenity::all::{
    CommandOptionType, CreateCommand, CreateCommandOption, ResolvedOption, ResolvedValue,
};

pub const LIST_COMMAND: &str = "list";
pub const MSG_COMMAND: &str = "msg";

/// Global command set registered on every Ready.
pub fn relay_commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new(LIST_COMMAND)
            .description("List the players currently online on the server"),
        CreateCommand::new(MSG_COMMAND)
            .description("Send a private message to an online player")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "player",
                    "Name of the online player",
                )
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message",
                    "The message to send",
                )
                .required(true),
            ),
    ]
}

pub struct MsgArguments<'a> {
    pub player: &'a str,
    pub message: &'a str,
}

/// Pull the two required string options out of a `/msg` invocation.
///
/// Returns None if either is missing or has the wrong type, which only
/// happens when the registered command definition is out of date.
pub fn parse_msg_arguments<'a>(options: &'a [ResolvedOption<'a>]) -> Option<MsgArguments<'a>> {
    let mut player = None;
    let mut message = None;
    for option in options {
        match (option.name, &option.value) {
            ("player", ResolvedValue::String(value)) => player = Some(*value),
            ("message", ResolvedValue::String(value)) => message = Some(*value),
            _ => {}
        }
    }
    Some(MsgArguments {
        player: player?,
        message: message?,
    })
}
