pub mod telegram;

use anyhow::Result;
use async_trait::async_trait;

/// A message received from the platform
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Platform-specific user ID
    pub user_id: u64,
    /// Username (or first name when the user has none)
    pub user_name: String,
    pub chat_id: i64,
    pub message_id: i32,
    /// The raw message text
    pub text: String,
    /// Leading `/command`, if the text starts with one
    pub command: Option<CommandText>,
}

impl IncomingMessage {
    pub fn new(user_id: u64, user_name: &str, chat_id: i64, message_id: i32, text: &str) -> Self {
        Self {
            user_id,
            user_name: user_name.to_string(),
            chat_id,
            message_id,
            text: text.to_string(),
            command: CommandText::parse(text),
        }
    }
}

/// Command keyword and the free text that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandText {
    pub name: String,
    pub args: String,
}

impl CommandText {
    /// `"/search@SLyricsBot Imagine, John Lennon"` gives name `search` and
    /// args `Imagine, John Lennon`. Text not starting with `/` has no command.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.strip_prefix('/')?;

        let (head, args) = match rest.find(char::is_whitespace) {
            Some(idx) => {
                let ws_len = rest[idx..].chars().next().map_or(1, char::len_utf8);
                (&rest[..idx], &rest[idx + ws_len..])
            }
            None => (rest, ""),
        };

        // Drop the "@botname" suffix used in group chats
        let name = head.split('@').next().unwrap_or_default();

        Some(Self {
            name: name.to_string(),
            args: args.to_string(),
        })
    }
}

/// A reply to send back to a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingReply {
    pub chat_id: i64,
    pub text: String,
    /// Message this reply should be threaded under
    pub reply_to: Option<i32>,
}

impl OutgoingReply {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            reply_to: None,
        }
    }

    pub fn replying_to(mut self, message_id: i32) -> Self {
        self.reply_to = Some(message_id);
        self
    }
}

/// Destination for replies.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, reply: OutgoingReply) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_with_arguments() {
        let cmd = CommandText::parse("/search Imagine, John Lennon").unwrap();
        assert_eq!(cmd.name, "search");
        assert_eq!(cmd.args, "Imagine, John Lennon");
    }

    #[test]
    fn test_command_without_arguments() {
        let cmd = CommandText::parse("/help").unwrap();
        assert_eq!(cmd.name, "help");
        assert_eq!(cmd.args, "");
    }

    #[test]
    fn test_command_with_bot_mention() {
        let cmd = CommandText::parse("/search@SLyricsBot Imagine, John Lennon").unwrap();
        assert_eq!(cmd.name, "search");
        assert_eq!(cmd.args, "Imagine, John Lennon");
    }

    #[test]
    fn test_command_keeps_argument_spacing() {
        let cmd = CommandText::parse("/search   Imagine ,John").unwrap();
        assert_eq!(cmd.args, "  Imagine ,John");
    }

    #[test]
    fn test_command_split_on_newline() {
        let cmd = CommandText::parse("/search\nImagine, John Lennon").unwrap();
        assert_eq!(cmd.name, "search");
        assert_eq!(cmd.args, "Imagine, John Lennon");
    }

    #[test]
    fn test_plain_text_has_no_command() {
        assert_eq!(CommandText::parse("hello there"), None);
        assert_eq!(CommandText::parse(" /help"), None);
    }

    #[test]
    fn test_incoming_message_parses_command() {
        let msg = IncomingMessage::new(7, "alice", 42, 3, "/start");
        assert_eq!(msg.command.as_ref().map(|c| c.name.as_str()), Some("start"));
        assert_eq!(msg.chat_id, 42);
        assert_eq!(msg.message_id, 3);
    }

    #[test]
    fn test_reply_builder() {
        let reply = OutgoingReply::new(42, "hi").replying_to(9);
        assert_eq!(reply.chat_id, 42);
        assert_eq!(reply.text, "hi");
        assert_eq!(reply.reply_to, Some(9));
    }
}
