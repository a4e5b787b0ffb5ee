use std::sync::Arc;

use tracing::{error, info};

use crate::lyrics::{LyricsSearch, SearchQuery};
use crate::platform::{IncomingMessage, OutgoingReply};

pub const HOWTO: &str = "You need to say song name and artist name.\n\
How to: \"/search song name, artist name\"";

pub const UNAVAILABLE: &str = "The API Service is not available just for now. Try later.";

pub const TRY_ANOTHER: &str = "\nThere is no lyrics to show 😔\n\
We are sorry about that.\n\
\n\
We are working on finding more lyrics.\n\
Try another song 🙏\n";

pub const NOT_FOUND: &str = "Command is not found. Check \"/help\".";

pub fn help_text() -> String {
    format!(
        "Hey\n\
         Welcome to S-Lyrics Bot.\n\
         You can simply find your lyrics by using \"/search\" command.\n\
         \n\
         {}",
        HOWTO
    )
}

/// Commands the bot knows about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Search(String),
    Unknown,
}

impl Command {
    pub fn from_message(msg: &IncomingMessage) -> Self {
        match msg.command.as_ref() {
            Some(cmd) => match cmd.name.as_str() {
                "help" | "start" => Command::Help,
                "search" => Command::Search(cmd.args.clone()),
                _ => Command::Unknown,
            },
            None => Command::Unknown,
        }
    }
}

/// Maps each inbound message to exactly one reply.
pub struct CommandDispatcher {
    lyrics: Arc<dyn LyricsSearch>,
}

impl CommandDispatcher {
    pub fn new(lyrics: Arc<dyn LyricsSearch>) -> Self {
        Self { lyrics }
    }

    pub async fn handle(&self, msg: &IncomingMessage) -> OutgoingReply {
        match Command::from_message(msg) {
            Command::Help => OutgoingReply::new(msg.chat_id, help_text()),
            Command::Search(args) => match SearchQuery::parse(&args) {
                Some(query) => self.search(msg, &query).await,
                None => OutgoingReply::new(msg.chat_id, HOWTO),
            },
            Command::Unknown => OutgoingReply::new(msg.chat_id, NOT_FOUND),
        }
    }

    async fn search(&self, msg: &IncomingMessage, query: &SearchQuery) -> OutgoingReply {
        let text = match self.lyrics.search(query).await {
            Ok(lines) if lines.is_empty() => {
                info!("No lyrics for '{}' by '{}'", query.song, query.artist);
                TRY_ANOTHER.to_string()
            }
            Ok(lines) => lines.join("\n"),
            Err(e) => {
                error!("Lyrics lookup failed: {:#}", e);
                UNAVAILABLE.to_string()
            }
        };

        OutgoingReply::new(msg.chat_id, text).replying_to(msg.message_id)
    }
}
