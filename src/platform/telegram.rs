use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, MessageId, ReplyParameters};
use tracing::{info, warn};

use crate::platform::{IncomingMessage, OutgoingReply, ReplySink};

/// Telegram rejects messages above 4096 characters
const MAX_MESSAGE_LEN: usize = 4000;

/// Cut `text` into pieces of at most `max_len` bytes, breaking after a
/// newline or space when one is available.
fn split_message(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = text;

    while rest.len() > max_len {
        let mut cut = max_len;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }

        if cut == 0 {
            // max_len is narrower than the next character
            cut = rest.chars().next().map_or(rest.len(), char::len_utf8);
        } else if let Some(pos) = rest[..cut].rfind('\n').or_else(|| rest[..cut].rfind(' ')) {
            cut = pos + 1;
        }

        let (head, tail) = rest.split_at(cut);
        chunks.push(head.to_string());
        rest = tail;
    }

    if !rest.is_empty() || chunks.is_empty() {
        chunks.push(rest.to_string());
    }
    chunks
}

/// Check the token with getMe. Fails when Telegram does not accept it.
pub async fn authorize(bot: &Bot) -> Result<()> {
    let me = bot
        .get_me()
        .await
        .context("Failed to authorize with Telegram")?;
    info!("Authorized on account {}", me.username());
    Ok(())
}

/// Publish the command menu shown by Telegram clients
pub async fn register_commands(bot: &Bot) {
    let commands = vec![
        BotCommand::new("search", "Find lyrics: /search song name, artist name"),
        BotCommand::new("help", "How to use the bot"),
    ];
    if let Err(e) = bot.set_my_commands(commands).await {
        warn!("Failed to register bot commands: {}", e);
    }
}

/// Convert a Telegram message. Stickers, photos and other messages without
/// text come through with empty text and no command.
pub fn to_incoming(msg: &Message) -> IncomingMessage {
    let (user_id, user_name) = match msg.from.as_ref() {
        Some(user) => (
            user.id.0,
            user.username.clone().unwrap_or_else(|| user.first_name.clone()),
        ),
        None => (0, String::new()),
    };

    IncomingMessage::new(
        user_id,
        &user_name,
        msg.chat.id.0,
        msg.id.0,
        msg.text().unwrap_or_default(),
    )
}

/// Sends replies through the Bot API
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ReplySink for TelegramSink {
    async fn send(&self, reply: OutgoingReply) -> Result<()> {
        let chat_id = ChatId(reply.chat_id);
        for chunk in split_message(&reply.text, MAX_MESSAGE_LEN) {
            let request = self.bot.send_message(chat_id, chunk);
            let request = match reply.reply_to {
                Some(id) => request.reply_parameters(ReplyParameters::new(MessageId(id))),
                None => request,
            };
            request
                .await
                .with_context(|| format!("Failed to send message to chat {}", reply.chat_id))?;
        }
        Ok(())
    }
}
