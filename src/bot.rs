use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::update_listeners;
use tracing::{error, info, warn};

use crate::commands::CommandDispatcher;
use crate::platform::telegram::{self, TelegramSink};
use crate::platform::{IncomingMessage, ReplySink};

/// Start the Telegram bot
pub async fn run(bot: Bot, commands: Arc<CommandDispatcher>) -> Result<()> {
    info!("Starting Telegram bot...");

    let handler = Update::filter_message().endpoint(handle_message);

    // Long polling; the listener keeps fetching after network errors
    let listener = update_listeners::polling_default(bot.clone()).await;

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![commands])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("bot"))
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("update listener"),
        )
        .await;

    Ok(())
}

async fn handle_message(
    bot: Bot,
    msg: Message,
    commands: Arc<CommandDispatcher>,
) -> ResponseResult<()> {
    let incoming = telegram::to_incoming(&msg);
    respond(&commands, &TelegramSink::new(bot), &incoming).await;
    Ok(())
}

/// Answer one message. A reply that cannot be delivered is only logged.
pub async fn respond<R: ReplySink>(commands: &CommandDispatcher, sink: &R, msg: &IncomingMessage) {
    info!(
        "Message from {} ({}) in chat {}: {}",
        msg.user_name, msg.user_id, msg.chat_id, msg.text
    );

    let reply = commands.handle(msg).await;
    if let Err(e) = sink.send(reply).await {
        error!("Failed to send reply: {:#}", e);
    }
}
