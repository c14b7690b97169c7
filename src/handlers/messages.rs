use std::error::Error;
use teloxide::prelude::*;

use crate::bot_state::BotState;
use crate::handlers::utils::{main_menu_keyboard, send_reply};

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    if let Some(text) = msg.text() {
        // Commands were already consumed by command_handler.
        if text.starts_with('/') {
            return Ok(());
        }

        let reply = state.dialog.handle_text(msg.chat.id, text).await;
        send_reply(&bot, msg.chat.id, reply).await?;
    } else {
        bot.send_message(
            msg.chat.id,
            "Send a text message, or pick an option from the menu.",
        )
        .reply_markup(main_menu_keyboard())
        .await?;
    }

    Ok(())
}
