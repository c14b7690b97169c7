use std::error::Error;
use teloxide::prelude::*;

use crate::bot_state::BotState;
use crate::dialog::Keyboard;
use crate::handlers::utils::navigation_markup;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    if let Some(data) = q.data.as_deref() {
        if let Some(ref message) = q.message {
            let chat_id = message.chat().id;
            let message_id = message.id();

            if data.starts_with("next_") || data.starts_with("prev_") {
                if let Some(reply) = state.dialog.navigate(chat_id, data).await {
                    if let Keyboard::Pagination { page, page_count } = reply.keyboard {
                        // A clamped step can resolve to the page already on
                        // screen; Telegram rejects the no-op edit.
                        if let Err(e) = bot
                            .edit_message_text(chat_id, message_id, reply.text)
                            .reply_markup(navigation_markup(page, page_count))
                            .await
                        {
                            log::debug!("pagination edit skipped for {chat_id}: {e}");
                        }
                    }
                }
            }
            // "current_page" is the label between the arrows, nothing to do.
        }
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}
