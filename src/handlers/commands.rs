use std::error::Error;
use teloxide::prelude::*;

use crate::bot_state::BotState;
use crate::handlers::utils::{main_menu_keyboard, send_reply};
use crate::Command;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match cmd {
        Command::Start => handle_start(bot, msg, state).await?,
        Command::Help => handle_help(bot, msg).await?,
        Command::MyFlights => handle_my_flights(bot, msg, state).await?,
    }
    Ok(())
}

async fn handle_start(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    state.dialog.reset(msg.chat.id).await;

    bot.send_message(msg.chat.id, "Hi! I am your flight assistant:")
        .reply_markup(main_menu_keyboard())
        .await?;

    Ok(())
}

async fn handle_help(bot: Bot, msg: Message) -> Result<(), Box<dyn Error + Send + Sync>> {
    bot.send_message(
        msg.chat.id,
        "✈️ Flight assistant\n\n\
         /start - open the main menu\n\
         /help - show this help\n\
         /myflights - show your saved flights\n\n\
         From the menu you can add a flight to your list, look up the latest \
         route of a flight number, find airport details, and browse the \
         flights you saved.",
    )
    .await?;

    Ok(())
}

async fn handle_my_flights(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let reply = state.dialog.show_flights(msg.chat.id).await;
    send_reply(&bot, msg.chat.id, reply).await?;
    Ok(())
}
