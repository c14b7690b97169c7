use teloxide::prelude::*;
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, ReplyMarkup,
};

use crate::dialog::{
    Keyboard, Reply, BACK, MENU_ABOUT_US, MENU_ABOUT_YOU, MENU_ADD_FLIGHT, MENU_FIND_AIRPORT,
    MENU_FLIGHT_INFO, MENU_YOUR_FLIGHTS,
};

/// Main menu, two buttons per row.
pub fn main_menu_keyboard() -> ReplyMarkup {
    ReplyMarkup::Keyboard(
        KeyboardMarkup::new(vec![
            vec![
                KeyboardButton::new(MENU_ADD_FLIGHT),
                KeyboardButton::new(MENU_FIND_AIRPORT),
            ],
            vec![
                KeyboardButton::new(MENU_YOUR_FLIGHTS),
                KeyboardButton::new(MENU_FLIGHT_INFO),
            ],
            vec![
                KeyboardButton::new(MENU_ABOUT_YOU),
                KeyboardButton::new(MENU_ABOUT_US),
            ],
        ])
        .resize_keyboard(),
    )
}

pub fn back_keyboard() -> ReplyMarkup {
    ReplyMarkup::Keyboard(
        KeyboardMarkup::new(vec![vec![KeyboardButton::new(BACK)]]).resize_keyboard(),
    )
}

/// Prev / "p of n" / next row. The middle button is a label only.
pub fn navigation_markup(page: usize, page_count: usize) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("Previous", format!("prev_{page}")),
        InlineKeyboardButton::callback(format!("{page} of {page_count}"), "current_page"),
        InlineKeyboardButton::callback("Next", format!("next_{page}")),
    ]])
}

/// Send a dialog reply with its keyboard rendered into Telegram markup.
pub async fn send_reply(
    bot: &Bot,
    chat_id: ChatId,
    reply: Reply,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let request = bot.send_message(chat_id, reply.text);
    let request = match reply.keyboard {
        Keyboard::MainMenu => request.reply_markup(main_menu_keyboard()),
        Keyboard::Back => request.reply_markup(back_keyboard()),
        Keyboard::Pagination { page, page_count } => {
            request.reply_markup(navigation_markup(page, page_count))
        }
    };
    request.await?;
    Ok(())
}
