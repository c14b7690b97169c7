use std::env;
use std::sync::Arc;

use teloxide::{prelude::*, utils::command::BotCommands};

mod bot_state;
mod database;
mod dialog;
mod flightdata;
mod handlers;
mod models;

use crate::bot_state::BotState;
use crate::database::Database;
use crate::flightdata::{FlightDataApi, FlightDataClient};
use crate::handlers::{callback_handler, command_handler, message_handler};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
enum Command {
    #[command(description = "open the main menu")]
    Start,
    #[command(description = "show help")]
    Help,
    #[command(description = "show your saved flights")]
    MyFlights,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Starting flight assistant bot...");

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:flights.db".to_string());
    let db = Database::new(&database_url).await?;
    db.init().await?;
    log::info!("Database initialized");

    let provider: Arc<dyn FlightDataApi> = Arc::new(FlightDataClient::from_env()?);
    let state = BotState::new(db, provider);

    let bot = Bot::from_env();

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(Update::filter_callback_query().endpoint(callback_handler))
        .branch(Update::filter_message().endpoint(message_handler));

    log::info!("Starting dispatcher...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
