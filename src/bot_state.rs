use std::collections::HashMap;
use std::sync::Arc;

use teloxide::types::ChatId;
use tokio::sync::RwLock;

use crate::database::flights::FlightRecordStore;
use crate::database::Database;
use crate::dialog::Dialog;
use crate::flightdata::FlightDataApi;
use crate::models::Screen;

/// Per-user screen records, created on first interaction. Each user's entry
/// is only mutated by that user's own handler invocation; the lock just
/// makes the map shareable across handlers. Screens live for the session
/// only and are not persisted.
#[derive(Clone, Default)]
pub struct ScreenStore {
    screens: Arc<RwLock<HashMap<ChatId, Screen>>>,
}

impl ScreenStore {
    pub async fn get(&self, chat: ChatId) -> Screen {
        self.screens
            .read()
            .await
            .get(&chat)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn set(&self, chat: ChatId, screen: Screen) {
        self.screens.write().await.insert(chat, screen);
    }
}

#[derive(Clone)]
pub struct BotState {
    pub dialog: Arc<Dialog>,
}

impl BotState {
    pub fn new(db: Database, provider: Arc<dyn FlightDataApi>) -> Self {
        let store = FlightRecordStore::new(db);
        Self {
            dialog: Arc::new(Dialog::new(store, provider)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn screens_default_to_the_main_menu() {
        let store = ScreenStore::default();
        assert_eq!(store.get(ChatId(1)).await, Screen::MainMenu);
    }

    #[tokio::test]
    async fn screens_are_independent_per_user() {
        let store = ScreenStore::default();
        store.set(ChatId(1), Screen::FlightInfo).await;
        assert_eq!(store.get(ChatId(1)).await, Screen::FlightInfo);
        assert_eq!(store.get(ChatId(2)).await, Screen::MainMenu);
    }
}
