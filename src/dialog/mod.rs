pub mod pagination;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use teloxide::types::ChatId;

use crate::bot_state::ScreenStore;
use crate::database::flights::FlightRecordStore;
use crate::flightdata::{FlightDataApi, LookupError};
use crate::models::Screen;
use pagination::{paginate, PAGE_SIZE};

// Main-menu button labels. The transport renders these as reply-keyboard
// buttons, so the dialog matches on the exact text.
pub const MENU_ADD_FLIGHT: &str = "Add Flight";
pub const MENU_FIND_AIRPORT: &str = "Find Airport";
pub const MENU_YOUR_FLIGHTS: &str = "Your Flights";
pub const MENU_FLIGHT_INFO: &str = "Flight Info";
pub const MENU_ABOUT_YOU: &str = "About You";
pub const MENU_ABOUT_US: &str = "About Us";
pub const BACK: &str = "Back";

const ABOUT_US_TEXT: &str = "We are a small team of aviation enthusiasts. \
This bot helps you follow your flights anywhere in the world.";
const ABOUT_YOU_TEXT: &str =
    "This section shows information about your account and settings.";
const NO_FLIGHTS_TEXT: &str = "You have no flights registered.";

/// Keyboard wanted alongside an outgoing reply. The teloxide handlers render
/// it into real markup; the dialog itself stays free of transport types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    MainMenu,
    Back,
    Pagination { page: usize, page_count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Reply {
    fn menu(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Keyboard::MainMenu,
        }
    }

    fn back(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Keyboard::Back,
        }
    }
}

/// The per-user dialog state machine. Looks up the user's current screen,
/// validates the input for that screen, calls out to the flight-data
/// provider and the record store as needed, and emits the reply plus the
/// next screen. Lookup and store failures never escape: the user gets a
/// corrective message and a screen they can retry from.
pub struct Dialog {
    screens: ScreenStore,
    store: FlightRecordStore,
    provider: Arc<dyn FlightDataApi>,
}

impl Dialog {
    pub fn new(store: FlightRecordStore, provider: Arc<dyn FlightDataApi>) -> Self {
        Self {
            screens: ScreenStore::default(),
            store,
            provider,
        }
    }

    pub async fn screen(&self, chat: ChatId) -> Screen {
        self.screens.get(chat).await
    }

    /// The /start reset: back to the main menu from anywhere.
    pub async fn reset(&self, chat: ChatId) {
        self.screens.set(chat, Screen::MainMenu).await;
    }

    pub async fn handle_text(&self, chat: ChatId, text: &str) -> Reply {
        let screen = self.screen(chat).await;
        let text = text.trim();

        if !screen.is_main_menu() && text.eq_ignore_ascii_case(BACK) {
            self.screens.set(chat, Screen::MainMenu).await;
            return Reply::menu("Back to the main menu.");
        }

        match screen {
            Screen::MainMenu => self.handle_menu_option(chat, text).await,
            Screen::AboutUs | Screen::AboutYou | Screen::ViewingFlights => {
                Reply::back("Press Back to return to the main menu.")
            }
            Screen::FlightInfo => self.flight_info(text).await,
            Screen::AirportInfo => self.airport_info(text).await,
            Screen::AwaitingFlightNumber => {
                self.screens
                    .set(
                        chat,
                        Screen::AwaitingFlightDate {
                            flight_number: text.to_string(),
                        },
                    )
                    .await;
                Reply::back("Enter the flight date in DD-MM-YYYY format:")
            }
            Screen::AwaitingFlightDate { flight_number } => {
                self.add_flight_date(chat, &flight_number, text).await
            }
        }
    }

    async fn handle_menu_option(&self, chat: ChatId, option: &str) -> Reply {
        match option {
            MENU_FLIGHT_INFO => {
                self.screens.set(chat, Screen::FlightInfo).await;
                Reply::back("Enter a flight number, or press Back:")
            }
            MENU_ABOUT_US => {
                self.screens.set(chat, Screen::AboutUs).await;
                Reply::back(ABOUT_US_TEXT)
            }
            MENU_ABOUT_YOU => {
                self.screens.set(chat, Screen::AboutYou).await;
                Reply::back(ABOUT_YOU_TEXT)
            }
            MENU_YOUR_FLIGHTS => self.show_flights(chat).await,
            MENU_FIND_AIRPORT => {
                self.screens.set(chat, Screen::AirportInfo).await;
                Reply::back("Enter an airport code or name, or press Back:")
            }
            MENU_ADD_FLIGHT => {
                self.screens.set(chat, Screen::AwaitingFlightNumber).await;
                Reply::back("Enter the flight number:")
            }
            _ => Reply::menu("Please pick an option from the menu."),
        }
    }

    /// "Your Flights": first page of the saved list, or the no-flights
    /// message (in which case the user stays in the main menu and no
    /// pagination keyboard is shown).
    pub async fn show_flights(&self, chat: ChatId) -> Reply {
        match self.store.get(chat).await {
            Ok(Some(blob)) => {
                let page = paginate(&blob, 1, PAGE_SIZE);
                self.screens.set(chat, Screen::ViewingFlights).await;
                Reply {
                    text: page.items.join("\n"),
                    keyboard: Keyboard::Pagination {
                        page: page.page,
                        page_count: page.page_count,
                    },
                }
            }
            Ok(None) => Reply::menu(NO_FLIGHTS_TEXT),
            Err(e) => {
                log::error!("failed to load flights for {chat}: {e}");
                Reply::menu("Could not load your flights, please try again.")
            }
        }
    }

    /// Pagination callback (`next_<page>` / `prev_<page>`). Only honored
    /// while the user is viewing their flights; a step past the last page
    /// clamps back to the last non-empty one.
    pub async fn navigate(&self, chat: ChatId, payload: &str) -> Option<Reply> {
        if self.screen(chat).await != Screen::ViewingFlights {
            return None;
        }

        let requested = if let Some(current) = payload.strip_prefix("next_") {
            current.parse::<usize>().ok()? + 1
        } else if let Some(current) = payload.strip_prefix("prev_") {
            current.parse::<usize>().ok()?.saturating_sub(1).max(1)
        } else {
            return None;
        };

        let blob = match self.store.get(chat).await {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(e) => {
                log::error!("failed to load flights for {chat}: {e}");
                return None;
            }
        };

        let mut page = paginate(&blob, requested, PAGE_SIZE);
        if page.items.is_empty() && page.page > 1 {
            page = paginate(&blob, page.page_count, PAGE_SIZE);
        }

        Some(Reply {
            text: page.items.join("\n"),
            keyboard: Keyboard::Pagination {
                page: page.page,
                page_count: page.page_count,
            },
        })
    }

    async fn add_flight_date(&self, chat: ChatId, flight_number: &str, text: &str) -> Reply {
        let Some(date) = parse_input_date(text) else {
            return Reply::back("Wrong date format. Please enter the date as DD-MM-YYYY:");
        };
        if date < Utc::now().date_naive() {
            return Reply::back("The date cannot be in the past. Please enter a valid date:");
        }

        match self.provider.lookup_by_date(flight_number, date).await {
            Ok(details) => {
                let summary = details.summary();
                self.screens.set(chat, Screen::AwaitingFlightNumber).await;

                if let Err(e) = self.store.append(chat, flight_number, &summary).await {
                    log::error!("failed to save flight for {chat}: {e}");
                    return Reply::back("Could not save the flight, please try again.");
                }

                log::info!("flight {flight_number} added for {chat}");
                Reply::back(format!(
                    "Flight details: {summary}\nFlight added. Enter another flight number, or press Back:"
                ))
            }
            Err(e) => {
                if let LookupError::Provider(msg) = &e {
                    log::warn!("by-date lookup failed for {flight_number}: {msg}");
                }
                self.screens.set(chat, Screen::AwaitingFlightNumber).await;
                Reply::back("Flight not found, try another flight number:")
            }
        }
    }

    async fn flight_info(&self, flight_number: &str) -> Reply {
        match self.provider.lookup_latest_by_number(flight_number).await {
            Ok(details) => Reply::back(details.render_latest(flight_number)),
            Err(e) => {
                if let LookupError::Provider(msg) = &e {
                    log::warn!("history lookup failed for {flight_number}: {msg}");
                }
                Reply::back("No information found for that flight number, try another:")
            }
        }
    }

    async fn airport_info(&self, identifier: &str) -> Reply {
        match self.provider.lookup_airport(identifier).await {
            Ok(details) => Reply::back(details.render(identifier)),
            Err(e) => {
                if let LookupError::Provider(msg) = &e {
                    log::warn!("airport lookup failed for {identifier}: {msg}");
                }
                Reply::back("Airport not found, try another code:")
            }
        }
    }
}

/// Strict `DD-MM-YYYY`: exactly two-digit day and month, four-digit year.
/// chrono alone would also accept `1-1-2030`.
fn parse_input_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[2] == b'-'
        && bytes[5] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(text, "%d-%m-%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::NaiveTime;

    use crate::database::Database;
    use crate::models::{AirportDetails, FlightDetails};

    struct MockApi {
        flight: Option<FlightDetails>,
        airport: Option<AirportDetails>,
        by_date_calls: Mutex<Vec<(String, NaiveDate)>>,
    }

    impl MockApi {
        fn with_flight(flight: Option<FlightDetails>) -> Self {
            Self {
                flight,
                airport: None,
                by_date_calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl FlightDataApi for MockApi {
        async fn lookup_by_date(
            &self,
            flight_number: &str,
            date: NaiveDate,
        ) -> Result<FlightDetails, LookupError> {
            self.by_date_calls
                .lock()
                .unwrap()
                .push((flight_number.to_string(), date));
            self.flight.clone().ok_or(LookupError::NotFound)
        }

        async fn lookup_latest_by_number(
            &self,
            _flight_number: &str,
        ) -> Result<FlightDetails, LookupError> {
            self.flight.clone().ok_or(LookupError::NotFound)
        }

        async fn lookup_airport(
            &self,
            _identifier: &str,
        ) -> Result<AirportDetails, LookupError> {
            self.airport.clone().ok_or(LookupError::NotFound)
        }
    }

    fn sample_flight() -> FlightDetails {
        FlightDetails {
            departure_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            departure_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(11, 45, 0).unwrap(),
            origin: "Paris Charles de Gaulle Airport".to_string(),
            destination: "Berlin Brandenburg Airport".to_string(),
            registration: "F-HBNK".to_string(),
            model: None,
        }
    }

    async fn dialog(provider: MockApi) -> (Dialog, Arc<MockApi>) {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.init().await.unwrap();
        let provider = Arc::new(provider);
        let dialog = Dialog::new(FlightRecordStore::new(db), provider.clone());
        (dialog, provider)
    }

    const USER: ChatId = ChatId(42);

    #[tokio::test]
    async fn add_flight_appends_record_and_confirms() {
        let (dialog, provider) = dialog(MockApi::with_flight(Some(sample_flight()))).await;

        dialog.handle_text(USER, MENU_ADD_FLIGHT).await;
        dialog.handle_text(USER, "AF123").await;
        let reply = dialog.handle_text(USER, "01-01-2030").await;

        assert!(reply.text.contains("Flight added."));
        assert_eq!(dialog.screen(USER).await, Screen::AwaitingFlightNumber);

        let calls = provider.by_date_calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![(
                "AF123".to_string(),
                NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
            )]
        );

        let blob = dialog.store.get(USER).await.unwrap().unwrap();
        assert!(blob.starts_with("AF123 : "));
    }

    #[tokio::test]
    async fn past_date_is_rejected_without_a_lookup() {
        let (dialog, provider) = dialog(MockApi::with_flight(Some(sample_flight()))).await;

        dialog.handle_text(USER, MENU_ADD_FLIGHT).await;
        dialog.handle_text(USER, "AF123").await;
        let reply = dialog.handle_text(USER, "01-01-2000").await;

        assert!(reply.text.contains("cannot be in the past"));
        assert!(provider.by_date_calls.lock().unwrap().is_empty());
        assert_eq!(
            dialog.screen(USER).await,
            Screen::AwaitingFlightDate {
                flight_number: "AF123".to_string()
            }
        );
    }

    #[tokio::test]
    async fn today_is_accepted() {
        let (dialog, provider) = dialog(MockApi::with_flight(Some(sample_flight()))).await;

        dialog.handle_text(USER, MENU_ADD_FLIGHT).await;
        dialog.handle_text(USER, "AF123").await;
        let today = Utc::now().date_naive();
        dialog
            .handle_text(USER, &today.format("%d-%m-%Y").to_string())
            .await;

        let calls = provider.by_date_calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, today);
    }

    #[tokio::test]
    async fn malformed_dates_keep_waiting() {
        let (dialog, provider) = dialog(MockApi::with_flight(Some(sample_flight()))).await;

        dialog.handle_text(USER, MENU_ADD_FLIGHT).await;
        dialog.handle_text(USER, "AF123").await;

        for input in ["2030-01-01", "1-1-2030", "32-01-2030", "next friday"] {
            let reply = dialog.handle_text(USER, input).await;
            assert!(reply.text.contains("DD-MM-YYYY"), "input: {input}");
        }
        assert!(provider.by_date_calls.lock().unwrap().is_empty());
        assert_eq!(
            dialog.screen(USER).await,
            Screen::AwaitingFlightDate {
                flight_number: "AF123".to_string()
            }
        );
    }

    #[tokio::test]
    async fn failed_lookup_returns_to_the_number_prompt() {
        let (dialog, _) = dialog(MockApi::with_flight(None)).await;

        dialog.handle_text(USER, MENU_ADD_FLIGHT).await;
        dialog.handle_text(USER, "ZZ999").await;
        let reply = dialog.handle_text(USER, "01-01-2030").await;

        assert!(reply.text.contains("not found"));
        assert_eq!(dialog.screen(USER).await, Screen::AwaitingFlightNumber);
        assert_eq!(dialog.store.get(USER).await.unwrap(), None);
    }

    #[tokio::test]
    async fn your_flights_without_records_shows_no_pagination() {
        let (dialog, _) = dialog(MockApi::with_flight(None)).await;

        let reply = dialog.handle_text(USER, MENU_YOUR_FLIGHTS).await;

        assert_eq!(reply.text, NO_FLIGHTS_TEXT);
        assert_eq!(reply.keyboard, Keyboard::MainMenu);
        assert_eq!(dialog.screen(USER).await, Screen::MainMenu);
    }

    #[tokio::test]
    async fn your_flights_paginates_and_next_clamps_at_the_end() {
        let (dialog, _) = dialog(MockApi::with_flight(None)).await;
        for i in 1..=7 {
            dialog
                .store
                .append(USER, &format!("FL{i}"), "summary")
                .await
                .unwrap();
        }

        let reply = dialog.handle_text(USER, MENU_YOUR_FLIGHTS).await;
        assert_eq!(reply.text.lines().count(), 5);
        assert_eq!(
            reply.keyboard,
            Keyboard::Pagination {
                page: 1,
                page_count: 2
            }
        );
        assert_eq!(dialog.screen(USER).await, Screen::ViewingFlights);

        let reply = dialog.navigate(USER, "next_1").await.unwrap();
        assert_eq!(reply.text.lines().count(), 2);
        assert_eq!(
            reply.keyboard,
            Keyboard::Pagination {
                page: 2,
                page_count: 2
            }
        );

        // Past the last page: clamps back instead of going blank.
        let reply = dialog.navigate(USER, "next_2").await.unwrap();
        assert_eq!(
            reply.keyboard,
            Keyboard::Pagination {
                page: 2,
                page_count: 2
            }
        );
        assert_eq!(reply.text.lines().count(), 2);
    }

    #[tokio::test]
    async fn prev_from_the_first_page_stays_on_it() {
        let (dialog, _) = dialog(MockApi::with_flight(None)).await;
        dialog.store.append(USER, "FL1", "summary").await.unwrap();

        dialog.handle_text(USER, MENU_YOUR_FLIGHTS).await;
        let reply = dialog.navigate(USER, "prev_1").await.unwrap();
        assert_eq!(
            reply.keyboard,
            Keyboard::Pagination {
                page: 1,
                page_count: 1
            }
        );
    }

    #[tokio::test]
    async fn navigation_is_ignored_outside_viewing_flights() {
        let (dialog, _) = dialog(MockApi::with_flight(None)).await;
        dialog.store.append(USER, "FL1", "summary").await.unwrap();

        assert_eq!(dialog.navigate(USER, "next_1").await, None);
    }

    #[tokio::test]
    async fn back_returns_to_the_main_menu_from_every_screen() {
        let (dialog, _) = dialog(MockApi::with_flight(Some(sample_flight()))).await;
        dialog.store.append(USER, "FL1", "summary").await.unwrap();

        let entries = [
            MENU_FLIGHT_INFO,
            MENU_ABOUT_US,
            MENU_ABOUT_YOU,
            MENU_FIND_AIRPORT,
            MENU_ADD_FLIGHT,
            MENU_YOUR_FLIGHTS,
        ];
        for entry in entries {
            dialog.handle_text(USER, entry).await;
            let reply = dialog.handle_text(USER, BACK).await;
            assert_eq!(reply.keyboard, Keyboard::MainMenu, "entry: {entry}");
            assert_eq!(dialog.screen(USER).await, Screen::MainMenu);
        }
    }

    #[tokio::test]
    async fn back_also_works_while_awaiting_a_date() {
        let (dialog, _) = dialog(MockApi::with_flight(None)).await;

        dialog.handle_text(USER, MENU_ADD_FLIGHT).await;
        dialog.handle_text(USER, "AF123").await;
        dialog.handle_text(USER, "Back").await;
        assert_eq!(dialog.screen(USER).await, Screen::MainMenu);
    }

    #[tokio::test]
    async fn unknown_menu_text_reprompts() {
        let (dialog, _) = dialog(MockApi::with_flight(None)).await;

        let reply = dialog.handle_text(USER, "what can you do?").await;
        assert!(reply.text.contains("pick an option"));
        assert_eq!(dialog.screen(USER).await, Screen::MainMenu);
    }

    #[tokio::test]
    async fn flight_info_stays_on_its_screen() {
        let (dialog, _) = dialog(MockApi::with_flight(Some(FlightDetails {
            model: Some("A35K".to_string()),
            ..sample_flight()
        })))
        .await;

        dialog.handle_text(USER, MENU_FLIGHT_INFO).await;
        let reply = dialog.handle_text(USER, "BA117").await;
        assert!(reply.text.contains("Latest route for flight BA117"));
        assert_eq!(dialog.screen(USER).await, Screen::FlightInfo);

        // Ready for the next query right away.
        let reply = dialog.handle_text(USER, "BA118").await;
        assert!(reply.text.contains("BA118"));
    }

    #[tokio::test]
    async fn airport_lookup_failure_is_a_plain_not_found() {
        let (dialog, _) = dialog(MockApi::with_flight(None)).await;

        dialog.handle_text(USER, MENU_FIND_AIRPORT).await;
        let reply = dialog.handle_text(USER, "XXXX").await;
        assert!(reply.text.contains("not found"));
        assert_eq!(dialog.screen(USER).await, Screen::AirportInfo);
    }

    #[tokio::test]
    async fn reset_returns_to_the_main_menu() {
        let (dialog, _) = dialog(MockApi::with_flight(None)).await;

        dialog.handle_text(USER, MENU_ADD_FLIGHT).await;
        dialog.reset(USER).await;
        assert_eq!(dialog.screen(USER).await, Screen::MainMenu);
    }

    #[test]
    fn input_date_shape_is_strict() {
        assert!(parse_input_date("01-01-2030").is_some());
        assert!(parse_input_date("1-1-2030").is_none());
        assert!(parse_input_date("2030-01-01").is_none());
        assert!(parse_input_date("01/01/2030").is_none());
        assert!(parse_input_date("31-02-2030").is_none());
    }
}
