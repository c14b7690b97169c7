/// One node of the dialog. A screen that collects multi-step input carries
/// its pending fields in the variant, so nothing leaks between screens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    MainMenu,
    AboutUs,
    AboutYou,
    FlightInfo,
    ViewingFlights,
    AirportInfo,
    AwaitingFlightNumber,
    AwaitingFlightDate {
        flight_number: String,
    },
}

impl Screen {
    pub fn is_main_menu(&self) -> bool {
        matches!(self, Screen::MainMenu)
    }
}
