pub mod flight;
pub mod screen;

pub use flight::{AirportDetails, FlightDetails};
pub use screen::Screen;
