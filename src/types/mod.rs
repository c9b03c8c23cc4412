pub mod compass;
pub mod credential;
pub mod day_window;
pub mod forecast_frame;
pub mod location;
pub mod normalized_row;
pub mod raw_observation;
