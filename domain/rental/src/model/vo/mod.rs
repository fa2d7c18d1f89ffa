mod caller;
mod day_window;
mod request_detail;

#[rustfmt::skip]
pub use {
    caller::{Caller, Role},
    day_window::DayWindow,
    request_detail::{RequestDetail, RoomSummary},
};
