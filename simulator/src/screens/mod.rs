//! Screen rendering for the simulator window.

mod status;

pub use status::{SCREEN_HEIGHT, SCREEN_WIDTH, StatusView, draw_status_page};
