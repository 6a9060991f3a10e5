//! GUI components

pub mod activity_log;
pub mod url_input;

pub use activity_log::activity_log;
pub use url_input::url_input;
