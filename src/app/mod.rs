mod config;
mod dialog;
mod focus;
mod state;
mod status;

pub use config::Config;
pub use dialog::{Dialog, DialogLevel};
pub use focus::Focus;
pub use state::App;
pub use status::{StatusLevel, StatusMessage};
