//! Desktop front end built on iced

pub mod app;
pub mod clipboard;
pub mod components;
pub mod state;
pub mod theme;
pub mod views;

pub use app::{DownloaderApp, GuiFlags, Message, View};
pub use state::{DownloadForm, RunState};
