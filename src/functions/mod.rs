pub mod bot;
pub mod format;
pub mod prompt;
pub mod time;
pub mod ui;
