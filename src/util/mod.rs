pub mod autostart;
pub mod pages;
pub mod preferences;
