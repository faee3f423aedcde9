pub mod home;
pub mod not_found;
pub mod scoreboard;
pub mod setup;
