pub mod auth;
pub mod clubs;
pub mod events;
pub mod leagues;
pub mod matches;
pub mod players;
pub mod teams;
pub mod users;
