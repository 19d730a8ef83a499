pub mod club;
pub mod common;
pub mod event;
pub mod league;
pub mod matches;
pub mod player;
pub mod team;
pub mod user;
