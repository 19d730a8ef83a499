pub mod club;
pub mod event;
pub mod league;
pub mod matches;
pub mod player;
pub mod stats;
pub mod team;
pub mod user;
