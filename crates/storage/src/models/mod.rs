mod club;
mod enums;
mod event;
mod league;
mod matches;
mod player;
mod team;
mod user;

pub use club::Club;
pub use enums::{EventType, MatchStatus, Role, Sport, UnknownVariant};
pub use event::Event;
pub use league::League;
pub use matches::{Match, Side};
pub use player::Player;
pub use team::Team;
pub use user::User;
