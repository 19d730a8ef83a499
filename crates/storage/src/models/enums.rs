use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error returned when a string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// Implements `as_str`, `Display` and `FromStr` from a single variant table
/// so the wire spelling lives in exactly one place.
macro_rules! wire_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($ty::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    AdminApp,
    AdminLiga,
    AdminClub,
}

wire_enum!(Role, "role", {
    AdminApp => "ADMIN_APP",
    AdminLiga => "ADMIN_LIGA",
    AdminClub => "ADMIN_CLUB",
});

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "sport", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sport {
    Futbol,
    Basquet,
    Handball,
    Hockey,
}

wire_enum!(Sport, "sport", {
    Futbol => "FUTBOL",
    Basquet => "BASQUET",
    Handball => "HANDBALL",
    Hockey => "HOCKEY",
});

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
    ToSchema,
)]
#[sqlx(type_name = "match_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Live,
    Finished,
}

wire_enum!(MatchStatus, "match status", {
    Scheduled => "SCHEDULED",
    Live => "LIVE",
    Finished => "FINISHED",
});

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "event_type")]
pub enum EventType {
    #[sqlx(rename = "GOL")]
    #[serde(rename = "GOL")]
    Gol,
    #[sqlx(rename = "AMARILLA")]
    #[serde(rename = "AMARILLA")]
    Amarilla,
    #[sqlx(rename = "ROJA")]
    #[serde(rename = "ROJA")]
    Roja,
    #[sqlx(rename = "SANCION_2M")]
    #[serde(rename = "SANCION_2M")]
    Sancion2m,
    #[sqlx(rename = "PUNTO_1")]
    #[serde(rename = "PUNTO_1")]
    Punto1,
    #[sqlx(rename = "PUNTO_2")]
    #[serde(rename = "PUNTO_2")]
    Punto2,
    #[sqlx(rename = "PUNTO_3")]
    #[serde(rename = "PUNTO_3")]
    Punto3,
}

wire_enum!(EventType, "event type", {
    Gol => "GOL",
    Amarilla => "AMARILLA",
    Roja => "ROJA",
    Sancion2m => "SANCION_2M",
    Punto1 => "PUNTO_1",
    Punto2 => "PUNTO_2",
    Punto3 => "PUNTO_3",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_strings_match_serde() {
        for role in Role::ALL {
            let json = serde_json::to_string(role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
        for event_type in EventType::ALL {
            let json = serde_json::to_string(event_type).unwrap();
            assert_eq!(json, format!("\"{}\"", event_type.as_str()));
        }
    }

    #[test]
    fn test_sanction_and_point_spelling() {
        assert_eq!(EventType::Sancion2m.to_string(), "SANCION_2M");
        assert_eq!(EventType::Punto3.to_string(), "PUNTO_3");
        let parsed: EventType = serde_json::from_str("\"PUNTO_2\"").unwrap();
        assert_eq!(parsed, EventType::Punto2);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert_eq!("BASQUET".parse::<Sport>(), Ok(Sport::Basquet));
        let err = "basquet".parse::<Sport>().unwrap_err();
        assert_eq!(err.to_string(), "unknown sport 'basquet'");
    }

    #[test]
    fn test_default_match_status_is_scheduled() {
        assert_eq!(MatchStatus::default(), MatchStatus::Scheduled);
    }
}
