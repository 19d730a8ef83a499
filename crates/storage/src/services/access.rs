//! Role based write access.
//!
//! Reads are public. Writes are checked against the scope of the resource
//! they touch, resolved by the caller from the database beforehand.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Role, User};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Access denied: {0}")]
pub struct AccessDenied(pub &'static str);

/// The authenticated user a request acts on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
    pub league_id: Option<Uuid>,
    pub club_id: Option<Uuid>,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            role: user.role,
            league_id: user.league_id,
            club_id: user.club_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
}

/// A resource together with the league/club it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// `league_id` is `None` when creating a new league.
    League { league_id: Option<Uuid> },
    Club {
        league_id: Option<Uuid>,
        club_id: Option<Uuid>,
    },
    Team {
        league_id: Option<Uuid>,
        club_id: Uuid,
    },
    Player {
        league_id: Option<Uuid>,
        club_id: Uuid,
    },
    Match { league_id: Option<Uuid> },
    Event { league_id: Option<Uuid> },
    User,
}

fn same(scope: Option<Uuid>, resource: Option<Uuid>) -> bool {
    scope.is_some() && scope == resource
}

pub fn authorize(
    principal: &Principal,
    action: Action,
    resource: &Resource,
) -> Result<(), AccessDenied> {
    let allowed = match principal.role {
        Role::AdminApp => true,
        Role::AdminLiga => match *resource {
            Resource::League { league_id } => {
                action == Action::Update && same(principal.league_id, league_id)
            }
            Resource::Club { league_id, .. }
            | Resource::Team { league_id, .. }
            | Resource::Player { league_id, .. }
            | Resource::Match { league_id }
            | Resource::Event { league_id } => same(principal.league_id, league_id),
            Resource::User => false,
        },
        Role::AdminClub => match *resource {
            Resource::Club { club_id, .. } => {
                action == Action::Update && same(principal.club_id, club_id)
            }
            Resource::Team { club_id, .. } | Resource::Player { club_id, .. } => {
                same(principal.club_id, Some(club_id))
            }
            Resource::League { .. }
            | Resource::Match { .. }
            | Resource::Event { .. }
            | Resource::User => false,
        },
    };

    if allowed {
        Ok(())
    } else {
        Err(AccessDenied(denial_reason(principal.role, resource)))
    }
}

fn denial_reason(role: Role, resource: &Resource) -> &'static str {
    match (role, resource) {
        (_, Resource::User) => "only ADMIN_APP can manage users",
        (Role::AdminClub, Resource::Match { .. } | Resource::Event { .. }) => {
            "club admins cannot manage matches"
        }
        (_, Resource::League { .. }) => "not allowed to manage this league",
        (Role::AdminLiga, _) => "resource is outside your league",
        _ => "resource is outside your club",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role, league_id: Option<Uuid>, club_id: Option<Uuid>) -> Principal {
        Principal {
            user_id: Uuid::new_v4(),
            role,
            league_id,
            club_id,
        }
    }

    #[test]
    fn test_app_admin_can_do_everything() {
        let admin = principal(Role::AdminApp, None, None);
        assert!(authorize(&admin, Action::Create, &Resource::League { league_id: None }).is_ok());
        assert!(authorize(&admin, Action::Delete, &Resource::User).is_ok());
    }

    #[test]
    fn test_league_admin_scope() {
        let league = Uuid::new_v4();
        let other = Uuid::new_v4();
        let admin = principal(Role::AdminLiga, Some(league), None);

        let own = Resource::League {
            league_id: Some(league),
        };
        assert!(authorize(&admin, Action::Update, &own).is_ok());
        assert!(authorize(&admin, Action::Delete, &own).is_err());
        assert!(authorize(&admin, Action::Create, &Resource::League { league_id: None }).is_err());

        let own_match = Resource::Match {
            league_id: Some(league),
        };
        assert!(authorize(&admin, Action::Create, &own_match).is_ok());
        let foreign_match = Resource::Match {
            league_id: Some(other),
        };
        assert!(authorize(&admin, Action::Create, &foreign_match).is_err());
        assert!(authorize(&admin, Action::Create, &Resource::Match { league_id: None }).is_err());

        let team = Resource::Team {
            league_id: Some(league),
            club_id: Uuid::new_v4(),
        };
        assert!(authorize(&admin, Action::Delete, &team).is_ok());
        assert!(authorize(&admin, Action::Create, &Resource::User).is_err());
    }

    #[test]
    fn test_club_admin_scope() {
        let club = Uuid::new_v4();
        let admin = principal(Role::AdminClub, None, Some(club));

        let own = Resource::Club {
            league_id: None,
            club_id: Some(club),
        };
        assert!(authorize(&admin, Action::Update, &own).is_ok());
        assert!(authorize(&admin, Action::Delete, &own).is_err());

        let player = Resource::Player {
            league_id: None,
            club_id: club,
        };
        assert!(authorize(&admin, Action::Create, &player).is_ok());

        let foreign = Resource::Team {
            league_id: None,
            club_id: Uuid::new_v4(),
        };
        let err = authorize(&admin, Action::Update, &foreign).unwrap_err();
        assert_eq!(err.0, "resource is outside your club");

        let event = Resource::Event { league_id: None };
        assert!(authorize(&admin, Action::Create, &event).is_err());
    }

    #[test]
    fn test_unscoped_principal_matches_nothing() {
        let admin = principal(Role::AdminLiga, None, None);
        let club = Resource::Club {
            league_id: None,
            club_id: None,
        };
        assert!(authorize(&admin, Action::Create, &club).is_err());
    }
}
