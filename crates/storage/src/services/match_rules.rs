//! Match lifecycle and event scoring rules.
//!
//! Everything here is pure; the repositories call into it while holding the
//! match row lock so the checks and the writes see the same state.

use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Event, EventType, Match, MatchStatus, Side, Sport};

const FOOTBALL_EVENTS: &[EventType] = &[EventType::Gol, EventType::Amarilla, EventType::Roja];
const HANDBALL_EVENTS: &[EventType] = &[
    EventType::Gol,
    EventType::Amarilla,
    EventType::Roja,
    EventType::Sancion2m,
];
const BASKETBALL_EVENTS: &[EventType] = &[EventType::Punto1, EventType::Punto2, EventType::Punto3];

/// Event types that can be recorded in a match of the given sport.
pub fn allowed_events(sport: Sport) -> &'static [EventType] {
    match sport {
        Sport::Futbol | Sport::Hockey => FOOTBALL_EVENTS,
        Sport::Handball => HANDBALL_EVENTS,
        Sport::Basquet => BASKETBALL_EVENTS,
    }
}

/// Points an event adds to its side's score.
pub fn points(event_type: EventType) -> i32 {
    match event_type {
        EventType::Gol | EventType::Punto1 => 1,
        EventType::Punto2 => 2,
        EventType::Punto3 => 3,
        EventType::Amarilla | EventType::Roja | EventType::Sancion2m => 0,
    }
}

pub fn check_transition(from: MatchStatus, to: MatchStatus) -> Result<()> {
    use MatchStatus::*;

    match (from, to) {
        (a, b) if a == b => Ok(()),
        (Scheduled, Live) | (Live, Finished) | (Scheduled, Finished) => Ok(()),
        _ => Err(StorageError::InvalidState(format!(
            "Cannot move a match from {from} to {to}"
        ))),
    }
}

pub fn ensure_live(game: &Match) -> Result<()> {
    if game.status == MatchStatus::Live {
        Ok(())
    } else {
        Err(StorageError::InvalidState(format!(
            "Events can only be changed while the match is LIVE (currently {})",
            game.status
        )))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreDelta {
    pub home: i32,
    pub away: i32,
}

impl ScoreDelta {
    pub fn is_zero(&self) -> bool {
        self.home == 0 && self.away == 0
    }

    pub fn negate(self) -> Self {
        Self {
            home: -self.home,
            away: -self.away,
        }
    }

    /// The points an event credited when it was recorded, read back from
    /// its row. Independent of where its player plays now.
    pub fn credited_by(event: &Event) -> Self {
        Self {
            home: event.points_home,
            away: event.points_away,
        }
    }

    /// Score after applying this delta to `(home, away)`, floored at zero
    pub fn apply(self, score_home: i32, score_away: i32) -> (i32, i32) {
        (
            (score_home + self.home).max(0),
            (score_away + self.away).max(0),
        )
    }
}

/// Works out how an event changes the score of `game`.
///
/// `player_team` is the team of the player the event is attributed to, if any.
/// The player has to play for one of the two sides, and scoring events need a
/// player so there is a side to credit.
pub fn score_delta(
    game: &Match,
    event_type: EventType,
    player_team: Option<Uuid>,
) -> Result<ScoreDelta> {
    if !allowed_events(game.sport).contains(&event_type) {
        return Err(StorageError::Invalid(format!(
            "{event_type} is not a valid event for {}",
            game.sport
        )));
    }

    let side = match player_team {
        Some(team_id) => Some(game.side_of(team_id).ok_or_else(|| {
            StorageError::Invalid("Player does not play for either team in this match".to_string())
        })?),
        None => None,
    };

    let pts = points(event_type);
    if pts == 0 {
        return Ok(ScoreDelta::default());
    }

    match side {
        Some(Side::Home) => Ok(ScoreDelta { home: pts, away: 0 }),
        Some(Side::Away) => Ok(ScoreDelta { home: 0, away: pts }),
        None => Err(StorageError::Invalid(
            "Scoring events must be attributed to a player".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn game(sport: Sport) -> Match {
        let now = Utc::now();
        Match {
            match_id: Uuid::new_v4(),
            league_id: None,
            sport,
            date: now,
            location: None,
            home_team_id: Uuid::new_v4(),
            away_team_id: Uuid::new_v4(),
            status: MatchStatus::Live,
            score_home: 0,
            score_away: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_transitions() {
        use MatchStatus::*;
        assert!(check_transition(Scheduled, Live).is_ok());
        assert!(check_transition(Live, Finished).is_ok());
        assert!(check_transition(Scheduled, Finished).is_ok());
        assert!(check_transition(Live, Live).is_ok());
        assert!(check_transition(Live, Scheduled).is_err());
        assert!(check_transition(Finished, Live).is_err());
        assert!(check_transition(Finished, Scheduled).is_err());
    }

    #[test]
    fn test_goal_credits_players_side() {
        let g = game(Sport::Futbol);
        let delta = score_delta(&g, EventType::Gol, Some(g.away_team_id)).unwrap();
        assert_eq!(delta, ScoreDelta { home: 0, away: 1 });
    }

    #[test]
    fn test_basketball_points() {
        let g = game(Sport::Basquet);
        let delta = score_delta(&g, EventType::Punto3, Some(g.home_team_id)).unwrap();
        assert_eq!(delta, ScoreDelta { home: 3, away: 0 });
        assert_eq!(delta.negate(), ScoreDelta { home: -3, away: 0 });
    }

    #[test]
    fn test_event_not_valid_for_sport() {
        let g = game(Sport::Basquet);
        let err = score_delta(&g, EventType::Gol, Some(g.home_team_id)).unwrap_err();
        assert!(matches!(err, StorageError::Invalid(_)));

        let g = game(Sport::Futbol);
        assert!(score_delta(&g, EventType::Sancion2m, None).is_err());
        let g = game(Sport::Handball);
        assert!(score_delta(&g, EventType::Sancion2m, None).unwrap().is_zero());
    }

    #[test]
    fn test_cards_need_no_player_but_goals_do() {
        let g = game(Sport::Hockey);
        assert!(score_delta(&g, EventType::Amarilla, None).unwrap().is_zero());
        assert!(score_delta(&g, EventType::Gol, None).is_err());
    }

    #[test]
    fn test_player_from_other_team_rejected() {
        let g = game(Sport::Futbol);
        assert!(score_delta(&g, EventType::Roja, Some(Uuid::new_v4())).is_err());
    }

    fn recorded(g: &Match, event_type: EventType, delta: ScoreDelta) -> Event {
        Event {
            event_id: Uuid::new_v4(),
            match_id: g.match_id,
            minute: Some(10),
            quarter: Some(1),
            event_type,
            value: None,
            player_id: Some(Uuid::new_v4()),
            points_home: delta.home,
            points_away: delta.away,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_record_then_delete_restores_score_for_every_sport() {
        let cases = [
            (Sport::Futbol, EventType::Gol),
            (Sport::Futbol, EventType::Amarilla),
            (Sport::Hockey, EventType::Gol),
            (Sport::Handball, EventType::Gol),
            (Sport::Handball, EventType::Sancion2m),
            (Sport::Basquet, EventType::Punto1),
            (Sport::Basquet, EventType::Punto2),
            (Sport::Basquet, EventType::Punto3),
        ];

        for (sport, event_type) in cases {
            for team in [Side::Home, Side::Away] {
                let g = game(sport);
                let team_id = match team {
                    Side::Home => g.home_team_id,
                    Side::Away => g.away_team_id,
                };
                let before = (4, 7);

                let delta = score_delta(&g, event_type, Some(team_id)).unwrap();
                let after_record = delta.apply(before.0, before.1);
                assert_eq!(
                    after_record.0 + after_record.1,
                    before.0 + before.1 + points(event_type),
                    "{sport} {event_type}"
                );

                let event = recorded(&g, event_type, delta);
                let after_delete = ScoreDelta::credited_by(&event)
                    .negate()
                    .apply(after_record.0, after_record.1);
                assert_eq!(after_delete, before, "{sport} {event_type}");
            }
        }
    }

    #[test]
    fn test_delete_after_transfer_takes_points_from_credited_side() {
        let g = game(Sport::Futbol);
        let delta = score_delta(&g, EventType::Gol, Some(g.home_team_id)).unwrap();
        let (home, away) = delta.apply(0, 0);
        assert_eq!((home, away), (1, 0));

        // The scorer has since moved to the away team; the stored credit
        // still points at the home side.
        let event = recorded(&g, EventType::Gol, delta);
        let restored = ScoreDelta::credited_by(&event).negate().apply(home, away);
        assert_eq!(restored, (0, 0));
    }

    #[test]
    fn test_apply_never_goes_below_zero() {
        let delta = ScoreDelta { home: -3, away: 0 };
        assert_eq!(delta.apply(1, 2), (0, 2));
    }

    #[test]
    fn test_ensure_live() {
        let mut g = game(Sport::Futbol);
        assert!(ensure_live(&g).is_ok());
        g.status = MatchStatus::Finished;
        assert!(matches!(ensure_live(&g), Err(StorageError::InvalidState(_))));
    }
}
