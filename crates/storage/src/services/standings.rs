use std::collections::HashMap;

use uuid::Uuid;

use crate::dto::league::StandingRow;
use crate::models::Sport;

/// Final score of a finished match, as far as the table is concerned.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct MatchResult {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub score_home: i32,
    pub score_away: i32,
}

/// Table points for a win, a draw and a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsRule {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

pub fn points_rule(sport: Sport) -> PointsRule {
    match sport {
        Sport::Futbol | Sport::Hockey => PointsRule {
            win: 3,
            draw: 1,
            loss: 0,
        },
        Sport::Handball => PointsRule {
            win: 2,
            draw: 1,
            loss: 0,
        },
        // FIBA: a played loss still counts one point
        Sport::Basquet => PointsRule {
            win: 2,
            draw: 1,
            loss: 1,
        },
    }
}

#[derive(Default)]
struct Tally {
    played: u32,
    won: u32,
    drawn: u32,
    lost: u32,
    scored: i64,
    conceded: i64,
}

impl Tally {
    fn record(&mut self, scored: i32, conceded: i32) {
        self.played += 1;
        self.scored += i64::from(scored);
        self.conceded += i64::from(conceded);
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => self.won += 1,
            std::cmp::Ordering::Equal => self.drawn += 1,
            std::cmp::Ordering::Less => self.lost += 1,
        }
    }
}

/// Builds the league table for one sport from finished results.
///
/// Only teams with at least one result appear. Ties on points are broken by
/// goal difference, then goals scored, then team name.
pub fn compute_standings(
    sport: Sport,
    results: &[MatchResult],
    team_names: &HashMap<Uuid, String>,
) -> Vec<StandingRow> {
    let rule = points_rule(sport);
    let mut tallies: HashMap<Uuid, Tally> = HashMap::new();

    for result in results {
        tallies
            .entry(result.home_team_id)
            .or_default()
            .record(result.score_home, result.score_away);
        tallies
            .entry(result.away_team_id)
            .or_default()
            .record(result.score_away, result.score_home);
    }

    let mut rows: Vec<StandingRow> = tallies
        .into_iter()
        .map(|(team_id, t)| StandingRow {
            position: 0,
            team_id,
            team_name: team_names.get(&team_id).cloned().unwrap_or_default(),
            played: t.played,
            won: t.won,
            drawn: t.drawn,
            lost: t.lost,
            scored: t.scored,
            conceded: t.conceded,
            difference: t.scored - t.conceded,
            points: t.won * rule.win + t.drawn * rule.draw + t.lost * rule.loss,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.difference.cmp(&a.difference))
            .then(b.scored.cmp(&a.scored))
            .then_with(|| a.team_name.cmp(&b.team_name))
    });

    for (i, row) in rows.iter_mut().enumerate() {
        row.position = i as u32 + 1;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        a: Uuid,
        b: Uuid,
        c: Uuid,
        names: HashMap<Uuid, String>,
    }

    fn fixture() -> Fixture {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let names = HashMap::from([
            (a, "Atletico".to_string()),
            (b, "Bosque".to_string()),
            (c, "Costa".to_string()),
        ]);
        Fixture { a, b, c, names }
    }

    fn result(home: Uuid, away: Uuid, score_home: i32, score_away: i32) -> MatchResult {
        MatchResult {
            home_team_id: home,
            away_team_id: away,
            score_home,
            score_away,
        }
    }

    #[test]
    fn test_football_table() {
        let f = fixture();
        let results = [
            result(f.a, f.b, 2, 0),
            result(f.b, f.c, 1, 1),
            result(f.c, f.a, 0, 1),
        ];

        let table = compute_standings(Sport::Futbol, &results, &f.names);

        assert_eq!(table.len(), 3);
        assert_eq!(table[0].team_id, f.a);
        assert_eq!(table[0].points, 6);
        assert_eq!(table[0].position, 1);
        assert_eq!(table[0].difference, 3);
        // Bosque and Costa both have 1 point, Costa has the better difference
        assert_eq!(table[1].team_id, f.c);
        assert_eq!(table[2].team_id, f.b);
        assert_eq!(table[2].lost, 1);
        assert_eq!(table[2].drawn, 1);
    }

    #[test]
    fn test_basketball_loss_counts_a_point() {
        let f = fixture();
        let results = [result(f.a, f.b, 80, 75)];

        let table = compute_standings(Sport::Basquet, &results, &f.names);

        assert_eq!(table[0].points, 2);
        assert_eq!(table[1].points, 1);
    }

    #[test]
    fn test_name_breaks_full_tie() {
        let f = fixture();
        let results = [result(f.c, f.a, 1, 1)];

        let table = compute_standings(Sport::Handball, &results, &f.names);

        assert_eq!(table[0].team_name, "Atletico");
        assert_eq!(table[1].team_name, "Costa");
        assert!(table.iter().all(|row| row.points == 1));
    }

    #[test]
    fn test_no_results_no_rows() {
        let f = fixture();
        assert!(compute_standings(Sport::Hockey, &[], &f.names).is_empty());
    }
}
