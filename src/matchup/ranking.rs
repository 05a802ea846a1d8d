use serde::Serialize;

use crate::football_data::models::TableRow;

/// Teams taken from each end of the table.
pub const GROUP_SIZE: usize = 4;

/// The top and bottom of a league table, by upstream order.
///
/// `bottom4` lists the last-placed team first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranking {
    pub top4: Vec<String>,
    pub bottom4: Vec<String>,
}

impl Ranking {
    /// Rows are trusted to be in rank order; no tie-breaks are applied.
    /// A row without a team name still occupies its slot but contributes no
    /// name.
    pub fn from_table(rows: &[TableRow]) -> Self {
        let top4 = rows
            .iter()
            .take(GROUP_SIZE)
            .filter_map(|row| row.team.name.clone())
            .collect();
        let bottom4 = rows
            .iter()
            .rev()
            .take(GROUP_SIZE)
            .filter_map(|row| row.team.name.clone())
            .collect();
        Ranking { top4, bottom4 }
    }

    pub fn is_top(&self, team: &str) -> bool {
        self.top4.iter().any(|t| t == team)
    }

    pub fn is_bottom(&self, team: &str) -> bool {
        self.bottom4.iter().any(|t| t == team)
    }

    /// One side in the top group and the other in the bottom group, either way
    /// round. Names compare exactly.
    pub fn is_cross_group(&self, home: &str, away: &str) -> bool {
        (self.is_top(home) && self.is_bottom(away)) || (self.is_top(away) && self.is_bottom(home))
    }
}

#[cfg(test)]
pub(crate) fn table_of(names: &[&str]) -> Vec<TableRow> {
    use crate::football_data::models::TeamRef;

    names
        .iter()
        .enumerate()
        .map(|(i, name)| TableRow {
            position: i as u32 + 1,
            team: TeamRef {
                name: Some(name.to_string()),
                ..TeamRef::default()
            },
            played_games: Some(34),
            won: None,
            draw: None,
            lost: None,
            points: Some(80 - 3 * i as i32),
            goals_for: None,
            goals_against: None,
            goal_difference: None,
        })
        .collect()
}
