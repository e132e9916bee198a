use pointtable_core::{RankedStanding, View};
use serde::{Deserialize, Serialize};

/// Query parameters for the combined leaderboard.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StandingsQuery {
    /// Ranking metric: `total` (default), `arts`, or `sports`.
    #[param(value_type = Option<String>, example = "total")]
    pub view: Option<View>,
}

/// One department on the combined leaderboard.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StandingEntry {
    /// 1-based position under the requested view.
    #[schema(example = 1)]
    pub rank: usize,
    #[schema(example = "Computer Science")]
    pub name: String,
    /// First two letters of the name, uppercased.
    #[schema(example = "CO")]
    pub short_name: String,
    #[schema(example = 40)]
    pub arts_points: u64,
    #[schema(example = 20)]
    pub sports_points: u64,
    #[schema(example = 60)]
    pub total_points: u64,
    /// Points under the requested view.
    #[schema(example = 60)]
    pub points: u64,
    /// `points` relative to the leader, in `[0, 1]`.
    #[schema(example = 1.0)]
    pub ratio: f64,
    #[schema(example = "#7f1d1d")]
    pub color: String,
}

impl From<RankedStanding> for StandingEntry {
    fn from(r: RankedStanding) -> Self {
        Self {
            rank: r.rank,
            name: r.standing.name,
            short_name: r.standing.short_name,
            arts_points: r.standing.arts_points,
            sports_points: r.standing.sports_points,
            total_points: r.standing.total_points,
            points: r.points,
            ratio: r.ratio,
            color: r.standing.color,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StandingsResponse {
    pub view: View,
    /// Highest `points` on the board; 0 when nobody has scored.
    #[schema(example = 60)]
    pub max_points: u64,
    pub data: Vec<StandingEntry>,
}

impl StandingsResponse {
    pub fn new(view: View, ranked: Vec<RankedStanding>) -> Self {
        let max_points = ranked.iter().map(|r| r.points).max().unwrap_or(0);
        Self {
            view,
            max_points,
            data: ranked.into_iter().map(StandingEntry::from).collect(),
        }
    }
}
