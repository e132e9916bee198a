use serde::Serialize;

use crate::category::View;
use crate::merge::DepartmentStanding;

/// A standing placed on the leaderboard for a given view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedStanding {
    /// 1-based display position.
    pub rank: usize,
    #[serde(flatten)]
    pub standing: DepartmentStanding,
    /// Points in the selected view.
    pub points: u64,
    /// `points / max(points)` across the board, in `[0, 1]`. Zero when nobody has points.
    pub ratio: f64,
}

impl View {
    /// Points a standing holds under this view.
    pub fn points(&self, standing: &DepartmentStanding) -> u64 {
        match self {
            View::Total => standing.total_points,
            View::Arts => standing.arts_points,
            View::Sports => standing.sports_points,
        }
    }
}

/// Highest points under `view`, or 0 for an empty board.
pub fn max_points(standings: &[DepartmentStanding], view: View) -> u64 {
    standings.iter().map(|s| view.points(s)).max().unwrap_or(0)
}

/// Order standings by the selected view, highest first.
///
/// Equal points are ordered by department name ascending.
pub fn rank(mut standings: Vec<DepartmentStanding>, view: View) -> Vec<RankedStanding> {
    standings.sort_by(|a, b| {
        view.points(b)
            .cmp(&view.points(a))
            .then_with(|| a.name.cmp(&b.name))
    });

    let max = max_points(&standings, view);

    standings
        .into_iter()
        .enumerate()
        .map(|(index, standing)| {
            let points = view.points(&standing);
            RankedStanding {
                rank: index + 1,
                ratio: ratio(points, max),
                points,
                standing,
            }
        })
        .collect()
}

fn ratio(points: u64, max: u64) -> f64 {
    if max == 0 {
        0.0
    } else {
        points as f64 / max as f64
    }
}
