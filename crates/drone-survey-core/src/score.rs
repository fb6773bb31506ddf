use std::{error::Error, fmt};

use crate::constants;
use crate::grid::Plane;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    InvalidRegenerationPeriod,
    QueryBeforeWatermark { query_ms: u64, last_visited_ms: u64 },
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::InvalidRegenerationPeriod => {
                write!(f, "regeneration period must be a positive integer")
            }
            ScoreError::QueryBeforeWatermark {
                query_ms,
                last_visited_ms,
            } => write!(
                f,
                "query time ({query_ms}ms) cannot be earlier than the plane's last visited time ({last_visited_ms}ms)"
            ),
        }
    }
}

impl Error for ScoreError {}

/// Computes a plane's instantaneous collectible value.
///
/// A never-visited plane is worth its full base value. A visited plane is
/// worth nothing at the visit instant and ramps linearly back to full value
/// over the regeneration period, truncating toward zero.
#[derive(Clone, Debug)]
pub struct RegenerationScorer {
    regeneration_period_ms: u64,
}

impl Default for RegenerationScorer {
    fn default() -> Self {
        Self {
            regeneration_period_ms: constants::REGENERATION_PERIOD_MS,
        }
    }
}

impl RegenerationScorer {
    pub fn try_new(regeneration_period_ms: u64) -> Result<Self, ScoreError> {
        if regeneration_period_ms == 0 {
            return Err(ScoreError::InvalidRegenerationPeriod);
        }
        Ok(Self {
            regeneration_period_ms,
        })
    }

    pub fn regeneration_period_ms(&self) -> u64 {
        self.regeneration_period_ms
    }

    /// Score `plane` at `query_ms`. Pure: no state is touched.
    ///
    /// Querying earlier than the plane's watermark models a question about
    /// the past and is rejected rather than clamped.
    pub fn score(&self, plane: &Plane, query_ms: u64) -> Result<u64, ScoreError> {
        if let Some(last) = plane.last_visited() {
            if query_ms < last {
                return Err(ScoreError::QueryBeforeWatermark {
                    query_ms,
                    last_visited_ms: last,
                });
            }
        }

        if plane.base_value() == 0 {
            return Ok(0);
        }

        let Some(last) = plane.last_visited() else {
            return Ok(u64::from(plane.base_value()));
        };

        let since_visit = query_ms - last;
        if since_visit == 0 {
            return Ok(0);
        }

        // Linear ramp clamped at the full base value; integer division
        // truncates toward zero.
        let capped = since_visit.min(self.regeneration_period_ms);
        Ok(u64::from(plane.base_value()) * capped / self.regeneration_period_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visited_plane(base_value: u32, visited_at: u64) -> Plane {
        let mut plane = Plane::new(base_value);
        plane.visit(visited_at).unwrap();
        plane
    }

    #[test]
    fn try_new_rejects_zero_period() {
        assert!(matches!(
            RegenerationScorer::try_new(0),
            Err(ScoreError::InvalidRegenerationPeriod)
        ));
    }

    #[test]
    fn default_period_is_one_hundred_ms() {
        let scorer = RegenerationScorer::default();
        assert_eq!(scorer.regeneration_period_ms(), 100);
    }

    #[test]
    fn never_visited_plane_scores_full_base_value() {
        let scorer = RegenerationScorer::default();
        let plane = Plane::new(42);
        for t in [0, 1, 99, 100, 10_000] {
            assert_eq!(scorer.score(&plane, t).unwrap(), 42);
        }
    }

    #[test]
    fn zero_value_plane_always_scores_zero() {
        let scorer = RegenerationScorer::default();
        let plane = Plane::new(0);
        assert_eq!(scorer.score(&plane, 50).unwrap(), 0);

        let visited = visited_plane(0, 10);
        assert_eq!(scorer.score(&visited, 500).unwrap(), 0);
    }

    #[test]
    fn plane_scores_zero_at_the_visit_instant() {
        let scorer = RegenerationScorer::default();
        let plane = visited_plane(42, 30);
        assert_eq!(scorer.score(&plane, 30).unwrap(), 0);
    }

    #[test]
    fn score_ramps_linearly_and_truncates() {
        let scorer = RegenerationScorer::try_new(100).unwrap();
        let plane = visited_plane(100, 0);
        assert_eq!(scorer.score(&plane, 25).unwrap(), 25);
        assert_eq!(scorer.score(&plane, 50).unwrap(), 50);

        // 2 * 30 / 50 = 1.2, truncated to 1
        let scorer = RegenerationScorer::try_new(50).unwrap();
        let plane = visited_plane(2, 0);
        assert_eq!(scorer.score(&plane, 30).unwrap(), 1);
    }

    #[test]
    fn score_saturates_at_base_value_after_the_period() {
        let scorer = RegenerationScorer::try_new(100).unwrap();
        let plane = visited_plane(42, 10);
        assert_eq!(scorer.score(&plane, 110).unwrap(), 42);
        assert_eq!(scorer.score(&plane, 5_000).unwrap(), 42);
    }

    #[test]
    fn score_is_monotone_in_query_time() {
        let scorer = RegenerationScorer::try_new(100).unwrap();
        let plane = visited_plane(37, 20);
        let mut previous = 0;
        for t in 20..200 {
            let s = scorer.score(&plane, t).unwrap();
            assert!(s >= previous, "score regressed at t={t}");
            previous = s;
        }
        assert_eq!(previous, 37);
    }

    #[test]
    fn query_before_watermark_fails() {
        let scorer = RegenerationScorer::default();
        let plane = visited_plane(42, 50);
        assert_eq!(
            scorer.score(&plane, 49),
            Err(ScoreError::QueryBeforeWatermark {
                query_ms: 49,
                last_visited_ms: 50
            })
        );
    }
}
