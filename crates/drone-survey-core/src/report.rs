use serde::{Deserialize, Serialize};

use crate::grid::Coord;

fn default_schema_version() -> u32 {
    1
}

/// How a run ended. Both outcomes are normal terminations, not errors.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    StepsExhausted,
    TimeExpired,
}

/// Result of one survey run: the path walked and the score collected,
/// partial if a budget tripped first.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub path: Vec<Coord>,
    pub score: u64,
    pub steps_completed: usize,
    pub elapsed_ms: u64,
    pub outcome: RunOutcome,
    pub unique_planes_visited: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_version_defaults_when_absent() {
        let json = r#"{
            "path": [{"x": 0, "y": 0}],
            "score": 5,
            "steps_completed": 1,
            "elapsed_ms": 2,
            "outcome": "steps_exhausted",
            "unique_planes_visited": 1
        }"#;
        let report: RunReport = serde_json::from_str(json).expect("report should parse");
        assert_eq!(report.schema_version, 1);
        assert_eq!(report.outcome, RunOutcome::StepsExhausted);
        assert_eq!(report.path, vec![Coord::new(0, 0)]);
    }
}
