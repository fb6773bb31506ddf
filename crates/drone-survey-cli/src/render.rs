use drone_survey_core::{Coord, Grid, RegenerationScorer, RunObserver, RunReport, StepSnapshot};

const COLUMN_WIDTH: usize = 5;

/// Grids wider than this are not drawn in full; the per-step window and the
/// final summary still print.
pub const FULL_GRID_PRINT_MAX: usize = 20;

fn format_cell(
    grid: &Grid,
    scorer: &RegenerationScorer,
    at: Coord,
    current_time_ms: u64,
    highlight: Coord,
) -> String {
    let value = grid
        .plane(at)
        .ok()
        .flatten()
        .and_then(|plane| scorer.score(plane, current_time_ms).ok());
    let formatted = match value {
        Some(v) => format!("{v:>width$}", width = COLUMN_WIDTH - 2),
        None => " ".repeat(COLUMN_WIDTH - 2),
    };
    if at == highlight {
        format!("[{formatted}]")
    } else {
        format!(" {formatted} ")
    }
}

/// Console observer reproducing the survey's step-by-step progress output.
pub struct ConsoleRenderer {
    show_full_grid: bool,
}

impl ConsoleRenderer {
    pub fn new(show_full_grid: bool) -> Self {
        Self { show_full_grid }
    }

    fn print_surrounding_grid(&self, snapshot: &StepSnapshot<'_>) {
        let size = snapshot.grid.size();
        let pos = snapshot.position;
        println!("Surrounding grid values:");
        for y in pos.y.saturating_sub(2)..=(pos.y + 2).min(size - 1) {
            let mut row = String::new();
            for x in pos.x.saturating_sub(2)..=(pos.x + 2).min(size - 1) {
                row.push_str(&format_cell(
                    snapshot.grid,
                    snapshot.scorer,
                    Coord::new(x, y),
                    snapshot.elapsed_ms,
                    pos,
                ));
            }
            println!("{row}");
        }
    }

    fn print_complete_grid(&self, snapshot: &StepSnapshot<'_>) {
        let size = snapshot.grid.size();
        let separator = "-".repeat(size * COLUMN_WIDTH);
        println!("\nComplete grid state:");
        println!("{separator}");
        for y in 0..size {
            let mut row = String::new();
            for x in 0..size {
                row.push_str(&format_cell(
                    snapshot.grid,
                    snapshot.scorer,
                    Coord::new(x, y),
                    snapshot.elapsed_ms,
                    snapshot.position,
                ));
            }
            println!("{row}");
        }
        println!("{separator}");
    }
}

impl RunObserver for ConsoleRenderer {
    fn run_started(&mut self, start: Coord, max_steps: usize, time_budget_ms: u64) {
        println!("Starting path at position {start}");
        println!("Maximum steps: {max_steps}, Time limit: {time_budget_ms}ms");
    }

    fn step_observed(&mut self, snapshot: &StepSnapshot<'_>) {
        println!(
            "\n--- Step: {} (Time elapsed: {}ms) ---",
            snapshot.step, snapshot.elapsed_ms
        );
        println!("Current position: {}", snapshot.position);
        println!("Plane value: {}", snapshot.plane_score);
        println!("Current score: {}", snapshot.total_score);
        self.print_surrounding_grid(snapshot);
        if self.show_full_grid {
            self.print_complete_grid(snapshot);
        }
    }

    fn move_chosen(&mut self, next: Coord) {
        println!("Moving to: {next}");
    }

    fn time_budget_exceeded(&mut self, time_budget_ms: u64, step: usize) {
        println!("Time limit of {time_budget_ms}ms reached after {step} steps");
    }

    fn run_completed(&mut self, elapsed_ms: u64) {
        println!("\nPath finding completed in {elapsed_ms}ms");
    }
}

/// Final summary: the path, the score, coverage, and (for small grids) a
/// drawing of base values with the path's planes bracketed.
pub fn print_summary(report: &RunReport, grid: &Grid, show_full_grid: bool) {
    let path_display: Vec<String> = report.path.iter().map(|c| c.to_string()).collect();
    println!("Optimal path: {}", path_display.join(" -> "));
    println!("Total score: {}", report.score);

    let total_planes = grid.size() * grid.size();
    let coverage = report.unique_planes_visited as f64 / total_planes as f64 * 100.0;
    println!(
        "Total unique planes visited: {} out of {} ({:.2}%)",
        report.unique_planes_visited, total_planes, coverage
    );

    if grid.size() > FULL_GRID_PRINT_MAX && !show_full_grid {
        return;
    }
    for y in 0..grid.size() {
        let mut row = String::new();
        for x in 0..grid.size() {
            let at = Coord::new(x, y);
            let formatted = match grid.plane(at).ok().flatten() {
                Some(plane) => format!("{:>2}", plane.base_value()),
                None => "  ".to_string(),
            };
            if report.path.contains(&at) {
                row.push_str(&format!("[{formatted}] "));
            } else {
                row.push_str(&format!(" {formatted}  "));
            }
        }
        println!("{row}");
    }
}
