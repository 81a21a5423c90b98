//! Tabular rendering of step counters for strategy comparisons.

use prettytable::{Cell, Row, Table};

use crate::solver::solution::StepCounters;

/// Renders one row per named counter set, sorted by ascending total.
pub fn render_steps_table(rows: &[(String, StepCounters)]) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Strategy"),
        Cell::new("Simplifying"),
        Cell::new("Assigning"),
        Cell::new("Backtracking"),
        Cell::new("Total"),
    ]));

    let mut sorted_rows: Vec<&(String, StepCounters)> = rows.iter().collect();
    sorted_rows.sort_by_key(|(_, counters)| counters.total_steps);

    for (name, counters) in sorted_rows {
        table.add_row(Row::new(vec![
            Cell::new(name),
            Cell::new(&counters.simplifying_steps.to_string()),
            Cell::new(&counters.assigning_steps.to_string()),
            Cell::new(&counters.backtracking_steps.to_string()),
            Cell::new(&counters.total_steps.to_string()),
        ]));
    }

    table.to_string()
}
