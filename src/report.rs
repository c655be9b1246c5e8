use itertools::Itertools;
use serde::Serialize;

use crate::catalog::{Catalog, Resources};
use crate::optimizer::ScoredCombination;

const TOTALS_HEADER: &str = "Totals (manpower, ammo, food, parts)";
const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub tasks: Vec<String>,
    pub totals: Resources,
    pub score: f64,
}

impl Row {
    pub fn new(catalog: &Catalog, scored: &ScoredCombination) -> Self {
        Self {
            tasks: scored.tasks(catalog).map(|task| task.to_string()).collect(),
            totals: scored.totals,
            score: scored.score,
        }
    }

    pub fn totals_text(&self) -> String {
        format_totals(&self.totals)
    }
}

pub fn format_totals(totals: &Resources) -> String {
    format!(
        "{:.1}, {:.1}, {:.1}, {:.1}",
        totals.manpower, totals.ammo, totals.food, totals.parts
    )
}

pub fn rows(catalog: &Catalog, results: &[ScoredCombination]) -> Vec<Row> {
    results.iter().map(|scored| Row::new(catalog, scored)).collect()
}

/// One line per combination, best first, with a header naming each task slot.
pub fn render_table(rows: &[Row], subset_size: usize) -> String {
    if rows.is_empty() {
        return "No combinations to show.\n".to_owned();
    }

    let header: Vec<String> = (1..=subset_size)
        .map(|slot| format!("Task {slot}"))
        .chain(std::iter::once(TOTALS_HEADER.to_owned()))
        .collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            row.tasks
                .iter()
                .cloned()
                .chain(std::iter::once(row.totals_text()))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|column| {
            std::iter::once(&header)
                .chain(&body)
                .filter_map(|cells| cells.get(column))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    std::iter::once(&header)
        .chain(&body)
        .map(|cells| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .join(COLUMN_GAP)
                .trim_end()
                .to_owned()
                + "\n"
        })
        .collect()
}

pub fn render_json(rows: &[Row]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}
