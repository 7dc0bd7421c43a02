//! Terminal and JSON rendering of personas and batch results.
//!
//! Rendering rounds for display only; values in the report are untouched.

use serde_json::{json, Map, Value};

use crate::batch::{BatchReport, BatchWarning};
use crate::persona::{PersonaRegistry, Trait};

/// Placeholder for cells with no value.
const EMPTY_CELL: &str = "-";

// ─────────────────────────────────────────────────────────────────
// Personas
// ─────────────────────────────────────────────────────────────────

/// Registry as a table: traits first, then every metric seen, in first-seen order.
pub fn personas_table(registry: &PersonaRegistry, precision: usize) -> String {
    let mut metric_names: Vec<&str> = Vec::new();
    for persona in registry.personas() {
        for (name, _) in &persona.metrics {
            if !metric_names.contains(&name.as_str()) {
                metric_names.push(name);
            }
        }
    }

    let mut headers = vec!["Department".to_string()];
    headers.extend(Trait::all().iter().map(|t| t.display_name().to_string()));
    headers.extend(metric_names.iter().map(|n| n.to_string()));

    let rows: Vec<Vec<String>> = registry
        .personas()
        .iter()
        .map(|persona| {
            let mut row = vec![persona.department.clone()];
            row.extend(persona.traits.iter().map(|(_, v)| fixed(v, precision)));
            row.extend(metric_names.iter().map(|name| {
                persona
                    .metric(name)
                    .map(|v| fixed(v, precision))
                    .unwrap_or_else(|| EMPTY_CELL.to_string())
            }));
            row
        })
        .collect();

    format_table(&headers, &rows, 1)
}

pub fn personas_json(registry: &PersonaRegistry) -> Value {
    Value::Array(
        registry
            .personas()
            .iter()
            .map(|persona| {
                let traits: Map<String, Value> = persona
                    .traits
                    .iter()
                    .map(|(t, v)| (t.key().to_string(), json!(v)))
                    .collect();
                let metrics: Map<String, Value> = persona
                    .metrics
                    .iter()
                    .map(|(name, v)| (name.clone(), json!(v)))
                    .collect();
                json!({
                    "department": persona.department,
                    "traits": traits,
                    "metrics": metrics,
                })
            })
            .collect(),
    )
}

// ─────────────────────────────────────────────────────────────────
// Batch results
// ─────────────────────────────────────────────────────────────────

/// Result table: Candidate, Best Department, one column per department,
/// plus Message when any row is invalid.
pub fn results_table(report: &BatchReport, precision: usize) -> String {
    let show_message = report.rows().iter().any(|r| !r.is_valid());

    let mut headers = vec!["Candidate".to_string(), "Best Department".to_string()];
    headers.extend(report.departments().iter().cloned());
    if show_message {
        headers.push("Message".to_string());
    }

    let rows: Vec<Vec<String>> = report
        .rows()
        .iter()
        .map(|row| {
            let mut cells = vec![row.label.clone(), row.best_department().to_string()];
            cells.extend(report.departments().iter().map(|department| {
                row.outcome
                    .distances()
                    .and_then(|d| d.get(department))
                    .map(|v| fixed(v, precision))
                    .unwrap_or_else(|| EMPTY_CELL.to_string())
            }));
            if show_message {
                cells.push(row.message().unwrap_or_default().to_string());
            }
            cells
        })
        .collect();

    // Message stays left-aligned with the label columns.
    let mut table = format_table_with(&headers, &rows, |col| {
        col < 2 || (show_message && col == headers.len() - 1)
    });
    if rows.is_empty() {
        table.push_str("(no candidates)\n");
    }
    table
}

/// Grouped horizontal bar chart of distances for the valid rows.
///
/// Returns `None` when there is nothing to draw.
pub fn distance_chart(report: &BatchReport, width: usize, precision: usize) -> Option<String> {
    let points = report.chart_points();
    if points.is_empty() {
        return None;
    }

    let max = points.iter().map(|p| p.distance).fold(0.0_f64, f64::max);
    let label_width = points
        .iter()
        .map(|p| p.department.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::from("Match Scores for All Candidates (distance, lower is closer)\n");
    let mut current: Option<&str> = None;
    for point in &points {
        if current != Some(point.candidate.as_str()) {
            out.push_str(&format!(
                "\n{} (best: {})\n",
                point.candidate, point.best_department
            ));
            current = Some(point.candidate.as_str());
        }

        let bar_len = if max > 0.0 {
            ((point.distance / max) * width as f64).round() as usize
        } else {
            0
        };
        let marker = if point.department == point.best_department {
            '*'
        } else {
            ' '
        };
        out.push_str(&format!(
            " {} {:<lw$} |{:<bw$}| {}\n",
            marker,
            point.department,
            "#".repeat(bar_len),
            fixed(point.distance, precision),
            lw = label_width,
            bw = width,
        ));
    }

    Some(out)
}

/// One line per warning, e.g. `Warning [W001] Candidate 2: ...`.
pub fn warning_lines(warnings: &[BatchWarning]) -> String {
    warnings
        .iter()
        .map(|w| match w.candidate {
            Some(ref candidate) => format!("Warning [{}] {}: {}\n", w.code, candidate, w.message),
            None => format!("Warning [{}]: {}\n", w.code, w.message),
        })
        .collect()
}

/// Full JSON document for a batch.
pub fn results_json(report: &BatchReport) -> serde_json::Result<Value> {
    let mut value = serde_json::to_value(report)?;
    if let Value::Object(ref mut map) = value {
        map.insert(
            "chart".to_string(),
            serde_json::to_value(report.chart_points())?,
        );
    }
    Ok(value)
}

// ─────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────

fn fixed(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

/// Left-align the first `text_columns` columns, right-align the rest.
fn format_table(headers: &[String], rows: &[Vec<String>], text_columns: usize) -> String {
    format_table_with(headers, rows, |col| col < text_columns)
}

fn format_table_with(
    headers: &[String],
    rows: &[Vec<String>],
    left_aligned: impl Fn(usize) -> bool,
) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(col) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let render = |cells: &[String]| -> String {
        let line = cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(col, (cell, &w))| {
                if left_aligned(col) {
                    format!("{:<w$}", cell, w = w)
                } else {
                    format!("{:>w$}", cell, w = w)
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        format!("{}\n", line.trim_end())
    };

    let mut out = render(headers);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&render(&rule));
    for row in rows {
        out.push_str(&render(row));
    }
    out
}
