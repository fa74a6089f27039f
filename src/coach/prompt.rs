use crate::types::log::{
    ScoredRecord, BENCH_COLUMN, DATE_COLUMN, DEADLIFT_COLUMN, FAT_COLUMN, HEIGHT_COLUMN,
    SQUAT_COLUMN, WEIGHT_COLUMN,
};

const TABLE_HEADERS: [&str; 10] = [
    DATE_COLUMN,
    WEIGHT_COLUMN,
    HEIGHT_COLUMN,
    FAT_COLUMN,
    BENCH_COLUMN,
    SQUAT_COLUMN,
    DEADLIFT_COLUMN,
    "BMI",
    "Strength Index",
    "Progress Score",
];

pub fn commentary_prompt(latest: &ScoredRecord) -> String {
    let r = &latest.record;
    format!(
        "You are a certified personal trainer. Analyze the latest fitness metrics:
- Weight: {} kg
- Height: {} cm
- BMI: {}
- Fat %: {}
- Bench Press: {} kg
- Squat: {} kg
- Deadlift: {} kg

Give insights, workout suggestions, and nutrition tips.",
        r.weight_kg, r.height_cm, latest.bmi, r.fat_pct, r.bench_1rm, r.squat_1rm, r.deadlift_1rm
    )
}

pub fn question_prompt(question: &str, recent: &[ScoredRecord]) -> String {
    format!(
        "User Question: {}\n\nRecent Data:\n{}",
        question,
        render_table(recent)
    )
}

/// Right-aligned plain-text table with a header row and no index column.
pub fn render_table(records: &[ScoredRecord]) -> String {
    let rows: Vec<[String; 10]> = records.iter().map(table_row).collect();

    let widths: Vec<usize> = TABLE_HEADERS
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .map(|row| row[col].len())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_line(TABLE_HEADERS.iter().copied(), &widths));
    for row in &rows {
        lines.push(format_line(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
}

fn table_row(scored: &ScoredRecord) -> [String; 10] {
    let r = &scored.record;
    [
        r.date.format("%Y-%m-%d").to_string(),
        format_number(r.weight_kg),
        format_number(r.height_cm),
        format_number(r.fat_pct),
        format_number(r.bench_1rm),
        format_number(r.squat_1rm),
        format_number(r.deadlift_1rm),
        format_number(scored.bmi),
        format_number(scored.strength_index),
        format_number(scored.progress_score),
    ]
}

/// Up to six decimals, trailing zeros dropped.
fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let text = format!("{:.6}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
