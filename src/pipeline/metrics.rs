use crate::error::MetricsError;
use crate::types::log::{FitnessRecord, ScoredRecord};

/// Derives BMI, strength index and progress score for every record.
///
/// Accepts raw or already-scored records. Derived values are always
/// recomputed from the raw fields, so scoring a scored log is a no-op.
/// Order and length are preserved.
pub fn compute_fitness_metrics<R: AsRef<FitnessRecord>>(
    records: &[R],
) -> Result<Vec<ScoredRecord>, MetricsError> {
    if records.is_empty() {
        return Err(MetricsError::EmptyLog);
    }

    records
        .iter()
        .enumerate()
        .map(|(idx, record)| score(record.as_ref(), idx + 1))
        .collect()
}

fn score(record: &FitnessRecord, row: usize) -> Result<ScoredRecord, MetricsError> {
    Ok(ScoredRecord {
        record: record.clone(),
        bmi: bmi(record.weight_kg, record.height_cm).ok_or(MetricsError::DivisionByZero { row })?,
        strength_index: strength_index(record),
        progress_score: progress_score(record),
    })
}

/// `weight / (height_m)^2`. `None` when height is zero; negative heights pass through.
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if height_cm == 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m))
}

pub fn strength_index(record: &FitnessRecord) -> f64 {
    record.bench_1rm + record.squat_1rm + record.deadlift_1rm
}

// Mixes kg and percent; kept as is.
pub fn progress_score(record: &FitnessRecord) -> f64 {
    record.weight_kg - record.fat_pct
}
