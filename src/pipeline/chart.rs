use crate::types::chart::{ChartData, ChartKind, Series};
use crate::types::log::{
    FitnessLog, ScoredRecord, BENCH_COLUMN, DEADLIFT_COLUMN, FAT_COLUMN, SQUAT_COLUMN,
    WEIGHT_COLUMN,
};

/// Pulls the series for `kind` out of the log. X labels are record dates in upload order.
pub fn prepare(log: &FitnessLog, kind: ChartKind) -> ChartData {
    let records = log.records();
    let labels = records
        .iter()
        .map(|r| r.record.date.format("%Y-%m-%d").to_string())
        .collect();

    let series = match kind {
        ChartKind::Progress => vec![
            series(WEIGHT_COLUMN, records, |r| r.record.weight_kg),
            series(FAT_COLUMN, records, |r| r.record.fat_pct),
            series("BMI", records, |r| r.bmi),
        ],
        ChartKind::Strength => vec![
            series(BENCH_COLUMN, records, |r| r.record.bench_1rm),
            series(SQUAT_COLUMN, records, |r| r.record.squat_1rm),
            series(DEADLIFT_COLUMN, records, |r| r.record.deadlift_1rm),
        ],
    };

    ChartData {
        kind,
        labels,
        series,
    }
}

fn series(name: &'static str, records: &[ScoredRecord], value: impl Fn(&ScoredRecord) -> f64) -> Series {
    Series {
        name,
        values: records.iter().map(value).collect(),
    }
}
