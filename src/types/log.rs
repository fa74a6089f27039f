use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DATE_COLUMN: &str = "Date";
pub const WEIGHT_COLUMN: &str = "Weight (kg)";
pub const HEIGHT_COLUMN: &str = "Height (cm)";
pub const FAT_COLUMN: &str = "Fat (%)";
pub const BENCH_COLUMN: &str = "1RM Bench Press";
pub const SQUAT_COLUMN: &str = "1RM Squat";
pub const DEADLIFT_COLUMN: &str = "1RM Deadlift";

/// One dated observation, exactly as uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessRecord {
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub fat_pct: f64,
    pub bench_1rm: f64,
    pub squat_1rm: f64,
    pub deadlift_1rm: f64,
}

impl AsRef<FitnessRecord> for FitnessRecord {
    fn as_ref(&self) -> &FitnessRecord {
        self
    }
}

/// A record with its derived metrics filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: FitnessRecord,
    pub bmi: f64,
    pub strength_index: f64,
    pub progress_score: f64,
}

impl AsRef<FitnessRecord> for ScoredRecord {
    fn as_ref(&self) -> &FitnessRecord {
        &self.record
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_lowercase().as_str() {
            "csv" => Some(FileFormat::Csv),
            "xlsx" => Some(FileFormat::Xlsx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Xlsx => "xlsx",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedLog {
    pub records: Vec<FitnessRecord>,
    pub file_format: FileFormat,
}

/// Scored records in upload order. Never empty.
#[derive(Debug, Clone, Serialize)]
pub struct FitnessLog {
    user_name: String,
    records: Vec<ScoredRecord>,
}

impl FitnessLog {
    pub fn new(user_name: impl Into<String>, records: Vec<ScoredRecord>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        Some(Self {
            user_name: user_name.into(),
            records,
        })
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn records(&self) -> &[ScoredRecord] {
        &self.records
    }

    pub fn latest(&self) -> &ScoredRecord {
        &self.records[self.records.len() - 1]
    }

    /// The last `n` records, oldest first.
    pub fn recent(&self, n: usize) -> &[ScoredRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }
}

/// Strips the upload extension from a file name to get the displayed user name.
pub fn user_name_from_filename(filename: &str) -> String {
    filename.replace(".xlsx", "").replace(".csv", "")
}
