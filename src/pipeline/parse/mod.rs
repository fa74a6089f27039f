mod csv;
mod xlsx;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ParseError;
use crate::types::log::{
    FileFormat, FitnessRecord, ParsedLog, BENCH_COLUMN, DATE_COLUMN, DEADLIFT_COLUMN, FAT_COLUMN,
    HEIGHT_COLUMN, SQUAT_COLUMN, WEIGHT_COLUMN,
};

pub trait Parser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<FitnessRecord>, ParseError>;
}

pub fn parse(bytes: &[u8], format: FileFormat) -> Result<ParsedLog, ParseError> {
    let records = match format {
        FileFormat::Csv => csv::CsvParser.parse(bytes)?,
        FileFormat::Xlsx => xlsx::XlsxParser.parse(bytes)?,
    };

    if records.is_empty() {
        return Err(ParseError::EmptyFile);
    }

    Ok(ParsedLog {
        records,
        file_format: format,
    })
}

/// A single cell, normalized across container formats.
enum Cell {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Empty,
}

impl Cell {
    fn number(&self, row: usize, column: &'static str) -> Result<f64, ParseError> {
        match self {
            Cell::Number(value) => Ok(*value),
            Cell::Text(text) => text.trim().parse().map_err(|_| ParseError::InvalidNumber {
                row,
                column,
                value: text.clone(),
            }),
            Cell::Date(date) => Err(ParseError::InvalidNumber {
                row,
                column,
                value: date.to_string(),
            }),
            Cell::Empty => Err(ParseError::InvalidNumber {
                row,
                column,
                value: String::new(),
            }),
        }
    }

    fn date(&self, row: usize) -> Result<NaiveDate, ParseError> {
        match self {
            Cell::Date(date) => Ok(*date),
            Cell::Text(text) => parse_date(text).ok_or_else(|| ParseError::InvalidDate {
                row,
                value: text.clone(),
            }),
            Cell::Number(value) => Err(ParseError::InvalidDate {
                row,
                value: value.to_string(),
            }),
            Cell::Empty => Err(ParseError::InvalidDate {
                row,
                value: String::new(),
            }),
        }
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Positions of the required columns within the header row.
struct Columns {
    date: usize,
    weight: usize,
    height: usize,
    fat: usize,
    bench: usize,
    squat: usize,
    deadlift: usize,
}

impl Columns {
    fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self, ParseError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.as_ref() == name)
                .ok_or(ParseError::MissingColumn(name))
        };

        Ok(Self {
            date: find(DATE_COLUMN)?,
            weight: find(WEIGHT_COLUMN)?,
            height: find(HEIGHT_COLUMN)?,
            fat: find(FAT_COLUMN)?,
            bench: find(BENCH_COLUMN)?,
            squat: find(SQUAT_COLUMN)?,
            deadlift: find(DEADLIFT_COLUMN)?,
        })
    }

    /// `row` is the 1-based data row, used only for error messages.
    fn read_record<F>(&self, row: usize, cell: F) -> Result<FitnessRecord, ParseError>
    where
        F: Fn(usize) -> Cell,
    {
        Ok(FitnessRecord {
            date: cell(self.date).date(row)?,
            weight_kg: cell(self.weight).number(row, WEIGHT_COLUMN)?,
            height_cm: cell(self.height).number(row, HEIGHT_COLUMN)?,
            fat_pct: cell(self.fat).number(row, FAT_COLUMN)?,
            bench_1rm: cell(self.bench).number(row, BENCH_COLUMN)?,
            squat_1rm: cell(self.squat).number(row, SQUAT_COLUMN)?,
            deadlift_1rm: cell(self.deadlift).number(row, DEADLIFT_COLUMN)?,
        })
    }
}
