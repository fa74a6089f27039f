use std::io::Cursor;

use calamine::{Data, DataType, Reader, Xlsx};

use crate::error::ParseError;
use crate::pipeline::parse::{Cell, Columns, Parser};
use crate::types::log::FitnessRecord;

pub struct XlsxParser;

impl Parser for XlsxParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<FitnessRecord>, ParseError> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| ParseError::InvalidXlsx(format!("Failed to open workbook: {}", e)))?;

        // Only the first sheet is read.
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ParseError::InvalidXlsx("Workbook has no sheets".to_string()))?
            .map_err(|e| ParseError::InvalidXlsx(e.to_string()))?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .ok_or(ParseError::EmptyFile)?
            .iter()
            .map(|c| c.to_string())
            .collect();
        let columns = Columns::resolve(&headers)?;

        let mut records = Vec::new();
        let mut row_number = 0;
        for row in rows {
            if row.iter().all(|c| matches!(c, Data::Empty)) {
                continue;
            }
            row_number += 1;
            let record = columns.read_record(row_number, |col| {
                row.get(col).map(to_cell).unwrap_or(Cell::Empty)
            })?;
            records.push(record);
        }

        Ok(records)
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Float(value) => Cell::Number(*value),
        Data::String(text) | Data::DateTimeIso(text) => Cell::Text(text.clone()),
        Data::DateTime(_) => data
            .as_date()
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::Text(data.to_string())),
        other => Cell::Text(other.to_string()),
    }
}
