use crate::error::ParseError;
use crate::pipeline::parse::{Cell, Columns, Parser};
use crate::types::log::FitnessRecord;

pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<FitnessRecord>, ParseError> {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ParseError::InvalidCsv(e.to_string()))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        let columns = Columns::resolve(&headers)?;

        let mut records = Vec::new();
        let mut row_number = 0;
        for row in reader.records() {
            let row = row.map_err(|e| ParseError::InvalidCsv(e.to_string()))?;
            if row.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            row_number += 1;
            let record = columns.read_record(row_number, |col| match row.get(col) {
                Some(text) if !text.trim().is_empty() => Cell::Text(text.to_string()),
                _ => Cell::Empty,
            })?;
            records.push(record);
        }

        Ok(records)
    }
}
