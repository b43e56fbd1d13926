use std::io::Read;

use benefit_core::MunicipalRateTable;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ReferenceLoaderError, check_rate};

/// A single record from a municipal rate CSV file.
///
/// - `municipality`: municipality name, unique within the file
/// - `rate`: combined municipal and regional rate as a fraction
///   (e.g. 0.3393 for 33.93 %), excluding church fee
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MunicipalRateRecord {
    pub municipality: String,
    pub rate: Decimal,
}

/// Loader for municipal tax rates from CSV files.
pub struct MunicipalRateLoader;

impl MunicipalRateLoader {
    /// Parse rate records from a CSV reader. Whitespace around values is
    /// ignored.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<MunicipalRateRecord>, ReferenceLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: MunicipalRateRecord = result?;
            records.push(record);
        }

        debug!(records = records.len(), "parsed municipal rate CSV");
        Ok(records)
    }

    /// Build a rate table from parsed records.
    ///
    /// Fails on the first duplicate name or out-of-range rate.
    pub fn into_table(
        records: Vec<MunicipalRateRecord>
    ) -> Result<MunicipalRateTable, ReferenceLoaderError> {
        let mut table = MunicipalRateTable::new();

        for record in records {
            check_rate(&record.municipality, record.rate)?;
            table
                .insert(record.municipality, record.rate)
                .map_err(|dup| ReferenceLoaderError::DuplicateMunicipality(dup.0))?;
        }

        Ok(table)
    }

    /// Parse and build a table in one step.
    pub fn load<R: Read>(reader: R) -> Result<MunicipalRateTable, ReferenceLoaderError> {
        Self::into_table(Self::parse(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = "municipality,rate
Håbo,0.3393
Stockholm,0.2978
Göteborg,0.3200
";

    #[test]
    fn test_parse_csv_records() {
        let records = MunicipalRateLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            MunicipalRateRecord {
                municipality: "Håbo".to_string(),
                rate: dec!(0.3393),
            }
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let csv = "municipality , rate\n  Malmö ,  0.3280 \n";

        let records = MunicipalRateLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].municipality, "Malmö");
        assert_eq!(records[0].rate, dec!(0.3280));
    }

    #[test]
    fn test_parse_empty_csv() {
        let records =
            MunicipalRateLoader::parse("municipality,rate\n".as_bytes()).expect("Failed to parse");

        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_invalid_decimal() {
        let csv = "municipality,rate\nHåbo,abc\n";

        let err = MunicipalRateLoader::parse(csv.as_bytes()).expect_err("Should fail");

        let ReferenceLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.to_lowercase().contains("invalid"),
            "Expected 'invalid' in error, got: {}",
            msg
        );
    }

    #[test]
    fn test_parse_missing_column() {
        let csv = "municipality\nHåbo\n";

        let err = MunicipalRateLoader::parse(csv.as_bytes()).expect_err("Should fail");

        assert!(matches!(err, ReferenceLoaderError::CsvParse(_)));
    }

    #[test]
    fn test_into_table_builds_lookup() {
        let table = MunicipalRateLoader::load(TEST_CSV.as_bytes()).expect("Failed to load");

        assert_eq!(table.len(), 3);
        assert_eq!(table.rate("Stockholm"), Some(dec!(0.2978)));
    }

    #[test]
    fn test_into_table_rejects_duplicate_municipality() {
        let csv = "municipality,rate\nHåbo,0.3393\nHåbo,0.3400\n";

        let err = MunicipalRateLoader::load(csv.as_bytes()).expect_err("Should fail");

        match err {
            ReferenceLoaderError::DuplicateMunicipality(name) => assert_eq!(name, "Håbo"),
            other => panic!("expected DuplicateMunicipality, got {other:?}"),
        }
    }

    #[test]
    fn test_into_table_rejects_percentage_rate() {
        let csv = "municipality,rate\nHåbo,33.93\n";

        let err = MunicipalRateLoader::load(csv.as_bytes()).expect_err("Should fail");

        match err {
            ReferenceLoaderError::InvalidRate { name, rate } => {
                assert_eq!(name, "Håbo");
                assert_eq!(rate, dec!(33.93));
            }
            other => panic!("expected InvalidRate, got {other:?}"),
        }
    }
}
