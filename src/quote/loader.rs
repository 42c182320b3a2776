//! Load batch quote requests from CSV
//!
//! Expected columns: `reference,headcount,sector,ip2,ip3,ip4,deces,guarantee`

use super::{ClaimsHistory, QuoteRequest};
use csv::Reader;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One row of a batch quote file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuoteRow {
    pub reference: String,
    pub headcount: u32,
    pub sector: String,
    #[serde(default)]
    pub ip2: u32,
    #[serde(default)]
    pub ip3: u32,
    #[serde(default)]
    pub ip4: u32,
    #[serde(default)]
    pub deces: u32,
    pub guarantee: f64,
}

impl QuoteRow {
    /// The row as an unvalidated quote request
    pub fn to_request(&self) -> QuoteRequest {
        QuoteRequest {
            headcount: self.headcount,
            sector: self.sector.clone(),
            claims: ClaimsHistory {
                class2: self.ip2,
                class3: self.ip3,
                class4: self.ip4,
                fatality: self.deces,
            },
            guarantee_amount: self.guarantee,
            broker_code: None,
        }
    }
}

/// Load all quote rows from a CSV file
pub fn load_quote_rows<P: AsRef<Path>>(path: P) -> Result<Vec<QuoteRow>, csv::Error> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load quote rows from any reader (e.g., string buffer, request body)
pub fn load_quote_rows_from_reader<R: Read>(reader: R) -> Result<Vec<QuoteRow>, csv::Error> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<R: Read>(mut reader: Reader<R>) -> Result<Vec<QuoteRow>, csv::Error> {
    reader.deserialize().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::quote::validate_quote_request;

    const SAMPLE: &str = "\
reference,headcount,sector,ip2,ip3,ip4,deces,guarantee
Q-001,50,C,0,0,0,0,50000
Q-002,100,D,0,1,0,0,75000
";

    #[test]
    fn test_load_rows() {
        let rows = load_quote_rows_from_reader(SAMPLE.as_bytes()).expect("Failed to load rows");
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].reference, "Q-001");
        assert_eq!(rows[1].headcount, 100);

        let request = rows[1].to_request();
        assert_eq!(request.sector, "D");
        assert!(request.claims.has_antecedents());
        assert_eq!(request.guarantee_amount, 75_000.0);
        assert!(request.broker_code.is_none());
    }

    #[test]
    fn test_out_of_domain_rows_fail_validation() {
        let data = "\
reference,headcount,sector,ip2,ip3,ip4,deces,guarantee
Q-1,50,B,0,0,0,0,25000
Q-2,5,c,0,0,0,0,12345
Q-3,50,c,0,0,0,0,50000
";
        let rows = load_quote_rows_from_reader(data.as_bytes()).unwrap();
        let results: Vec<_> = rows.iter().map(|row| validate_quote_request(&row.to_request())).collect();

        assert_eq!(results[0], Err(ValidationError::ExcludedSector("B".into())));
        assert_eq!(results[1], Err(ValidationError::HeadcountOutOfRange(5)));
        assert_eq!(results[2].as_ref().map(|input| input.sector.as_str()), Ok("C"));
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let data = "reference,headcount,sector,ip2,ip3,ip4,deces,guarantee\nQ-1,lots,C,0,0,0,0,5000\n";
        assert!(load_quote_rows_from_reader(data.as_bytes()).is_err());
    }
}
