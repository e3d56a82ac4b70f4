//! Load batch requests from CSV
//!
//! Expected header: `coupon,years,face,mode,value` with `mode` one of
//! `price` or `yield`.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use super::BatchRequest;
use crate::error::BatchResult;

fn read_all<R: Read>(mut reader: csv::Reader<R>) -> BatchResult<Vec<BatchRequest>> {
    let mut requests = Vec::new();
    for result in reader.deserialize() {
        let request: BatchRequest = result?;
        requests.push(request);
    }
    Ok(requests)
}

/// Load all requests from a CSV file
pub fn load_requests<P: AsRef<Path>>(path: P) -> BatchResult<Vec<BatchRequest>> {
    let reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    read_all(reader)
}

/// Load requests from any reader (e.g., stdin, string buffer)
pub fn load_requests_from_reader<R: Read>(reader: R) -> BatchResult<Vec<BatchRequest>> {
    read_all(ReaderBuilder::new().trim(Trim::All).from_reader(reader))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::CalcMode;
    use crate::error::BatchError;

    #[test]
    fn test_load_from_reader() {
        let data = "coupon,years,face,mode,value\n0.10,5,1000,price,0.15\n0.10, 5, 1000, yield, 832.4\n";
        let requests = load_requests_from_reader(data.as_bytes()).unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].mode, CalcMode::Price);
        assert_eq!(requests[0].value, 0.15);
        assert_eq!(requests[1].mode, CalcMode::Yield);
        assert_eq!(requests[1].years, 5);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let data = "coupon,years,face,mode,value\n0.10,5,1000,duration,0.15\n";
        let err = load_requests_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, BatchError::Csv(_)));
    }

    #[test]
    fn test_fractional_years_rejected() {
        let data = "coupon,years,face,mode,value\n0.10,2.5,1000,price,0.15\n";
        assert!(load_requests_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_years_beyond_u16_rejected() {
        let data = "coupon,years,face,mode,value\n0.10,4294967295,1000,price,0.05\n";
        let err = load_requests_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, BatchError::Csv(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_requests("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, BatchError::Csv(_)));
    }
}
