//! Reads a converted file back and checks every record in it.

use crate::errors::*;
use crate::ihex::{Record, EOF_RECORD};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub fn verify_file(path: &Path) -> Result<usize> {
    let file = File::open(path).chain_err(|| format!("Could not open {}", path.display()))?;
    verify(BufReader::new(file))
}

/// Returns the number of data records. Every line but the last must be a
/// valid data record, and the last must be the EOF record.
pub fn verify<R: BufRead>(input: R) -> Result<usize> {
    let mut records = 0;
    let mut last = None;
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if let Some(prev) = last.replace(line) {
            Record::parse(&prev).chain_err(|| format!("Bad record on line {}", index))?;
            records += 1;
        }
    }

    match last {
        Some(ref line) if line == EOF_RECORD => Ok(records),
        Some(line) => Err(ErrorKind::MalformedRecord(line, "expected EOF record").into()),
        None => Err(ErrorKind::MalformedRecord(String::new(), "empty file").into()),
    }
}
