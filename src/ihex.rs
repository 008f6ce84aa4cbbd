//! Intel HEX data records carrying one RGB pixel each.

use crate::errors::*;
use crate::Pixel;
use std::fmt;
use std::io::{self, Write};

/// Payload size of every data record: one byte each for R, G and B.
pub const BYTE_COUNT: u8 = 3;
pub const DATA_RECORD: u8 = 0x00;
pub const EOF_RECORD: &str = ":00000001FF";

/// Two's complement of the byte sum, so that the bytes plus the checksum
/// add up to zero mod 256.
pub fn checksum_bytes(bytes: &[u8]) -> u8 {
    let sum = bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    (!sum).wrapping_add(1)
}

/// Checksum of a record body given as hex digits, without the leading `:`
/// and without the checksum byte itself.
pub fn checksum(hex: &str) -> Result<u8> {
    Ok(checksum_bytes(&decode_hex(hex)?))
}

pub fn decode_hex(hex: &str) -> Result<Vec<u8>> {
    if let Some((index, c)) = hex.char_indices().find(|&(_, c)| !c.is_ascii_hexdigit()) {
        bail!(ErrorKind::InvalidHexDigit(c, index));
    }
    // all ascii from here on, so byte length == digit count
    if hex.len() % 2 != 0 {
        bail!(ErrorKind::OddHexLength(hex.len()));
    }
    Ok(hex
        .as_bytes()
        .chunks(2)
        .map(|pair| nibble(pair[0]) << 4 | nibble(pair[1]))
        .collect())
}

fn nibble(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => 10 + (digit - b'a'),
        _ => 10 + (digit - b'A'),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub address: u16,
    pub data: Pixel,
    pub checksum: u8,
}

impl Record {
    pub fn data(address: u16, data: Pixel) -> Result<Self> {
        let checksum = checksum(&body(address, data))?;
        Ok(Self {
            address,
            data,
            checksum,
        })
    }

    /// Reads a data record line back, with or without its line terminator.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(|c| c == '\r' || c == '\n');
        let malformed = |reason| ErrorKind::MalformedRecord(line.to_string(), reason);

        if !line.starts_with(':') {
            bail!(malformed("missing start code"));
        }
        let bytes = decode_hex(&line[1..]).chain_err(|| malformed("not hex"))?;
        if bytes.len() != 5 + BYTE_COUNT as usize {
            bail!(malformed("wrong record length"));
        }
        if bytes[0] != BYTE_COUNT {
            bail!(malformed("byte count is not 03"));
        }
        if bytes[3] != DATA_RECORD {
            bail!(malformed("not a data record"));
        }

        let expected = checksum_bytes(&bytes[..7]);
        let found = bytes[7];
        if expected != found {
            bail!(ErrorKind::ChecksumMismatch(expected, found));
        }

        Ok(Self {
            address: u16::from_be_bytes([bytes[1], bytes[2]]),
            data: Pixel {
                r: bytes[4],
                g: bytes[5],
                b: bytes[6],
            },
            checksum: found,
        })
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self)
    }
}

fn body(address: u16, data: Pixel) -> String {
    format!(
        "{:02X}{:04X}{:02X}{:02X}{:02X}{:02X}",
        BYTE_COUNT, address, DATA_RECORD, data.r, data.g, data.b
    )
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, ":{}{:02X}", body(self.address, self.data), self.checksum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(r: u8, g: u8, b: u8) -> Pixel {
        Pixel { r, g, b }
    }

    #[test]
    fn checksum_of_known_line() {
        assert_eq!(checksum("0C00000000020B11129B12000B66EAE7").unwrap(), 0xD5);
    }

    #[test]
    fn checksum_cancels_byte_sum() {
        for hex in &["", "00", "FF", "0300000012345600", "FFFFFFFFFF", "0c0000000002"] {
            let bytes = decode_hex(hex).unwrap();
            let sum = bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
            assert_eq!(sum.wrapping_add(checksum(hex).unwrap()), 0, "{}", hex);
        }
    }

    #[test]
    fn checksum_rejects_odd_length() {
        match checksum("ABC").unwrap_err().kind() {
            ErrorKind::OddHexLength(3) => {}
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn checksum_rejects_non_hex() {
        match checksum("0G").unwrap_err().kind() {
            ErrorKind::InvalidHexDigit('G', 1) => {}
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn formats_data_record() {
        let record = Record::data(0x0000, pixel(0x12, 0x34, 0x56)).unwrap();
        // 03 + 00 + 00 + 00 + 12 + 34 + 56 = 0x9F
        assert_eq!(record.to_string(), ":0300000012345661");
    }

    #[test]
    fn address_is_big_endian() {
        let record = Record::data(0x1234, pixel(0, 0, 0)).unwrap();
        assert!(record.to_string().starts_with(":03123400000000"));
    }

    #[test]
    fn formatted_line_sums_to_zero() {
        for &(address, p) in &[
            (0x0000, pixel(0, 0, 0)),
            (0x00FF, pixel(0xFF, 0xFF, 0xFF)),
            (0xABCD, pixel(0x01, 0x80, 0x7F)),
            (0xFFFF, pixel(0x12, 0x34, 0x56)),
        ] {
            let line = Record::data(address, p).unwrap().to_string();
            let bytes = decode_hex(&line[1..]).unwrap();
            let sum = bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
            assert_eq!(sum, 0, "{}", line);
        }
    }

    #[test]
    fn parse_recovers_fields() {
        let record = Record::data(0x0A0B, pixel(0xDE, 0xAD, 0x42)).unwrap();
        let mut buf = Vec::new();
        record.write_to(&mut buf).unwrap();
        let line = String::from_utf8(buf).unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(Record::parse(&line).unwrap(), record);
    }

    #[test]
    fn parse_rejects_bad_checksum() {
        match Record::parse(":0300000012345600").unwrap_err().kind() {
            ErrorKind::ChecksumMismatch(0x61, 0x00) => {}
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn parse_rejects_eof_record() {
        match Record::parse(EOF_RECORD).unwrap_err().kind() {
            ErrorKind::MalformedRecord(_, "wrong record length") => {}
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn parse_rejects_missing_start_code() {
        assert!(Record::parse("0300000012345661").is_err());
    }
}
