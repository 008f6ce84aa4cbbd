error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Image(::image::ImageError);
    }

    errors {
        OddHexLength(len: usize) {
            description("odd number of hex digits")
            display("hex string has odd length {}", len)
        }

        InvalidHexDigit(c: char, index: usize) {
            description("invalid hex digit")
            display("invalid hex digit {:?} at index {}", c, index)
        }

        MalformedRecord(line: String, reason: &'static str) {
            description("malformed record")
            display("malformed record {:?}: {}", line, reason)
        }

        ChecksumMismatch(expected: u8, found: u8) {
            description("record checksum mismatch")
            display("checksum mismatch: expected {:02X}, found {:02X}", expected, found)
        }

        AddressOverflow(address: u32) {
            description("address does not fit in 16 bits")
            display("address {:#X} does not fit in 16 bits", address)
        }

        RowTooWide(row: usize, width: usize) {
            description("row wider than 256 pixels")
            display("row {} has {} pixels, at most 256 fit in a row", row, width)
        }
    }
}
