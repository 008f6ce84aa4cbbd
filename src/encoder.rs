use crate::errors::*;
use crate::ihex::{Record, EOF_RECORD};
use crate::Pixel;
use std::io::Write;

/// Address slots per row. Rows shorter than this are padded with black.
pub const ROW_SLOTS: u32 = 256;

/// How the row index moves from one row to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// The row index doubles after each row and the offset keeps running.
    /// Since the row index starts at 0 it never moves, so every row simply
    /// continues at the next 256-slot boundary and addresses run
    /// contiguously through the whole file.
    Doubling,
    /// The row index steps by one and the offset restarts at 0, so row `k`
    /// starts at `k * 256`. Rows may not exceed 256 pixels.
    Sequential,
}

impl Default for AddressMode {
    fn default() -> Self {
        AddressMode::Doubling
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeSummary {
    pub rows: usize,
    pub pixels: usize,
    pub padding: usize,
}

impl EncodeSummary {
    pub fn records(&self) -> usize {
        self.pixels + self.padding
    }
}

pub struct Encoder<W: Write> {
    out: W,
    mode: AddressMode,
    row: u32,
    offset: u32,
    summary: EncodeSummary,
}

impl<W: Write> Encoder<W> {
    pub fn new(out: W, mode: AddressMode) -> Self {
        Self {
            out,
            mode,
            row: 0,
            offset: 0,
            summary: EncodeSummary::default(),
        }
    }

    /// Emits one record per pixel, then pads the row up to the next
    /// 256-slot boundary.
    pub fn write_row<I>(&mut self, pixels: I) -> Result<()>
    where
        I: IntoIterator<Item = Pixel>,
    {
        let row_start = self.offset;
        for pixel in pixels {
            self.emit(pixel)?;
            self.summary.pixels += 1;
        }

        let width = (self.offset - row_start) as usize;
        if self.mode == AddressMode::Sequential && width > ROW_SLOTS as usize {
            bail!(ErrorKind::RowTooWide(self.summary.rows, width));
        }

        let black = Pixel { r: 0, g: 0, b: 0 };
        while self.offset % ROW_SLOTS != 0 {
            self.emit(black)?;
            self.summary.padding += 1;
        }

        debug!(
            "row {}: {} pixels, next address {:#06X}",
            self.summary.rows,
            width,
            self.address()
        );
        self.summary.rows += 1;
        self.advance_row();
        Ok(())
    }

    pub fn write_rows<R, I>(&mut self, rows: R) -> Result<()>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = Pixel>,
    {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    /// Writes the EOF record and flushes. Dropping the encoder instead
    /// still closes the writer, but leaves the file without EOF.
    pub fn finish(mut self) -> Result<(W, EncodeSummary)> {
        self.out.write_all(EOF_RECORD.as_bytes())?;
        self.out.flush()?;
        Ok((self.out, self.summary))
    }

    fn emit(&mut self, pixel: Pixel) -> Result<()> {
        let address = self.address();
        if address > u32::from(u16::MAX) {
            bail!(ErrorKind::AddressOverflow(address));
        }
        Record::data(address as u16, pixel)?.write_to(&mut self.out)?;
        self.offset += 1;
        Ok(())
    }

    fn address(&self) -> u32 {
        self.row * ROW_SLOTS + self.offset
    }

    fn advance_row(&mut self) {
        match self.mode {
            AddressMode::Doubling => self.row += self.row,
            AddressMode::Sequential => {
                self.row += 1;
                self.offset = 0;
            }
        }
    }
}
