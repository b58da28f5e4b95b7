//! Line decoding for the sensor stream.
//!
//! Line format:
//! - POTENTIOMETER: base-10 integer, 0-4095 (12-bit ADC reading)
//! - SEPARATOR: the literal byte `x`
//! - BUTTON: base-10 integer, 0 while the button is held down
//! - TERMINATOR: `\n` (a preceding `\r` is tolerated)

use heapless::Vec;

/// Lowest potentiometer reading
pub const POT_MIN: i32 = 0;

/// Highest potentiometer reading (12-bit ADC)
pub const POT_MAX: i32 = 4095;

/// Button field value while the button is pressed
pub const BUTTON_PRESSED: i32 = 0;

/// Maximum accepted line length in bytes, excluding the terminator
pub const MAX_LINE_LEN: usize = 32;

/// Separator between the two fields
pub const FIELD_SEPARATOR: char = 'x';

/// Line terminator
pub const LINE_TERMINATOR: u8 = b'\n';

/// Errors that can occur while decoding a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// No `x` between the two fields
    MissingSeparator,
    /// A field is not a base-10 integer
    InvalidNumber,
    /// Line exceeded [`MAX_LINE_LEN`] and was discarded
    LineTooLong,
    /// Line bytes are not valid UTF-8
    InvalidUtf8,
}

/// One decoded line, before it is stamped with an arrival time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Raw potentiometer value
    pub potentiometer: i32,
    /// Raw button value
    pub button: i32,
}

impl Reading {
    /// Parse a trimmed line of the form `<int>x<int>`
    ///
    /// Splits on the first `x`; surrounding whitespace on either field is
    /// ignored.
    pub fn parse(line: &str) -> Result<Self, LineError> {
        let (pot, button) = line
            .split_once(FIELD_SEPARATOR)
            .ok_or(LineError::MissingSeparator)?;

        let potentiometer = pot
            .trim()
            .parse::<i32>()
            .map_err(|_| LineError::InvalidNumber)?;
        let button = button
            .trim()
            .parse::<i32>()
            .map_err(|_| LineError::InvalidNumber)?;

        Ok(Self {
            potentiometer,
            button,
        })
    }

    /// Returns true if the button field reads as pressed
    pub fn is_pressed(&self) -> bool {
        self.button == BUTTON_PRESSED
    }

    /// Attach the monotonic arrival time (ms)
    pub fn stamp(self, at_ms: u64) -> SensorSample {
        SensorSample {
            potentiometer: self.potentiometer,
            button: self.button,
            at_ms,
        }
    }
}

/// A reading with its arrival timestamp
///
/// Each sample supersedes the previous one; no history is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSample {
    /// Raw potentiometer value
    pub potentiometer: i32,
    /// Raw button value
    pub button: i32,
    /// Monotonic arrival time in milliseconds
    pub at_ms: u64,
}

impl SensorSample {
    /// Returns true if the button field reads as pressed
    pub fn is_pressed(&self) -> bool {
        self.button == BUTTON_PRESSED
    }
}

/// Incremental decoder turning a byte stream into readings
#[derive(Debug, Clone, Default)]
pub struct LineDecoder {
    buffer: Vec<u8, MAX_LINE_LEN>,
    /// Current line overflowed; drop bytes until the next terminator
    overflowed: bool,
}

impl LineDecoder {
    /// Create a new decoder
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Discard any partial line
    fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Number of bytes held for the current partial line
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte to the decoder
    ///
    /// Returns `Ok(Some(reading))` when a line completes, `Ok(None)` when more
    /// bytes are needed or the line was blank, or `Err` when the completed
    /// line is malformed. The decoder is ready for the next line either way.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Reading>, LineError> {
        if byte == LINE_TERMINATOR {
            if self.overflowed {
                self.reset();
                return Err(LineError::LineTooLong);
            }
            let result = Self::parse_line(&self.buffer);
            self.buffer.clear();
            return result;
        }

        if !self.overflowed && self.buffer.push(byte).is_err() {
            self.overflowed = true;
        }
        Ok(None)
    }

    /// Decode every line completed by `bytes`
    ///
    /// A trailing partial line stays buffered for the next call.
    pub fn decode<'a>(&'a mut self, bytes: &'a [u8]) -> Decode<'a> {
        Decode {
            decoder: self,
            bytes: bytes.iter(),
        }
    }

    fn parse_line(bytes: &[u8]) -> Result<Option<Reading>, LineError> {
        let text = core::str::from_utf8(bytes).map_err(|_| LineError::InvalidUtf8)?;
        let line = text.trim();
        if line.is_empty() {
            return Ok(None);
        }
        Reading::parse(line).map(Some)
    }
}

/// Iterator over the lines completed by one chunk of bytes
pub struct Decode<'a> {
    decoder: &'a mut LineDecoder,
    bytes: core::slice::Iter<'a, u8>,
}

impl Iterator for Decode<'_> {
    type Item = Result<Reading, LineError>;

    fn next(&mut self) -> Option<Self::Item> {
        for &byte in self.bytes.by_ref() {
            match self.decoder.feed(byte) {
                Ok(Some(reading)) => return Some(Ok(reading)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}
