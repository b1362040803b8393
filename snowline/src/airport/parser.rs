//! Parser for legacy runways in X-Plane's apt.dat format.
//!
//! The apt.dat format is a line-based text format where:
//! - Line codes `1`, `16` and `17` start an airport, seaplane base or heliport
//! - Line code `100` defines a land runway with both of its ends
//! - Line code `99` ends the file
//!
//! Only runways with the transparent surface are kept; airports without
//! any are skipped.

use std::io::{BufRead, BufReader, Read};

use super::{Runway, TRANSPARENT_SURFACE};
use crate::coord::LLPos;

/// Error type for apt.dat parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An airport header together with its legacy runways.
#[derive(Debug, Clone, PartialEq)]
pub struct AirportRecord {
    /// ICAO code followed by the airport name.
    pub name: String,
    pub runways: Vec<Runway>,
}

/// Parser for X-Plane apt.dat format.
pub struct AptDatParser;

impl AptDatParser {
    /// Parse airports with legacy runways from an apt.dat reader.
    ///
    /// This is a streaming parser that yields airports as they are parsed.
    pub fn parse<R: Read>(reader: R) -> impl Iterator<Item = Result<AirportRecord, ParseError>> {
        AptDatIterator::new(BufReader::new(reader))
    }

    /// Parse all airports with legacy runways into a vector.
    pub fn parse_all<R: Read>(reader: R) -> Result<Vec<AirportRecord>, ParseError> {
        Self::parse(reader).collect()
    }
}

/// Iterator that yields airports from an apt.dat file.
struct AptDatIterator<R: BufRead> {
    reader: R,
    line_buffer: String,
    line_number: usize,
    // Current airport being parsed
    current_name: Option<String>,
    current_runways: Vec<Runway>,
}

impl<R: BufRead> AptDatIterator<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line_buffer: String::new(),
            line_number: 0,
            current_name: None,
            current_runways: Vec::new(),
        }
    }

    /// Finalize the current airport and return it if it has legacy runways.
    fn finalize_airport(&mut self) -> Option<AirportRecord> {
        let name = self.current_name.take();
        let runways = std::mem::take(&mut self.current_runways);
        match name {
            Some(name) if !runways.is_empty() => Some(AirportRecord { name, runways }),
            _ => None,
        }
    }

    /// Parse an airport header line (row code 1, 16 or 17).
    ///
    /// Format: `1 <elevation_ft> <deprecated> <deprecated> <ICAO> <name...>`
    fn parse_airport_header(&mut self, line: &str) {
        let name = line.split_whitespace().skip(4).collect::<Vec<_>>().join(" ");
        self.current_name = Some(name);
        self.current_runways.clear();
    }

    /// Parse a land runway line (row code 100).
    ///
    /// Format (fields by index): `2` surface code, `8` designator of end 1,
    /// `9`/`10` lat/lon of end 1, `18`/`19` lat/lon of end 2.
    fn parse_runway(&mut self, line: &str) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 20 {
            tracing::warn!(line = self.line_number, "Runway row too short, skipped");
            return;
        }

        let Ok(surface) = parts[2].parse::<u32>() else {
            tracing::warn!(line = self.line_number, surface = parts[2], "Invalid runway surface");
            return;
        };
        if surface % 100 != TRANSPARENT_SURFACE {
            return;
        }

        let end = |lat: &str, lon: &str| -> Option<LLPos> {
            LLPos::checked(lon.parse().ok()?, lat.parse().ok()?).ok()
        };
        match (end(parts[9], parts[10]), end(parts[18], parts[19])) {
            (Some(end1), Some(end2)) => {
                self.current_runways.push(Runway::new(parts[8], end1, end2));
            }
            _ => {
                tracing::warn!(
                    line = self.line_number,
                    runway = parts[8],
                    "Invalid runway coordinates, skipped"
                );
            }
        }
    }
}

impl<R: BufRead> Iterator for AptDatIterator<R> {
    type Item = Result<AirportRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line_buffer.clear();
            match self.reader.read_line(&mut self.line_buffer) {
                Ok(0) => {
                    // EOF - return any pending airport
                    return self.finalize_airport().map(Ok);
                }
                Ok(_) => {
                    self.line_number += 1;

                    // owned copy so self can be mutated while parsing
                    let line = self.line_buffer.trim().to_string();
                    let row_code = line.split_whitespace().next().unwrap_or("");

                    match row_code {
                        "1" | "16" | "17" => {
                            // New airport - finalize previous if exists
                            let previous = self.finalize_airport();
                            self.parse_airport_header(&line);
                            if let Some(airport) = previous {
                                return Some(Ok(airport));
                            }
                        }
                        "100" if self.current_name.is_some() => {
                            self.parse_runway(&line);
                        }
                        "99" => {
                            // End of file marker - finalize last airport
                            return self.finalize_airport().map(Ok);
                        }
                        _ => {
                            // Other row codes (taxiways, ATC, etc.) - ignore
                        }
                    }
                }
                Err(e) => {
                    return Some(Err(ParseError::Io(e)));
                }
            }
        }
    }
}
