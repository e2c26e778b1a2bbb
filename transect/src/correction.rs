//! Where corrected first-shot locations come from.

use crate::{shot::Position, Transect, TransectError, C};
use serde::Deserialize;
use std::{
    collections::HashMap,
    io::{BufRead, Read, Write},
};

/// Supplies the true location of a transect's first shot.
pub trait CorrectionSource {
    fn target(&mut self, transect: &Transect) -> Result<Position, TransectError>;
}

impl<F> CorrectionSource for F
where
    F: FnMut(&Transect) -> Result<Position, TransectError>,
{
    fn target(&mut self, transect: &Transect) -> Result<Position, TransectError> {
        self(transect)
    }
}

/// Asks an operator for each coordinate, one value per line.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, axis: &str, label: char, station: &str) -> Result<C, TransectError> {
        let mut line = String::new();
        loop {
            write!(
                self.output,
                "Enter corrected {axis} ({label}) for first point of station '{station}': "
            )?;
            self.output.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(TransectError::Correction(format!(
                    "input ended before {axis} for station '{station}'"
                )));
            }
            match line.trim().parse::<C>() {
                Ok(val) if val.is_finite() => return Ok(val),
                _ => writeln!(self.output, "'{}' is not a number", line.trim())?,
            }
        }
    }
}

impl<R: BufRead, W: Write> CorrectionSource for Prompt<R, W> {
    fn target(&mut self, transect: &Transect) -> Result<Position, TransectError> {
        let station = transect.id();
        Ok(Position {
            easting: self.ask("easting", 'x', station)?,
            northing: self.ask("northing", 'y', station)?,
            elevation: self.ask("elevation", 'z', station)?,
        })
    }
}

/// Known first-shot locations keyed by station id.
///
/// Read from a CSV with the columns `station,easting,northing,elevation`.
#[derive(Debug, Clone, Default)]
pub struct CorrectionTable {
    targets: HashMap<String, Position>,
}

#[derive(Deserialize)]
struct TableRow {
    station: String,
    easting: C,
    northing: C,
    elevation: C,
}

impl CorrectionTable {
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, TransectError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
        let mut targets = HashMap::new();
        for row in rdr.deserialize() {
            let TableRow {
                station,
                easting,
                northing,
                elevation,
            } = row?;
            if targets
                .insert(station.clone(), Position::new(easting, northing, elevation))
                .is_some()
            {
                return Err(TransectError::DuplicateStation(station));
            }
        }
        Ok(Self { targets })
    }

    pub fn insert(&mut self, station: impl Into<String>, target: Position) {
        self.targets.insert(station.into(), target);
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl CorrectionSource for CorrectionTable {
    fn target(&mut self, transect: &Transect) -> Result<Position, TransectError> {
        self.targets.get(transect.id()).copied().ok_or_else(|| {
            TransectError::Correction(format!("no correction for station '{}'", transect.id()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CorrectionSource, CorrectionTable, Prompt};
    use crate::{records::parse, shot::Position, Transect, TransectError};
    use std::io::Cursor;

    fn station(id: &str) -> Transect {
        let text = format!("{id},0,0,0,1.5\n\n1,10,20,30,1.8\n2,11,20,30,1.8\n3,12,20,30,1.8\n");
        Transect::from(parse(&text).unwrap().remove(0))
    }

    #[test]
    fn test_prompt() {
        let input = Cursor::new("512000.5\nabc\n6250000\n  42.25 \n");
        let mut output = Vec::new();
        let target = Prompt::new(input, &mut output)
            .target(&station("XS1"))
            .unwrap();
        assert_eq!(target, Position::new(512_000.5, 6_250_000.0, 42.25));
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Enter corrected easting (x) for first point of station 'XS1'"));
        assert!(transcript.contains("'abc' is not a number"));
    }

    #[test]
    fn test_prompt_eof() {
        let mut prompt = Prompt::new(Cursor::new("1.0\n"), std::io::sink());
        assert!(matches!(
            prompt.target(&station("XS1")),
            Err(TransectError::Correction(_))
        ));
    }

    #[test]
    fn test_table() {
        let csv = "station, easting, northing, elevation\nXS1,1,2,3\nXS2,4,5,6\n";
        let mut table = CorrectionTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.target(&station("XS2")).unwrap(),
            Position::new(4.0, 5.0, 6.0)
        );
        assert!(matches!(
            table.target(&station("XS3")),
            Err(TransectError::Correction(_))
        ));
    }

    #[test]
    fn test_table_duplicate() {
        let csv = "station,easting,northing,elevation\nXS1,1,2,3\nXS1,4,5,6\n";
        assert!(matches!(
            CorrectionTable::from_reader(csv.as_bytes()),
            Err(TransectError::DuplicateStation(id)) if id == "XS1"
        ));
    }

    #[test]
    fn test_closure_source() {
        let mut source = |_: &Transect| -> Result<Position, TransectError> {
            Ok(Position::new(0.0, 0.0, 0.0))
        };
        assert!(source.target(&station("XS1")).is_ok());
    }
}
