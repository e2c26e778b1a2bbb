//! Total-station export file parser.
//!
//! An export is a sequence of blocks separated by blank lines. Each
//! station is a short header block (the instrument setup) followed by
//! a data block of shots, one per row:
//!
//! ```text
//! STN1,1000.000,5000.000,100.000,1.550
//!
//! 1,1001.000,5001.000,99.870,1.800
//! 2,1002.000,5002.000,99.100,1.800
//! 3,1003.000,5003.000,98.650,1.800
//! ```
//!
//! Any block with more than [`HEADER_MAX_ROWS`] rows is a data block;
//! the block right before it is its header, and the last row of that
//! block (the line immediately preceding the shots) is the station
//! setup.

use crate::{
    shot::{Header, Reading, SurveyPoint},
    TransectError,
};

/// Blocks with at most this many rows are headers.
pub const HEADER_MAX_ROWS: usize = 2;

/// Number of leading fields used from each header and data row.
pub const FIELDS: usize = 5;

/// One station's header and shots, as read from the export.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub header: Header,
    pub shots: Vec<SurveyPoint>,
    /// Source line of the first shot.
    pub line: usize,
}

/// Parses every station in `text`, failing on the first malformed
/// block.
pub fn parse(text: &str) -> Result<Vec<Record>, TransectError> {
    Records::new(text).collect()
}

/// An iterator over the stations of an export, one item per data
/// block.
pub struct Records<'a> {
    blocks: Vec<Block<'a>>,
    idx: usize,
}

impl<'a> Records<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            blocks: split_blocks(text),
            idx: 0,
        }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Record, TransectError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < self.blocks.len() {
            let idx = self.idx;
            self.idx += 1;
            if self.blocks[idx].is_data() {
                let header = match idx.checked_sub(1).map(|prev| &self.blocks[prev]) {
                    Some(prev) if !prev.is_data() => prev,
                    Some(_) => {
                        return Some(Err(TransectError::malformed(
                            self.blocks[idx].line(),
                            "data block is preceded by another data block, not a header",
                        )))
                    }
                    None => {
                        return Some(Err(TransectError::malformed(
                            self.blocks[idx].line(),
                            "data block has no preceding header",
                        )))
                    }
                };
                return Some(read_record(header, &self.blocks[idx]));
            }
        }
        None
    }
}

/// Consecutive non-blank rows, tagged with 1-based source line
/// numbers.
struct Block<'a> {
    rows: Vec<(usize, &'a str)>,
}

impl<'a> Block<'a> {
    fn is_data(&self) -> bool {
        self.rows.len() > HEADER_MAX_ROWS
    }

    fn line(&self) -> usize {
        self.rows.first().map_or(0, |(line, _)| *line)
    }
}

fn split_blocks(text: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut rows = Vec::new();
    // `lines` takes care of "\r\n"; anything left over is a bare "\r".
    for (idx, row) in text.lines().flat_map(|line| line.split('\r')).enumerate() {
        if row.trim().is_empty() {
            if !rows.is_empty() {
                blocks.push(Block {
                    rows: std::mem::take(&mut rows),
                });
            }
        } else {
            rows.push((idx + 1, row));
        }
    }
    if !rows.is_empty() {
        blocks.push(Block { rows });
    }
    blocks
}

fn split_fields<'a>(
    line: usize,
    row: &'a str,
    what: &str,
) -> Result<Vec<&'a str>, TransectError> {
    let fields: Vec<&str> = row.split(',').map(str::trim).take(FIELDS).collect();
    if fields.len() < FIELDS {
        return Err(TransectError::malformed(
            line,
            format!("{what} row has {} fields, expected {FIELDS}", fields.len()),
        ));
    }
    Ok(fields)
}

fn read_record(header: &Block<'_>, data: &Block<'_>) -> Result<Record, TransectError> {
    let header = {
        let (line, row) = header.rows[header.rows.len() - 1];
        let fields = split_fields(line, row, "header")?;
        if fields[0].is_empty() {
            return Err(TransectError::malformed(line, "header has an empty station id"));
        }
        Header {
            station_id: fields[0].to_owned(),
            station_easting: Reading::parse(fields[1]),
            station_northing: Reading::parse(fields[2]),
            station_elevation: Reading::parse(fields[3]),
            station_height: Reading::parse(fields[4]),
        }
    };

    let shots = data
        .rows
        .iter()
        .map(|&(line, row)| {
            let fields = split_fields(line, row, "data")?;
            Ok(SurveyPoint {
                point_id: fields[0].to_owned(),
                easting: Reading::parse(fields[1]),
                northing: Reading::parse(fields[2]),
                elevation: Reading::parse(fields[3]),
                target_height: Reading::parse(fields[4]),
            })
        })
        .collect::<Result<Vec<_>, TransectError>>()?;

    Ok(Record {
        header,
        shots,
        line: data.line(),
    })
}
