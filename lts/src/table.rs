use anyhow::{anyhow, Context, Result};
use itertools::Itertools;
use std::io::Read;
use xsec::geo::Coord;

/// Reads `(x, y)` pairs from two named columns of a CSV table.
///
/// Rows with an empty x or y field are skipped.
pub fn read_columns<R: Read>(rdr: R, x_col: &str, y_col: &str) -> Result<Vec<Coord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr);
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            anyhow!(
                "no column '{name}'; available columns: {}",
                headers.iter().join(", ")
            )
        })
    };
    let (x_idx, y_idx) = (column(x_col)?, column(y_col)?);

    let mut points = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        let field = |idx: usize| record.get(idx).unwrap_or_default();
        let (x, y) = (field(x_idx), field(y_idx));
        if x.is_empty() || y.is_empty() {
            continue;
        }
        let parse = |val: &str, name: &str| {
            val.parse::<f64>()
                .with_context(|| format!("line {line}: {name} '{val}' is not a number"))
        };
        points.push(Coord {
            x: parse(x, x_col)?,
            y: parse(y, y_col)?,
        });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::read_columns;
    use xsec::geo::coord;

    const TABLE: &str = "\
pt_id,cum_distance,elevation,note
1,0.0,12.5,
2,1.5,,gap
3,3.0,10.25,
4,,9.0,
5,6.0,12.0,
";

    #[test]
    fn test_read_columns() {
        let points = read_columns(TABLE.as_bytes(), "cum_distance", "elevation").unwrap();
        assert_eq!(
            points,
            vec![
                coord!(x: 0.0, y: 12.5),
                coord!(x: 3.0, y: 10.25),
                coord!(x: 6.0, y: 12.0)
            ]
        );
    }

    #[test]
    fn test_missing_column() {
        let err = read_columns(TABLE.as_bytes(), "chainage", "elevation").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'chainage'"));
        assert!(msg.contains("pt_id, cum_distance, elevation, note"));
    }

    #[test]
    fn test_not_a_number() {
        let table = "x,y\n0,1\n1,deep\n";
        let err = read_columns(table.as_bytes(), "x", "y").unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }
}
