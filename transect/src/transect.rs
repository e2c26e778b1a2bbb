use crate::{
    math::{cumulative, step_distances},
    records::Record,
    shot::{Header, Position, Reading, SurveyPoint},
    TransectError, C,
};
use geo::geometry::{Coord, Point};
use log::debug;
use serde::Serialize;
use std::io::Write;

/// Along-transect distances, derived from the shots' planar
/// positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Chainage {
    /// Horizontal distance from the previous shot (zero for the
    /// first).
    pub x_dist: Vec<C>,

    /// Horizontal distance from the first shot.
    pub cum_distance: Vec<C>,

    /// Total horizontal length of the transect.
    pub horizontal_distance: C,

    /// Horizontal distance from the last shot.
    pub mirrored: Vec<C>,
}

/// A rigid translation of every shot so that the first one lands on a
/// known location.
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    /// Where the first shot was moved to.
    pub target: Position,

    /// Per-axis translation, `target - first shot`.
    pub offset: Position,

    /// Corrected location of every shot.
    pub points: Vec<Position>,
}

/// A single station: one ordered line of shots across the ground.
#[derive(Debug, Clone, PartialEq)]
pub struct Transect {
    header: Header,
    points: Vec<SurveyPoint>,
    chainage: Option<Chainage>,
    correction: Option<Correction>,
}

impl From<Record> for Transect {
    fn from(Record { header, shots, .. }: Record) -> Self {
        Self::new(header, shots)
    }
}

impl Transect {
    pub fn new(header: Header, points: Vec<SurveyPoint>) -> Self {
        Self {
            header,
            points,
            chainage: None,
            correction: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.header.station_id
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn points(&self) -> &[SurveyPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_processed(&self) -> bool {
        self.chainage.is_some()
    }

    /// Computes chainage for every shot. Does nothing if already
    /// processed.
    pub fn process(&mut self) -> Result<&Chainage, TransectError> {
        if self.chainage.is_none() {
            let chainage = self.compute_chainage()?;
            debug!(
                "processed station '{}'; shots: {}, horizontal_distance: {}",
                self.id(),
                self.len(),
                chainage.horizontal_distance
            );
            self.chainage = Some(chainage);
        }
        self.chainage()
    }

    /// Returns the chainage columns, failing if [`Transect::process`]
    /// hasn't been run.
    pub fn chainage(&self) -> Result<&Chainage, TransectError> {
        self.chainage
            .as_ref()
            .ok_or_else(|| TransectError::NotProcessed(self.id().to_owned()))
    }

    /// Translates every shot so that the first one lands on `target`,
    /// returning the applied offset.
    ///
    /// The offset is always taken from the original (uncorrected)
    /// first shot, so correcting again replaces the previous
    /// correction rather than stacking on it.
    pub fn correct(&mut self, target: Position) -> Result<Position, TransectError> {
        let originals = self
            .points
            .iter()
            .map(|point| point.position(self.id()))
            .collect::<Result<Vec<Position>, TransectError>>()?;
        let first = originals
            .first()
            .ok_or_else(|| TransectError::Correction(format!("station '{}' has no shots", self.id())))?;
        let offset = Position {
            easting: target.easting - first.easting,
            northing: target.northing - first.northing,
            elevation: target.elevation - first.elevation,
        };
        let points = originals
            .iter()
            .map(|p| Position {
                easting: p.easting + offset.easting,
                northing: p.northing + offset.northing,
                elevation: p.elevation + offset.elevation,
            })
            .collect();
        debug!("corrected station '{}'; offset: {offset:?}", self.id());
        self.correction = Some(Correction {
            target,
            offset,
            points,
        });
        Ok(offset)
    }

    pub fn correction(&self) -> Option<&Correction> {
        self.correction.as_ref()
    }

    /// Returns `(chainage, elevation)` for every shot, processing
    /// first if needed.
    ///
    /// With `mirrored`, chainage is measured from the last shot.
    pub fn profile(&mut self, mirrored: bool) -> Result<Vec<Coord<C>>, TransectError> {
        self.process()?;
        let chainage = self.chainage()?;
        let xs = if mirrored {
            &chainage.mirrored
        } else {
            &chainage.cum_distance
        };
        self.points
            .iter()
            .zip(xs)
            .map(|(point, &x)| {
                let elevation = point.position(self.id())?.elevation;
                Ok(Coord { x, y: elevation })
            })
            .collect()
    }

    /// Returns one row per shot with every original and derived
    /// column, processing first if needed.
    pub fn rows(&mut self) -> Result<Vec<Row<'_>>, TransectError> {
        self.process()?;
        let chainage = self.chainage()?;
        let corrected = self.correction.as_ref().map(|c| &c.points);
        Ok(self
            .points
            .iter()
            .enumerate()
            .map(|(idx, point)| Row {
                pt_id: &point.point_id,
                easting: &point.easting,
                northing: &point.northing,
                elevation: &point.elevation,
                trg_height: &point.target_height,
                x_dist: chainage.x_dist[idx],
                cum_distance: chainage.cum_distance[idx],
                mirrored: chainage.mirrored[idx],
                corrected: corrected.map(|points| points[idx]),
            })
            .collect())
    }

    /// Writes the full point table as CSV, processing first if needed.
    pub fn write_csv<W: Write>(&mut self, wtr: W) -> Result<(), TransectError> {
        let corrected = self.correction.is_some();
        let rows = self.rows()?;
        let mut wtr = csv::Writer::from_writer(wtr);
        wtr.write_record(Row::csv_header(corrected))?;
        for row in &rows {
            wtr.write_record(row.csv_fields())?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Returns the export file name for this station.
    pub fn file_name(&self) -> String {
        let id: String = self
            .id()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("station_{id}.csv")
    }

    fn compute_chainage(&self) -> Result<Chainage, TransectError> {
        let planar = self
            .points
            .iter()
            .map(|point| point.planar(self.id()).map(Point::from))
            .collect::<Result<Vec<Point<C>>, TransectError>>()?;
        let x_dist = step_distances(&planar);
        let cum_distance = cumulative(&x_dist);
        let horizontal_distance = cum_distance.iter().copied().fold(0.0, C::max);
        let mirrored = cum_distance
            .iter()
            .map(|dist| horizontal_distance - dist)
            .collect();
        Ok(Chainage {
            x_dist,
            cum_distance,
            horizontal_distance,
            mirrored,
        })
    }
}

/// One exported shot.
#[derive(Debug, Serialize)]
pub struct Row<'a> {
    pub pt_id: &'a str,
    pub easting: &'a Reading,
    pub northing: &'a Reading,
    pub elevation: &'a Reading,
    pub trg_height: &'a Reading,
    pub x_dist: C,
    pub cum_distance: C,
    pub mirrored: C,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected: Option<Position>,
}

impl<'a> Row<'a> {
    const COLUMNS: [&'static str; 8] = [
        "pt_id",
        "easting",
        "northing",
        "elevation",
        "trg_height",
        "x_dist",
        "cum_distance",
        "mirrored",
    ];

    const CORRECTED_COLUMNS: [&'static str; 3] = [
        "corrected_easting",
        "corrected_northing",
        "corrected_elevation",
    ];

    pub fn csv_header(corrected: bool) -> Vec<&'static str> {
        let mut header = Self::COLUMNS.to_vec();
        if corrected {
            header.extend(Self::CORRECTED_COLUMNS);
        }
        header
    }

    pub fn csv_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.pt_id.to_owned(),
            self.easting.to_string(),
            self.northing.to_string(),
            self.elevation.to_string(),
            self.trg_height.to_string(),
            self.x_dist.to_string(),
            self.cum_distance.to_string(),
            self.mirrored.to_string(),
        ];
        if let Some(corrected) = self.corrected {
            fields.extend([
                corrected.easting.to_string(),
                corrected.northing.to_string(),
                corrected.elevation.to_string(),
            ]);
        }
        fields
    }
}
