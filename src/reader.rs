//! Reads `<latitude>,<longitude>` rows into [`CoordinatePoint`]s.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use geo::Point;
use tracing::{debug, trace};

use crate::error::{Error, Field, Result};

/// One input row. Values are whatever the source said; no range check is done.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatePoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl CoordinatePoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

// x is longitude, y is latitude.
impl From<CoordinatePoint> for Point<f64> {
    fn from(point: CoordinatePoint) -> Self {
        Point::new(point.longitude, point.latitude)
    }
}

#[derive(Debug, Clone)]
pub struct ReaderOptions {
    pub delimiter: u8,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Read every row of the file at `path`.
///
/// The first bad row aborts the read and nothing is returned for the rows
/// before it. The file is closed on every return path.
pub fn read_points(path: &Path, options: &ReaderOptions) -> Result<Vec<CoordinatePoint>> {
    debug!("Loading file: {}", path.display());
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let points = read_points_from(BufReader::new(file), path, options)?;
    debug!("Loaded {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Same as [`read_points`] over any byte source. `origin` only labels I/O errors.
pub fn read_points_from<R: Read>(
    source: R,
    origin: &Path,
    options: &ReaderOptions,
) -> Result<Vec<CoordinatePoint>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(source);

    let mut points = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let fallback_row = index as u64 + 1;
        let record = record.map_err(|e| csv_error(e, origin, fallback_row))?;
        let row = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(fallback_row);
        let point = parse_record(&record, row)?;
        trace!(row, latitude = point.latitude, longitude = point.longitude, "parsed row");
        points.push(point);
    }
    Ok(points)
}

fn parse_record(record: &StringRecord, row: u64) -> Result<CoordinatePoint> {
    if record.len() < 2 {
        return Err(Error::format(
            row,
            format!("expected at least 2 fields, found {}", record.len()),
        ));
    }
    let latitude = parse_field(record, Field::Latitude, row)?;
    let longitude = parse_field(record, Field::Longitude, row)?;
    Ok(CoordinatePoint::new(latitude, longitude))
}

fn parse_field(record: &StringRecord, field: Field, row: u64) -> Result<f64> {
    let text = record.get(field.column()).unwrap_or_default();
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::Parse {
            row,
            field,
            text: text.to_string(),
        }),
    }
}

fn csv_error(err: csv::Error, origin: &Path, fallback_row: u64) -> Error {
    let row = err
        .position()
        .map(|pos| pos.line())
        .unwrap_or(fallback_row);
    match err.into_kind() {
        csv::ErrorKind::Io(source) => Error::io(origin, source),
        csv::ErrorKind::Utf8 { err, .. } => Error::format(row, format!("invalid UTF-8: {err}")),
        other => Error::format(row, format!("malformed record: {other:?}")),
    }
}
