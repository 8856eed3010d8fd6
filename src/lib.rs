use std::fs;
use std::path::PathBuf;

use geo::Rect;
use tracing::{debug, info};

pub mod document;
pub mod error;
pub mod mapper;
pub mod reader;

pub use document::{Feature, FeatureCollectionDocument, Style};
pub use error::{Error, Field, Result};
pub use reader::{CoordinatePoint, ReaderOptions};

/// Where to read, where to write and how.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub delimiter: u8,
    pub style: Style,
    /// Read the written file back and check every point survived.
    pub verify: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("points.csv"),
            output: PathBuf::from("points.geojson"),
            delimiter: b',',
            style: Style::Compact,
            verify: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub features: usize,
    pub bytes_written: usize,
    pub extent: Option<Rect<f64>>,
}

/// Build the GeoJSON document for `points` and encode it.
pub fn to_geojson(points: &[CoordinatePoint], style: Style) -> Result<Vec<u8>> {
    let collection = FeatureCollectionDocument::new(mapper::map_features(points));
    document::to_bytes(&collection, style)
}

/// Convert the CSV at `options.input` into a GeoJSON file at `options.output`.
///
/// Stops at the first error. The output file is only created once the whole
/// input has been read and encoded.
pub fn convert(options: &ConvertOptions) -> Result<ConversionSummary> {
    let reader_options = ReaderOptions {
        delimiter: options.delimiter,
    };
    let points = reader::read_points(&options.input, &reader_options)?;
    info!("Read {} points from {}", points.len(), options.input.display());

    let extent = mapper::extent(&points);
    if let Some(rect) = extent {
        info!(
            "Extent bounds: ({:.4}, {:.4}) to ({:.4}, {:.4})",
            rect.min().x,
            rect.min().y,
            rect.max().x,
            rect.max().y
        );
    }

    let bytes = to_geojson(&points, options.style)?;
    fs::write(&options.output, &bytes).map_err(|e| Error::io(&options.output, e))?;
    info!("Written {} bytes to {}", bytes.len(), options.output.display());

    if options.verify {
        verify_output(options, &points)?;
    }

    Ok(ConversionSummary {
        features: points.len(),
        bytes_written: bytes.len(),
        extent,
    })
}

fn verify_output(options: &ConvertOptions, expected: &[CoordinatePoint]) -> Result<()> {
    let written = fs::read(&options.output).map_err(|e| Error::io(&options.output, e))?;
    let decoded = document::decode_points(&written)?;
    compare_points(expected, &decoded)?;
    debug!("Verified {} features in {}", decoded.len(), options.output.display());
    Ok(())
}

/// Check that `decoded` holds exactly the points of `expected`, in order.
pub fn compare_points(expected: &[CoordinatePoint], decoded: &[CoordinatePoint]) -> Result<()> {
    if decoded.len() != expected.len() {
        return Err(Error::FeatureCount {
            expected: expected.len(),
            found: decoded.len(),
        });
    }
    for (index, (want, got)) in expected.iter().zip(decoded.iter()).enumerate() {
        if want != got {
            return Err(Error::Verification {
                index: index + 1,
                expected: (want.latitude, want.longitude),
                found: (got.latitude, got.longitude),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_file_names() {
        let options = ConvertOptions::default();
        assert_eq!(options.input, PathBuf::from("points.csv"));
        assert_eq!(options.output, PathBuf::from("points.geojson"));
        assert_eq!(options.delimiter, b',');
        assert_eq!(options.style, Style::Compact);
        assert!(!options.verify);
    }

    #[test]
    fn to_geojson_example_rows() {
        let points = [
            CoordinatePoint::new(37.7749, -122.4194),
            CoordinatePoint::new(40.7128, -74.0060),
        ];
        let text = String::from_utf8(to_geojson(&points, Style::Compact).unwrap()).unwrap();
        assert!(text.contains(r#""properties":{"id":1},"geometry":{"type":"Point","coordinates":[-122.4194,37.7749]}"#));
        assert!(text.contains(r#""properties":{"id":2},"geometry":{"type":"Point","coordinates":[-74.006,40.7128]}"#));
    }

    #[test]
    fn compare_points_reports_count_mismatch() {
        let expected = [CoordinatePoint::new(1.0, 2.0), CoordinatePoint::new(3.0, 4.0)];
        let err = compare_points(&expected, &expected[..1]).unwrap_err();
        assert!(matches!(
            err,
            Error::FeatureCount {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn compare_points_reports_first_differing_feature() {
        let expected = [CoordinatePoint::new(1.0, 2.0), CoordinatePoint::new(3.0, 4.0)];
        let decoded = [
            CoordinatePoint::new(1.0, 2.0),
            CoordinatePoint::new(3.0, f64::from_bits(4.0f64.to_bits() + 1)),
        ];
        match compare_points(&expected, &decoded).unwrap_err() {
            Error::Verification { index, expected, .. } => {
                assert_eq!(index, 2);
                assert_eq!(expected, (3.0, 4.0));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn full_precision_points_round_trip() {
        let points = crate::document::tests::full_precision_points(5_000);
        for style in [Style::Compact, Style::Pretty] {
            let bytes = to_geojson(&points, style).unwrap();
            let decoded = document::decode_points(&bytes).unwrap();
            compare_points(&points, &decoded).unwrap();
        }
    }
}
