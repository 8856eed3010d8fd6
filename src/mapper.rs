//! Turns coordinate rows into numbered point features.

use geo::algorithm::bounding_rect::BoundingRect;
use geo::{MultiPoint, Point, Rect};

use crate::document::Feature;
use crate::reader::CoordinatePoint;

/// Build one feature per point, numbered from 1 in input order.
///
/// Coordinates come out as `[longitude, latitude]`, the reverse of the
/// input column order.
pub fn map_features(points: &[CoordinatePoint]) -> Vec<Feature> {
    points
        .iter()
        .enumerate()
        .map(|(index, &point)| {
            let position: Point<f64> = point.into();
            Feature::point(index as u64 + 1, [position.x(), position.y()])
        })
        .collect()
}

/// Bounding box of the points in longitude/latitude space.
pub fn extent(points: &[CoordinatePoint]) -> Option<Rect<f64>> {
    let multi_point: MultiPoint<f64> = points.iter().map(|&p| Point::<f64>::from(p)).collect();
    multi_point.bounding_rect()
}
