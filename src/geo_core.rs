use geo::{Coord, LineString, Polygon};

use crate::error::AnalysisError;

/// Raw ring sequence as received from the caller: the first ring is the
/// outer boundary, any further rings are holes. Each point is `[lon, lat]`.
pub type RawRings = Vec<Vec<[f64; 2]>>;

/// A validated field boundary in WGS84 (EPSG:4326).
///
/// Construction goes through [`FieldPolygon::from_rings`]; a value of this
/// type always has a closed outer ring of at least 4 finite, in-range
/// points. Self-intersection is deliberately not checked or repaired here:
/// closing and repair are the caller's responsibility.
#[derive(Debug, Clone)]
pub struct FieldPolygon {
    polygon: Polygon<f64>,
}

impl FieldPolygon {
    /// Validate raw rings into a usable field polygon.
    ///
    /// Fails with `InvalidPolygon` if the ring sequence is empty, any ring
    /// has fewer than 4 points, any ring is not closed (first point must
    /// equal the last), or any coordinate is non-finite or outside valid
    /// longitude/latitude ranges. Pure; no side effects.
    pub fn from_rings(rings: &[Vec<[f64; 2]>]) -> Result<Self, AnalysisError> {
        if rings.is_empty() {
            return Err(AnalysisError::InvalidPolygon(
                "polygon has no rings".to_string(),
            ));
        }

        for (i, ring) in rings.iter().enumerate() {
            Self::check_ring(i, ring)?;
        }

        let exterior = Self::ring_to_line_string(&rings[0]);
        let interiors = rings[1..]
            .iter()
            .map(|ring| Self::ring_to_line_string(ring))
            .collect();

        Ok(FieldPolygon {
            polygon: Polygon::new(exterior, interiors),
        })
    }

    fn check_ring(index: usize, ring: &[[f64; 2]]) -> Result<(), AnalysisError> {
        let label = if index == 0 { "outer ring" } else { "hole" };

        if ring.len() < 4 {
            return Err(AnalysisError::InvalidPolygon(format!(
                "{} has {} points, a closed ring needs at least 4",
                label,
                ring.len()
            )));
        }

        for &[lon, lat] in ring {
            if !lon.is_finite() || !lat.is_finite() {
                return Err(AnalysisError::InvalidPolygon(format!(
                    "{} contains a non-finite coordinate",
                    label
                )));
            }
            if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
                return Err(AnalysisError::InvalidPolygon(format!(
                    "{} coordinate ({}, {}) is outside valid lon/lat ranges",
                    label, lon, lat
                )));
            }
        }

        // First and last point must coincide. No silent closing here.
        let first = ring[0];
        let last = ring[ring.len() - 1];
        if first != last {
            return Err(AnalysisError::InvalidPolygon(format!(
                "{} is not closed: first point ({}, {}) differs from last ({}, {})",
                label, first[0], first[1], last[0], last[1]
            )));
        }

        Ok(())
    }

    fn ring_to_line_string(ring: &[[f64; 2]]) -> LineString<f64> {
        LineString::from(
            ring.iter()
                .map(|&[x, y]| Coord { x, y })
                .collect::<Vec<Coord<f64>>>(),
        )
    }

    /// Access the underlying geometry.
    pub fn as_polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Footprint as a GeoJSON geometry, the shape the backend queries expect.
    pub fn to_geojson(&self) -> geojson::Geometry {
        let mut rings: Vec<Vec<Vec<f64>>> = Vec::new();
        rings.push(
            self.polygon
                .exterior()
                .coords()
                .map(|c| vec![c.x, c.y])
                .collect(),
        );
        for interior in self.polygon.interiors() {
            rings.push(interior.coords().map(|c| vec![c.x, c.y]).collect());
        }
        geojson::Geometry::new(geojson::Value::Polygon(rings))
    }

    /// Bounding box of the outer ring.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::new(f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for coord in self.polygon.exterior().coords() {
            bbox.min_x = bbox.min_x.min(coord.x);
            bbox.min_y = bbox.min_y.min(coord.y);
            bbox.max_x = bbox.max_x.max(coord.x);
            bbox.max_y = bbox.max_y.max(coord.y);
        }
        bbox
    }
}

/// Bounding box structure
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_x: f64, // min longitude
    pub min_y: f64, // min latitude
    pub max_x: f64, // max longitude
    pub max_y: f64, // max latitude
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_ring() -> Vec<[f64; 2]> {
        vec![
            [-1.0, 46.0],
            [-0.9, 46.0],
            [-0.9, 46.1],
            [-1.0, 46.1],
            [-1.0, 46.0],
        ]
    }

    #[test]
    fn test_valid_polygon() {
        let polygon = FieldPolygon::from_rings(&[square_ring()]).unwrap();
        assert_eq!(polygon.as_polygon().exterior().coords().count(), 5);
    }

    #[test]
    fn test_polygon_with_hole() {
        let hole = vec![
            [-0.98, 46.02],
            [-0.92, 46.02],
            [-0.92, 46.08],
            [-0.98, 46.02],
        ];
        let polygon = FieldPolygon::from_rings(&[square_ring(), hole]).unwrap();
        assert_eq!(polygon.as_polygon().interiors().len(), 1);
    }

    #[test]
    fn test_empty_rings_rejected() {
        let err = FieldPolygon::from_rings(&[]).unwrap_err();
        assert_eq!(err.kind(), "InvalidPolygon");
    }

    #[test]
    fn test_short_ring_rejected() {
        let ring = vec![[-1.0, 46.0], [-0.9, 46.0], [-1.0, 46.0]];
        let err = FieldPolygon::from_rings(&[ring]).unwrap_err();
        assert_eq!(err.kind(), "InvalidPolygon");
    }

    #[test]
    fn test_unclosed_ring_rejected() {
        let ring = vec![[-1.0, 46.0], [-0.9, 46.0], [-0.9, 46.1], [-1.0, 46.1]];
        let err = FieldPolygon::from_rings(&[ring]).unwrap_err();
        assert!(err.detail().contains("not closed"));
    }

    #[test]
    fn test_non_finite_coordinate_rejected() {
        let mut ring = square_ring();
        ring[2] = [f64::NAN, 46.1];
        let err = FieldPolygon::from_rings(&[ring]).unwrap_err();
        assert_eq!(err.kind(), "InvalidPolygon");
    }

    #[test]
    fn test_out_of_range_coordinate_rejected() {
        let mut ring = square_ring();
        ring[1] = [-0.9, 95.0];
        let err = FieldPolygon::from_rings(&[ring]).unwrap_err();
        assert_eq!(err.kind(), "InvalidPolygon");
    }

    #[test]
    fn test_bounding_box() {
        let polygon = FieldPolygon::from_rings(&[square_ring()]).unwrap();
        let bbox = polygon.bounding_box();
        assert_eq!(bbox.min_x, -1.0);
        assert_eq!(bbox.min_y, 46.0);
        assert_eq!(bbox.max_x, -0.9);
        assert_eq!(bbox.max_y, 46.1);
    }

    #[test]
    fn test_to_geojson_round_trips_rings() {
        let polygon = FieldPolygon::from_rings(&[square_ring()]).unwrap();
        match polygon.to_geojson().value {
            geojson::Value::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0].len(), 5);
                assert_eq!(rings[0][0], vec![-1.0, 46.0]);
            }
            other => panic!("expected Polygon geometry, got {:?}", other),
        }
    }
}
