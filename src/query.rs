//! Per-point assembly of river, rain and coastal values.

use crate::grid::raster::RasterDataset;
use crate::projection::error::GeometryError;
use crate::projection::transverse_mercator::TransverseMercator;
use crate::stations::error::SpatialJoinError;
use crate::stations::locate_reference::{NearestSearch, ReferencePointSet};
use crate::types::coordinates::LatLon;
use crate::types::query_record::QueryRecord;
use log::{debug, warn};
use polars::prelude::*;

/// Evaluates query points against one read-only snapshot of the rasters and tide set.
#[derive(Debug, Clone, Copy)]
pub struct QueryOrchestrator<'a> {
    river: &'a RasterDataset,
    rain: &'a RasterDataset,
    tide: NearestSearch<'a>,
    projector: TransverseMercator,
}

impl<'a> QueryOrchestrator<'a> {
    /// Fails with [`SpatialJoinError::EmptyReferenceSet`] before any point is evaluated.
    pub fn new(
        river: &'a RasterDataset,
        rain: &'a RasterDataset,
        tide: &'a ReferencePointSet,
        projector: TransverseMercator,
    ) -> Result<Self, SpatialJoinError> {
        Ok(Self {
            river,
            rain,
            tide: tide.searcher()?,
            projector,
        })
    }

    pub fn evaluate_point(&self, location: LatLon) -> Result<QueryRecord, GeometryError> {
        let projected = self.projector.project_lat_lon(location)?;
        let coast = self.tide.nearest(projected);
        Ok(QueryRecord {
            longitude: location.longitude(),
            latitude: location.latitude(),
            easting: projected.easting,
            northing: projected.northing,
            river_value: self.river.value_at(location),
            rain_value: self.rain.value_at(location),
            coast_distance: coast.distance,
            tide_value: coast.value,
        })
    }

    /// One result per input point, in input order. A bad point only fails its own row.
    pub fn evaluate(&self, points: &[LatLon]) -> Vec<Result<QueryRecord, GeometryError>> {
        let results: Vec<_> = points.iter().map(|p| self.evaluate_point(*p)).collect();
        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!("{failed} of {} query points have invalid coordinates", points.len());
        }
        debug!("Evaluated {} query points", points.len());
        results
    }
}

/// Evaluates `points` on the national grid with inputs taken as OSGB36 coordinates.
///
/// GPS (WGS84) input needs a [`QueryOrchestrator`] built with
/// `TransverseMercator::for_input(InputDatum::Wgs84)` and a tide set projected the same
/// way; otherwise positions are off by roughly 100 m.
pub fn evaluate(
    points: &[LatLon],
    river: &RasterDataset,
    rain: &RasterDataset,
    tide: &ReferencePointSet,
) -> Result<Vec<Result<QueryRecord, GeometryError>>, SpatialJoinError> {
    let orchestrator = QueryOrchestrator::new(river, rain, tide, TransverseMercator::osgb36())?;
    Ok(orchestrator.evaluate(points))
}

/// Tabulates results as `Longitude, Latitude, Easting, Northing, river_value, rain_value,
/// coast_distance, tide_value`.
///
/// A failed point keeps its row: the input coordinates are filled in and every derived
/// column is null.
pub fn records_to_frame(
    results: &[Result<QueryRecord, GeometryError>],
) -> PolarsResult<DataFrame> {
    let mut longitude = Vec::with_capacity(results.len());
    let mut latitude = Vec::with_capacity(results.len());
    let mut easting = Vec::with_capacity(results.len());
    let mut northing = Vec::with_capacity(results.len());
    let mut river = Vec::with_capacity(results.len());
    let mut rain = Vec::with_capacity(results.len());
    let mut coast = Vec::with_capacity(results.len());
    let mut tide = Vec::with_capacity(results.len());

    for result in results {
        match result {
            Ok(record) => {
                longitude.push(record.longitude);
                latitude.push(record.latitude);
                easting.push(Some(record.easting));
                northing.push(Some(record.northing));
                river.push(record.river_value);
                rain.push(record.rain_value);
                coast.push(Some(record.coast_distance));
                tide.push(Some(record.tide_value));
            }
            Err(e) => {
                let location = e.location();
                longitude.push(location.longitude());
                latitude.push(location.latitude());
                easting.push(None);
                northing.push(None);
                river.push(None);
                rain.push(None);
                coast.push(None);
                tide.push(None);
            }
        }
    }

    DataFrame::new(vec![
        Column::new("Longitude".into(), longitude),
        Column::new("Latitude".into(), latitude),
        Column::new("Easting".into(), easting),
        Column::new("Northing".into(), northing),
        Column::new("river_value".into(), river),
        Column::new("rain_value".into(), rain),
        Column::new("coast_distance".into(), coast),
        Column::new("tide_value".into(), tide),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::snap::GridSpec;
    use crate::stations::locate_reference::LINEAR_SCAN_LIMIT;
    use crate::types::coordinates::ProjectedPoint;
    use crate::types::xyz::XyzRecord;

    fn river() -> RasterDataset {
        RasterDataset::from_xyz(vec![XyzRecord::new(-2.0, 52.0, 0.8)], GridSpec::default())
    }

    fn rain() -> RasterDataset {
        RasterDataset::from_xyz(vec![XyzRecord::new(-2.0, 52.0, 0.15)], GridSpec::default())
    }

    fn tide() -> ReferencePointSet {
        ReferencePointSet::from_xyz(
            vec![XyzRecord::new(-3.0, 51.0, 2.1), XyzRecord::new(-1.0, 51.0, 3.4)],
            &TransverseMercator::osgb36(),
        )
    }

    #[test]
    fn test_single_point_end_to_end() {
        let (river, rain, tide) = (river(), rain(), tide());
        let results = evaluate(&[LatLon(52.0, -2.0)], &river, &rain, &tide).unwrap();
        let record = results[0].unwrap();

        assert_eq!(record.longitude, -2.0);
        assert_eq!(record.latitude, 52.0);
        assert!((record.easting - 400_000.0).abs() < 1e-6);
        assert!((record.northing - 233_553.728).abs() < 1e-2);
        assert_eq!(record.river_value, Some(0.8));
        assert_eq!(record.rain_value, Some(0.15));

        let projected = ProjectedPoint::new(record.easting, record.northing);
        let d0 = projected.distance(&tide.points()[0].projected);
        let d1 = projected.distance(&tide.points()[1].projected);
        let (expected_distance, expected_tide) = if d1 < d0 { (d1, 3.4) } else { (d0, 2.1) };
        assert_eq!(record.coast_distance, expected_distance);
        assert_eq!(record.tide_value, expected_tide);
        assert!((record.coast_distance - 131_085.385).abs() < 1e-2);
    }

    #[test]
    fn test_point_outside_raster_coverage() {
        let (river, rain, tide) = (river(), rain(), tide());
        let results = evaluate(&[LatLon(53.0, 0.5)], &river, &rain, &tide).unwrap();
        let record = results[0].unwrap();
        assert_eq!(record.river_value, None);
        assert_eq!(record.rain_value, None);
        assert!(record.coast_distance.is_finite());
    }

    #[test]
    fn test_invalid_point_does_not_affect_others() {
        let (river, rain, tide) = (river(), rain(), tide());
        let points = [LatLon(52.0, -2.0), LatLon(f64::NAN, -2.0), LatLon(52.01, -1.99)];
        let results = evaluate(&points, &river, &rain, &tide).unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(GeometryError::NonFinite { .. })));
        assert_eq!(results[2].unwrap().river_value, Some(0.8));
        assert_eq!(results[2].unwrap().latitude, 52.01);
    }

    #[test]
    fn test_empty_tide_set_aborts_batch() {
        let empty = ReferencePointSet::from_projected(Vec::new());
        let result = evaluate(&[LatLon(52.0, -2.0)], &river(), &rain(), &empty);
        assert_eq!(result.unwrap_err(), SpatialJoinError::EmptyReferenceSet);
    }

    #[test]
    fn test_output_order_matches_input() {
        let (river, rain, tide) = (river(), rain(), tide());
        let points: Vec<LatLon> = (0..20)
            .map(|i| LatLon(50.5 + i as f64 * 0.2, -4.0 + i as f64 * 0.3))
            .collect();
        let results = evaluate(&points, &river, &rain, &tide).unwrap();
        for (point, result) in points.iter().zip(&results) {
            let record = result.unwrap();
            assert_eq!((record.latitude, record.longitude), (point.0, point.1));
        }
    }

    #[test]
    fn test_overflowing_point_fails_alone_on_indexed_set() {
        let (river, rain) = (river(), rain());
        let tide = ReferencePointSet::from_xyz(
            (0..LINEAR_SCAN_LIMIT + 10).map(|i| {
                XyzRecord::new(-5.0 + (i % 70) as f64 * 0.1, 50.0 + (i / 70) as f64 * 0.1, 1.0)
            }),
            &TransverseMercator::osgb36(),
        );
        assert!(tide.len() > LINEAR_SCAN_LIMIT);

        let points = [LatLon(52.0, -2.0), LatLon(52.0, 1e100), LatLon(52.01, -1.99)];
        let results = evaluate(&points, &river, &rain, &tide).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(GeometryError::NonFiniteProjection { .. })
        ));
        assert_eq!(results[2].unwrap().river_value, Some(0.8));

        let df = records_to_frame(&results).unwrap();
        assert_eq!(df.column("Longitude").unwrap().f64().unwrap().get(1), Some(1e100));
        assert_eq!(df.column("Easting").unwrap().f64().unwrap().get(1), None);
    }

    #[test]
    fn test_records_to_frame_keeps_failed_rows() -> PolarsResult<()> {
        let (river, rain, tide) = (river(), rain(), tide());
        let points = [LatLon(52.0, -2.0), LatLon(51.0, f64::INFINITY), LatLon(53.0, 0.5)];
        let results = evaluate(&points, &river, &rain, &tide).unwrap();
        let df = records_to_frame(&results)?;

        assert_eq!(df.height(), 3);
        assert_eq!(
            df.get_column_names_str(),
            vec![
                "Longitude",
                "Latitude",
                "Easting",
                "Northing",
                "river_value",
                "rain_value",
                "coast_distance",
                "tide_value"
            ]
        );
        assert_eq!(df.column("Latitude")?.f64()?.get(1), Some(51.0));
        assert_eq!(df.column("Easting")?.f64()?.get(1), None);
        assert_eq!(df.column("river_value")?.f64()?.get(0), Some(0.8));
        assert_eq!(df.column("river_value")?.f64()?.get(2), None);
        assert_eq!(df.column("coast_distance")?.null_count(), 1);
        Ok(())
    }
}
