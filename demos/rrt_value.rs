use level_forecast::{
    FloodLookup, GridSpec, InputDatum, LatLon, LevelForecastError, QueryFrameFilterExt,
    RasterDataset, XyzRecord, ENGLAND_AND_WALES,
};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), LevelForecastError> {
    // Pass a folder holding river_grid.csv, rain_grid.csv and tide_stations.csv to query
    // real data; without one a small in-memory snapshot is used and nothing is written.
    let lookup = match std::env::args().nth(1) {
        Some(folder) => FloodLookup::with_data_folder(PathBuf::from(folder)).await?,
        None => FloodLookup::from_parts(
            RasterDataset::from_xyz(
                vec![XyzRecord::new(-2.0, 52.0, 0.8), XyzRecord::new(-1.55, 55.5, 1.3)],
                GridSpec::default(),
            ),
            RasterDataset::from_xyz(vec![XyzRecord::new(-2.0, 52.0, 0.15)], GridSpec::default()),
            vec![XyzRecord::new(-3.0, 51.0, 2.1), XyzRecord::new(-1.0, 51.0, 3.4)],
        )?,
    };

    let points = vec![LatLon(52.0, -2.0), LatLon(55.5, -1.54), LatLon(51.5, -0.12)];

    for result in lookup.rrt_value().points(points.clone()).call()? {
        match result {
            Ok(record) => println!("{record:?}"),
            Err(e) => println!("Skipped point: {e}"),
        }
    }

    let df = lookup
        .rrt_frame()
        .points(points)
        .input_datum(InputDatum::Wgs84)
        .call()?
        .filter_region(ENGLAND_AND_WALES)
        .collect()?;
    println!("{df}");

    Ok(())
}
