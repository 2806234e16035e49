use crate::distance::haversine;
use crate::grid::{Cell, GridIndex, GridIndexBuilder};
use crate::store::{PointStore, RawPoint};
use crate::{GlobeIndexError, NearestIndex};

fn points() -> Vec<(f64, f64)> {
    vec![
        (-25.3, 133.8),
        (-1.3, 36.8),
        (10.0, -170.0),
        (-2.0, 37.5),
        (64.0, -180.0),
        (51.5, -0.1),
        (40.7, -74.0),
        (35.7, 139.7),
        (-33.9, 151.2),
        (-54.8, -68.3),
        (78.2, 15.6),
        (-77.8, 166.7),
        (0.0, 179.9),
        (0.0, -179.9),
        (89.9, 0.0),
        (89.9, 180.0),
        (-89.9, 45.0),
        (19.4, -99.1),
        (-22.9, -43.2),
        (1.3, 103.8),
    ]
}

fn make_index(cell_size: f64) -> GridIndex {
    let points = points();
    let mut builder = GridIndexBuilder::new_with_cell_size(points.len(), cell_size).unwrap();
    for (lat, lng) in points {
        builder.add(lat, lng);
    }
    builder.finish().unwrap()
}

#[test]
fn every_point_lands_in_exactly_one_cell() {
    for cell_size in [1.0, 5.0, 30.0, 360.0] {
        let index = make_index(cell_size);
        let metadata = index.metadata();
        let mut seen = vec![];
        for row in 0..metadata.num_lat_cells() {
            for col in 0..metadata.num_lng_cells() {
                let ids = index.cell_ids(Cell { row, col });
                assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids ascending in cell");
                seen.extend_from_slice(ids);
            }
        }
        seen.sort();
        let expected: Vec<u32> = (0..points().len() as u32).collect();
        assert_eq!(seen, expected);
    }
}

#[test]
fn points_are_bucketed_by_coordinate() {
    let index = make_index(10.0);
    let metadata = index.metadata();
    assert_eq!(metadata.num_lat_cells(), 18);
    assert_eq!(metadata.num_lng_cells(), 36);

    // 64N on the antimeridian lands in the first column
    let cell = metadata.cell_of(64.0, -180.0);
    assert_eq!(cell, Cell { row: 15, col: 0 });
    assert!(index.cell_ids(cell).contains(&4));

    // 180E lands in the last column, next to column 0
    let cell = metadata.cell_of(89.9, 180.0);
    assert_eq!(cell, Cell { row: 17, col: 35 });
    assert!(index.cell_ids(cell).contains(&15));
}

#[test]
fn full_query_is_an_ordered_permutation() {
    let n = points().len();
    for cell_size in [1.0, 10.0, 45.0] {
        let index = make_index(cell_size);
        for (lat, lng) in [(0.0, 0.0), (45.0, 179.0), (-89.0, -10.0), (90.0, 33.0)] {
            let results = index.neighbors(lat, lng, n).unwrap();
            assert_eq!(results.len(), n);

            let mut ids: Vec<u32> = results.iter().map(|r| r.id).collect();
            ids.sort();
            assert_eq!(ids, (0..n as u32).collect::<Vec<_>>());

            assert!(results.windows(2).all(|w| w[0].distance <= w[1].distance));
        }
    }
}

#[test]
fn distances_are_haversine() {
    let index = make_index(10.0);
    let points = points();
    for result in index.neighbors(12.0, -60.0, 5).unwrap() {
        let (lat, lng) = points[result.id as usize];
        assert_eq!(result.distance, haversine(12.0, -60.0, lat, lng));
    }
}

#[test]
fn finds_neighbor_across_the_antimeridian() {
    let mut builder = GridIndexBuilder::new_with_cell_size(3, 2.0).unwrap();
    builder.add(0.0, 175.0);
    builder.add(0.0, -179.9);
    builder.add(3.0, 179.9);
    let index = builder.finish().unwrap();

    let results = index.nearest_ids(0.0, 179.9, 1).unwrap();
    assert_eq!(results, vec![1]);
}

#[test]
fn pole_neighbors_ignore_longitude() {
    let index = make_index(5.0);
    for lng in [-180.0, -90.0, 0.0, 42.0, 180.0] {
        let mut ids = index.nearest_ids(90.0, lng, 2).unwrap();
        ids.sort();
        assert_eq!(ids, vec![14, 15], "lng {lng}");
    }
}

#[test]
fn repeated_queries_are_identical() {
    let index = make_index(5.0);
    let first = index.neighbors(-10.0, 100.0, 7).unwrap();
    let second = index.neighbors(-10.0, 100.0, 7).unwrap();
    assert_eq!(first, second);
}

#[test]
fn k_is_clamped_and_validated() {
    let index = make_index(5.0);
    assert_eq!(index.neighbors(0.0, 0.0, 1000).unwrap().len(), points().len());
    assert!(matches!(
        index.neighbors(0.0, 0.0, 0),
        Err(GlobeIndexError::InvalidArgument(_))
    ));
}

#[test]
fn query_coordinates_are_validated() {
    let index = make_index(5.0);
    assert!(matches!(
        index.neighbors(91.0, 0.0, 1),
        Err(GlobeIndexError::InvalidArgument(_))
    ));
    assert!(matches!(
        index.neighbors(f64::NAN, 0.0, 1),
        Err(GlobeIndexError::InvalidArgument(_))
    ));
    assert!(matches!(
        index.neighbors(0.0, f64::INFINITY, 1),
        Err(GlobeIndexError::InvalidArgument(_))
    ));
    // out-of-range longitude wraps like an ingested one
    assert_eq!(
        index.nearest_ids(0.0, 539.9, 3).unwrap(),
        index.nearest_ids(0.0, 179.9, 3).unwrap()
    );
}

#[test]
fn end_to_end_scenario() {
    let store = PointStore::build(vec![
        RawPoint::new(10.0, 170.0, "", ()),
        RawPoint::new(10.0, -170.0, "", ()),
        RawPoint::new(-40.0, 0.0, "", ()),
    ])
    .unwrap();
    for cell_size in [0.25, 1.0, 7.0, 90.0, 360.0] {
        let index = GridIndex::from_store_with_cell_size(&store, cell_size).unwrap();
        assert_eq!(index.nearest_ids(10.0, 179.0, 2).unwrap(), vec![0, 1]);
    }
    let index = GridIndex::from_store(&store).unwrap();
    assert_eq!(index.nearest_ids(10.0, 179.0, 2).unwrap(), vec![0, 1]);
}

#[test]
fn single_cell_falls_back_to_scan() {
    let index = make_index(360.0);
    assert!(index.is_degenerate());
    assert_eq!(index.occupied_cells(), 1);
    let ids = index.nearest_ids(0.0, 179.9, 2).unwrap();
    assert_eq!(ids, vec![12, 13]);

    let clustered = {
        let mut builder = GridIndexBuilder::new_with_cell_size(3, 10.0).unwrap();
        builder.add(1.0, 1.0);
        builder.add(2.0, 2.0);
        builder.add(3.0, 3.0);
        builder.finish().unwrap()
    };
    assert!(clustered.is_degenerate());
    assert_eq!(clustered.nearest_ids(-60.0, -120.0, 3).unwrap(), vec![0, 1, 2]);
}

#[test]
fn coord_queries_take_lng_then_lat() {
    let index = make_index(10.0);
    let by_coord = index.neighbors_coord(&(139.7, 35.7), 1).unwrap();
    assert_eq!(by_coord[0].id, 7);
}
