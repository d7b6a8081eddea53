use loopgen_core::cardinal::Cardinal;
use loopgen_core::error::CoreError;
use loopgen_core::params::NetworkParams;
use loopgen_core::placement::{
    even_start_positions, Fleet, StartPosition, VehiclePlacer, VehicleType,
};

fn fleet(counts: &[(&str, usize)]) -> Fleet {
    let total = counts.iter().map(|(_, count)| count).sum();
    let types = counts
        .iter()
        .map(|(id, count)| VehicleType::builder().id(*id).count(*count).build());
    Fleet::new(types, total).unwrap()
}

fn ids(placer: &mut VehiclePlacer, fleet: &Fleet, positions: &[StartPosition]) -> Vec<String> {
    placer
        .place(fleet, positions)
        .unwrap()
        .into_iter()
        .map(|placement| placement.id)
        .collect()
}

fn spread(count: usize) -> Vec<StartPosition> {
    (0..count)
        .map(|i| StartPosition::new(Cardinal::RING[i % 4], i as f64))
        .collect()
}

#[test]
fn test_ordered_placement() {
    let fleet = fleet(&[("a", 2), ("b", 2)]);
    let positions = [
        StartPosition::new(Cardinal::Top, 5.0),
        StartPosition::new(Cardinal::Left, 10.0),
        StartPosition::new(Cardinal::Bottom, 15.0),
        StartPosition::new(Cardinal::Right, 20.0),
    ];
    let placements = VehiclePlacer::new(false, 0).place(&fleet, &positions).unwrap();
    let summary: Vec<(&str, &str, Cardinal, f64)> = placements
        .iter()
        .map(|p| (p.vehicle_type.as_str(), p.id.as_str(), p.route, p.depart_pos))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("a", "a_0", Cardinal::Top, 5.0),
            ("a", "a_1", Cardinal::Left, 10.0),
            ("b", "b_0", Cardinal::Bottom, 15.0),
            ("b", "b_1", Cardinal::Right, 20.0),
        ]
    );
}

#[test]
fn test_shuffle_is_reproducible() {
    let fleet = fleet(&[("human", 10), ("rl", 10)]);
    let positions = spread(20);
    let first = ids(&mut VehiclePlacer::new(true, 42), &fleet, &positions);
    let second = ids(&mut VehiclePlacer::new(true, 42), &fleet, &positions);
    assert_eq!(first, second);

    let other = ids(&mut VehiclePlacer::new(true, 7), &fleet, &positions);
    assert_ne!(first, other);

    let mut sorted = first.clone();
    sorted.sort();
    let mut expected = ids(&mut VehiclePlacer::new(false, 0), &fleet, &positions);
    expected.sort();
    assert_eq!(sorted, expected);
}

#[test]
fn test_short_positions_rejected() {
    let fleet = fleet(&[("a", 3)]);
    let positions = spread(2);
    match VehiclePlacer::new(false, 0).place(&fleet, &positions) {
        Err(CoreError::PlacementRange { required, available }) => {
            assert_eq!((required, available), (3, 2));
        }
        other => panic!("expected placement range error, got {:?}", other),
    }
}

#[test]
fn test_extra_positions_unused() {
    let fleet = fleet(&[("a", 1)]);
    let placements = VehiclePlacer::new(false, 0).place(&fleet, &spread(4)).unwrap();
    assert_eq!(placements.len(), 1);
}

#[test]
fn test_zero_vehicles_disables_generation() {
    let types = [VehicleType::builder().id("a").count(3).build()];
    let fleet = Fleet::new(types, 0).unwrap();
    assert_eq!(fleet.vehicle_count(), 0);
    assert_eq!(fleet.types().count(), 1);
    let placements = VehiclePlacer::new(true, 1).place(&fleet, &[]).unwrap();
    assert!(placements.is_empty());
}

#[test]
fn test_fleet_validation() {
    let types = [VehicleType::builder().id("a").count(3).build()];
    match Fleet::new(types, 5) {
        Err(CoreError::Configuration { field, .. }) => assert_eq!(field, "num_vehicles"),
        other => panic!("expected configuration error, got {:?}", other),
    }

    let duplicated = [
        VehicleType::builder().id("a").count(1).build(),
        VehicleType::builder().id("a").count(1).build(),
    ];
    match Fleet::new(duplicated, 2) {
        Err(CoreError::Configuration { field, .. }) => assert_eq!(field, "types"),
        other => panic!("expected configuration error, got {:?}", other),
    }
}

#[test]
fn test_even_positions() {
    let params = NetworkParams::new(100.0, 1, 30.0, 10).unwrap();
    let positions = even_start_positions(&params, 8, 0.0).unwrap();
    let expected: Vec<StartPosition> = [
        (Cardinal::Bottom, 0.0),
        (Cardinal::Bottom, 12.5),
        (Cardinal::Right, 0.0),
        (Cardinal::Right, 12.5),
        (Cardinal::Top, 0.0),
        (Cardinal::Top, 12.5),
        (Cardinal::Left, 0.0),
        (Cardinal::Left, 12.5),
    ]
    .iter()
    .map(|&(route, pos)| StartPosition::new(route, pos))
    .collect();
    assert_eq!(positions, expected);
}

#[test]
fn test_even_positions_with_bunching() {
    let params = NetworkParams::new(100.0, 1, 30.0, 10).unwrap();
    let positions = even_start_positions(&params, 4, 20.0).unwrap();
    let routes: Vec<Cardinal> = positions.iter().map(|p| p.route).collect();
    assert_eq!(
        routes,
        vec![Cardinal::Bottom, Cardinal::Bottom, Cardinal::Right, Cardinal::Top]
    );
    assert_eq!(positions[1].pos, 20.0);
    assert_eq!(positions[2].pos, 15.0);
    assert_eq!(positions[3].pos, 10.0);

    match even_start_positions(&params, 4, 100.0) {
        Err(CoreError::Configuration { field, .. }) => assert_eq!(field, "bunching"),
        other => panic!("expected configuration error, got {:?}", other),
    }
}
