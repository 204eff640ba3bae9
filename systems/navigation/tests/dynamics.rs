use loon_core::{
    AltitudeChange, GridCell, GridDimensions, MissionParameters, ProblemInstance, WindVector,
};
use loon_system_navigation::{Balloon, Strategy};
use loon_world::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Builds a world whose wind is uniform within each altitude layer.
fn layered_world(
    dimensions: GridDimensions,
    radius: u32,
    targets: Vec<GridCell>,
    layers: &[WindVector],
) -> World {
    assert_eq!(layers.len(), dimensions.altitudes() as usize);
    let winds = layers
        .iter()
        .flat_map(|wind| std::iter::repeat(*wind).take(dimensions.cell_count()))
        .collect();
    World::new(&ProblemInstance::new(
        dimensions,
        MissionParameters::new(radius, 1, 10),
        GridCell::new(0, 0),
        targets,
        winds,
    ))
}

#[test]
fn launch_turn_always_climbs() {
    let dimensions = GridDimensions::new(5, 5, 3);
    let world = layered_world(
        dimensions,
        1,
        vec![GridCell::new(2, 2)],
        &[WindVector::CALM; 3],
    );

    for strategy in Strategy::ALL {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut balloon = Balloon::launch(GridCell::new(2, 2), strategy);
        let change = balloon.change_altitude(&world, 0, &mut rng);

        assert_eq!(change, AltitudeChange::Ascend, "{strategy:?}");
        assert_eq!(balloon.altitude(), 1);
        assert_eq!((balloon.row(), balloon.column()), (2, 2));
    }
}

#[test]
fn launch_climb_is_cancelled_under_a_low_ceiling() {
    let dimensions = GridDimensions::new(3, 3, 1);
    let world = layered_world(dimensions, 1, Vec::new(), &[WindVector::CALM]);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut balloon = Balloon::launch(GridCell::new(1, 1), Strategy::Hotspot);

    assert_eq!(
        balloon.change_altitude(&world, 0, &mut rng),
        AltitudeChange::Hold
    );
    assert_eq!(balloon.altitude(), 0);
}

#[test]
fn drift_uses_wind_of_the_new_altitude_and_wraps_columns() {
    let dimensions = GridDimensions::new(6, 4, 3);
    let world = layered_world(
        dimensions,
        1,
        Vec::new(),
        &[
            WindVector::new(1, 1),
            WindVector::new(1, -1),
            WindVector::new(0, 3),
        ],
    );
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut balloon = Balloon::launch(GridCell::new(2, 0), Strategy::Random);

    let _ = balloon.change_altitude(&world, 0, &mut rng);
    assert_eq!(balloon.altitude(), 1);
    assert_eq!((balloon.row(), balloon.column()), (3, 3));
}

#[test]
fn lost_balloons_hold_and_stay_put() {
    let dimensions = GridDimensions::new(3, 3, 2);
    let world = layered_world(
        dimensions,
        1,
        Vec::new(),
        &[WindVector::CALM, WindVector::new(-2, 0)],
    );
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut balloon = Balloon::launch(GridCell::new(1, 1), Strategy::Random);

    assert_eq!(
        balloon.change_altitude(&world, 0, &mut rng),
        AltitudeChange::Ascend
    );
    assert_eq!(balloon.row(), -1);
    assert!(!balloon.is_alive(&world));

    let snapshot = balloon;
    for turn in 1..5 {
        assert_eq!(
            balloon.change_altitude(&world, turn, &mut rng),
            AltitudeChange::Hold
        );
    }
    assert_eq!(balloon, snapshot);
    assert!(!balloon.is_alive(&world));
}

#[test]
fn hotspot_sinks_over_promising_cells() {
    let dimensions = GridDimensions::new(5, 5, 4);
    let world = layered_world(
        dimensions,
        1,
        vec![GridCell::new(3, 2)],
        &[WindVector::CALM; 4],
    );
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut balloon = Balloon::launch(GridCell::new(2, 2), Strategy::Hotspot);

    assert!(balloon.on_spot(&world));
    assert_eq!(
        Strategy::Hotspot.desired_change(&balloon, &world, &mut rng),
        AltitudeChange::Descend
    );

    let _ = balloon.change_altitude(&world, 0, &mut rng);
    assert_eq!(
        balloon.change_altitude(&world, 1, &mut rng),
        AltitudeChange::Hold,
        "descending from altitude one is softened"
    );
}

#[test]
fn reverse_hotspot_sinks_away_from_targets() {
    let dimensions = GridDimensions::new(5, 5, 4);
    let world = layered_world(
        dimensions,
        1,
        vec![GridCell::new(3, 2)],
        &[WindVector::CALM; 4],
    );
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let balloon = Balloon::launch(GridCell::new(0, 0), Strategy::ReverseHotspot);

    assert!(!balloon.on_spot(&world));
    assert_eq!(
        Strategy::ReverseHotspot.desired_change(&balloon, &world, &mut rng),
        AltitudeChange::Descend
    );
    for _ in 0..32 {
        assert_ne!(
            Strategy::Hotspot.desired_change(&balloon, &world, &mut rng),
            AltitudeChange::Descend
        );
    }
}

#[test]
fn spot_projection_wraps_past_the_last_row() {
    let dimensions = GridDimensions::new(4, 4, 2);
    let world = layered_world(
        dimensions,
        2,
        vec![GridCell::new(1, 1)],
        &[WindVector::CALM; 2],
    );
    let balloon = Balloon::launch(GridCell::new(3, 1), Strategy::Hotspot);

    assert!(balloon.on_spot(&world));
}

#[test]
fn random_strategy_produces_every_change() {
    let dimensions = GridDimensions::new(3, 3, 3);
    let world = layered_world(dimensions, 1, Vec::new(), &[WindVector::CALM; 3]);
    let balloon = Balloon::launch(GridCell::new(1, 1), Strategy::Random);
    let mut rng = ChaCha8Rng::seed_from_u64(21);

    let mut seen = [false; 3];
    for _ in 0..200 {
        let change = Strategy::Random.desired_change(&balloon, &world, &mut rng);
        seen[(change.delta() + 1) as usize] = true;
    }
    assert_eq!(seen, [true; 3]);
}
