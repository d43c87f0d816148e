// Integration tests exercising the full per-tick pipeline end to end.

use highway_motion_planner::data_source::DataSource;
use highway_motion_planner::geometry::{frenet_to_cartesian, FrenetCoordinates, GlobalCoordinates, MapCoordinates};
use highway_motion_planner::lane_evaluator::LaneEvaluator;
use highway_motion_planner::lanes::LaneId;
use highway_motion_planner::maneuver::ManeuverGenerator;
use highway_motion_planner::pipeline::MotionPlanner;
use highway_motion_planner::trajectory_planner::TrajectoryPlanner;
use highway_motion_planner::vehicle::{ObjectFusion, SensorFusion, VehicleDynamics};

fn straight_map() -> Vec<MapCoordinates> {
    (0..60)
        .map(|i| {
            let s = i as f64 * 10.0;
            MapCoordinates {
                global: GlobalCoordinates::new(s, 0.0),
                frenet: FrenetCoordinates::with_normal(s, 0.0, 0.0, 1.0),
            }
        })
        .collect()
}

fn ego_data_source(s: f64, d: f64, velocity: f64) -> DataSource {
    let mut ds = DataSource::new();
    ds.set_map_coordinates(straight_map());
    ds.set_vehicle_dynamics(VehicleDynamics { velocity, frenet: FrenetCoordinates::new(s, d), ..Default::default() });
    ds.set_previous_path_end(FrenetCoordinates::new(s, d));
    ds
}

#[test]
fn scenario_1_empty_world_initial_tick() {
    let mut ds = ego_data_source(0.0, 6.0, 0.0);
    ds.set_speed_limit(21.68);

    let mut planner = MotionPlanner::new();
    let selected = planner.generate_trajectory(&ds);

    // All three lanes are drivable with no neighbors; ties resolve by the
    // fixed Left-Ego-Right generation order, so Left wins.
    assert_eq!(selected.lane_id, LaneId::Left);
}

#[test]
fn scenario_2_leader_in_lane_forces_a_lane_change() {
    let mut ds = ego_data_source(100.0, 6.0, 20.0);
    // Long enough previous path for the n*dt*v closing-the-gap term to flip
    // the (deliberately inverted) in-front predicate once ego's higher speed
    // has closed the gap: need 100 + 20*0.02*N > 115 + 10*0.02*N, i.e. N > 75.
    ds.set_previous_path(vec![GlobalCoordinates::default(); 80]);
    ds.set_sensor_fusion(SensorFusion::new(vec![ObjectFusion::new(
        1,
        GlobalCoordinates::default(),
        (10.0, 0.0),
        FrenetCoordinates::new(115.0, 6.0),
    )]));

    // Exercise the predicate directly: TrajectoryPrioritizer's tie-break
    // always favors Left on an all-zero-cost tie, so asserting on which lane
    // the selector picks would pass even if Ego were never actually marked
    // non-drivable.
    assert!(!LaneEvaluator::new().is_drivable_lane(&ds, LaneId::Ego));
}

#[test]
fn scenario_3_blocked_straight_prefers_left_on_a_tie() {
    let mut ds = ego_data_source(100.0, 6.0, 20.0);
    ds.set_sensor_fusion(SensorFusion::new(vec![ObjectFusion::new(
        1,
        GlobalCoordinates::default(),
        (5.0, 0.0),
        FrenetCoordinates::new(90.0, 6.0),
    )]));

    let mut planner = MotionPlanner::new();
    let selected = planner.generate_trajectory(&ds);

    assert_eq!(selected.lane_id, LaneId::Left);
}

#[test]
fn scenario_4_edge_lane_rejects_the_nonexistent_left_neighbor() {
    let ds = ego_data_source(100.0, 2.0, 20.0);

    let mut planner = MotionPlanner::new();
    let selected = planner.generate_trajectory(&ds);

    assert_ne!(selected.lane_id, LaneId::Left);
}

#[test]
fn scenario_5_wrap_around_stays_close_to_true_map_geometry() {
    let map = straight_map();
    let last_s = map.last().unwrap().frenet.s;
    let ego_frenet = FrenetCoordinates::new(last_s + 5.0, 6.0);
    let ego_global = frenet_to_cartesian(&ego_frenet, &map);

    let mut ds = DataSource::new();
    ds.set_vehicle_dynamics(VehicleDynamics {
        velocity: 10.0,
        global: ego_global,
        frenet: ego_frenet,
        // The wrap segment (map's last waypoint back to its first) runs in
        // -x; the reference yaw must match it for the seed anchors and the
        // forward lane anchors to land on the same side of the seam.
        yaw: std::f64::consts::PI,
    });
    ds.set_previous_path_end(ego_frenet);
    ds.set_map_coordinates(map.clone());

    let maneuvers = ManeuverGenerator::new().generate(10.0);
    let planned = TrajectoryPlanner::new().get_planned_trajectories(&ds, &maneuvers);
    let ego_trajectory = planned.iter().find(|t| t.lane_id == LaneId::Ego).unwrap();

    // The densified spline samples sit at local-frame x = 1, 3, 5, ... (step
    // 2 m, starting 1 m past the seed anchor); x = 29 m lands exactly on one
    // of them. Along this single straight (if reversed) wrap segment, local
    // x advances 1:1 with Frenet s past the ego's own position, so the same
    // point read off the map independently via `frenet_to_cartesian` at
    // `s = ego_s + 29` -- past the seam, since the map ends at s = 590 --
    // must match that sample to within the tolerance the scenario specifies.
    let seam_s = ego_frenet.s + 29.0;
    let expected = frenet_to_cartesian(&FrenetCoordinates::new(seam_s, ego_frenet.d), &map);

    let closest = ego_trajectory
        .waypoints
        .iter()
        .map(|wp| ((wp.x - expected.x).powi(2) + (wp.y - expected.y).powi(2)).sqrt())
        .fold(f64::INFINITY, f64::min);

    assert!(closest < 0.1, "closest waypoint to the seam projection was {closest} m away, expected < 0.1 m");
}

#[test]
fn scenario_6_twenty_tick_jerk_bounded_slowdown() {
    let mut ds = ego_data_source(0.0, 6.0, 25.0);
    ds.set_sensor_fusion(SensorFusion::new(vec![ObjectFusion::new(
        1,
        GlobalCoordinates::default(),
        (20.0, 0.0),
        FrenetCoordinates::new(20.0, 6.0),
    )]));

    let mut planner = MotionPlanner::with_velocity_seed(25.0);
    let mut previous_velocity = 25.0;
    for _ in 0..20 {
        planner.generate_trajectory(&ds);
        let current_velocity = planner.target_velocity();
        assert!((previous_velocity - current_velocity - 0.1).abs() < 1e-9);
        previous_velocity = current_velocity;
    }
}
