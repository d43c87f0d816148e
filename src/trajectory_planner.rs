// src/trajectory_planner.rs
//
// Materializes each candidate Maneuver into a geometric Trajectory: stitch
// the previous path tail, derive (or reuse) a reference pose and two seed
// anchors, append three forward anchors along the target lane, rotate
// everything into the reference's local frame, fit+densify a spline through
// them, then rotate the dense samples back to global and append them after
// the previous-path tail. Mirrors `TrajectoryPlanner` in the original
// implementation (`trajectory_planner.cpp`).

use crate::data_source::DataSource;
use crate::geometry::{frenet_to_cartesian, to_global_frame, to_local_frame, FrenetCoordinates, GlobalCoordinates};
use crate::lanes::{local_to_global, LaneId};
use crate::maneuver::Maneuver;
use crate::spline::CubicSpline;
use crate::trajectory::{PlannedTrajectories, Trajectory};

/// Forward anchor offsets along the target lane (m), ahead of ego's current s.
const FORWARD_ANCHOR_OFFSETS: [f64; 3] = [30.0, 60.0, 90.0];

/// Spacing between densified local-frame samples (m along local x).
const SPLINE_STEP: f64 = 2.0;

pub struct TrajectoryPlanner;

impl TrajectoryPlanner {
    pub fn new() -> Self {
        Self
    }

    /// One output per input maneuver, preserving order.
    pub fn get_planned_trajectories(&self, data_source: &DataSource, maneuvers: &[Maneuver]) -> PlannedTrajectories {
        let previous_path_global = data_source.previous_path_global();
        let vehicle = data_source.vehicle_dynamics();
        let ego_global_lane = data_source.global_lane_id();

        let mut trajectories = Vec::with_capacity(maneuvers.len());
        for (index, maneuver) in maneuvers.iter().enumerate() {
            let global_lane_id = local_to_global(ego_global_lane, maneuver.lane_id);

            let mut waypoints: Vec<GlobalCoordinates> = previous_path_global.to_vec();
            let dense = self.synthesize_lane_path(data_source, maneuver.lane_id, ego_global_lane);
            waypoints.extend(dense);

            trajectories.push(Trajectory {
                unique_id: (index + 1) as i32,
                lane_id: maneuver.lane_id,
                global_lane_id,
                position: vehicle.global,
                yaw: vehicle.yaw,
                velocity: maneuver.velocity,
                waypoints,
                cost: 0.0,
            });
        }

        tracing::debug!(
            previous_path_len = previous_path_global.len(),
            planned = trajectories.len(),
            "planned trajectories for this tick"
        );

        trajectories
    }

    /// Build the reference pose and two seed anchors, then three forward
    /// anchors in the target lane, rotate all five into the reference's
    /// local frame, fit a spline through them and densify it, then rotate
    /// the dense samples back to global.
    fn synthesize_lane_path(
        &self,
        data_source: &DataSource,
        lane_id: LaneId,
        ego_global_lane: crate::lanes::GlobalLaneId,
    ) -> Vec<GlobalCoordinates> {
        let vehicle = data_source.vehicle_dynamics();
        let previous_path_global = data_source.previous_path_global();

        let (reference_position, reference_yaw, seed_a, seed_b) = if previous_path_global.len() < 2 {
            let predecessor =
                GlobalCoordinates::new(vehicle.global.x - vehicle.yaw.cos(), vehicle.global.y - vehicle.yaw.sin());
            (vehicle.global, vehicle.yaw, predecessor, vehicle.global)
        } else {
            let n = previous_path_global.len();
            let a = previous_path_global[n - 2];
            let b = previous_path_global[n - 1];
            let yaw = (b.y - a.y).atan2(b.x - a.x);
            (b, yaw, a, b)
        };

        let global_lane_id = local_to_global(ego_global_lane, lane_id);
        let lane_index = match global_lane_id {
            crate::lanes::GlobalLaneId::Left => 0.0,
            crate::lanes::GlobalLaneId::Center => 1.0,
            crate::lanes::GlobalLaneId::Right => 2.0,
            crate::lanes::GlobalLaneId::Invalid => {
                // Still produce geometry for an invalid lane; LaneEvaluator
                // rejects it later via cost = +inf. Fall back to ego's own
                // lateral offset so the anchors stay finite.
                (vehicle.frenet.d / crate::lanes::LANE_WIDTH).floor()
            }
        };
        let target_d = 2.0 + crate::lanes::LANE_WIDTH * lane_index;

        let map = data_source.map_coordinates();
        let forward_anchors: Vec<GlobalCoordinates> = if map.is_empty() {
            Vec::new()
        } else {
            FORWARD_ANCHOR_OFFSETS
                .iter()
                .map(|offset| {
                    let frenet = FrenetCoordinates::new(vehicle.frenet.s + offset, target_d);
                    frenet_to_cartesian(&frenet, map)
                })
                .collect()
        };

        if forward_anchors.len() < FORWARD_ANCHOR_OFFSETS.len() {
            // No map: nothing to spline against. The previous-path tail
            // (already stitched by the caller) is all the continuity we can
            // offer this tick.
            return Vec::new();
        }

        let anchors_global = [seed_a, seed_b, forward_anchors[0], forward_anchors[1], forward_anchors[2]];
        let anchors_local: Vec<(f64, f64)> = anchors_global
            .iter()
            .map(|p| {
                let local = to_local_frame(*p, reference_position, reference_yaw);
                (local.x, local.y)
            })
            .collect();

        // Anchors must be strictly increasing in local x for the spline fit;
        // this holds as long as the chosen lane path doesn't double back on
        // itself within the anchor span, which is guaranteed on a highway
        // centerline at these offsets.
        let spline = CubicSpline::fit(&anchors_local);
        spline
            .densify(SPLINE_STEP)
            .into_iter()
            .map(|(x, y)| to_global_frame(GlobalCoordinates::new(x, y), reference_position, reference_yaw))
            .collect()
    }
}

impl Default for TrajectoryPlanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MapCoordinates;
    use crate::vehicle::VehicleDynamics;

    fn straight_map() -> Vec<MapCoordinates> {
        (0..40)
            .map(|i| {
                let s = i as f64 * 10.0;
                MapCoordinates {
                    global: GlobalCoordinates::new(s, 0.0),
                    frenet: FrenetCoordinates::with_normal(s, 0.0, 0.0, 1.0),
                }
            })
            .collect()
    }

    #[test]
    fn preserves_order_and_cardinality() {
        let mut ds = DataSource::new();
        ds.set_map_coordinates(straight_map());
        ds.set_vehicle_dynamics(VehicleDynamics { frenet: FrenetCoordinates::new(0.0, 6.0), ..Default::default() });

        let maneuvers = crate::maneuver::ManeuverGenerator::new().generate(10.0);
        let planned = TrajectoryPlanner::new().get_planned_trajectories(&ds, &maneuvers);

        assert_eq!(planned.len(), 3);
        assert_eq!(planned[0].lane_id, LaneId::Left);
        assert_eq!(planned[1].lane_id, LaneId::Ego);
        assert_eq!(planned[2].lane_id, LaneId::Right);
    }

    #[test]
    fn waypoints_begin_with_the_previous_path_tail() {
        let mut ds = DataSource::new();
        ds.set_map_coordinates(straight_map());
        ds.set_vehicle_dynamics(VehicleDynamics { frenet: FrenetCoordinates::new(50.0, 6.0), ..Default::default() });
        let tail = vec![GlobalCoordinates::new(48.0, -2.0), GlobalCoordinates::new(50.0, -2.0)];
        ds.set_previous_path(tail.clone());

        let maneuvers = crate::maneuver::ManeuverGenerator::new().generate(10.0);
        let planned = TrajectoryPlanner::new().get_planned_trajectories(&ds, &maneuvers);

        for trajectory in &planned {
            assert_eq!(&trajectory.waypoints[..tail.len()], tail.as_slice());
        }
    }

    #[test]
    fn empty_previous_path_still_produces_a_non_degenerate_tangent() {
        let mut ds = DataSource::new();
        ds.set_map_coordinates(straight_map());
        ds.set_vehicle_dynamics(VehicleDynamics {
            frenet: FrenetCoordinates::new(0.0, 6.0),
            yaw: 0.0,
            ..Default::default()
        });

        let maneuvers = crate::maneuver::ManeuverGenerator::new().generate(10.0);
        let planned = TrajectoryPlanner::new().get_planned_trajectories(&ds, &maneuvers);

        for trajectory in &planned {
            assert!(!trajectory.waypoints.is_empty());
        }
    }
}
