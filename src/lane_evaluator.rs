// src/lane_evaluator.rs
//
// Decides whether a lane is safe to occupy this tick, under constant-velocity
// neighbor prediction. Three predicate quirks are preserved deliberately
// rather than "fixed": the in-front check requires ego to already be ahead
// of the object rather than the reverse, the adjacent-lane checks have no
// explicit upper distance bound of their own, and the ego reference point
// mixes the previous path's terminal Frenet `s` with the ego's *current*
// Frenet `s` for lane classification.

use crate::data_source::DataSource;
use crate::lanes::{classify_lane, global_to_local, GlobalLaneId, LaneId};
use crate::velocity_planner::ACTUATOR_DT;

/// Distance within which a neighbor is considered near (m).
pub const NEAR: f64 = 30.0;

pub struct LaneEvaluator;

impl LaneEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Pure function of the current `DataSource` snapshot.
    pub fn is_drivable_lane(&self, data_source: &DataSource, lane_id: LaneId) -> bool {
        if lane_id == LaneId::Invalid {
            return false;
        }

        // Ego's predicted position is referenced off the previous path's end,
        // not its current pose — the object predictions below are
        // referenced off the current pose instead. This mismatch is kept
        // deliberately, not reconciled.
        let previous_path_end = data_source.previous_path_end();
        let previous_path_len = data_source.previous_path_global().len();
        let vehicle = data_source.vehicle_dynamics();
        let ego_s_predicted =
            previous_path_end.s + (previous_path_len as f64) * ACTUATOR_DT * vehicle.velocity;

        let ego_global_lane = data_source.global_lane_id();

        let mut car_in_front = false;
        let mut car_to_left = false;
        let mut car_to_right = false;

        for obj in &data_source.sensor_fusion().objs {
            let obj_global_lane = classify_lane(&obj.frenet);
            let obj_lane = global_to_local(ego_global_lane, obj_global_lane);
            let obj_s_predicted = obj.frenet.s + (previous_path_len as f64) * ACTUATOR_DT * obj.velocity;
            let near = (ego_s_predicted - obj_s_predicted).abs() < NEAR;

            match obj_lane {
                LaneId::Ego => {
                    // Note: `ego_s' > obj_s'` requires ego already ahead of
                    // the object to flag it as an in-front hazard. This
                    // reads as inverted but is kept exactly as specified.
                    if ego_s_predicted > obj_s_predicted && near {
                        car_in_front = true;
                    }
                }
                LaneId::Left => {
                    if (ego_s_predicted - NEAR) < obj_s_predicted && near {
                        car_to_left = true;
                    }
                }
                LaneId::Right => {
                    if (ego_s_predicted - NEAR) < obj_s_predicted && near {
                        car_to_right = true;
                    }
                }
                LaneId::Invalid => {}
            }
        }

        let ego_in_valid_lane = ego_global_lane != GlobalLaneId::Invalid;

        match lane_id {
            LaneId::Ego => ego_in_valid_lane && !car_in_front,
            LaneId::Left => ego_in_valid_lane && ego_global_lane.offset(-1) != GlobalLaneId::Invalid && !car_to_left,
            LaneId::Right => ego_in_valid_lane && ego_global_lane.offset(1) != GlobalLaneId::Invalid && !car_to_right,
            LaneId::Invalid => false,
        }
    }
}

impl Default for LaneEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FrenetCoordinates;
    use crate::vehicle::{ObjectFusion, SensorFusion, VehicleDynamics};

    fn ego_ds(s: f64, d: f64, velocity: f64) -> DataSource {
        let mut ds = DataSource::new();
        ds.set_vehicle_dynamics(VehicleDynamics { velocity, frenet: FrenetCoordinates::new(s, d), ..Default::default() });
        ds.set_previous_path_end(FrenetCoordinates::new(s, d));
        ds
    }

    #[test]
    fn empty_world_all_three_lanes_drivable_from_center() {
        let ds = ego_ds(0.0, 6.0, 0.0);
        let evaluator = LaneEvaluator::new();
        assert!(evaluator.is_drivable_lane(&ds, LaneId::Ego));
        assert!(evaluator.is_drivable_lane(&ds, LaneId::Left));
        assert!(evaluator.is_drivable_lane(&ds, LaneId::Right));
    }

    #[test]
    fn invalid_lane_is_never_drivable() {
        let ds = ego_ds(0.0, 6.0, 0.0);
        assert!(!LaneEvaluator::new().is_drivable_lane(&ds, LaneId::Invalid));
    }

    #[test]
    fn edge_lane_has_no_left_neighbor() {
        let ds = ego_ds(0.0, 2.0, 0.0);
        let evaluator = LaneEvaluator::new();
        assert!(!evaluator.is_drivable_lane(&ds, LaneId::Left));
        assert!(evaluator.is_drivable_lane(&ds, LaneId::Right));
    }

    #[test]
    fn ego_becomes_non_drivable_once_ego_outruns_a_closer_in_lane_object() {
        // ego_s' ends up ahead of obj_s' and within NEAR, tripping the
        // (deliberately inverted) in-front predicate.
        let mut ds = ego_ds(100.0, 6.0, 20.0);
        ds.set_previous_path(vec![]);
        ds.set_sensor_fusion(SensorFusion::new(vec![ObjectFusion::new(
            1,
            Default::default(),
            (0.0, 0.0),
            FrenetCoordinates::new(90.0, 6.0),
        )]));

        assert!(!LaneEvaluator::new().is_drivable_lane(&ds, LaneId::Ego));
    }

    #[test]
    fn a_stationary_in_lane_object_ahead_of_ego_does_not_block() {
        // obj_s' > ego_s' here, so the inverted predicate does *not* trip.
        let mut ds = ego_ds(100.0, 6.0, 20.0);
        ds.set_sensor_fusion(SensorFusion::new(vec![ObjectFusion::new(
            1,
            Default::default(),
            (0.0, 0.0),
            FrenetCoordinates::new(110.0, 6.0),
        )]));

        assert!(LaneEvaluator::new().is_drivable_lane(&ds, LaneId::Ego));
    }
}
