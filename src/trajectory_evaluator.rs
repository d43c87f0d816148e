// src/trajectory_evaluator.rs
//
// Assigns a cost to each planned trajectory: +infinity if its lane is not
// drivable this tick, otherwise left at its planned default.

use crate::data_source::DataSource;
use crate::lane_evaluator::LaneEvaluator;
use crate::trajectory::{PlannedTrajectories, RatedTrajectories};

pub struct TrajectoryEvaluator {
    lane_evaluator: LaneEvaluator,
}

impl TrajectoryEvaluator {
    pub fn new() -> Self {
        Self { lane_evaluator: LaneEvaluator::new() }
    }

    /// Same cardinality and order as `planned`.
    pub fn get_rated_trajectories(&self, data_source: &DataSource, planned: PlannedTrajectories) -> RatedTrajectories {
        planned
            .into_iter()
            .map(|mut trajectory| {
                if !self.lane_evaluator.is_drivable_lane(data_source, trajectory.lane_id) {
                    trajectory.cost = f64::INFINITY;
                }
                trajectory
            })
            .collect()
    }
}

impl Default for TrajectoryEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{FrenetCoordinates, GlobalCoordinates};
    use crate::lanes::{GlobalLaneId, LaneId};
    use crate::trajectory::Trajectory;
    use crate::vehicle::VehicleDynamics;

    fn trajectory(lane_id: LaneId, global_lane_id: GlobalLaneId) -> Trajectory {
        Trajectory {
            unique_id: 1,
            lane_id,
            global_lane_id,
            position: GlobalCoordinates::default(),
            yaw: 0.0,
            velocity: 10.0,
            waypoints: vec![],
            cost: 0.0,
        }
    }

    #[test]
    fn preserves_cardinality_and_order() {
        let mut ds = DataSource::new();
        ds.set_vehicle_dynamics(VehicleDynamics { frenet: FrenetCoordinates::new(0.0, 2.0), ..Default::default() });
        let planned = vec![
            trajectory(LaneId::Left, GlobalLaneId::Invalid),
            trajectory(LaneId::Ego, GlobalLaneId::Left),
            trajectory(LaneId::Right, GlobalLaneId::Center),
        ];

        let rated = TrajectoryEvaluator::new().get_rated_trajectories(&ds, planned);

        assert_eq!(rated.len(), 3);
        assert_eq!(rated[0].lane_id, LaneId::Left);
        assert_eq!(rated[1].lane_id, LaneId::Ego);
        assert_eq!(rated[2].lane_id, LaneId::Right);
    }

    #[test]
    fn invalid_lane_always_costs_infinity() {
        let mut ds = DataSource::new();
        ds.set_vehicle_dynamics(VehicleDynamics { frenet: FrenetCoordinates::new(0.0, 2.0), ..Default::default() });
        let planned = vec![trajectory(LaneId::Left, GlobalLaneId::Invalid)];

        let rated = TrajectoryEvaluator::new().get_rated_trajectories(&ds, planned);

        assert!(rated[0].cost.is_infinite());
        assert!(!rated[0].is_drivable());
    }

    #[test]
    fn clear_ego_lane_keeps_default_cost() {
        let mut ds = DataSource::new();
        ds.set_vehicle_dynamics(VehicleDynamics { frenet: FrenetCoordinates::new(0.0, 6.0), ..Default::default() });
        let planned = vec![trajectory(LaneId::Ego, GlobalLaneId::Center)];

        let rated = TrajectoryEvaluator::new().get_rated_trajectories(&ds, planned);

        assert_eq!(rated[0].cost, 0.0);
        assert!(rated[0].is_drivable());
    }
}
