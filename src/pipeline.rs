// src/pipeline.rs
//
// Ties the per-tick stages together in their fixed declared order: one
// pure, synchronous call per inbound telemetry message, with no internal
// task spawning and no timers inside the pipeline itself.

use crate::data_source::DataSource;
use crate::maneuver::ManeuverGenerator;
use crate::prioritizer::TrajectoryPrioritizer;
use crate::selector::TrajectorySelector;
use crate::trajectory::Trajectory;
use crate::trajectory_evaluator::TrajectoryEvaluator;
use crate::trajectory_planner::TrajectoryPlanner;
use crate::velocity_planner::VelocityPlanner;

/// Holds the stateful stage (`VelocityPlanner`) across ticks; every other
/// stage is a stateless function of the current `DataSource`.
pub struct MotionPlanner {
    velocity_planner: VelocityPlanner,
    maneuver_generator: ManeuverGenerator,
    trajectory_planner: TrajectoryPlanner,
    trajectory_evaluator: TrajectoryEvaluator,
    prioritizer: TrajectoryPrioritizer,
    selector: TrajectorySelector,
}

impl MotionPlanner {
    pub fn new() -> Self {
        Self::with_velocity_seed(0.0)
    }

    /// Construct with a caller-supplied initial target velocity, e.g. when
    /// resuming planning mid-drive instead of from a standstill.
    pub fn with_velocity_seed(target_velocity: f64) -> Self {
        Self {
            velocity_planner: VelocityPlanner::with_seed(target_velocity),
            maneuver_generator: ManeuverGenerator::new(),
            trajectory_planner: TrajectoryPlanner::new(),
            trajectory_evaluator: TrajectoryEvaluator::new(),
            prioritizer: TrajectoryPrioritizer::new(),
            selector: TrajectorySelector::new(),
        }
    }

    /// Run one full tick against the given snapshot and return the selected
    /// trajectory. `data_source` must already reflect this tick's inbound
    /// telemetry — setters are only invoked between ticks.
    pub fn generate_trajectory(&mut self, data_source: &DataSource) -> Trajectory {
        self.velocity_planner.calculate_target_velocity(data_source);
        let target_velocity = self.velocity_planner.target_velocity();

        let maneuvers = self.maneuver_generator.generate(target_velocity);
        let planned = self.trajectory_planner.get_planned_trajectories(data_source, &maneuvers);
        let rated = self.trajectory_evaluator.get_rated_trajectories(data_source, planned);
        let prioritized = self.prioritizer.get_prioritized_trajectories(rated);

        // The queue is never empty; the selector itself falls back to the
        // lowest-id candidate if every cost is +inf.
        let selected = self
            .selector
            .get_selected_trajectory(prioritized)
            .expect("ManeuverGenerator always emits three candidates");

        tracing::debug!(%selected, target_velocity, "tick complete");
        selected
    }

    /// The velocity planner's current target speed (m/s), as of the most
    /// recent tick.
    pub fn target_velocity(&self) -> f64 {
        self.velocity_planner.target_velocity()
    }
}

impl Default for MotionPlanner {
    fn default() -> Self {
        Self::new()
    }
}
