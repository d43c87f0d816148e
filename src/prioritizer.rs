// src/prioritizer.rs
//
// Orders rated trajectories by ascending cost, breaking ties by insertion
// order. The candidate set is always small and fixed-size (one per lane), so
// a stable sort on a `Vec` is all the ordering a priority queue would buy us.

use crate::trajectory::{RatedTrajectories, Trajectory};

/// Trajectories ordered ascending by cost, ties broken by original position.
pub struct PrioritizedTrajectories {
    queue: Vec<Trajectory>,
}

impl PrioritizedTrajectories {
    /// The lowest-cost trajectory, or `None` if the queue is empty.
    pub fn peek(&self) -> Option<&Trajectory> {
        self.queue.first()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drains the queue in priority order.
    pub fn into_vec(self) -> Vec<Trajectory> {
        self.queue
    }
}

pub struct TrajectoryPrioritizer;

impl TrajectoryPrioritizer {
    pub fn new() -> Self {
        Self
    }

    pub fn get_prioritized_trajectories(&self, rated: RatedTrajectories) -> PrioritizedTrajectories {
        let mut indexed: Vec<(usize, Trajectory)> = rated.into_iter().enumerate().collect();
        // `sort_by` is stable, so equal-cost entries keep their original index order.
        indexed.sort_by(|a, b| a.1.cost.total_cmp(&b.1.cost).then(a.0.cmp(&b.0)));
        PrioritizedTrajectories { queue: indexed.into_iter().map(|(_, t)| t).collect() }
    }
}

impl Default for TrajectoryPrioritizer {
    fn default() -> Self {
        Self::new()
    }
}
