//! Summary of a training run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fmt;
use uuid::Uuid;

use crate::EpisodeOutcome;

/// Bookkeeping for one training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Run identifier
    pub run_id: Uuid,
    /// Start time
    pub started_at: DateTime<Utc>,
    /// End time
    pub finished_at: DateTime<Utc>,
    /// Outcome of every episode, in order
    pub outcomes: Vec<EpisodeOutcome>,
    /// Episodes that reached a goal
    pub completed: usize,
    /// `completed / outcomes.len()`
    pub coverage: f64,
    /// Mean number of transitions per episode
    pub mean_steps: f64,
    /// Population standard deviation of transitions per episode
    pub std_dev_steps: f64,
    /// Whether the run produced a model
    pub model_produced: bool,
}

impl TrainingReport {
    pub(crate) fn new(
        run_id: Uuid,
        started_at: DateTime<Utc>,
        outcomes: Vec<EpisodeOutcome>,
        model_produced: bool,
    ) -> Self {
        let completed = outcomes.iter().filter(|o| o.reached_goal()).count();
        let coverage = coverage(completed, outcomes.len());

        let steps: Vec<f64> = outcomes.iter().map(|o| o.steps() as f64).collect();
        let (mean_steps, std_dev_steps) = if steps.is_empty() {
            (0.0, 0.0)
        } else {
            (steps.iter().mean(), steps.iter().population_std_dev())
        };

        Self {
            run_id,
            started_at,
            finished_at: Utc::now(),
            outcomes,
            completed,
            coverage,
            mean_steps,
            std_dev_steps,
            model_produced,
        }
    }

    /// Number of episodes in the run
    #[must_use]
    pub fn episodes(&self) -> usize {
        self.outcomes.len()
    }

    /// Episodes that ended in a dead end
    #[must_use]
    pub fn dead_ends(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EpisodeOutcome::DeadEnd { .. }))
            .count()
    }

    /// Wall-clock duration of the run
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Fraction of completed episodes, zero for an empty run
#[must_use]
pub fn coverage(completed: usize, episodes: usize) -> f64 {
    if episodes == 0 {
        0.0
    } else {
        completed as f64 / episodes as f64
    }
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run {}: {}/{} episodes reached a goal (coverage {:.3}), {:.2} ± {:.2} steps, model {}",
            self.run_id,
            self.completed,
            self.episodes(),
            self.coverage,
            self.mean_steps,
            self.std_dev_steps,
            if self.model_produced { "accepted" } else { "rejected" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_report_statistics() {
        let outcomes = vec![
            EpisodeOutcome::Goal { start: 0, goal: 3, steps: 3 },
            EpisodeOutcome::DeadEnd { start: 1, at: 2, steps: 1 },
            EpisodeOutcome::Exhausted { start: 0, at: 1, steps: 5 },
            EpisodeOutcome::Goal { start: 2, goal: 3, steps: 1 },
        ];
        let report = TrainingReport::new(Uuid::new_v4(), Utc::now(), outcomes, false);

        assert_eq!(report.episodes(), 4);
        assert_eq!(report.completed, 2);
        assert_eq!(report.dead_ends(), 1);
        assert_relative_eq!(report.coverage, 0.5);
        assert_relative_eq!(report.mean_steps, 2.5);
        assert_relative_eq!(report.std_dev_steps, 1.658_312_395, epsilon = 1e-6);
        assert!(report.duration() >= chrono::Duration::zero());
        assert!(report.to_string().contains("rejected"));
    }

    #[test]
    fn test_report_serializes_outcomes() {
        let outcomes = vec![EpisodeOutcome::Goal { start: 1, goal: 3, steps: 2 }];
        let report = TrainingReport::new(Uuid::new_v4(), Utc::now(), outcomes, true);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcomes"][0]["kind"], "goal");
        assert_eq!(json["completed"], 1);
        assert_eq!(json["model_produced"], true);
    }

    #[test]
    fn test_coverage_of_empty_run() {
        assert_eq!(coverage(0, 0), 0.0);
        assert_eq!(coverage(3, 4), 0.75);
    }
}
