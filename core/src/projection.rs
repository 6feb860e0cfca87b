//! Weight trajectory projection
//!
//! Extrapolates the weekly rate implied by the chosen intensity into a
//! sequence of dated projection points with percentage milestones. The
//! projection is truncated at a fixed horizon when the goal is not
//! reachable in time; truncation is a flag, never an error.

use crate::profile::{Goal, Intensity};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Maximum projection length in weeks
pub const PROJECTION_HORIZON_WEEKS: i64 = 52;

/// Standard milestone percentages
pub const MILESTONE_PERCENTAGES: &[u32] = &[25, 50, 75, 100];

/// What the user asked the projection to run toward
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionTarget {
    /// Project until this bodyweight is reached (kg)
    Weight(f64),
    /// Project until this date
    Date(NaiveDate),
}

/// One projected point on the trajectory
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub date: NaiveDate,
    pub weight_kg: f64,
}

/// A named checkpoint along the projected change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightMilestone {
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub label: String,
    pub percent: u32,
}

/// Projected weight trajectory with milestones
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightProjection {
    /// Weekly points from start toward the goal, start included
    pub points: Vec<ProjectionPoint>,
    pub milestones: Vec<WeightMilestone>,
    /// False when the goal was not reachable within the horizon and the
    /// projection was truncated
    pub complete: bool,
}

impl WeightProjection {
    /// Final projected weight (the start weight for an empty change)
    pub fn final_weight_kg(&self) -> Option<f64> {
        self.points.last().map(|p| p.weight_kg)
    }
}

/// Projection engine for weight trajectories
pub struct ProjectionEngine;

impl ProjectionEngine {
    /// Project a weight trajectory from `start_date`
    ///
    /// The weekly rate comes from the goal direction and intensity. A zero
    /// rate (maintain/conditioning) projects flat for the full horizon
    /// with no milestones.
    pub fn project(
        start_weight_kg: f64,
        goal: Goal,
        intensity: Intensity,
        target: ProjectionTarget,
        start_date: NaiveDate,
    ) -> WeightProjection {
        let weekly_rate = goal.direction() * intensity.weekly_kg_change();

        if weekly_rate == 0.0 {
            return Self::flat_projection(start_weight_kg, target, start_date);
        }

        // Weeks of change the plan calls for, before the horizon cap.
        let planned_weeks = match target {
            ProjectionTarget::Weight(target_kg) => {
                let total_change = target_kg - start_weight_kg;
                // Target already met, or on the wrong side of the goal
                // direction: the trajectory is a single starting point.
                if total_change / weekly_rate <= 0.0 {
                    return WeightProjection {
                        points: vec![ProjectionPoint {
                            date: start_date,
                            weight_kg: start_weight_kg,
                        }],
                        milestones: Vec::new(),
                        complete: true,
                    };
                }
                (total_change / weekly_rate).ceil() as i64
            }
            ProjectionTarget::Date(date) => {
                let days = (date - start_date).num_days().max(0);
                (days as f64 / 7.0).ceil() as i64
            }
        };

        let complete = planned_weeks <= PROJECTION_HORIZON_WEEKS;
        let weeks = planned_weeks.min(PROJECTION_HORIZON_WEEKS);
        let total_change = weekly_rate * planned_weeks as f64;
        let target_weight = match target {
            ProjectionTarget::Weight(kg) => kg,
            ProjectionTarget::Date(_) => start_weight_kg + total_change,
        };

        let mut points = Vec::with_capacity(weeks as usize + 1);
        for week in 0..=weeks {
            let projected = start_weight_kg + weekly_rate * week as f64;
            // A converging projection lands exactly on the target rather
            // than overshooting on the final partial week.
            let weight_kg = if complete && week == weeks {
                target_weight
            } else {
                projected
            };
            points.push(ProjectionPoint {
                date: start_date + Duration::weeks(week),
                weight_kg,
            });
        }

        let milestones = Self::milestones(
            start_weight_kg,
            target_weight - start_weight_kg,
            weekly_rate,
            weeks,
            start_date,
        );

        WeightProjection {
            points,
            milestones,
            complete,
        }
    }

    fn flat_projection(
        start_weight_kg: f64,
        target: ProjectionTarget,
        start_date: NaiveDate,
    ) -> WeightProjection {
        let weeks = match target {
            ProjectionTarget::Date(date) => {
                let days = (date - start_date).num_days().max(0);
                ((days as f64 / 7.0).ceil() as i64).min(PROJECTION_HORIZON_WEEKS)
            }
            ProjectionTarget::Weight(_) => PROJECTION_HORIZON_WEEKS,
        };

        let points = (0..=weeks)
            .map(|week| ProjectionPoint {
                date: start_date + Duration::weeks(week),
                weight_kg: start_weight_kg,
            })
            .collect();

        WeightProjection {
            points,
            milestones: Vec::new(),
            complete: true,
        }
    }

    /// Milestones at the standard checkpoints of total planned change
    ///
    /// The milestone weight is the exact checkpoint weight; its date is the
    /// first weekly point at or past that fraction. Checkpoints beyond a
    /// truncated horizon are omitted.
    fn milestones(
        start_weight_kg: f64,
        total_change: f64,
        weekly_rate: f64,
        generated_weeks: i64,
        start_date: NaiveDate,
    ) -> Vec<WeightMilestone> {
        let mut milestones = Vec::new();
        for &pct in MILESTONE_PERCENTAGES {
            let change_at_pct = total_change * pct as f64 / 100.0;
            let week = (change_at_pct / weekly_rate).ceil() as i64;
            if week > generated_weeks {
                continue;
            }
            milestones.push(WeightMilestone {
                date: start_date + Duration::weeks(week),
                weight_kg: start_weight_kg + change_at_pct,
                label: format!("{}% Complete", pct),
                percent: pct,
            });
        }
        milestones
    }
}
