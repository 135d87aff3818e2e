//! Workout sessions and their per-variant formulas.
//!
//! A [`WorkoutSession`] is a write-once record of the raw readings for one
//! workout. Distance is always derived from the action count; mean speed and
//! calories depend on the variant and fail with
//! [`WorkoutError::DivisionByZero`] when the divisor is zero.

use crate::error::WorkoutError;
use crate::summary::SessionSummary;

pub const M_IN_KM: f64 = 1000.0;
pub const MIN_IN_H: f64 = 60.0;

/// Step length for running and sports walking, in km
pub const STEP_LENGTH_KM: f64 = 0.65 / M_IN_KM;
/// Stroke length for swimming, in km
pub const STROKE_LENGTH_KM: f64 = 1.38 / M_IN_KM;

pub const RUN_SPEED_MULTIPLIER: f64 = 18.0;
pub const RUN_SPEED_SHIFT: f64 = 1.79;

pub const WLK_WEIGHT_MULTIPLIER: f64 = 0.035;
pub const WLK_SPEED_HEIGHT_MULTIPLIER: f64 = 0.029;
pub const KMH_IN_MSEC: f64 = 0.278;
pub const CM_IN_M: f64 = 100.0;

pub const SWM_SPEED_SHIFT: f64 = 1.1;
pub const SWM_WEIGHT_MULTIPLIER: f64 = 2.0;

/// The three supported workout variants. Display gives the label used in
/// summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum WorkoutKind {
    Running,
    SportsWalking,
    Swimming,
}

impl WorkoutKind {
    pub const ALL: [WorkoutKind; 3] = [
        WorkoutKind::Swimming,
        WorkoutKind::Running,
        WorkoutKind::SportsWalking,
    ];

    /// Sensor package tag for this variant
    pub fn tag(self) -> &'static str {
        match self {
            WorkoutKind::Running => "RUN",
            WorkoutKind::SportsWalking => "WLK",
            WorkoutKind::Swimming => "SWM",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Number of positional values a package of this kind carries
    pub fn arity(self) -> usize {
        match self {
            WorkoutKind::Running => 3,
            WorkoutKind::SportsWalking => 4,
            WorkoutKind::Swimming => 5,
        }
    }

    /// Distance covered by one action (step or stroke), in km
    pub fn action_length_km(self) -> f64 {
        match self {
            WorkoutKind::Running | WorkoutKind::SportsWalking => STEP_LENGTH_KM,
            WorkoutKind::Swimming => STROKE_LENGTH_KM,
        }
    }
}

/// Variant-specific readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetails {
    Running,
    SportsWalking { height_cm: f64 },
    Swimming { pool_length_m: f64, pool_laps: f64 },
}

impl WorkoutDetails {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDetails::Running => WorkoutKind::Running,
            WorkoutDetails::SportsWalking { .. } => WorkoutKind::SportsWalking,
            WorkoutDetails::Swimming { .. } => WorkoutKind::Swimming,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutSession {
    action_count: u32,
    duration_hours: f64,
    weight_kg: f64,
    details: WorkoutDetails,
}

impl WorkoutSession {
    pub fn new(
        action_count: u32,
        duration_hours: f64,
        weight_kg: f64,
        details: WorkoutDetails,
    ) -> Self {
        Self {
            action_count,
            duration_hours,
            weight_kg,
            details,
        }
    }

    pub fn running(action_count: u32, duration_hours: f64, weight_kg: f64) -> Self {
        Self::new(action_count, duration_hours, weight_kg, WorkoutDetails::Running)
    }

    pub fn sports_walking(
        action_count: u32,
        duration_hours: f64,
        weight_kg: f64,
        height_cm: f64,
    ) -> Self {
        Self::new(
            action_count,
            duration_hours,
            weight_kg,
            WorkoutDetails::SportsWalking { height_cm },
        )
    }

    pub fn swimming(
        action_count: u32,
        duration_hours: f64,
        weight_kg: f64,
        pool_length_m: f64,
        pool_laps: f64,
    ) -> Self {
        Self::new(
            action_count,
            duration_hours,
            weight_kg,
            WorkoutDetails::Swimming {
                pool_length_m,
                pool_laps,
            },
        )
    }

    pub fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    pub fn action_count(&self) -> u32 {
        self.action_count
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    /// Distance in km
    pub fn distance(&self) -> f64 {
        f64::from(self.action_count) * self.kind().action_length_km()
    }

    /// Mean speed in km/h. Swimming measures it from the pool, not the strokes.
    pub fn mean_speed(&self) -> Result<f64, WorkoutError> {
        let distance = match self.details {
            WorkoutDetails::Swimming {
                pool_length_m,
                pool_laps,
            } => pool_length_m * pool_laps / M_IN_KM,
            WorkoutDetails::Running | WorkoutDetails::SportsWalking { .. } => self.distance(),
        };
        Ok(distance / self.nonzero(self.duration_hours, "duration")?)
    }

    /// Calories burned, in kcal
    pub fn calories_burned(&self) -> Result<f64, WorkoutError> {
        let speed = self.mean_speed()?;
        let weight = self.weight_kg;
        let minutes = self.duration_hours * MIN_IN_H;

        let calories = match self.details {
            WorkoutDetails::Running => {
                (RUN_SPEED_MULTIPLIER * speed + RUN_SPEED_SHIFT) * weight / M_IN_KM * minutes
            }
            WorkoutDetails::SportsWalking { height_cm } => {
                let height_m = self.nonzero(height_cm, "height")? / CM_IN_M;
                let speed_ms = speed * KMH_IN_MSEC;
                (WLK_WEIGHT_MULTIPLIER * weight
                    + speed_ms.powi(2) / height_m * WLK_SPEED_HEIGHT_MULTIPLIER * weight)
                    * minutes
            }
            WorkoutDetails::Swimming { .. } => {
                (speed + SWM_SPEED_SHIFT) * SWM_WEIGHT_MULTIPLIER * weight * self.duration_hours
            }
        };
        Ok(calories)
    }

    pub fn summarize(&self) -> Result<SessionSummary, WorkoutError> {
        Ok(SessionSummary::new(
            self.kind(),
            self.duration_hours,
            self.distance(),
            self.mean_speed()?,
            self.calories_burned()?,
        ))
    }

    fn nonzero(&self, value: f64, quantity: &'static str) -> Result<f64, WorkoutError> {
        if value == 0.0 {
            return Err(WorkoutError::DivisionByZero {
                kind: self.kind(),
                quantity,
            });
        }
        Ok(value)
    }
}
