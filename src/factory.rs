use tracing::debug;

use crate::error::WorkoutError;
use crate::workout::{WorkoutKind, WorkoutSession};

/// Build a session from a sensor package tag and its positional readings:
/// action count, duration, weight, then height (`WLK`) or pool length and
/// lap count (`SWM`).
pub fn create_session(type_tag: &str, data: &[f64]) -> Result<WorkoutSession, WorkoutError> {
    let kind = WorkoutKind::from_tag(type_tag)
        .ok_or_else(|| WorkoutError::InvalidWorkoutType(type_tag.to_string()))?;

    if data.len() != kind.arity() {
        return Err(WorkoutError::ArityMismatch {
            kind,
            expected: kind.arity(),
            actual: data.len(),
        });
    }

    let action_count = action_count(data[0])?;
    let (duration_hours, weight_kg) = (data[1], data[2]);
    debug!(%kind, action_count, duration_hours, weight_kg, "creating session");

    let session = match kind {
        WorkoutKind::Running => WorkoutSession::running(action_count, duration_hours, weight_kg),
        WorkoutKind::SportsWalking => {
            WorkoutSession::sports_walking(action_count, duration_hours, weight_kg, data[3])
        }
        WorkoutKind::Swimming => {
            WorkoutSession::swimming(action_count, duration_hours, weight_kg, data[3], data[4])
        }
    };
    Ok(session)
}

fn action_count(value: f64) -> Result<u32, WorkoutError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Ok(value as u32)
    } else {
        Err(WorkoutError::InvalidActionCount(value))
    }
}
