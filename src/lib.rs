// Library surface for the CLI and integration tests.
pub mod config;
pub mod error;
pub mod factory;
pub mod logging;
pub mod package;
pub mod summary;
pub mod workout;

pub use error::{PackageError, WorkoutError};
pub use factory::create_session;
pub use summary::{Locale, SessionSummary};
pub use workout::{WorkoutDetails, WorkoutKind, WorkoutSession};
