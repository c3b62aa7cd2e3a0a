//! garmin-workouts: structured workouts to Garmin Connect.
//!
//! Translates a [`workout::WorkoutDescription`] into the payload the Garmin
//! Connect workout service accepts, and manages the browser-captured
//! session credential needed to submit it.
//!
//! # Quick Start
//!
//! ```no_run
//! use garmin_workouts::prelude::*;
//!
//! # async fn example(manager: CredentialManager) -> garmin_workouts::error::Result<()> {
//! let config = GarminConfig::load();
//! let client = ConnectClient::new(&config)?;
//! let workout = WorkoutDescription {
//!     name: "Easy run".to_string(),
//!     sport: Sport::Running,
//!     steps: vec![WorkoutStep::builder().duration("30:00").target("Zone 2").build()],
//! };
//! let credential = manager.ensure_credential().await?;
//! match client.submit(&build_payload(&workout), &credential).await {
//!     SubmissionResult::Success(created) => println!("{}", created.view_url),
//!     SubmissionResult::Failure(failure) => eprintln!("{failure}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod connect;
pub mod error;
pub mod prelude;
pub mod tools;
pub mod workout;

#[cfg(feature = "cli")]
pub mod cli;
