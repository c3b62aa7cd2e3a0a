//! CLI entry point for garmin-workouts.

pub mod auth;
pub mod workout;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::auth::browser::{BrowserLogin, ChromiumLauncher};
use crate::auth::{CredentialManager, FileCredentialStore};
use crate::config::GarminConfig;
use crate::connect::ConnectClient;
use crate::error::GarminError;
use crate::tools::WorkoutContext;

/// Garmin workouts CLI
#[derive(Parser, Debug)]
#[command(
    name = "garmin-workouts",
    version,
    about = "Create Garmin Connect workouts from structured descriptions"
)]
pub struct Cli {
    /// Config file (defaults to ~/.garmin-workouts/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Garmin Connect session management
    Auth(AuthArgs),
    /// Workout translation and upload
    Workout(WorkoutArgs),
}

/// Arguments for the `auth` subcommand group.
#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommands,
}

/// Auth subcommands for login, status, and logout.
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Log in through a browser window and store the session
    Login,
    /// Show whether a valid session is stored
    Status,
    /// Delete the stored session
    Logout,
}

/// Arguments for the `workout` subcommand group.
#[derive(Parser, Debug)]
pub struct WorkoutArgs {
    #[command(subcommand)]
    pub command: WorkoutCommands,
}

#[derive(Subcommand, Debug)]
pub enum WorkoutCommands {
    /// Print the Garmin payload for a workout file without uploading it
    Preview(WorkoutFileArgs),
    /// Create the workout in Garmin Connect
    Create(WorkoutFileArgs),
}

#[derive(Parser, Debug)]
pub struct WorkoutFileArgs {
    /// JSON file holding {"name", "sport", "steps": [...]}
    pub file: PathBuf,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Configuration layered from defaults, the config file and the environment.
    pub fn load_config(&self) -> Result<GarminConfig, GarminError> {
        match &self.config {
            Some(path) => Ok(GarminConfig::default().with_file(path)?.with_env()),
            None => Ok(GarminConfig::load()),
        }
    }
}

/// Wire the file store, browser login and Connect client from one config.
pub fn build_context(config: &GarminConfig) -> Result<WorkoutContext, GarminError> {
    let store = Arc::new(FileCredentialStore::new(config.credential_path.clone()));
    let login = Arc::new(BrowserLogin::new(
        ChromiumLauncher::from_config(config),
        config.into(),
    ));
    let manager = Arc::new(CredentialManager::new(store, login));
    Ok(WorkoutContext::new(manager, ConnectClient::new(config)?))
}

/// Dispatch a parsed command line. Preview runs offline and never wires a session.
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.load_config()?;

    match cli.command {
        Commands::Workout(WorkoutArgs {
            command: WorkoutCommands::Preview(args),
        }) => workout::handle_preview(&args.file),
        Commands::Workout(WorkoutArgs {
            command: WorkoutCommands::Create(args),
        }) => workout::handle_create(build_context(&config)?, &args.file).await,
        Commands::Auth(auth_args) => {
            let ctx = build_context(&config)?;
            match auth_args.command {
                AuthCommands::Login => auth::handle_login(ctx).await,
                AuthCommands::Status => auth::handle_status(ctx).await,
                AuthCommands::Logout => auth::handle_logout(ctx).await,
            }
        }
    }
}
