//! Garmin Connect workout-service client.

pub mod http;
pub mod result;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::auth::Credential;
use crate::config::GarminConfig;
use crate::error::GarminError;
use crate::workout::GarminWorkoutPayload;

pub use result::{CreatedWorkout, FailureReason, SubmissionFailure, SubmissionResult};

const WORKOUT_PATH: &str = "/workout-service/workout";

/// Submits workout payloads to Garmin Connect.
///
/// Submissions are never retried: a request that timed out may still have
/// created the workout server-side.
///
/// # Example
/// ```no_run
/// # async fn example(credential: garmin_workouts::auth::Credential) -> garmin_workouts::error::Result<()> {
/// use garmin_workouts::config::GarminConfig;
/// use garmin_workouts::connect::{ConnectClient, SubmissionResult};
/// use garmin_workouts::workout::{build_payload, Sport, WorkoutDescription};
///
/// let client = ConnectClient::new(&GarminConfig::load())?;
/// let workout = WorkoutDescription { name: "Easy".into(), sport: Sport::Running, steps: vec![] };
/// match client.submit(&build_payload(&workout), &credential).await {
///     SubmissionResult::Success(created) => println!("{}", created.view_url),
///     SubmissionResult::Failure(failure) => eprintln!("{failure}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConnectClient {
    client: reqwest::Client,
    api_base_url: String,
    web_base_url: String,
    user_agent: String,
}

impl ConnectClient {
    pub fn new(config: &GarminConfig) -> Result<Self, GarminError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            web_base_url: config.web_base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        })
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn workout_url(&self) -> String {
        format!("{}{WORKOUT_PATH}", self.api_base_url)
    }

    /// Where the created workout can be opened in Connect.
    pub fn view_url(&self, workout_id: &str) -> String {
        format!("{}/modern/workout/{workout_id}", self.web_base_url)
    }

    /// POST the payload once and interpret the response.
    pub async fn submit(
        &self,
        payload: &GarminWorkoutPayload,
        credential: &Credential,
    ) -> SubmissionResult {
        let headers = http::connect_headers(
            credential,
            &self.web_base_url,
            payload.sport_key(),
            &self.user_agent,
        );
        tracing::debug!(
            url = %self.workout_url(),
            workout = %payload.workout_name,
            steps = payload.steps().count(),
            "Submitting workout"
        );

        let response = match self
            .client
            .post(self.workout_url())
            .headers(headers)
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "Workout submission failed before a response");
                return SubmissionResult::failure(FailureReason::NetworkError, err.to_string());
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::info!("Garmin rejected the stored credential");
            let body = response.text().await.unwrap_or_default();
            return SubmissionResult::failure(FailureReason::AuthExpired, body);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                return SubmissionResult::failure(FailureReason::NetworkError, err.to_string());
            }
        };
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Workout submission rejected");
            return SubmissionResult::failure(
                FailureReason::HttpError,
                format!("{}: {body}", status.as_u16()),
            );
        }

        match parse_created(&body) {
            Ok(created) => {
                let workout_id = created.workout_id.to_string();
                let name = created
                    .workout_name
                    .unwrap_or_else(|| payload.workout_name.clone());
                tracing::info!(workout_id = %workout_id, name = %name, "Workout created");
                SubmissionResult::Success(CreatedWorkout {
                    view_url: self.view_url(&workout_id),
                    workout_id,
                    name,
                })
            }
            Err(err) => SubmissionResult::failure(
                FailureReason::HttpError,
                format!("{}: unexpected response ({err}): {body}", status.as_u16()),
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedWorkoutResponse {
    workout_id: WorkoutId,
    workout_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WorkoutId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkoutId::Number(id) => write!(f, "{id}"),
            WorkoutId::Text(id) => f.write_str(id),
        }
    }
}

fn parse_created(body: &str) -> Result<CreatedWorkoutResponse, GarminError> {
    Ok(serde_json::from_str(body)?)
}
