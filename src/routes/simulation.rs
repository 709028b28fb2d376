use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::Number;

use crate::extractors::JsonBody;
use crate::response::{ok, AppError};
use crate::simulation::{Gender, SimulationInput};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(run_simulation))
        .route("/parameters", get(get_parameters))
}

/// Form submission. All three answers are optional at the wire level so a missing
/// one can be reported as an incomplete form rather than a parse failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimulationRequest {
    study_hours: Option<Number>,
    gender: Option<String>,
    initial_motivation: Option<f64>,
}

impl SimulationRequest {
    fn into_input(self) -> Result<SimulationInput, AppError> {
        let (Some(study_hours), Some(initial_motivation)) =
            (self.study_hours.as_ref(), self.initial_motivation)
        else {
            return Err(AppError::bad_request(
                "INCOMPLETE_SUBMISSION",
                "Please complete all questions before submitting",
            ));
        };

        // Unknown or missing gender means the class-wide coefficient.
        let gender = self
            .gender
            .as_deref()
            .map(Gender::from_label)
            .unwrap_or_default();

        Ok(SimulationInput::new(
            saturating_hours(study_hours),
            gender,
            initial_motivation,
        ))
    }
}

/// Any JSON number is accepted; the input clamp brings it into range afterwards.
/// Fractions are truncated and out-of-range magnitudes saturate.
fn saturating_hours(n: &Number) -> i64 {
    if let Some(v) = n.as_i64() {
        v
    } else if n.as_u64().is_some() {
        i64::MAX
    } else {
        n.as_f64().map_or(0, |f| f.trunc() as i64)
    }
}

async fn run_simulation(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SimulationRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let input = req.into_input()?;
    let report = state.simulations().run(input).await?;
    Ok(ok(report))
}

async fn get_parameters(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    ok(state.simulations().simulator().parameters())
}
