use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::TrainsetSnapshot;
use super::ranking::{FactorWeights, TierThresholds};
use super::repository::{AlertPublisher, RankingHistory};
use super::service::{InductionPlanningService, InductionServiceError, RankOverrides};

/// Request body for a ranking run. `weights` and `thresholds` optionally
/// override the service defaults for this evaluation only.
#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub fleet: Vec<TrainsetSnapshot>,
    #[serde(default)]
    pub weights: Option<FactorWeights>,
    #[serde(default)]
    pub thresholds: Option<TierThresholds>,
}

/// Router builder exposing the ranking endpoints.
pub fn induction_router<R, A>(service: Arc<InductionPlanningService<R, A>>) -> Router
where
    R: RankingHistory + 'static,
    A: AlertPublisher + 'static,
{
    Router::new()
        .route("/api/v1/induction/rank", post(rank_handler::<R, A>))
        .route(
            "/api/v1/induction/rank/latest",
            get(latest_handler::<R, A>),
        )
        .with_state(service)
}

pub(crate) async fn rank_handler<R, A>(
    State(service): State<Arc<InductionPlanningService<R, A>>>,
    axum::Json(request): axum::Json<RankRequest>,
) -> Response
where
    R: RankingHistory + 'static,
    A: AlertPublisher + 'static,
{
    let RankRequest {
        fleet,
        weights,
        thresholds,
    } = request;
    let overrides = RankOverrides {
        weights,
        thresholds,
    };

    match service.evaluate(&fleet, overrides) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(
            error @ (InductionServiceError::Validation(_)
            | InductionServiceError::Configuration(_)),
        ) => {
            let payload = json!({
                "error": format!("ranking could not be computed: {error}"),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn latest_handler<R, A>(
    State(service): State<Arc<InductionPlanningService<R, A>>>,
) -> Response
where
    R: RankingHistory + 'static,
    A: AlertPublisher + 'static,
{
    match service.latest() {
        Ok(Some(snapshot)) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": "no ranking computed yet",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
