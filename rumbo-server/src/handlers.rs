use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use geo::Point;
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use rumbo_core::directions::to_geojson::route_to_geojson;
use rumbo_core::geocode::Geocoder;
use rumbo_core::tracking::ProgressUpdate;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/agents/{id}/position",
            post(update_position).get(where_am_i),
        )
        .route(
            "/agents/{id}/route",
            post(start_route).get(route_geojson).delete(cancel_route),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(ConcurrencyLimitLayer::new(256))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct PositionBody {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RouteRequest {
    /// Free-text destination resolved through the gazetteer
    destination: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ProgressResponse {
    status: &'static str,
    message: Option<String>,
    checkpoint: Option<usize>,
}

#[derive(Debug, Serialize)]
struct RouteResponse {
    message: String,
    route: FeatureCollection,
}

#[derive(Debug, Serialize)]
struct PositionResponse {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

async fn update_position(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<PositionBody>,
) -> ApiResult<Json<ProgressResponse>> {
    let update = state
        .engine
        .update_position(&id, Point::new(body.lon, body.lat))?;
    Ok(Json(progress_response(update)))
}

fn progress_response(update: Option<ProgressUpdate>) -> ProgressResponse {
    match update {
        None => ProgressResponse {
            status: "recorded",
            message: None,
            checkpoint: None,
        },
        Some(ProgressUpdate::EnRoute) => ProgressResponse {
            status: "en_route",
            message: None,
            checkpoint: None,
        },
        Some(ProgressUpdate::CheckpointReached {
            reached,
            instruction,
            ..
        }) => ProgressResponse {
            status: "checkpoint_reached",
            message: Some(instruction),
            checkpoint: Some(reached),
        },
        Some(ProgressUpdate::Recalculated {
            skipped,
            instruction,
        }) => ProgressResponse {
            status: "recalculated",
            message: Some(instruction),
            checkpoint: Some(skipped),
        },
        Some(ProgressUpdate::Arrived) => ProgressResponse {
            status: "arrived",
            message: Some("Congratulations, you have reached your destination!".to_string()),
            checkpoint: None,
        },
    }
}

async fn start_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RouteRequest>,
) -> ApiResult<Json<RouteResponse>> {
    let destination = match (&body.destination, body.lat, body.lon) {
        (Some(text), _, _) => state.gazetteer.geocode(text)?,
        (None, Some(lat), Some(lon)) => Point::new(lon, lat),
        _ => return Err(ApiError::Validation("destination or lat/lon required")),
    };

    let message = state.engine.start_route(&id, destination)?;
    let (checkpoints, source, dest) = state.engine.route(&id)?;
    Ok(Json(RouteResponse {
        message,
        route: route_to_geojson(&checkpoints, source, dest),
    }))
}

async fn route_geojson(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<FeatureCollection>> {
    let (checkpoints, source, dest) = state.engine.route(&id)?;
    Ok(Json(route_to_geojson(&checkpoints, source, dest)))
}

async fn cancel_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.engine.cancel(&id)?;
    Ok(Json(MessageResponse {
        message: "Your current guide has been stopped",
    }))
}

async fn where_am_i(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PositionResponse>> {
    let position = state.engine.where_am_i(&id)?;
    Ok(Json(PositionResponse {
        lat: position.y(),
        lon: position.x(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{self, Request, StatusCode};
    use rumbo_core::geocode::Gazetteer;
    use rumbo_core::model::{StreetEdge, StreetGraph};
    use tower::util::ServiceExt;

    use super::*;

    fn test_state() -> AppState {
        let mut graph = StreetGraph::new();
        let a = graph.add_node(1, Point::new(0.000, 0.0));
        let b = graph.add_node(2, Point::new(0.002, 0.0));
        let c = graph.add_node(3, Point::new(0.004, 0.0));
        for (from, to) in [(a, b), (b, c)] {
            graph.add_edge(
                from,
                to,
                StreetEdge {
                    name: Some("Aragó".to_string()),
                    length_m: 222.6,
                    bearing_deg: 90.0,
                },
            );
        }
        graph.build_index();

        let gazetteer =
            Gazetteer::from_reader("name,lat,lon\nthe market,0.0,0.004\n".as_bytes());
        AppState::new(graph, gazetteer)
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn position_then_route_then_cancel() {
        let app = router(test_state());

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/agents/ada/position",
                r#"{"lat": 0.0, "lon": 0.0}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/agents/ada/route",
                r#"{"destination": "The Market"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/agents/ada/route")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Cancelling again reports that no route is active.
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/agents/ada/route")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn route_without_position_conflicts() {
        let app = router(test_state());
        let response = app
            .oneshot(json_request(
                "POST",
                "/agents/ada/route",
                r#"{"lat": 0.0, "lon": 0.004}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unknown_destination_is_not_found() {
        let app = router(test_state());
        app.clone()
            .oneshot(json_request(
                "POST",
                "/agents/ada/position",
                r#"{"lat": 0.0, "lon": 0.0}"#,
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(json_request(
                "POST",
                "/agents/ada/route",
                r#"{"destination": "Atlantis"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_destination_is_a_validation_error() {
        let app = router(test_state());
        let response = app
            .oneshot(json_request("POST", "/agents/ada/route", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
