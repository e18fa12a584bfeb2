// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        CreateCarRequest, DeliverCarRequest, EnrollRequest, RegisterResponse, SellCarRequest,
        StatusEnvelope, TxEnvelope,
    },
    state::AppState,
};

pub mod cars;
pub mod health;
pub mod users;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/createCar", post(cars::create_car))
        .route("/deliverCar", post(cars::deliver_car))
        .route("/sellCar", post(cars::sell_car))
        .route("/getCarDetails", get(cars::get_car_details))
        .route("/health", get(health::health))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::register,
        users::login,
        cars::create_car,
        cars::deliver_car,
        cars::sell_car,
        cars::get_car_details,
        health::health,
    ),
    components(
        schemas(
            EnrollRequest,
            RegisterResponse,
            StatusEnvelope,
            TxEnvelope,
            CreateCarRequest,
            DeliverCarRequest,
            SellCarRequest,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "Registration and session tokens"),
        (name = "Cars", description = "Car lifecycle transactions and queries"),
        (name = "Health", description = "Liveness probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::default());
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }
}
