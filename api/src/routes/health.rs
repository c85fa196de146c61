use std::collections::HashMap;
use std::time::Instant;

use actix_web::{web, HttpResponse};

use ch_core::repositories::{TokenRepository, UserRepository};
use ch_core::services::token::Clock;
use ch_shared::types::{HealthResponse, HealthStatus, ServiceHealth};

use crate::app::AppState;

/// Handler for GET /health
///
/// Reports database reachability; 503 when the database is down.
pub async fn health_check<U, R, C>(state: web::Data<AppState<U, R, C>>) -> HttpResponse
where
    U: UserRepository + 'static,
    R: TokenRepository + 'static,
    C: Clock + 'static,
{
    let mut services = HashMap::new();

    if let Some(database) = &state.database {
        let started = Instant::now();
        let health = match database.health_check().await {
            Ok(true) => ServiceHealth {
                status: HealthStatus::Healthy,
                message: None,
                response_time_ms: Some(started.elapsed().as_millis() as u64),
            },
            Ok(false) => ServiceHealth {
                status: HealthStatus::Degraded,
                message: Some("unexpected health check result".to_string()),
                response_time_ms: Some(started.elapsed().as_millis() as u64),
            },
            Err(e) => {
                tracing::warn!("Database health check failed: {}", e);
                ServiceHealth {
                    status: HealthStatus::Unhealthy,
                    message: Some("database unreachable".to_string()),
                    response_time_ms: None,
                }
            }
        };
        services.insert("database".to_string(), health);
    }

    let response = HealthResponse::from_services(services, env!("CARGO_PKG_VERSION"));
    match response.status {
        HealthStatus::Unhealthy => HttpResponse::ServiceUnavailable().json(response),
        _ => HttpResponse::Ok().json(response),
    }
}
