use axum::Json;
use poe_forum_core::{ForumResponse, ThreadRecord};
use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::routes::{forum, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Path of Exile Forum API",
        description = "API for retrieving Path of Exile forum thread information",
        version = "1.0.0"
    ),
    paths(forum::get_forum_threads, health::health_check),
    components(schemas(ForumResponse, ThreadRecord, health::HealthResponse, ErrorResponse)),
    tags(
        (name = "forum", description = "Aggregated forum threads"),
        (name = "health", description = "Service liveness")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
