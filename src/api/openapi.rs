//! OpenAPI documentation and schema generation
//!
//! This module defines the OpenAPI specification for the lead-gate REST API
//! using utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the lead-gate REST API
///
/// The spec can be accessed via:
/// - `/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation (when enabled)
#[derive(OpenApi)]
#[openapi(
    info(
        title = "lead-gate REST API",
        version = "0.1.0",
        description = "Email-gated business case downloads with lead capture and CSV export",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Leads
        crate::api::routes::download_business_case,
        crate::api::routes::export_leads,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        crate::types::LeadRecord,
        crate::catalog::BusinessCase,
        crate::api::routes::DownloadRequest,
        crate::api::routes::DownloadResponse,
        crate::api::routes::HealthResponse,
        crate::error::ApiError,
    )),
    tags(
        (name = "leads", description = "Lead capture - Request a business case by email, export captured leads"),
        (name = "system", description = "System endpoints - Health checks, OpenAPI spec"),
    )
)]
pub struct ApiDoc;
