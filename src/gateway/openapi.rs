//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:5000/docs`
//! - OpenAPI JSON: `http://localhost:5000/api-docs/openapi.json`

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::gateway::handlers::HealthResponse;
use crate::orders::models::{
    BulkDeleteData, BulkDeleteRequest, Order, OrderPage, SubmitOrderData, SubmitOrderRequest,
};
use crate::user_auth::handlers::DashboardData;
use crate::user_auth::service::{
    AuthResponse, LoginRequest, RegisterRequest, UpdatePasswordRequest,
};

/// JWT bearer authentication security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order-Desk API",
        version = "1.0.0",
        description = "Order management backend: orders CRUD/search/pagination with JWT user auth.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Development"),
    ),
    paths(
        // System
        crate::gateway::handlers::root,
        crate::gateway::handlers::health_check,
        // Auth
        crate::user_auth::handlers::register,
        crate::user_auth::handlers::login,
        crate::user_auth::handlers::update_password,
        crate::user_auth::handlers::dashboard,
        // Orders
        crate::orders::handlers::submit_order,
        crate::orders::handlers::patch_order,
        crate::orders::handlers::patch_order_status,
        crate::orders::handlers::list_orders,
        crate::orders::handlers::search_by_iqama,
        crate::orders::handlers::find_by_mobile,
        crate::orders::handlers::delete_order,
        crate::orders::handlers::delete_orders,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            UpdatePasswordRequest,
            AuthResponse,
            DashboardData,
            SubmitOrderRequest,
            SubmitOrderData,
            Order,
            OrderPage,
            BulkDeleteRequest,
            BulkDeleteData,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and token-protected routes"),
        (name = "Orders", description = "Order submission, search, pagination and deletion"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Order-Desk API");
        assert_eq!(spec.info.version, "1.0.0");
    }

    #[test]
    fn test_openapi_json_serializable() {
        let spec = ApiDoc::openapi();
        let json = spec.to_json();
        assert!(json.is_ok());
        assert!(json.unwrap().contains("Order-Desk API"));
    }

    #[test]
    fn test_order_endpoints_registered() {
        let spec = ApiDoc::openapi();
        let paths = spec.paths;
        assert!(paths.paths.contains_key("/orders"));
        assert!(paths.paths.contains_key("/orders/search"));
        assert!(paths.paths.contains_key("/order-update/{id}"));
        assert!(paths.paths.contains_key("/deleteOrder"));
    }

    #[test]
    fn test_security_scheme_registered() {
        let spec = ApiDoc::openapi();
        let components = spec.components.expect("should have components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
