//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::*;
use crate::api::handlers::{
    auth, bookings, contacts, content, dashboard, gallery, health, metrics, services,
    subscriptions,
};
use crate::application::{BookingService, GalleryService, SubscriptionService};
use crate::auth::middleware::{auth_middleware, AuthState};
use crate::auth::{AdminCredentials, JwtConfig};
use crate::config::{ObjectStoreConfig, RateLimitConfig};
use crate::domain::Storage;
use crate::notifications::{create_notification_state, ws_notifications_handler, SharedEventBus};

/// Uploaded images are capped at 10 MiB per request
const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Unified state for every admin route. Axum extracts the specific handler
/// state via `FromRef`.
#[derive(Clone)]
pub struct AdminUnifiedState {
    pub storage: Arc<dyn Storage>,
    pub booking_service: Arc<BookingService>,
    pub gallery_service: Arc<GalleryService>,
    pub subscription_service: Arc<SubscriptionService>,
    pub event_bus: SharedEventBus,
    pub auth: AuthState,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<AdminUnifiedState> for bookings::BookingAppState {
    fn from_ref(s: &AdminUnifiedState) -> Self {
        bookings::BookingAppState {
            service: Arc::clone(&s.booking_service),
        }
    }
}

impl FromRef<AdminUnifiedState> for contacts::ContactAppState {
    fn from_ref(s: &AdminUnifiedState) -> Self {
        contacts::ContactAppState {
            storage: Arc::clone(&s.storage),
            event_bus: s.event_bus.clone(),
        }
    }
}

impl FromRef<AdminUnifiedState> for gallery::GalleryAppState {
    fn from_ref(s: &AdminUnifiedState) -> Self {
        gallery::GalleryAppState {
            service: Arc::clone(&s.gallery_service),
        }
    }
}

impl FromRef<AdminUnifiedState> for subscriptions::SubscriptionAppState {
    fn from_ref(s: &AdminUnifiedState) -> Self {
        subscriptions::SubscriptionAppState {
            service: Arc::clone(&s.subscription_service),
        }
    }
}

impl FromRef<AdminUnifiedState> for content::ContentAppState {
    fn from_ref(s: &AdminUnifiedState) -> Self {
        content::ContentAppState {
            storage: Arc::clone(&s.storage),
        }
    }
}

impl FromRef<AdminUnifiedState> for dashboard::DashboardAppState {
    fn from_ref(s: &AdminUnifiedState) -> Self {
        dashboard::DashboardAppState {
            storage: Arc::clone(&s.storage),
        }
    }
}

impl FromRef<AdminUnifiedState> for AuthState {
    fn from_ref(s: &AdminUnifiedState) -> Self {
        s.auth.clone()
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT admin session token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::get_session,
        // Services
        services::list_services,
        services::list_add_ons,
        services::quote_selection,
        // Bookings
        bookings::submit_booking,
        bookings::validate_step,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::update_booking_status,
        // Contacts
        contacts::submit_contact,
        contacts::list_contacts,
        contacts::get_contact,
        contacts::update_contact_status,
        // Gallery
        gallery::list_gallery,
        gallery::list_all_gallery,
        gallery::upload_gallery_image,
        gallery::update_gallery_image,
        gallery::delete_gallery_image,
        // Subscriptions
        subscriptions::list_plans,
        subscriptions::enroll,
        subscriptions::list_subscriptions,
        subscriptions::update_subscription_status,
        subscriptions::create_plan,
        subscriptions::update_plan,
        // Content
        content::list_content,
        content::update_content,
        // Dashboard
        dashboard::dashboard_stats,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<bookings::BookingResponse>,
            PaginatedResponse<contacts::ContactResponse>,
            PaginatedResponse<subscriptions::SubscriptionResponse>,
            PaginationParams,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::SessionResponse,
            // Services
            services::ServiceResponse,
            services::AddOnResponse,
            services::QuoteRequest,
            services::QuoteLineResponse,
            services::QuoteResponse,
            // Bookings
            bookings::BookingDraftDto,
            bookings::SubmitBookingRequest,
            bookings::ValidateStepRequest,
            bookings::StepValidationResponse,
            bookings::BookingResponse,
            bookings::UpdateBookingStatusRequest,
            // Contacts
            contacts::ContactRequest,
            contacts::ContactResponse,
            contacts::UpdateContactStatusRequest,
            // Gallery
            gallery::GalleryImageResponse,
            gallery::UpdateGalleryImageRequest,
            // Subscriptions
            subscriptions::PlanRequest,
            subscriptions::PlanResponse,
            subscriptions::EnrollRequest,
            subscriptions::SubscriptionResponse,
            subscriptions::UpdateSubscriptionStatusRequest,
            // Content
            content::ContentResponse,
            content::UpdateContentRequest,
            // Dashboard
            dashboard::DashboardStats,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check. Use for uptime monitoring."),
        (name = "Authentication", description = "Admin authentication. The shared admin password is exchanged for a short-lived JWT via `POST /api/v1/auth/login`; pass it as `Authorization: Bearer <token>` on admin routes."),
        (name = "Services", description = "The detailing service catalog and quote calculator. Quotes always come from the server price list; unknown ids price as 0 so a stale client catalog never blocks a quote."),
        (name = "Bookings", description = "The four-step booking wizard: personal info, vehicle, service selection, schedule. Submissions are idempotent per `submission_key` and always start as `pending`. Statuses: `pending`, `confirmed`, `completed`, `cancelled` (any transition allowed)."),
        (name = "Contacts", description = "Public contact form and its admin workflow. Statuses: `new`, `in_progress`, `resolved`, `closed` (`contacted` accepted as a legacy alias for `in_progress`)."),
        (name = "Gallery", description = "Before/after photo gallery. Uploads are multipart with both images; an entry only exists once both files are stored. Hidden entries stay in storage but are not served publicly."),
        (name = "Subscriptions", description = "Wash-club plans and member enrollments. The billing cycle is copied from the plan at enrollment; plan edits never change existing members. Statuses: `active`, `paused`, `cancelled`."),
        (name = "Content", description = "Editable home page sections keyed by slug (`hero`, `about`, ...)."),
        (name = "Dashboard", description = "Headline numbers for the admin dashboard."),
        (name = "WebSocket Notifications", description = "Real-time notifications over WebSocket. Connect to `ws://host:port/api/v1/notifications/ws`, optionally filtering with `event_types` (comma-separated). Events: `booking_received`, `booking_status_changed`, `contact_received`, `contact_status_changed`, `subscription_created`, `subscription_status_changed`, `gallery_image_published`, `gallery_image_deleted`."),
    ),
    info(
        title = "AquaShine Detailing API",
        version = "1.0.0",
        description = "Backend for the AquaShine mobile detailing site: booking wizard, quotes, contact form, before/after gallery, wash-club subscriptions and the admin dashboard.

## Authentication

Admin routes need a JWT session token from `POST /api/v1/auth/login`, passed as `Authorization: Bearer <token>`. Everything else is public.

## Response format

Every REST response is wrapped in a standard envelope:
```json
{\"success\": true, \"data\": {...}, \"error\": null}
```

On failure:
```json
{\"success\": false, \"data\": null, \"error\": \"description\"}
```

## Pagination

List endpoints take `page` (from 1) and `limit` (default 50, max 100).",
        license(
            name = "MIT"
        ),
        contact(
            name = "AquaShine Detailing",
            email = "support@aquashine.example.com"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
#[allow(clippy::too_many_arguments)]
pub fn create_api_router(
    storage: Arc<dyn Storage>,
    booking_service: Arc<BookingService>,
    gallery_service: Arc<GalleryService>,
    subscription_service: Arc<SubscriptionService>,
    credentials: Arc<AdminCredentials>,
    jwt_config: JwtConfig,
    event_bus: SharedEventBus,
    metrics_handle: PrometheusHandle,
    rate_limit: &RateLimitConfig,
    object_store: &ObjectStoreConfig,
) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    // ── Unified state for ALL admin routes ──────────────────────────
    let admin_unified = AdminUnifiedState {
        storage: storage.clone(),
        booking_service: booking_service.clone(),
        gallery_service: gallery_service.clone(),
        subscription_service: subscription_service.clone(),
        event_bus: event_bus.clone(),
        auth: middleware_state.clone(),
    };

    // A SINGLE router for every /api/v1/admin/* route so Axum's `matchit`
    // sees every parametric segment in one tree.
    let admin_routes = Router::new()
        // --- Bookings ---
        .route("/bookings", get(bookings::list_bookings))
        .route("/bookings/{id}", get(bookings::get_booking))
        .route("/bookings/{id}/status", put(bookings::update_booking_status))
        // --- Contacts ---
        .route("/contacts", get(contacts::list_contacts))
        .route("/contacts/{id}", get(contacts::get_contact))
        .route("/contacts/{id}/status", put(contacts::update_contact_status))
        // --- Gallery ---
        .route("/gallery", post(gallery::upload_gallery_image))
        .route("/gallery/all", get(gallery::list_all_gallery))
        .route(
            "/gallery/{id}",
            put(gallery::update_gallery_image).delete(gallery::delete_gallery_image),
        )
        // --- Subscriptions and plans ---
        .route("/subscriptions", get(subscriptions::list_subscriptions))
        .route(
            "/subscriptions/{id}/status",
            put(subscriptions::update_subscription_status),
        )
        .route("/subscriptions/plans", post(subscriptions::create_plan))
        .route("/subscriptions/plans/{id}", put(subscriptions::update_plan))
        // --- Content ---
        .route("/content/{section}", put(content::update_content))
        // --- Dashboard ---
        .route("/dashboard/stats", get(dashboard::dashboard_stats))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        // auth middleware + unified state
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(admin_unified);

    // ── Public states / routers ─────────────────────────────────────

    let auth_state = auth::AuthHandlerState {
        credentials,
        jwt_config,
    };

    // Rate limits protect the password endpoint and the public forms
    let login_governor = Arc::new(
        GovernorConfigBuilder::default()
            .period(per_minute(rate_limit.login_per_minute))
            .burst_size(rate_limit.login_per_minute.max(1))
            .finish()
            .expect("invalid login rate limit"),
    );
    let form_governor = Arc::new(
        GovernorConfigBuilder::default()
            .period(per_minute(rate_limit.form_submissions_per_minute))
            .burst_size(rate_limit.form_submissions_per_minute.max(1))
            .finish()
            .expect("invalid form rate limit"),
    );

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public login + protected session check)
    let login_routes = Router::new()
        .route("/login", post(auth::login))
        .layer(GovernorLayer::new(login_governor))
        .with_state(auth_state.clone());

    let session_routes = Router::new()
        .route("/session", get(auth::get_session))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(auth_state);

    // Service catalog (public)
    let catalog_state = services::CatalogState {
        booking_service: booking_service.clone(),
    };
    let service_routes = Router::new()
        .route("/", get(services::list_services))
        .route("/add-ons", get(services::list_add_ons))
        .route("/quote", post(services::quote_selection))
        .with_state(catalog_state);

    // Booking wizard (public)
    let booking_state = bookings::BookingAppState {
        service: booking_service,
    };
    let booking_routes = Router::new()
        .route(
            "/",
            post(bookings::submit_booking).layer(GovernorLayer::new(form_governor.clone())),
        )
        .route("/validate-step", post(bookings::validate_step))
        .with_state(booking_state);

    // Contact form (public)
    let contact_state = contacts::ContactAppState {
        storage: storage.clone(),
        event_bus: event_bus.clone(),
    };
    let contact_routes = Router::new()
        .route(
            "/",
            post(contacts::submit_contact).layer(GovernorLayer::new(form_governor.clone())),
        )
        .with_state(contact_state);

    // Public gallery
    let gallery_state = gallery::GalleryAppState {
        service: gallery_service,
    };
    let gallery_routes = Router::new()
        .route("/", get(gallery::list_gallery))
        .with_state(gallery_state);

    // Plans and enrollment (public)
    let subscription_state = subscriptions::SubscriptionAppState {
        service: subscription_service,
    };
    let subscription_routes = Router::new()
        .route(
            "/",
            post(subscriptions::enroll).layer(GovernorLayer::new(form_governor)),
        )
        .route("/plans", get(subscriptions::list_plans))
        .with_state(subscription_state);

    // Home page content (public)
    let content_state = content::ContentAppState { storage };
    let content_routes = Router::new()
        .route("/", get(content::list_content))
        .with_state(content_state);

    // Notification WebSocket routes (no auth for WebSocket upgrade)
    let notification_state = create_notification_state(event_bus);
    let notification_routes = Router::new()
        .route("/ws", get(ws_notifications_handler))
        .with_state(notification_state);

    // Prometheus scrape endpoint
    let metrics_state = metrics::MetricsState {
        handle: metrics_handle,
    };
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health + metrics
        .route("/health", get(health::health_check))
        .merge(metrics_routes)
        // Uploaded gallery images
        .nest_service(&object_store.public_base_url, ServeDir::new(&object_store.root_dir))
        // Auth
        .nest("/api/v1/auth", login_routes)
        .nest("/api/v1/auth", session_routes)
        // Public site
        .nest("/api/v1/services", service_routes)
        .nest("/api/v1/bookings", booking_routes)
        .nest("/api/v1/contacts", contact_routes)
        .nest("/api/v1/gallery", gallery_routes)
        .nest("/api/v1/subscriptions", subscription_routes)
        .nest("/api/v1/content", content_routes)
        // Admin — ONE nested router with unified state
        .nest("/api/v1/admin", admin_routes)
        // Notifications WebSocket
        .nest("/api/v1/notifications", notification_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Replenish interval for `rate` requests per minute
fn per_minute(rate: u32) -> Duration {
    Duration::from_secs(60) / rate.max(1)
}
