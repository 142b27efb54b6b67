//! JSON extractor with request validation
//!
//! Booking and contact payloads carry `validator` rules on their DTOs.
//! `ValidatedJson<T>` deserializes the body like `axum::Json<T>` and then
//! runs those rules, so handlers only ever see payloads that passed both.
//! Failures come back in the standard `ApiResponse` envelope: 400 for a
//! body that does not parse, 422 with per-field messages when rules fail.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiResponse;

/// Deserializes a JSON body and checks its `validator` rules.
///
/// # Usage
///
/// ```ignore
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct ContactRequest {
///     #[validate(length(min = 1, max = 100))]
///     name: String,
///     #[validate(email)]
///     email: String,
///     #[validate(length(min = 1, max = 5000))]
///     message: String,
/// }
///
/// async fn submit(ValidatedJson(form): ValidatedJson<ContactRequest>) {
///     // `form` already satisfies every rule above
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Why `ValidatedJson` rejected a request.
pub enum ValidatedJsonRejection {
    /// The body was not parseable as the target type.
    Json(JsonRejection),
    /// The body parsed but broke at least one validation rule.
    Validation(validator::ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Json(rejection) => {
                let body = ApiResponse::<()>::error(format!("Malformed JSON body: {}", rejection));
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::Validation(errors) => {
                let details: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, field_errors)| {
                        field_errors.iter().map(move |err| {
                            match err.message.as_ref() {
                                Some(msg) => format!("{}: {}", field, msg),
                                None => format!("{}: {:?}", field, err.code),
                            }
                        })
                    })
                    .collect();

                let message = if details.is_empty() {
                    "Validation failed".to_string()
                } else {
                    details.join("; ")
                };

                let body = ApiResponse::<()>::error(message);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::Validation)?;

        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct InquiryBody {
        #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
        name: String,
        #[validate(email(message = "must be a valid email address"))]
        email: String,
        #[validate(length(min = 1, max = 5000, message = "must be 1-5000 characters"))]
        message: String,
    }

    async fn submit(ValidatedJson(_form): ValidatedJson<InquiryBody>) -> &'static str {
        "received"
    }

    fn app() -> Router {
        Router::new().route("/contacts", post(submit))
    }

    async fn send(req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    fn post_json(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/contacts")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn well_formed_inquiry_is_accepted() {
        let body = serde_json::json!({
            "name": "Dana Reyes",
            "email": "dana@example.com",
            "message": "Do you do fleet discounts?"
        });

        let resp = send(post_json(body)).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unparseable_body_returns_400() {
        let req = Request::builder()
            .method("POST")
            .uri("/contacts")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rule_violations_return_422_with_field_details() {
        let body = serde_json::json!({
            "name": "",
            "email": "not-an-address",
            "message": "hello"
        });

        let resp = send(post_json(body)).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: ApiResponse<()> = serde_json::from_slice(&bytes).unwrap();
        assert!(!envelope.success);
        let error = envelope.error.unwrap();
        assert!(error.contains("name"));
        assert!(error.contains("email"));
    }
}
