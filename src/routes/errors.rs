use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use crate::models::ErrorResponse;

/// A request body that could not be read as JSON
#[derive(Debug)]
struct JsonError {
    message: String,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid_json: {}", self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: "invalid_json".to_string(),
            message: self.message.clone(),
            status_code: self.status_code().as_u16(),
        })
    }
}

fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        message: format!("Invalid JSON: {}", err),
    }
    .into()
}

/// JSON extractor settings that answer unreadable bodies with an `ErrorResponse`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Matcher;
    use crate::routes::matches::{configure, AppState};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_malformed_body_returns_error_response() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState {
                    matcher: Matcher::with_default_weights(),
                    max_limit: 100,
                }))
                .app_data(json_config())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/rank")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"request": {"category": "cleaning""#)
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "invalid_json");
        assert_eq!(body.status_code, 400);
        assert!(body.message.starts_with("Invalid JSON"));
    }
}
