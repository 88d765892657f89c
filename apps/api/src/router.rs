use axum::{routing::get, Router};
use tower_http::services::ServeDir;

use appointment_cell::{appointment_routes, provider_routes};
use auth_cell::{password_routes, session_routes};
use user_cell::{profile_routes, user_routes};

use crate::container::Container;

pub fn create_router(container: &Container) -> Router {
    let users = container.user_state();
    let auth = container.auth_state();
    let appointments = container.appointment_state();

    Router::new()
        .route("/", get(|| async { "GoBarber API is running!" }))
        .nest("/users", user_routes(users.clone()))
        .nest("/profile", profile_routes(users))
        .nest("/sessions", session_routes(auth.clone()))
        .nest("/password", password_routes(auth))
        .nest("/appointments", appointment_routes(appointments.clone()))
        .nest("/providers", provider_routes(appointments))
        .nest_service("/files", ServeDir::new(&container.config.uploads_folder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use shared_utils::test_utils::TestConfig;

    fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let container = Container::in_memory(TestConfig::default().to_app_config());
        let response = create_router(&container)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_sign_up_sign_in_and_book() {
        let container = Container::in_memory(TestConfig::default().to_app_config());
        let app = create_router(&container);

        for (name, email) in [("Barber", "barber@example.com"), ("Customer", "customer@example.com")] {
            let response = app.clone()
                .oneshot(post_json("/users", None, json!({
                    "name": name,
                    "email": email,
                    "password": "123456"
                })))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app.clone()
            .oneshot(post_json("/sessions", None, json!({
                "email": "customer@example.com",
                "password": "123456"
            })))
            .await
            .unwrap();
        let session = body_json(response).await;
        let token = session["token"].as_str().unwrap().to_string();

        let providers = app.clone()
            .oneshot(
                Request::builder()
                    .uri("/providers")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let providers = body_json(providers).await;
        assert_eq!(providers.as_array().unwrap().len(), 1);
        let provider_id = providers[0]["id"].clone();

        let response = app
            .oneshot(post_json("/appointments", Some(&token), json!({
                "provider_id": provider_id,
                "date": "2100-05-20T10:00:00Z"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
