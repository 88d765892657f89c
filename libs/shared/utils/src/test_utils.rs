use std::sync::Arc;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use shared_config::AppConfig;

use crate::clock::FixedClock;
use crate::jwt::create_token;

pub struct TestConfig {
    pub jwt_secret: String,
    pub supabase_url: String,
    pub supabase_service_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_key: "test-service-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_service_key: self.supabase_service_key.clone(),
            jwt_secret: self.jwt_secret.clone(),
            jwt_expires_in_hours: 24,
            redis_url: None,
            uploads_folder: "tmp/uploads".to_string(),
            app_api_url: "http://localhost:3333".to_string(),
            app_web_url: "http://localhost:3000".to_string(),
            port: 3333,
            business_utc_offset_minutes: 0,
        }
    }

    pub fn with_supabase_url(&self, url: &str) -> AppConfig {
        AppConfig {
            supabase_url: url.to_string(),
            ..self.to_app_config()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new("John Doe", "johndoe@example.com")
    }
}

impl TestUser {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        create_token(&user.id.to_string(), secret, exp_hours.unwrap_or(24), Utc::now())
            .expect("test secret must not be empty")
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }
}

/// Clock frozen at the given UTC hour.
pub fn clock_at(year: i32, month: u32, day: u32, hour: u32) -> Arc<FixedClock> {
    let instant = Utc
        .with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid test instant");
    Arc::new(FixedClock(instant))
}
