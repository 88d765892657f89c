use std::env;
use chrono::{FixedOffset, Local, Offset, Utc};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub jwt_secret: String,
    pub jwt_expires_in_hours: i64,
    pub redis_url: Option<String>,
    pub uploads_folder: String,
    pub app_api_url: String,
    pub app_web_url: String,
    pub port: u16,
    pub business_utc_offset_minutes: i32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_service_key: env::var("SUPABASE_SERVICE_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_SERVICE_KEY not set, using empty value");
                    String::new()
                }),
            jwt_secret: env::var("APP_SECRET")
                .unwrap_or_else(|_| {
                    warn!("APP_SECRET not set, using empty value");
                    String::new()
                }),
            jwt_expires_in_hours: parse_or("JWT_EXPIRES_IN_HOURS", 24),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.is_empty()),
            uploads_folder: env::var("UPLOADS_FOLDER")
                .unwrap_or_else(|_| {
                    warn!("UPLOADS_FOLDER not set, using default");
                    "tmp/uploads".to_string()
                }),
            app_api_url: env::var("APP_API_URL")
                .unwrap_or_else(|_| {
                    warn!("APP_API_URL not set, using default");
                    "http://localhost:3333".to_string()
                }),
            app_web_url: env::var("APP_WEB_URL")
                .unwrap_or_else(|_| {
                    warn!("APP_WEB_URL not set, using default");
                    "http://localhost:3000".to_string()
                }),
            port: parse_or("PORT", 3333),
            business_utc_offset_minutes: parse_or(
                "BUSINESS_UTC_OFFSET_MINUTES",
                Local::now().offset().fix().local_minus_utc() / 60,
            ),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        if config.redis_url.is_none() {
            warn!("REDIS_URL not set, falling back to in-memory cache");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_service_key.is_empty()
            && !self.jwt_secret.is_empty()
    }

    /// Offset used for business hours and calendar days.
    pub fn business_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.business_utc_offset_minutes * 60)
            .unwrap_or_else(|| {
                warn!(
                    "Invalid business offset of {} minutes, using UTC",
                    self.business_utc_offset_minutes
                );
                Utc.fix()
            })
    }

    pub fn files_url(&self) -> String {
        format!("{}/files", self.app_api_url.trim_end_matches('/'))
    }
}

fn parse_or<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has an invalid value '{}', using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_offset(minutes: i32) -> AppConfig {
        AppConfig {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_key: "service-key".to_string(),
            jwt_secret: "secret".to_string(),
            jwt_expires_in_hours: 24,
            redis_url: None,
            uploads_folder: "tmp/uploads".to_string(),
            app_api_url: "http://localhost:3333/".to_string(),
            app_web_url: "http://localhost:3000".to_string(),
            port: 3333,
            business_utc_offset_minutes: minutes,
        }
    }

    #[test]
    fn test_business_offset() {
        let config = config_with_offset(-180);
        assert_eq!(config.business_offset().local_minus_utc(), -3 * 3600);
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_utc() {
        let config = config_with_offset(100_000);
        assert_eq!(config.business_offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_files_url_trims_trailing_slash() {
        let config = config_with_offset(0);
        assert_eq!(config.files_url(), "http://localhost:3333/files");
        assert!(config.is_configured());
    }
}
