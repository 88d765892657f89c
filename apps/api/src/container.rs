use std::sync::Arc;

use tracing::{info, warn};

use appointment_cell::{
    AppointmentState, AppointmentsRepository, BusinessCalendar, SupabaseAppointmentsRepository,
};
use auth_cell::{AuthState, SupabaseUserTokensRepository, UserTokensRepository};
use notification_cell::{
    LogMailProvider, MailProvider, NotificationsRepository, SupabaseNotificationsRepository,
};
use shared_cache::{CacheProvider, InMemoryCacheProvider, RedisCacheProvider};
use shared_config::AppConfig;
use shared_database::SupabaseClient;
use shared_utils::clock::{Clock, SystemClock};
use shared_utils::hash::{Argon2HashProvider, HashProvider};
use user_cell::{
    DiskStorageProvider, StorageProvider, SupabaseUsersRepository, UserState, UsersRepository,
};

/// Every repository and provider, constructed once at startup.
pub struct Container {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UsersRepository>,
    pub user_tokens: Arc<dyn UserTokensRepository>,
    pub appointments: Arc<dyn AppointmentsRepository>,
    pub notifications: Arc<dyn NotificationsRepository>,
    pub cache: Arc<dyn CacheProvider>,
    pub storage: Arc<dyn StorageProvider>,
    pub hash: Arc<dyn HashProvider>,
    pub mail: Arc<dyn MailProvider>,
    pub clock: Arc<dyn Clock>,
    pub calendar: BusinessCalendar,
}

impl Container {
    pub async fn build(config: AppConfig) -> anyhow::Result<Self> {
        let config = Arc::new(config);
        let supabase = Arc::new(SupabaseClient::new(&config));

        Ok(Self {
            users: Arc::new(SupabaseUsersRepository::new(supabase.clone())),
            user_tokens: Arc::new(SupabaseUserTokensRepository::new(supabase.clone())),
            appointments: Arc::new(SupabaseAppointmentsRepository::new(supabase.clone())),
            notifications: Arc::new(SupabaseNotificationsRepository::new(supabase)),
            cache: build_cache(&config).await,
            storage: Arc::new(DiskStorageProvider::new(&config.uploads_folder)),
            hash: Arc::new(Argon2HashProvider),
            mail: Arc::new(LogMailProvider::default()),
            clock: Arc::new(SystemClock),
            calendar: BusinessCalendar::new(config.business_offset()),
            config,
        })
    }

    pub fn user_state(&self) -> UserState {
        UserState {
            config: self.config.clone(),
            users: self.users.clone(),
            hash: self.hash.clone(),
            storage: self.storage.clone(),
            cache: self.cache.clone(),
        }
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState {
            config: self.config.clone(),
            users: self.users.clone(),
            user_tokens: self.user_tokens.clone(),
            hash: self.hash.clone(),
            mail: self.mail.clone(),
            clock: self.clock.clone(),
        }
    }

    pub fn appointment_state(&self) -> AppointmentState {
        AppointmentState {
            config: self.config.clone(),
            appointments: self.appointments.clone(),
            users: self.users.clone(),
            notifications: self.notifications.clone(),
            cache: self.cache.clone(),
            clock: self.clock.clone(),
            calendar: self.calendar,
        }
    }
}

async fn build_cache(config: &AppConfig) -> Arc<dyn CacheProvider> {
    let Some(redis_url) = config.redis_url.as_deref() else {
        info!("REDIS_URL not set, using in-process cache");
        return Arc::new(InMemoryCacheProvider::new());
    };

    match RedisCacheProvider::new(redis_url).await {
        Ok(cache) => {
            info!("Connected to Redis cache");
            Arc::new(cache)
        }
        Err(e) => {
            warn!("Redis unavailable ({}), using in-process cache", e);
            Arc::new(InMemoryCacheProvider::new())
        }
    }
}

#[cfg(test)]
impl Container {
    pub fn in_memory(config: AppConfig) -> Self {
        use appointment_cell::InMemoryAppointmentsRepository;
        use auth_cell::InMemoryUserTokensRepository;
        use notification_cell::{InMemoryMailProvider, InMemoryNotificationsRepository};
        use shared_utils::hash::FakeHashProvider;
        use user_cell::{InMemoryStorageProvider, InMemoryUsersRepository};

        Self {
            config: Arc::new(config),
            users: Arc::new(InMemoryUsersRepository::new()),
            user_tokens: Arc::new(InMemoryUserTokensRepository::new()),
            appointments: Arc::new(InMemoryAppointmentsRepository::new()),
            notifications: Arc::new(InMemoryNotificationsRepository::new()),
            cache: Arc::new(InMemoryCacheProvider::new()),
            storage: Arc::new(InMemoryStorageProvider::new()),
            hash: Arc::new(FakeHashProvider),
            mail: Arc::new(InMemoryMailProvider::new()),
            clock: Arc::new(SystemClock),
            calendar: BusinessCalendar::utc(),
        }
    }
}
