use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use shared_cache::{keys, recover_json, save_json, CacheProvider};
use user_cell::{UserProfile, UsersRepository};

use crate::calendar::BusinessCalendar;
use crate::error::AppointmentError;
use crate::models::ProviderAppointment;
use crate::repository::AppointmentsRepository;

pub struct ListProviderAppointmentsService {
    appointments: Arc<dyn AppointmentsRepository>,
    users: Arc<dyn UsersRepository>,
    cache: Arc<dyn CacheProvider>,
    calendar: BusinessCalendar,
    files_url: String,
}

impl ListProviderAppointmentsService {
    pub fn new(
        appointments: Arc<dyn AppointmentsRepository>,
        users: Arc<dyn UsersRepository>,
        cache: Arc<dyn CacheProvider>,
        calendar: BusinessCalendar,
        files_url: impl Into<String>,
    ) -> Self {
        Self { appointments, users, cache, calendar, files_url: files_url.into() }
    }

    pub async fn execute(
        &self,
        provider_id: Uuid,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<Vec<ProviderAppointment>, AppointmentError> {
        let date = BusinessCalendar::date(year, month, day).ok_or(AppointmentError::InvalidDate)?;
        let cache_key = keys::provider_appointments(provider_id, year, month, day);

        match recover_json::<Vec<ProviderAppointment>>(self.cache.as_ref(), &cache_key).await {
            Ok(Some(cached)) => {
                debug!("Cache hit for {}", cache_key);
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => warn!("Ignoring unreadable cache entry {}: {}", cache_key, e),
        }

        let range = self.calendar.day_range(date).ok_or(AppointmentError::InvalidDate)?;
        let appointments = self.appointments
            .find_all_in_day_from_provider(provider_id, range)
            .await?;

        let mut customers: HashMap<Uuid, Option<UserProfile>> = HashMap::new();
        let mut listing = Vec::with_capacity(appointments.len());

        for appointment in appointments {
            let user = match customers.get(&appointment.user_id) {
                Some(profile) => profile.clone(),
                None => {
                    let profile = self.users
                        .find_by_id(appointment.user_id)
                        .await?
                        .map(|user| user.to_profile(&self.files_url));
                    customers.insert(appointment.user_id, profile.clone());
                    profile
                }
            };

            listing.push(ProviderAppointment { appointment, user });
        }

        if let Err(e) = save_json(self.cache.as_ref(), &cache_key, &listing).await {
            warn!("Failed to cache {}: {}", cache_key, e);
        }

        Ok(listing)
    }
}
