use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use shared_utils::clock::Clock;

use crate::calendar::BusinessCalendar;
use crate::error::AppointmentError;
use crate::models::HourAvailability;
use crate::repository::AppointmentsRepository;

pub struct ListProviderDayAvailabilityService {
    appointments: Arc<dyn AppointmentsRepository>,
    clock: Arc<dyn Clock>,
    calendar: BusinessCalendar,
}

impl ListProviderDayAvailabilityService {
    pub fn new(
        appointments: Arc<dyn AppointmentsRepository>,
        clock: Arc<dyn Clock>,
        calendar: BusinessCalendar,
    ) -> Self {
        Self { appointments, clock, calendar }
    }

    /// One entry per business hour, ascending. Past hours are never available.
    pub async fn execute(
        &self,
        provider_id: Uuid,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<Vec<HourAvailability>, AppointmentError> {
        let date = BusinessCalendar::date(year, month, day).ok_or(AppointmentError::InvalidDate)?;
        let range = self.calendar.day_range(date).ok_or(AppointmentError::InvalidDate)?;

        let appointments = self.appointments
            .find_all_in_day_from_provider(provider_id, range)
            .await?;
        debug!("Provider {} has {} appointments on {}", provider_id, appointments.len(), date);

        let now = self.clock.now();

        BusinessCalendar::business_hours()
            .map(|hour| -> Result<HourAvailability, AppointmentError> {
                let slot = self.calendar.at(date, hour).ok_or(AppointmentError::InvalidDate)?;
                let booked = appointments
                    .iter()
                    .any(|a| self.calendar.hour_of(a.date) == hour);

                Ok(HourAvailability {
                    hour,
                    available: !booked && slot > now,
                })
            })
            .collect()
    }
}
