use std::collections::HashMap;
use std::sync::Arc;

use chrono::Datelike;
use uuid::Uuid;

use crate::calendar::BusinessCalendar;
use crate::error::AppointmentError;
use crate::models::DayAvailability;
use crate::repository::AppointmentsRepository;

pub struct ListProviderMonthAvailabilityService {
    appointments: Arc<dyn AppointmentsRepository>,
    calendar: BusinessCalendar,
}

impl ListProviderMonthAvailabilityService {
    pub fn new(appointments: Arc<dyn AppointmentsRepository>, calendar: BusinessCalendar) -> Self {
        Self { appointments, calendar }
    }

    /// A day is unavailable only once every business hour is taken.
    pub async fn execute(
        &self,
        provider_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Vec<DayAvailability>, AppointmentError> {
        let range = self.calendar.month_range(year, month).ok_or(AppointmentError::InvalidDate)?;
        let days = BusinessCalendar::days_in_month(year, month).ok_or(AppointmentError::InvalidDate)?;

        let appointments = self.appointments
            .find_all_in_month_from_provider(provider_id, range)
            .await?;

        let mut booked_per_day: HashMap<u32, usize> = HashMap::new();
        for appointment in &appointments {
            let day = self.calendar.date_of(appointment.date).day();
            *booked_per_day.entry(day).or_default() += 1;
        }

        Ok((1..=days)
            .map(|day| DayAvailability {
                day,
                available: booked_per_day.get(&day).copied().unwrap_or(0)
                    < BusinessCalendar::slots_per_day(),
            })
            .collect())
    }
}
