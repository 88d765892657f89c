// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use tracing::{info, instrument, warn};

use notification_cell::{CreateNotification, NotificationsRepository};
use shared_cache::{keys, CacheProvider};
use shared_database::DatabaseError;
use shared_utils::clock::Clock;

use crate::calendar::BusinessCalendar;
use crate::error::AppointmentError;
use crate::models::{Appointment, CreateAppointment};
use crate::repository::AppointmentsRepository;

pub struct CreateAppointmentService {
    appointments: Arc<dyn AppointmentsRepository>,
    notifications: Arc<dyn NotificationsRepository>,
    cache: Arc<dyn CacheProvider>,
    clock: Arc<dyn Clock>,
    calendar: BusinessCalendar,
}

impl CreateAppointmentService {
    pub fn new(
        appointments: Arc<dyn AppointmentsRepository>,
        notifications: Arc<dyn NotificationsRepository>,
        cache: Arc<dyn CacheProvider>,
        clock: Arc<dyn Clock>,
        calendar: BusinessCalendar,
    ) -> Self {
        Self { appointments, notifications, cache, clock, calendar }
    }

    /// Books one hourly slot. Checks run in order and the first failure wins.
    #[instrument(skip(self), fields(provider_id = %request.provider_id, user_id = %request.user_id))]
    pub async fn execute(&self, request: CreateAppointment) -> Result<Appointment, AppointmentError> {
        let date = self.calendar.start_of_hour(request.date);

        if date <= self.clock.now() {
            return Err(AppointmentError::PastDate);
        }

        if request.user_id == request.provider_id {
            return Err(AppointmentError::SelfBooking);
        }

        if !BusinessCalendar::is_business_hour(self.calendar.hour_of(date)) {
            return Err(AppointmentError::OutsideBusinessHours);
        }

        if self.appointments.find_by_date(request.provider_id, date).await?.is_some() {
            return Err(AppointmentError::AlreadyBooked);
        }

        let appointment = match self.appointments.create(CreateAppointment { date, ..request }).await {
            Ok(appointment) => appointment,
            // Unique index on (provider_id, date) caught a concurrent booking
            Err(DatabaseError::Conflict(_)) => return Err(AppointmentError::AlreadyBooked),
            Err(e) => return Err(e.into()),
        };

        info!("Appointment {} booked at {}", appointment.id, appointment.date);

        // Notification and cache writes are best-effort
        let content = format!(
            "Novo agendamento para dia {}",
            self.calendar.format_localized(date, "%d de %B às %H:%Mh")
        );
        if let Err(e) = self.notifications.create(CreateNotification {
            recipient_id: appointment.provider_id,
            content,
        }).await {
            warn!("Failed to notify provider {}: {}", appointment.provider_id, e);
        }

        let (year, month, day) = self.calendar.year_month_day(date);
        let cache_key = keys::provider_appointments(appointment.provider_id, year, month, day);
        if let Err(e) = self.cache.invalidate(&cache_key).await {
            warn!("Failed to invalidate {}: {}", cache_key, e);
        }

        Ok(appointment)
    }
}
