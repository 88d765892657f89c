// libs/appointment-cell/src/repository.rs
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use shared_database::{filter_value, DatabaseError, SupabaseClient};

use crate::models::{Appointment, CreateAppointment, DateRange};

#[async_trait]
pub trait AppointmentsRepository: Send + Sync {
    async fn create(&self, data: CreateAppointment) -> Result<Appointment, DatabaseError>;

    /// The provider's appointment at exactly `date`, if any.
    async fn find_by_date(&self, provider_id: Uuid, date: DateTime<Utc>) -> Result<Option<Appointment>, DatabaseError>;

    /// Appointments inside one business day, in creation order.
    async fn find_all_in_day_from_provider(&self, provider_id: Uuid, day: DateRange) -> Result<Vec<Appointment>, DatabaseError>;

    /// Appointments inside one business month, in creation order.
    async fn find_all_in_month_from_provider(&self, provider_id: Uuid, month: DateRange) -> Result<Vec<Appointment>, DatabaseError>;
}

fn timestamp(instant: DateTime<Utc>) -> String {
    filter_value(&instant.to_rfc3339_opts(SecondsFormat::Secs, true))
}

pub struct SupabaseAppointmentsRepository {
    supabase: Arc<SupabaseClient>,
}

impl SupabaseAppointmentsRepository {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }

    async fn find_in_range(&self, provider_id: Uuid, range: DateRange) -> Result<Vec<Appointment>, DatabaseError> {
        let query = format!(
            "provider_id=eq.{}&date=gte.{}&date=lt.{}&order=created_at.asc",
            provider_id,
            timestamp(range.start),
            timestamp(range.end),
        );

        self.supabase.select("appointments", &query).await
    }
}

#[async_trait]
impl AppointmentsRepository for SupabaseAppointmentsRepository {
    async fn create(&self, data: CreateAppointment) -> Result<Appointment, DatabaseError> {
        debug!("Inserting appointment for provider {} at {}", data.provider_id, data.date);

        self.supabase.insert("appointments", json!({
            "provider_id": data.provider_id,
            "user_id": data.user_id,
            "date": data.date,
        })).await
    }

    async fn find_by_date(&self, provider_id: Uuid, date: DateTime<Utc>) -> Result<Option<Appointment>, DatabaseError> {
        let query = format!("provider_id=eq.{}&date=eq.{}", provider_id, timestamp(date));
        self.supabase.select_one("appointments", &query).await
    }

    async fn find_all_in_day_from_provider(&self, provider_id: Uuid, day: DateRange) -> Result<Vec<Appointment>, DatabaseError> {
        self.find_in_range(provider_id, day).await
    }

    async fn find_all_in_month_from_provider(&self, provider_id: Uuid, month: DateRange) -> Result<Vec<Appointment>, DatabaseError> {
        self.find_in_range(provider_id, month).await
    }
}

/// Keeps appointments in insertion order. Does not enforce slot uniqueness.
#[derive(Default)]
pub struct InMemoryAppointmentsRepository {
    appointments: RwLock<Vec<Appointment>>,
}

impl InMemoryAppointmentsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn find_in_range(&self, provider_id: Uuid, range: DateRange) -> Vec<Appointment> {
        self.appointments
            .read()
            .await
            .iter()
            .filter(|a| a.provider_id == provider_id && range.contains(a.date))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AppointmentsRepository for InMemoryAppointmentsRepository {
    async fn create(&self, data: CreateAppointment) -> Result<Appointment, DatabaseError> {
        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            provider_id: data.provider_id,
            user_id: data.user_id,
            date: data.date,
            created_at: now,
            updated_at: now,
        };

        self.appointments.write().await.push(appointment.clone());
        Ok(appointment)
    }

    async fn find_by_date(&self, provider_id: Uuid, date: DateTime<Utc>) -> Result<Option<Appointment>, DatabaseError> {
        Ok(self.appointments
            .read()
            .await
            .iter()
            .find(|a| a.provider_id == provider_id && a.date == date)
            .cloned())
    }

    async fn find_all_in_day_from_provider(&self, provider_id: Uuid, day: DateRange) -> Result<Vec<Appointment>, DatabaseError> {
        Ok(self.find_in_range(provider_id, day).await)
    }

    async fn find_all_in_month_from_provider(&self, provider_id: Uuid, month: DateRange) -> Result<Vec<Appointment>, DatabaseError> {
        Ok(self.find_in_range(provider_id, month).await)
    }
}
