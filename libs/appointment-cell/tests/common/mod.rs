#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use appointment_cell::{AppointmentsRepository, BusinessCalendar, CreateAppointment, InMemoryAppointmentsRepository};
use notification_cell::InMemoryNotificationsRepository;
use shared_cache::InMemoryCacheProvider;
use user_cell::models::CreateUser;
use user_cell::{InMemoryUsersRepository, User, UsersRepository};

pub struct Fixture {
    pub appointments: Arc<InMemoryAppointmentsRepository>,
    pub users: Arc<InMemoryUsersRepository>,
    pub notifications: Arc<InMemoryNotificationsRepository>,
    pub cache: Arc<InMemoryCacheProvider>,
    pub calendar: BusinessCalendar,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            appointments: Arc::new(InMemoryAppointmentsRepository::new()),
            users: Arc::new(InMemoryUsersRepository::new()),
            notifications: Arc::new(InMemoryNotificationsRepository::new()),
            cache: Arc::new(InMemoryCacheProvider::new()),
            calendar: BusinessCalendar::utc(),
        }
    }

    pub async fn user(&self, name: &str) -> User {
        self.users.create(CreateUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            password: "123456".to_string(),
        }).await.unwrap()
    }

    /// Stores an appointment directly, bypassing booking rules.
    pub async fn book(&self, provider_id: Uuid, user_id: Uuid, date: DateTime<Utc>) {
        self.appointments
            .create(CreateAppointment { provider_id, user_id, date })
            .await
            .unwrap();
    }
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}
