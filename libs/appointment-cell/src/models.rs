// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use user_cell::UserProfile;

// ==============================================================================
// ENTITY
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An appointment as the provider sees it, with the customer embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAppointment {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub user: Option<UserProfile>,
}

#[derive(Debug, Clone)]
pub struct CreateAppointment {
    pub provider_id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
}

/// Half-open `[start, end)` interval of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

// ==============================================================================
// REQUEST / RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub provider_id: Uuid,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DayQuery {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MonthQuery {
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourAvailability {
    pub hour: u32,
    pub available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub day: u32,
    pub available: bool,
}
