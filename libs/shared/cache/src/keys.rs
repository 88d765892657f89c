//! Cache key layout shared by the cells.

use uuid::Uuid;

pub const PROVIDER_APPOINTMENTS: &str = "provider-appointments";
pub const PROVIDERS_LIST: &str = "providers-list";

/// `provider-appointments:{provider_id}:{year}-{month}-{day}`, no zero padding.
pub fn provider_appointments(provider_id: Uuid, year: i32, month: u32, day: u32) -> String {
    format!("{}:{}:{}-{}-{}", PROVIDER_APPOINTMENTS, provider_id, year, month, day)
}

pub fn providers_list(user_id: Uuid) -> String {
    format!("{}:{}", PROVIDERS_LIST, user_id)
}
