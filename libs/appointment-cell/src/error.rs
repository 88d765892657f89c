use thiserror::Error;

use shared_database::DatabaseError;
use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("You cannot schedule an appointment on a past date")]
    PastDate,

    #[error("You cannot schedule an appointment with yourself")]
    SelfBooking,

    #[error("You can only schedule an appointment between 8am and 5pm")]
    OutsideBusinessHours,

    #[error("This appointment is already booked")]
    AlreadyBooked,

    #[error("Invalid date")]
    InvalidDate,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::Database(e) => e.into(),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}
