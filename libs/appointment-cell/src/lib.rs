pub mod calendar;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod router;
pub mod services;

pub use calendar::BusinessCalendar;
pub use error::AppointmentError;
pub use models::{Appointment, CreateAppointment, DateRange, ProviderAppointment};
pub use repository::{AppointmentsRepository, InMemoryAppointmentsRepository, SupabaseAppointmentsRepository};
pub use router::{appointment_routes, provider_routes, AppointmentState};
