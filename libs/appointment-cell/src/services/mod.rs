pub mod booking;
pub mod day_availability;
pub mod month_availability;
pub mod provider_appointments;
pub mod providers;

pub use booking::CreateAppointmentService;
pub use day_availability::ListProviderDayAvailabilityService;
pub use month_availability::ListProviderMonthAvailabilityService;
pub use provider_appointments::ListProviderAppointmentsService;
pub use providers::ListProvidersService;
