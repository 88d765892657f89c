mod common;

use uuid::Uuid;

use appointment_cell::services::{
    CreateAppointmentService, ListProviderAppointmentsService, ListProvidersService,
};
use appointment_cell::CreateAppointment;
use shared_utils::test_utils::clock_at;

use common::{at, Fixture};

const FILES_URL: &str = "http://localhost:3333/files";

fn listing_service(fx: &Fixture) -> ListProviderAppointmentsService {
    ListProviderAppointmentsService::new(
        fx.appointments.clone(),
        fx.users.clone(),
        fx.cache.clone(),
        fx.calendar,
        FILES_URL,
    )
}

#[tokio::test]
async fn test_listing_keeps_creation_order_and_embeds_customer() {
    let fx = Fixture::new();
    let provider = fx.user("Provider").await;
    let customer = fx.user("John Doe").await;

    fx.book(provider.id, customer.id, at(2020, 5, 20, 15, 0)).await;
    fx.book(provider.id, customer.id, at(2020, 5, 20, 9, 0)).await;
    fx.book(provider.id, customer.id, at(2020, 5, 21, 9, 0)).await;

    let listing = listing_service(&fx).execute(provider.id, 2020, 5, 20).await.unwrap();

    let hours: Vec<_> = listing.iter().map(|a| a.appointment.date).collect();
    assert_eq!(hours, vec![at(2020, 5, 20, 15, 0), at(2020, 5, 20, 9, 0)]);
    assert_eq!(listing[0].user.as_ref().map(|u| u.name.as_str()), Some("John Doe"));
}

#[tokio::test]
async fn test_listing_is_cached_and_idempotent() {
    let fx = Fixture::new();
    let provider = fx.user("Provider").await;
    fx.book(provider.id, Uuid::new_v4(), at(2020, 5, 20, 10, 0)).await;

    let service = listing_service(&fx);
    let first = service.execute(provider.id, 2020, 5, 20).await.unwrap();

    let key = format!("provider-appointments:{}:2020-5-20", provider.id);
    assert_eq!(fx.cache.keys().await, vec![key]);

    // A write that bypasses invalidation is not visible through the cache
    fx.book(provider.id, Uuid::new_v4(), at(2020, 5, 20, 11, 0)).await;
    let second = service.execute(provider.id, 2020, 5, 20).await.unwrap();

    assert_eq!(first, second);
    assert!(first[0].user.is_none());
}

#[tokio::test]
async fn test_booking_refreshes_the_cached_day() {
    let fx = Fixture::new();
    let provider = fx.user("Provider").await;
    let customer = fx.user("Customer").await;
    let service = listing_service(&fx);

    assert!(service.execute(provider.id, 2020, 5, 20).await.unwrap().is_empty());

    CreateAppointmentService::new(
        fx.appointments.clone(),
        fx.notifications.clone(),
        fx.cache.clone(),
        clock_at(2020, 5, 19, 12),
        fx.calendar,
    )
    .execute(CreateAppointment {
        provider_id: provider.id,
        user_id: customer.id,
        date: at(2020, 5, 20, 10, 0),
    })
    .await
    .unwrap();

    let listing = service.execute(provider.id, 2020, 5, 20).await.unwrap();
    assert_eq!(listing.len(), 1);
}

#[tokio::test]
async fn test_providers_exclude_caller_and_are_cached() {
    let fx = Fixture::new();
    let caller = fx.user("Caller").await;
    fx.user("Barber One").await;
    fx.user("Barber Two").await;

    let service = ListProvidersService::new(fx.users.clone(), fx.cache.clone(), FILES_URL);
    let providers = service.execute(caller.id).await.unwrap();

    assert_eq!(providers.len(), 2);
    assert!(providers.iter().all(|p| p.id != caller.id));
    assert_eq!(fx.cache.keys().await, vec![format!("providers-list:{}", caller.id)]);

    fx.user("Barber Three").await;
    assert_eq!(service.execute(caller.id).await.unwrap().len(), 2);
}
