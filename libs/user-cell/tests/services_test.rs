use std::sync::Arc;

use assert_matches::assert_matches;

use shared_cache::{CacheProvider, InMemoryCacheProvider};
use shared_utils::hash::{FakeHashProvider, HashProvider};
use user_cell::models::{CreateUser, CreateUserRequest, UpdateProfileRequest};
use user_cell::services::{
    CreateUserService, ShowProfileService, UpdateProfileService, UpdateUserAvatarService,
};
use user_cell::{InMemoryStorageProvider, InMemoryUsersRepository, UserError, UsersRepository};

struct Fixture {
    users: Arc<InMemoryUsersRepository>,
    storage: Arc<InMemoryStorageProvider>,
    cache: Arc<InMemoryCacheProvider>,
    hash: Arc<FakeHashProvider>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            users: Arc::new(InMemoryUsersRepository::new()),
            storage: Arc::new(InMemoryStorageProvider::new()),
            cache: Arc::new(InMemoryCacheProvider::new()),
            hash: Arc::new(FakeHashProvider),
        }
    }

    fn update_profile(&self) -> UpdateProfileService {
        UpdateProfileService::new(self.users.clone(), self.hash.clone(), self.cache.clone())
    }

    async fn seed(&self, name: &str, email: &str) -> user_cell::User {
        self.users.create(CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password: "123456".to_string(),
        }).await.unwrap()
    }
}

fn profile(name: &str, email: &str) -> UpdateProfileRequest {
    UpdateProfileRequest {
        name: name.to_string(),
        email: email.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_user_hashes_password_and_rejects_duplicates() {
    let fx = Fixture::new();
    fx.cache.save("providers-list:someone", "[]".to_string()).await.unwrap();

    let service = CreateUserService::new(fx.users.clone(), Arc::new(FakeHashProvider), fx.cache.clone());
    let request = CreateUserRequest {
        name: "John Doe".to_string(),
        email: "johndoe@example.com".to_string(),
        password: "123456".to_string(),
    };

    let user = service.execute(request.clone()).await.unwrap();
    assert_eq!(user.email, "johndoe@example.com");
    assert!(fx.cache.keys().await.is_empty());

    let duplicate = service.execute(request).await;
    assert_matches!(duplicate, Err(UserError::EmailAlreadyRegistered));
}

#[tokio::test]
async fn test_show_profile_of_missing_user_is_not_found() {
    let fx = Fixture::new();
    let result = ShowProfileService::new(fx.users.clone()).execute(uuid::Uuid::new_v4()).await;

    assert_matches!(result, Err(UserError::NotFound));
}

#[tokio::test]
async fn test_update_profile_changes_name_and_email() {
    let fx = Fixture::new();
    let user = fx.seed("John Doe", "johndoe@example.com").await;

    let updated = fx.update_profile()
        .execute(user.id, profile("John Trê", "johntre@example.com"))
        .await
        .unwrap();

    assert_eq!(updated.name, "John Trê");
    assert_eq!(updated.email, "johntre@example.com");
}

#[tokio::test]
async fn test_update_profile_rejects_email_of_another_account() {
    let fx = Fixture::new();
    fx.seed("John Doe", "johndoe@example.com").await;
    let user = fx.seed("Test", "test@example.com").await;

    let result = fx.update_profile()
        .execute(user.id, profile("Test", "johndoe@example.com"))
        .await;

    assert_matches!(result, Err(UserError::EmailInUse));
}

#[tokio::test]
async fn test_update_profile_keeps_own_email() {
    let fx = Fixture::new();
    let user = fx.seed("John Doe", "johndoe@example.com").await;

    let result = fx.update_profile()
        .execute(user.id, profile("Johnny", "johndoe@example.com"))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_update_password_requires_matching_old_password() {
    let fx = Fixture::new();
    let user = fx.seed("John Doe", "johndoe@example.com").await;

    let without_old = UpdateProfileRequest {
        password: Some("123123".to_string()),
        ..profile("John Doe", "johndoe@example.com")
    };
    assert_matches!(
        fx.update_profile().execute(user.id, without_old).await,
        Err(UserError::OldPasswordRequired)
    );

    let wrong_old = UpdateProfileRequest {
        old_password: Some("wrong".to_string()),
        password: Some("123123".to_string()),
        ..profile("John Doe", "johndoe@example.com")
    };
    assert_matches!(
        fx.update_profile().execute(user.id, wrong_old).await,
        Err(UserError::OldPasswordMismatch)
    );

    let correct = UpdateProfileRequest {
        old_password: Some("123456".to_string()),
        password: Some("123123".to_string()),
        ..profile("John Doe", "johndoe@example.com")
    };
    let updated = fx.update_profile().execute(user.id, correct).await.unwrap();
    assert!(fx.hash.compare_hash("123123", &updated.password).unwrap());
}

#[tokio::test]
async fn test_update_profile_invalidates_provider_listings() {
    let fx = Fixture::new();
    let user = fx.seed("John Doe", "johndoe@example.com").await;
    fx.cache.save("provider-appointments:p1:2020-5-20", "[]".to_string()).await.unwrap();
    fx.cache.save("providers-list:p1", "[]".to_string()).await.unwrap();

    fx.update_profile()
        .execute(user.id, profile("John Doe", "johndoe@example.com"))
        .await
        .unwrap();

    assert_eq!(fx.cache.keys().await, vec!["providers-list:p1".to_string()]);
}

#[tokio::test]
async fn test_update_avatar_replaces_previous_file() {
    let fx = Fixture::new();
    let user = fx.seed("John Doe", "johndoe@example.com").await;
    let service = UpdateUserAvatarService::new(fx.users.clone(), fx.storage.clone(), fx.cache.clone());

    let first = service.execute(user.id, "avatar.jpg", vec![1, 2, 3]).await.unwrap();
    let first_name = first.avatar.clone().unwrap();
    assert!(first_name.ends_with("-avatar.jpg"));
    assert!(fx.storage.contains(&first_name).await);

    let second = service.execute(user.id, "avatar2.jpg", vec![4, 5]).await.unwrap();
    let second_name = second.avatar.unwrap();

    assert!(!fx.storage.contains(&first_name).await);
    assert!(fx.storage.contains(&second_name).await);
}

#[tokio::test]
async fn test_update_avatar_of_missing_user_is_unauthenticated() {
    let fx = Fixture::new();
    let service = UpdateUserAvatarService::new(fx.users.clone(), fx.storage.clone(), fx.cache.clone());

    let result = service.execute(uuid::Uuid::new_v4(), "avatar.jpg", vec![1]).await;
    assert_matches!(result, Err(UserError::AvatarUnauthenticated));
}
