use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPreferences;
use crate::domain::user::models::UserRole;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for account operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    fn hash(&self, password: &str) -> Result<String, UserError> {
        self.password_hasher
            .hash(password)
            .map_err(|e| UserError::PasswordHashing(e.to_string()))
    }

    async fn require_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: SignupCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash: self.hash(command.password.expose())?,
            name: command.name,
            role: UserRole::User,
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
        };

        let user = self.repository.create(user).await?;
        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    async fn verify_credentials(&self, command: LoginCommand) -> Result<User, UserError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            tracing::debug!("Login attempt for unknown email");
            return Err(UserError::InvalidCredentials);
        };

        let matches = self
            .password_hasher
            .verify(&command.password, &user.password_hash)
            .map_err(|e| UserError::PasswordHashing(e.to_string()))?;

        if matches {
            Ok(user)
        } else {
            tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
            Err(UserError::InvalidCredentials)
        }
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.require_user(id).await
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let mut user = self.require_user(id).await?;

        if let Some(new_email) = command.email {
            if let Some(existing) = self.repository.find_by_email(&new_email).await? {
                if existing.id != user.id {
                    return Err(UserError::EmailInUse(new_email.to_string()));
                }
            }
            user.email = new_email;
        }

        if let Some(new_name) = command.name {
            user.name = Some(new_name);
        }

        if let Some(preferences) = command.preferences {
            user.preferences = preferences;
        }

        user.updated_at = Utc::now();
        self.repository.update(user).await
    }

    async fn change_password(
        &self,
        id: &UserId,
        command: ChangePasswordCommand,
    ) -> Result<(), UserError> {
        let mut user = self.require_user(id).await?;

        let matches = self
            .password_hasher
            .verify(&command.current_password, &user.password_hash)
            .map_err(|e| UserError::PasswordHashing(e.to_string()))?;
        if !matches {
            return Err(UserError::IncorrectPassword);
        }

        user.password_hash = self.hash(command.new_password.expose())?;
        user.updated_at = Utc::now();
        self.repository.update(user).await?;

        tracing::info!(user_id = %id, "Password changed");
        Ok(())
    }

    async fn delete_account(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete_with_data(id).await?;
        tracing::info!(user_id = %id, "Account and all data deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::DisplayName;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete_with_data(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    fn email(s: &str) -> EmailAddress {
        EmailAddress::new(s.to_string()).unwrap()
    }

    fn stored_user(password: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            email: email("sam@example.com"),
            password_hash: auth::PasswordHasher::new().hash(password).unwrap(),
            name: Some(DisplayName::new("Sam".to_string()).unwrap()),
            role: UserRole::User,
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "sam@example.com"
                    && user.password_hash.starts_with("$argon2")
                    && user.role == UserRole::User
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let user = service
            .register(SignupCommand {
                email: email("Sam@Example.com"),
                password: Password::new("secret1".to_string()).unwrap(),
                name: None,
            })
            .await
            .unwrap();

        assert_eq!(user.email.as_str(), "sam@example.com");
        assert!(user.name.is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user("secret1"))));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service
            .register(SignupCommand {
                email: email("sam@example.com"),
                password: Password::new("secret1".to_string()).unwrap(),
                name: None,
            })
            .await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_verify_credentials_success() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("secret1");
        let user_id = user.id;

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository));

        let verified = service
            .verify_credentials(LoginCommand {
                email: email("sam@example.com"),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(verified.id, user_id);
    }

    #[tokio::test]
    async fn test_verify_credentials_wrong_password_and_unknown_email_match() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("secret1");

        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "sam@example.com")
            .returning(move |_| Ok(Some(user.clone())));
        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "nobody@example.com")
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let wrong_password = service
            .verify_credentials(LoginCommand {
                email: email("sam@example.com"),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_email = service
            .verify_credentials(LoginCommand {
                email: email("nobody@example.com"),
                password: "secret1".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, UserError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_email_of_other_user() {
        let mut repository = MockTestUserRepository::new();
        let me = stored_user("secret1");
        let me_id = me.id;
        let other = stored_user("secret2");

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(me.clone())));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(other.clone())));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service
            .update_profile(
                &me_id,
                UpdateProfileCommand {
                    email: Some(email("taken@example.com")),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::EmailInUse(_))));
    }

    #[tokio::test]
    async fn test_update_profile_partial() {
        let mut repository = MockTestUserRepository::new();
        let me = stored_user("secret1");
        let me_id = me.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(me.clone())));
        repository
            .expect_update()
            .withf(|user| {
                user.email.as_str() == "sam@example.com"
                    && user.name.as_ref().map(|n| n.as_str()) == Some("Samantha")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let updated = service
            .update_profile(
                &me_id,
                UpdateProfileCommand {
                    name: Some(DisplayName::new("Samantha".to_string()).unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name.unwrap().as_str(), "Samantha");
    }

    #[tokio::test]
    async fn test_change_password_wrong_current() {
        let mut repository = MockTestUserRepository::new();
        let me = stored_user("secret1");
        let me_id = me.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(me.clone())));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service
            .change_password(
                &me_id,
                ChangePasswordCommand {
                    current_password: "not-it".to_string(),
                    new_password: Password::new("brand-new".to_string()).unwrap(),
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::IncorrectPassword)));
    }

    #[tokio::test]
    async fn test_change_password_rehashes() {
        let mut repository = MockTestUserRepository::new();
        let me = stored_user("secret1");
        let me_id = me.id;
        let old_hash = me.password_hash.clone();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(me.clone())));
        repository
            .expect_update()
            .withf(move |user| {
                user.password_hash != old_hash
                    && auth::PasswordHasher::new()
                        .verify("brand-new", &user.password_hash)
                        .unwrap_or(false)
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        service
            .change_password(
                &me_id,
                ChangePasswordCommand {
                    current_password: "secret1".to_string(),
                    new_password: Password::new("brand-new".to_string()).unwrap(),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_account() {
        let mut repository = MockTestUserRepository::new();
        let user_id = UserId::new();

        repository
            .expect_delete_with_data()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository));

        assert!(service.delete_account(&user_id).await.is_ok());
    }
}
