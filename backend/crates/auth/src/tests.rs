//! Unit tests for the auth crate
//!
//! Use-case behavior is exercised against an in-memory user repository.

use std::sync::{Arc, Mutex};

use crate::application::config::AuthConfig;
use crate::application::credential;
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::application::sign_in::{SignInInput, SignInUseCase};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName, user_handle::UserHandle, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct MemoryUserRepo {
    users: Mutex<Vec<User>>,
}

impl UserRepository for MemoryUserRepo {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn find_by_handle(&self, handle: &UserHandle) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.handle == *handle)
            .cloned())
    }

    async fn find_by_display_name(&self, display_name: &DisplayName) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.display_name.canonical() == display_name.canonical())
            .cloned())
    }

    async fn exists_by_handle(&self, handle: &UserHandle) -> AuthResult<bool> {
        Ok(self.find_by_handle(handle).await?.is_some())
    }

    async fn exists_by_display_name(&self, display_name: &DisplayName) -> AuthResult<bool> {
        Ok(self.find_by_display_name(display_name).await?.is_some())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter_mut().find(|u| u.user_id == user.user_id) {
            *existing = user.clone();
        }
        Ok(())
    }
}

fn fixtures() -> (Arc<MemoryUserRepo>, Arc<AuthConfig>) {
    (
        Arc::new(MemoryUserRepo::default()),
        Arc::new(AuthConfig::with_random_secret()),
    )
}

fn register_input(handle: &str, name: &str, password: &str) -> RegisterInput {
    RegisterInput {
        handle: handle.to_string(),
        display_name: name.to_string(),
        password: password.to_string(),
    }
}

mod register_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_stores_hash_not_password() {
        let (repo, config) = fixtures();

        RegisterUseCase::new(repo.clone(), config)
            .execute(register_input("a1", "alice", "Secret-Pass1"))
            .await
            .unwrap();

        let user = repo
            .find_by_handle(&UserHandle::new("a1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(user.password_hash.as_phc_string().starts_with("$argon2id$"));
        assert!(!user.password_hash.as_phc_string().contains("Secret-Pass1"));
        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn test_duplicate_handle_conflicts_regardless_of_password() {
        let (repo, config) = fixtures();
        let uc = RegisterUseCase::new(repo.clone(), config);

        uc.execute(register_input("a1", "alice", "Secret-Pass1"))
            .await
            .unwrap();

        let err = uc
            .execute(register_input("a1", "someone-else", "Other-Pass9"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::HandleTaken));
        assert_eq!(repo.users.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_display_name_conflicts() {
        let (repo, config) = fixtures();
        let uc = RegisterUseCase::new(repo.clone(), config);

        uc.execute(register_input("a1", "Alice", "Secret-Pass1"))
            .await
            .unwrap();

        // Canonical comparison is case-insensitive
        let err = uc
            .execute(register_input("b2", "alice", "Other-Pass9"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DisplayNameTaken));
    }

    #[tokio::test]
    async fn test_invalid_inputs_rejected_before_storage() {
        let (repo, config) = fixtures();
        let uc = RegisterUseCase::new(repo.clone(), config);

        for input in [
            register_input("x", "alice", "Secret-Pass1"), // handle too short
            register_input("a1", "a", "Secret-Pass1"),    // name too short
            register_input("a1", "alice", "short"),       // weak password
        ] {
            assert!(matches!(
                uc.execute(input).await.unwrap_err(),
                AuthError::Validation(_)
            ));
        }
        assert!(repo.users.lock().unwrap().is_empty());
    }
}

mod sign_in_tests {
    use super::*;

    async fn registered(repo: &Arc<MemoryUserRepo>, config: &Arc<AuthConfig>) {
        RegisterUseCase::new(repo.clone(), config.clone())
            .execute(register_input("a1", "alice", "Secret-Pass1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_register_login_validate_roundtrip() {
        let (repo, config) = fixtures();
        registered(&repo, &config).await;

        let output = SignInUseCase::new(repo.clone(), config.clone())
            .execute(SignInInput {
                identifier: "a1".to_string(),
                password: "Secret-Pass1".to_string(),
            })
            .await
            .unwrap();

        let identity = credential::verify(&output.token, &config).unwrap();
        let stored = repo
            .find_by_handle(&UserHandle::new("a1").unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(identity.user_id, stored.user_id);
        assert_eq!(identity.handle, "a1");
        assert_eq!(identity.role, stored.user_role);
        assert!(stored.last_login_at.is_some());
    }

    #[tokio::test]
    async fn test_login_by_display_name() {
        let (repo, config) = fixtures();
        registered(&repo, &config).await;

        let output = SignInUseCase::new(repo.clone(), config.clone())
            .execute(SignInInput {
                identifier: "alice".to_string(),
                password: "Secret-Pass1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.handle, "a1");
    }

    #[tokio::test]
    async fn test_promoted_admin_role_flows_into_credential() {
        let (repo, config) = fixtures();
        registered(&repo, &config).await;

        // Promotion happens out of band (operator action), then shows up
        // in the next minted credential.
        let mut user = repo
            .find_by_handle(&UserHandle::new("a1").unwrap())
            .await
            .unwrap()
            .unwrap();
        user.set_role(UserRole::Admin);
        repo.update(&user).await.unwrap();

        let output = SignInUseCase::new(repo.clone(), config.clone())
            .execute(SignInInput {
                identifier: "a1".to_string(),
                password: "Secret-Pass1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.role, "admin");
        let identity = credential::verify(&output.token, &config).unwrap();
        assert!(identity.is_admin());
    }

    #[tokio::test]
    async fn test_wrong_user_and_wrong_password_are_indistinguishable() {
        let (repo, config) = fixtures();
        registered(&repo, &config).await;
        let uc = SignInUseCase::new(repo.clone(), config.clone());

        let unknown = uc
            .execute(SignInInput {
                identifier: "nobody".to_string(),
                password: "Secret-Pass1".to_string(),
            })
            .await
            .unwrap_err();
        let wrong_password = uc
            .execute(SignInInput {
                identifier: "a1".to_string(),
                password: "Wrong-Pass1".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    }
}
