use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::ports::user_repository::{DuplicateEmail, UserRepository, UserRow};

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("email already registered")]
    EmailTaken,
    #[error("{0}")]
    Invalid(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();
    Ok(hash)
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> Result<UserRow, RegisterError> {
        let email = req.email.trim().to_ascii_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(RegisterError::Invalid("a valid email is required"));
        }
        if req.password.len() < MIN_PASSWORD_LEN {
            return Err(RegisterError::Invalid(
                "password must be at least 8 characters",
            ));
        }
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(RegisterError::EmailTaken);
        }
        let hash = hash_password(&req.password)?;
        // The lookup above is advisory; a concurrent registration can still
        // claim the email before this insert.
        match self.repo.create_user(&email, req.name.trim(), &hash).await {
            Ok(user) => Ok(user),
            Err(err) if err.downcast_ref::<DuplicateEmail>().is_some() => {
                Err(RegisterError::EmailTaken)
            }
            Err(err) => Err(RegisterError::Internal(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryUserRepository;

    fn request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            name: "Registrar".into(),
            password: "correct horse".into(),
        }
    }

    #[tokio::test]
    async fn normalizes_email_and_hashes_password() {
        let repo = InMemoryUserRepository::default();
        let uc = Register { repo: &repo };
        let user = uc.execute(&request(" Admin@Campus.edu ")).await.unwrap();
        assert_eq!(user.email, "admin@campus.edu");
        let stored = repo
            .find_by_email("admin@campus.edu")
            .await
            .unwrap()
            .unwrap();
        let hash = stored.password_hash.unwrap();
        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, "correct horse");
    }

    /// Always misses on lookup, so only the insert sees the duplicate.
    #[derive(Default)]
    struct StaleLookupRepository {
        inner: InMemoryUserRepository,
    }

    #[async_trait::async_trait]
    impl UserRepository for StaleLookupRepository {
        async fn create_user(
            &self,
            email: &str,
            name: &str,
            password_hash: &str,
        ) -> anyhow::Result<UserRow> {
            self.inner.create_user(email, name, password_hash).await
        }

        async fn find_by_email(&self, _email: &str) -> anyhow::Result<Option<UserRow>> {
            Ok(None)
        }

        async fn find_by_id(&self, id: uuid::Uuid) -> anyhow::Result<Option<UserRow>> {
            self.inner.find_by_id(id).await
        }
    }

    #[tokio::test]
    async fn duplicate_on_insert_is_email_taken() {
        let repo = StaleLookupRepository::default();
        let uc = Register { repo: &repo };
        uc.execute(&request("admin@campus.edu")).await.unwrap();
        assert!(matches!(
            uc.execute(&request("admin@campus.edu")).await,
            Err(RegisterError::EmailTaken)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registrations_yield_one_winner() {
        for _ in 0..10 {
            let repo = std::sync::Arc::new(InMemoryUserRepository::default());
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let repo = repo.clone();
                    tokio::spawn(async move {
                        Register {
                            repo: repo.as_ref(),
                        }
                        .execute(&request("race@campus.edu"))
                        .await
                    })
                })
                .collect();
            let mut created = 0;
            for handle in handles {
                match handle.await.unwrap() {
                    Ok(_) => created += 1,
                    Err(RegisterError::EmailTaken) => {}
                    Err(other) => panic!("unexpected outcome: {other:?}"),
                }
            }
            assert_eq!(created, 1);
        }
    }

    #[tokio::test]
    async fn rejects_duplicates_and_weak_input() {
        let repo = InMemoryUserRepository::default();
        let uc = Register { repo: &repo };
        uc.execute(&request("admin@campus.edu")).await.unwrap();
        assert!(matches!(
            uc.execute(&request("ADMIN@campus.edu")).await,
            Err(RegisterError::EmailTaken)
        ));
        assert!(matches!(
            uc.execute(&request("not-an-email")).await,
            Err(RegisterError::Invalid(_))
        ));
        let mut short = request("other@campus.edu");
        short.password = "short".into();
        assert!(matches!(
            uc.execute(&short).await,
            Err(RegisterError::Invalid(_))
        ));
    }
}
