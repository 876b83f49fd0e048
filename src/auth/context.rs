//! Per-request view of who is signed in.
//!
//! The profile row can lag behind sign-up (names are filled in after the
//! account exists), so loading it may poll under an explicit, bounded policy.

use std::time::Duration;

use actix_session::Session;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserProfile;
use crate::store::{Owner, RecordStore};
use super::session::get_user_id;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Uninitialized,
    Loading,
    Ready(UserProfile),
    Anonymous,
}

/// How hard to try for a complete profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfilePolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl ProfilePolicy {
    /// Used by the profile endpoint: wait up to ~5s for names to appear.
    pub const POLLING: ProfilePolicy = ProfilePolicy { max_attempts: 5, backoff: Duration::from_secs(1) };

    /// One read, no waiting. Handlers that only need ids and company use this.
    pub fn immediate() -> Self {
        ProfilePolicy { max_attempts: 1, backoff: Duration::ZERO }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    state: SessionState,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        Self { state: SessionState::Uninitialized }
    }

    /// Resolve the context for the cookie session with a single profile read.
    pub async fn load(session: &Session, store: &dyn RecordStore) -> Result<Self, AppError> {
        let mut ctx = Self::new();
        ctx.resolve(store, get_user_id(session), ProfilePolicy::immediate()).await?;
        Ok(ctx)
    }

    /// Move from `Uninitialized` through `Loading` to `Ready` or `Anonymous`.
    ///
    /// A profile without names is retried until the policy runs out, then
    /// accepted as-is. A user id with no profile row is treated as signed out.
    pub async fn resolve(
        &mut self,
        store: &dyn RecordStore,
        user_id: Option<Uuid>,
        policy: ProfilePolicy,
    ) -> Result<(), AppError> {
        let Some(user_id) = user_id else {
            self.state = SessionState::Anonymous;
            return Ok(());
        };
        self.state = SessionState::Loading;

        let attempts = policy.max_attempts.max(1);
        let mut latest = None;
        for attempt in 1..=attempts {
            latest = store.find_profile(user_id).await?;
            if latest.as_ref().is_some_and(UserProfile::has_names) {
                break;
            }
            if attempt < attempts {
                log::debug!("Profile for {user_id} incomplete, retry {attempt}/{attempts}");
                tokio::time::sleep(policy.backoff).await;
            }
        }

        self.state = match latest {
            Some(profile) => SessionState::Ready(profile),
            None => SessionState::Anonymous,
        };
        Ok(())
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match &self.state {
            SessionState::Ready(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn require_user(&self) -> Result<&UserProfile, AppError> {
        self.user().ok_or(AppError::Unauthenticated)
    }

    /// The acting user as attached to writes.
    pub fn owner(&self) -> Result<Owner, AppError> {
        let user = self.require_user()?;
        Ok(Owner { user_id: user.id, company: user.company.clone() })
    }

    /// The user's company scalar, or `MissingPrerequisite(message)` if unset.
    pub fn require_company(&self, message: &str) -> Result<&str, AppError> {
        self.require_user()?
            .company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::MissingPrerequisite(message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::NewUser;
    use crate::store::MemoryStore;

    async fn user(store: &MemoryStore, first: &str, company: Option<&str>) -> UserProfile {
        store
            .create_user(&NewUser {
                email: format!("{}@acme.test", Uuid::new_v4()),
                password_hash: "x".into(),
                first_name: first.into(),
                last_name: if first.is_empty() { String::new() } else { "Doe".into() },
                company: company.map(String::from),
                role: "member".into(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn no_user_id_is_anonymous() {
        let store = MemoryStore::new();
        let mut ctx = SessionContext::new();
        assert_eq!(ctx.state(), &SessionState::Uninitialized);
        ctx.resolve(&store, None, ProfilePolicy::immediate()).await.unwrap();
        assert_eq!(ctx.state(), &SessionState::Anonymous);
        assert!(matches!(ctx.owner(), Err(AppError::Unauthenticated)));
        assert_eq!(store.operations(), 0);
    }

    #[tokio::test]
    async fn ready_with_company() {
        let store = MemoryStore::new();
        let profile = user(&store, "Jane", Some("Acme")).await;
        let mut ctx = SessionContext::new();
        ctx.resolve(&store, Some(profile.id), ProfilePolicy::immediate()).await.unwrap();
        assert_eq!(ctx.require_company("No company found").unwrap(), "Acme");
        assert_eq!(ctx.owner().unwrap().company.as_deref(), Some("Acme"));
    }

    #[tokio::test]
    async fn missing_company_is_a_prerequisite_error() {
        let store = MemoryStore::new();
        let profile = user(&store, "Jane", None).await;
        let mut ctx = SessionContext::new();
        ctx.resolve(&store, Some(profile.id), ProfilePolicy::immediate()).await.unwrap();
        let err = ctx.require_company("No company found for user").unwrap_err();
        assert_eq!(err.to_string(), "No company found for user");
    }

    #[tokio::test]
    async fn polling_is_bounded_for_incomplete_profiles() {
        let store = MemoryStore::new();
        let profile = user(&store, "", Some("Acme")).await;
        let before = store.operations();
        let policy = ProfilePolicy { max_attempts: 3, backoff: Duration::from_millis(1) };
        let mut ctx = SessionContext::new();
        ctx.resolve(&store, Some(profile.id), policy).await.unwrap();
        assert_eq!(store.operations() - before, 3);
        assert!(matches!(ctx.state(), SessionState::Ready(p) if p.first_name.is_empty()));
    }
}
