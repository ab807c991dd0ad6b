use super::{Outcome, or_log, rejected, require};
use crate::auth::{DynAccounts, UserId};
use crate::error::ValidationError;

/// Result of the combined signup flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUp {
    Created(UserId),
    Duplicate,
    Failed,
}

#[derive(Clone)]
pub struct AccountService {
    store: DynAccounts,
}

impl AccountService {
    #[must_use]
    pub fn new(store: DynAccounts) -> Self {
        Self { store }
    }

    /// True if the username or the email is already taken. A storage
    /// failure reads as "not taken"; registration still hits the UNIQUE
    /// constraints afterwards.
    pub async fn user_exists(&self, username: &str, email: &str) -> bool {
        or_log(
            "user_exists",
            self.store.user_exists(username, email).await,
            false,
        )
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> bool {
        self.register_outcome(username, email, password)
            .await
            .is_done()
    }

    pub async fn register_outcome(&self, username: &str, email: &str, password: &str) -> Outcome {
        if let Err(err) = validate_registration(username, email, password) {
            return rejected("register", &err);
        }
        let result = self.store.add_user(username, email, password).await;
        if let Ok(id) = &result {
            tracing::info!(user_id = *id, "User registered");
        }
        Outcome::from_store("register", result)
    }

    /// `None` covers both an unknown username and a wrong password.
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<UserId> {
        match self.store.verify_user(username, password).await {
            Ok(Some(id)) => {
                tracing::debug!(user_id = id, "Login successful");
                Some(id)
            }
            Ok(None) => {
                tracing::debug!("Invalid username or password");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "Credential lookup failed");
                None
            }
        }
    }

    pub async fn username(&self, user_id: UserId) -> Option<String> {
        or_log("username", self.store.username(user_id).await, None)
    }

    /// Duplicate check, registration and first login in one call.
    pub async fn sign_up(&self, username: &str, email: &str, password: &str) -> SignUp {
        if self.user_exists(username, email).await {
            return SignUp::Duplicate;
        }
        match self.register_outcome(username, email, password).await {
            Outcome::Done => {}
            Outcome::Duplicate => return SignUp::Duplicate,
            Outcome::Rejected | Outcome::Failed => return SignUp::Failed,
        }
        match self.authenticate(username, password).await {
            Some(id) => SignUp::Created(id),
            None => SignUp::Failed,
        }
    }
}

fn validate_registration(username: &str, email: &str, password: &str) -> Result<(), ValidationError> {
    require("username", username)?;
    require("email", email)?;
    require("password", password)
}
