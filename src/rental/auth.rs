use serde::Deserialize;
use uuid::Uuid;

use crate::models::User;

/// Whatever the login form (or a client) hands over. Every field is optional;
/// missing ones are filled in when the data is coerced into a [`User`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginData {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
}

/// Turn login data into a principal. No credentials are checked.
pub fn coerce_user(data: LoginData) -> User {
    let email = data.email.unwrap_or_default();
    let name = data
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

    User {
        id: data
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        name,
        email,
        phone: data.phone.unwrap_or_default(),
        city: data.city.unwrap_or_default(),
    }
}

/// The authentication collaborator seen by the booking session.
pub trait AuthProvider {
    fn current_user(&self) -> Option<&User>;

    /// True while a previous session is still being restored.
    fn is_loading(&self) -> bool;

    fn login(&mut self, data: LoginData) -> User;

    fn logout(&mut self);
}

/// In-process auth: login always succeeds with the supplied data.
#[derive(Debug, Clone, Default)]
pub struct LocalAuth {
    user: Option<User>,
    loading: bool,
}

impl LocalAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out loading, as when a stored session has yet to be read.
    pub fn restoring() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    /// Finish restoring with the previously signed-in user, if any.
    pub fn resolve(&mut self, user: Option<User>) {
        self.user = user;
        self.loading = false;
    }
}

impl AuthProvider for LocalAuth {
    fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    fn login(&mut self, data: LoginData) -> User {
        let user = coerce_user(data);
        tracing::info!(user_id = %user.id, "User logged in");
        self.user = Some(user.clone());
        self.loading = false;
        user
    }

    fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "User logged out");
        }
    }
}
