use std::sync::RwLock;

use crate::config::IdentityConfig;

/// A signed-in user as reported by the authentication collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { name: Some(name.into()), email: Some(email.into()) }
    }

    /// Status line shown next to the sign-out action
    pub fn describe(&self) -> String {
        let name = self.name.as_deref().unwrap_or("unknown user");
        match &self.email {
            Some(email) => format!("Logged in as {} ({})", name, email),
            None => format!("Logged in as {}", name),
        }
    }
}

impl From<IdentityConfig> for Identity {
    fn from(config: IdentityConfig) -> Self {
        Self { name: config.name, email: config.email }
    }
}

/// Supplies the optional identity used to stamp outgoing messages.
///
/// The chat core only reads; how the identity is obtained is up to the
/// implementation.
pub trait SessionProvider: Send + Sync {
    fn current_identity(&self) -> Option<Identity>;

    /// Display name stamped on outgoing user messages
    fn display_name(&self) -> Option<String> {
        self.current_identity().and_then(|identity| identity.name)
    }
}

/// Never signed in
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl SessionProvider for Anonymous {
    fn current_identity(&self) -> Option<Identity> {
        None
    }
}

/// In-memory session with explicit sign-in and sign-out
#[derive(Debug, Default)]
pub struct StaticSession {
    identity: RwLock<Option<Identity>>,
}

impl StaticSession {
    pub fn new(identity: Option<Identity>) -> Self {
        Self { identity: RwLock::new(identity) }
    }

    pub fn sign_in(&self, identity: Identity) {
        tracing::info!(name = ?identity.name, "signed in");
        *self.identity.write().unwrap_or_else(|e| e.into_inner()) = Some(identity);
    }

    pub fn sign_out(&self) {
        tracing::info!("signed out");
        *self.identity.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl SessionProvider for StaticSession {
    fn current_identity(&self) -> Option<Identity> {
        self.identity.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
