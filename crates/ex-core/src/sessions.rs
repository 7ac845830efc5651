use crate::error::SessionError;
use crate::types::enums::Role;
use crate::types::identity::SessionIdentity;
use crate::types::ids::UserId;
use crate::types::io::{ChangePasswordInput, RegisterInput, UpdateProfileInput};
use crate::validation::{validate_password_change, validate_profile};
use ex_events::bus::NotificationBus;
use ex_events::types::{Notification, NotificationKind};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub const STORAGE_KEY: &str = "eventx-user";
pub const DEFAULT_AUTH_DELAY: Duration = Duration::from_millis(1000);

const ORGANIZER_MARKER: &str = "organizer";
const USER_ID_HEX_LEN: usize = 9;

pub trait IdentityStorage {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn save(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, SessionError> {
        self.entries.lock().map_err(|err| SessionError::Storage {
            message: err.to_string(),
        })
    }
}

impl IdentityStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Holds the signed-in identity and mirrors it into `S`.
///
/// Transitions: unauthenticated -> (login | register) -> authenticated ->
/// logout -> unauthenticated. Every transition into the authenticated state
/// writes the record under [`STORAGE_KEY`]; logout removes it.
pub struct SessionStore<S: IdentityStorage> {
    storage: S,
    current: Option<SessionIdentity>,
    auth_delay: Duration,
    bus: Option<NotificationBus>,
}

impl<S: IdentityStorage> SessionStore<S> {
    /// Rehydrates from `storage`. An unreadable record counts as signed out.
    pub fn init(storage: S) -> Self {
        let current = match storage.load(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<SessionIdentity>(&raw) {
                Ok(identity) => Some(identity),
                Err(err) => {
                    tracing::warn!(error = %err, "discarding unreadable stored identity");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, "identity storage unavailable at startup");
                None
            }
        };
        if let Some(identity) = &current {
            tracing::debug!(user_id = %identity.id, "restored session");
        }
        Self {
            storage,
            current,
            auth_delay: DEFAULT_AUTH_DELAY,
            bus: None,
        }
    }

    pub fn with_auth_delay(mut self, delay: Duration) -> Self {
        self.auth_delay = delay;
        self
    }

    pub fn with_notifications(mut self, bus: NotificationBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn current(&self) -> Option<&SessionIdentity> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn require_authenticated(&self) -> Result<&SessionIdentity, SessionError> {
        self.current.as_ref().ok_or(SessionError::Unauthenticated)
    }

    pub fn require_organizer(&self) -> Result<&SessionIdentity, SessionError> {
        let identity = self.require_authenticated()?;
        if identity.role != Role::Organizer {
            return Err(SessionError::Forbidden {
                required: Role::Organizer,
            });
        }
        Ok(identity)
    }

    pub fn auth_delay(&self) -> Duration {
        self.auth_delay
    }

    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<Option<SessionIdentity>, SessionError> {
        if has_login_credentials(email, password) {
            tokio::time::sleep(self.auth_delay).await;
        }
        self.complete_login(email, password)
    }

    pub fn complete_login(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<Option<SessionIdentity>, SessionError> {
        if !has_login_credentials(email, password) {
            return Ok(None);
        }
        let identity = SessionIdentity {
            id: user_id_for(email)?,
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            role: role_for(email),
            bio: None,
            college: None,
        };
        self.authenticate(identity).map(Some)
    }

    pub async fn register(
        &mut self,
        input: &RegisterInput,
    ) -> Result<Option<SessionIdentity>, SessionError> {
        if has_register_fields(input) {
            tokio::time::sleep(self.auth_delay).await;
        }
        self.complete_register(input)
    }

    pub fn complete_register(
        &mut self,
        input: &RegisterInput,
    ) -> Result<Option<SessionIdentity>, SessionError> {
        if !has_register_fields(input) {
            return Ok(None);
        }
        let identity = SessionIdentity {
            id: user_id_for(&input.email)?,
            name: input.name.clone(),
            email: input.email.clone(),
            role: input.role,
            bio: None,
            college: None,
        };
        self.authenticate(identity).map(Some)
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.storage.remove(STORAGE_KEY)?;
        if let Some(identity) = self.current.take() {
            tracing::info!(user_id = %identity.id, "signed out");
            self.notify(NotificationKind::SignedOut, "Signed out", &identity.name);
        }
        Ok(())
    }

    pub fn update_profile(
        &mut self,
        input: &UpdateProfileInput,
    ) -> Result<SessionIdentity, SessionError> {
        let current = self.require_authenticated()?;
        validate_profile(input)?;
        let updated = SessionIdentity {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            bio: input.bio.clone().filter(|bio| !bio.is_empty()),
            college: input.college.clone().filter(|college| !college.is_empty()),
            ..current.clone()
        };
        self.persist(&updated)?;
        self.current = Some(updated.clone());
        self.notify(
            NotificationKind::ProfileUpdated,
            "Profile Updated",
            "Your profile has been updated successfully",
        );
        Ok(updated)
    }

    pub fn change_password(&self, input: &ChangePasswordInput) -> Result<(), SessionError> {
        self.require_authenticated()?;
        validate_password_change(input)?;
        self.notify(
            NotificationKind::PasswordUpdated,
            "Password Updated",
            "Your password has been updated successfully",
        );
        Ok(())
    }

    fn authenticate(&mut self, identity: SessionIdentity) -> Result<SessionIdentity, SessionError> {
        self.persist(&identity)?;
        tracing::info!(user_id = %identity.id, role = %identity.role, "signed in");
        self.notify(
            NotificationKind::SignedIn,
            "Signed in",
            &format!("Welcome, {}", identity.name),
        );
        self.current = Some(identity.clone());
        Ok(identity)
    }

    fn persist(&self, identity: &SessionIdentity) -> Result<(), SessionError> {
        let raw = serde_json::to_string(identity).map_err(|err| SessionError::Storage {
            message: err.to_string(),
        })?;
        self.storage.save(STORAGE_KEY, &raw)
    }

    fn notify(&self, kind: NotificationKind, title: &str, description: &str) {
        if let Some(bus) = &self.bus {
            let _ = bus.publish(Notification::new(kind, title, description));
        }
    }
}

pub fn has_login_credentials(email: &str, password: &str) -> bool {
    !email.is_empty() && !password.is_empty()
}

pub fn has_register_fields(input: &RegisterInput) -> bool {
    !input.name.is_empty() && !input.email.is_empty() && !input.password.is_empty()
}

fn role_for(email: &str) -> Role {
    if email.contains(ORGANIZER_MARKER) {
        Role::Organizer
    } else {
        Role::Student
    }
}

fn user_id_for(email: &str) -> Result<UserId, SessionError> {
    let digest = hex::encode(Sha256::digest(email.as_bytes()));
    UserId::new(format!("{}{}", UserId::PREFIX, &digest[..USER_ID_HEX_LEN])).map_err(|err| {
        SessionError::InvalidInput {
            message: err.to_string(),
        }
    })
}
