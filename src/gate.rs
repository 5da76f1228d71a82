use thiserror::Error;

use crate::credentials::{Credential, CredentialStore};

/// The one failure an actor can run into: its code is not in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("credential {0} is not registered")]
pub struct AdmissionDenied(pub Credential);

/// Credential check placed in front of the protected resource
///
/// Checking never blocks and never changes anything, so any number of actors
/// may go through the gate at once.
#[derive(Clone, Debug)]
pub struct AdmissionGate
{
    store: CredentialStore,
}

impl AdmissionGate
{
    pub fn new(store: CredentialStore) -> AdmissionGate {
        AdmissionGate { store }
    }

    pub fn admit(&self, credential: Credential) -> bool {
        self.store.contains(credential)
    }

    pub fn check(&self, credential: Credential) -> Result<(), AdmissionDenied> {
        if self.admit(credential) {
            Ok(())
        } else {
            Err(AdmissionDenied(credential))
        }
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn into_store(self) -> CredentialStore {
        self.store
    }
}
