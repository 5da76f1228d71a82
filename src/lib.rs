#![crate_type = "lib"]
//! Readers-writers demonstration with a credential gate in front of the lock.
//!
//! Actors present an access code to an [`AdmissionGate`]; admitted readers share
//! the protected cell through [`RwLock`], admitted writers get it exclusively.
//! [`Workload`] spawns the whole population and waits for it.

pub use actor::{Actor, ActorStats, Authenticity, Role};
pub use coordinator::Coordinator;
pub use credentials::{Credential, CredentialStore};
pub use driver::{Schedule, Workload, WorkloadConfig, WorkloadReport};
pub use error::{ConfigError, WorkloadError};
pub use gate::{AdmissionDenied, AdmissionGate};
pub use helpers::{random_code, random_value, CODE_MAX, CODE_MIN, CODE_SPACE, VALUE_BOUND};
pub use logger::{AccessLogger, AccessRecord, Outcome};
pub use rw_lock::*;
pub use semaphore::BinarySemaphore;

mod actor;
mod coordinator;
mod credentials;
mod driver;
mod error;
mod gate;
mod helpers;
mod logger;
mod rw_lock;
mod semaphore;
