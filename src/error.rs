use std::io;

use thiserror::Error;

use crate::actor::{Authenticity, Role};

/// Rejected workload configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{requested} authorized actors per role need codes but the store only holds {available}")]
    NotEnoughCredentials { requested: usize, available: usize },

    #[error("a store of {0} codes leaves no code free for impostors")]
    NoRoomForImpostors(usize),
}

/// Errors that end a workload run.
#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("invalid workload configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to write access log: {0}")]
    Io(#[from] io::Error),

    #[error("{authenticity} {role} {id} panicked")]
    ActorPanicked {
        id: usize,
        role: Role,
        authenticity: Authenticity,
    },
}
