use std::io::Write;
use std::thread;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};

use crate::actor::{Actor, ActorStats, Authenticity, Role};
use crate::coordinator::Coordinator;
use crate::credentials::CredentialStore;
use crate::error::{ConfigError, WorkloadError};
use crate::gate::AdmissionGate;
use crate::helpers::CODE_SPACE;
use crate::logger::AccessLogger;

/// How many rounds every actor runs and how long it pauses after each one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    pub rounds: usize,
    pub pause: Duration,
}

impl Default for Schedule {
    fn default() -> Schedule {
        Schedule {
            rounds: 5,
            pause: Duration::from_secs(1),
        }
    }
}

/// Population and pacing of a workload run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkloadConfig {
    pub readers: usize,
    pub writers: usize,
    pub impostor_readers: usize,
    pub impostor_writers: usize,
    pub schedule: Schedule,
    /// Size of the credential store.
    pub credential_count: usize,
    /// Fixes every random draw of the run. A fresh seed is picked when unset.
    pub seed: Option<u64>,
}

impl Default for WorkloadConfig {
    fn default() -> WorkloadConfig {
        WorkloadConfig {
            readers: 5,
            writers: 5,
            impostor_readers: 5,
            impostor_writers: 5,
            schedule: Schedule::default(),
            credential_count: 10,
            seed: None,
        }
    }
}

impl WorkloadConfig {
    /// Total number of actors.
    pub fn actors(&self) -> usize {
        self.readers + self.writers + self.impostor_readers + self.impostor_writers
    }

    /// Reader `i` and writer `i` share code `i`, so the store must hold at
    /// least as many codes as the larger of the two authorized groups.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let requested = self.readers.max(self.writers);
        if requested > self.credential_count {
            return Err(ConfigError::NotEnoughCredentials {
                requested,
                available: self.credential_count,
            });
        }

        if self.impostor_readers + self.impostor_writers > 0 && self.credential_count >= CODE_SPACE {
            return Err(ConfigError::NoRoomForImpostors(self.credential_count));
        }

        Ok(())
    }
}

/// Outcome of a finished run.
#[derive(Debug)]
pub struct WorkloadReport<W> {
    pub seed: u64,
    pub stats: ActorStats,
    /// Value left in the protected cell.
    pub final_value: u32,
    /// Access lines written, header excluded.
    pub lines: usize,
    pub credentials: CredentialStore,
    pub sink: W,
}

/// A population of actors ready to run against one shared coordinator.
pub struct Workload<W> {
    coordinator: Coordinator<W>,
    actors: Vec<Actor>,
    schedule: Schedule,
    seed: u64,
}

impl<W: Write + Send> Workload<W> {
    /// Builds the store and the four actor groups described by `config`.
    ///
    /// Spawn order is real readers, real writers, dummy readers, dummy
    /// writers; ids restart at 0 in each group.
    pub fn new(config: &WorkloadConfig, out: W) -> Result<Workload<W>, WorkloadError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let store = CredentialStore::generate(config.credential_count, &mut rng);
        let mut actors = Vec::with_capacity(config.actors());

        for (role, count) in [(Role::Reader, config.readers), (Role::Writer, config.writers)] {
            for id in 0..count {
                let credential = store.get(id).ok_or(ConfigError::NotEnoughCredentials {
                    requested: count,
                    available: store.len(),
                })?;
                actors.push(Actor::new(id, role, Authenticity::Real, credential));
            }
        }

        for (role, count) in [(Role::Reader, config.impostor_readers), (Role::Writer, config.impostor_writers)] {
            for id in 0..count {
                let credential = store.forge(&mut rng).ok_or(ConfigError::NoRoomForImpostors(store.len()))?;
                actors.push(Actor::new(id, role, Authenticity::Dummy, credential));
            }
        }

        Ok(Workload::from_parts(store, actors, config.schedule, out).with_seed(seed))
    }

    /// Runs an explicit population against an explicit store.
    pub fn from_parts(store: CredentialStore, actors: Vec<Actor>, schedule: Schedule, out: W) -> Workload<W> {
        Workload {
            coordinator: Coordinator::new(AdmissionGate::new(store), AccessLogger::new(out)),
            actors,
            schedule,
            seed: rand::random(),
        }
    }

    /// Seed the per actor generators are derived from.
    pub fn with_seed(mut self, seed: u64) -> Workload<W> {
        self.seed = seed;
        self
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Prints the header, starts every actor and waits for all of them.
    ///
    /// All actors are spawned before the first join. Joining never gives up
    /// early: a failing actor is reported only once everyone has finished.
    pub fn run(self) -> Result<WorkloadReport<W>, WorkloadError> {
        let Workload {
            coordinator,
            actors,
            schedule,
            seed,
        } = self;

        let real = |role: Role| {
            actors
                .iter()
                .filter(|a| a.role == role && a.authenticity == Authenticity::Real)
                .count()
        };
        coordinator.logger.header(real(Role::Writer), real(Role::Reader))?;

        info!(seed, actors = actors.len(), rounds = schedule.rounds, "workload starting");

        let mut seeds = ChaCha8Rng::seed_from_u64(seed);

        let stats = thread::scope(|scope| -> Result<ActorStats, WorkloadError> {
            let coordinator = &coordinator;
            let schedule = &schedule;
            let mut handles = Vec::with_capacity(actors.len());

            for actor in &actors {
                let mut rng = ChaCha8Rng::seed_from_u64(seeds.gen());
                let handle = thread::Builder::new()
                    .name(format!("{}-{}-{}", actor.authenticity, actor.role, actor.id).to_lowercase())
                    .spawn_scoped(scope, move || actor.run(coordinator, &mut rng, schedule))?;
                handles.push((actor, handle));
            }

            let mut stats = ActorStats::default();
            let mut failure = None;

            for (actor, handle) in handles {
                match handle.join() {
                    Ok(Ok(actor_stats)) => stats.merge(actor_stats),
                    Ok(Err(err)) => {
                        error!(id = actor.id, role = %actor.role, %err, "actor could not write its log");
                        if failure.is_none() {
                            failure = Some(WorkloadError::Io(err));
                        }
                    }
                    Err(_) => {
                        error!(id = actor.id, role = %actor.role, "actor panicked");
                        if failure.is_none() {
                            failure = Some(WorkloadError::ActorPanicked {
                                id: actor.id,
                                role: actor.role,
                                authenticity: actor.authenticity,
                            });
                        }
                    }
                }
            }

            match failure {
                Some(err) => Err(err),
                None => Ok(stats),
            }
        })?;

        info!(?stats, "workload finished");

        let (gate, final_value, logger) = coordinator.into_parts();
        let lines = logger.lines_written();

        Ok(WorkloadReport {
            seed,
            stats,
            final_value,
            lines,
            credentials: gate.into_store(),
            sink: logger.into_inner(),
        })
    }
}
