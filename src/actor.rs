use std::fmt;
use std::io::{self, Write};
use std::thread;

use rand::Rng;
use tracing::debug;

use crate::coordinator::Coordinator;
use crate::credentials::Credential;
use crate::driver::Schedule;
use crate::helpers::random_value;
use crate::logger::{AccessRecord, Outcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Reader,
    Writer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Reader => "Reader",
            Role::Writer => "Writer",
        })
    }
}

/// Whether an actor was handed a code from the store or a forged one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Authenticity {
    Real,
    Dummy,
}

impl fmt::Display for Authenticity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Authenticity::Real => "real",
            Authenticity::Dummy => "dummy",
        })
    }
}

/// Per actor tally of rounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActorStats {
    pub rounds: usize,
    pub admitted: usize,
    pub denied: usize,
}

impl ActorStats {
    fn count(&mut self, outcome: Outcome) {
        self.rounds += 1;
        if outcome.is_admitted() {
            self.admitted += 1;
        } else {
            self.denied += 1;
        }
    }

    pub fn merge(&mut self, other: ActorStats) {
        self.rounds += other.rounds;
        self.admitted += other.admitted;
        self.denied += other.denied;
    }
}

/// A simulated participant that keeps presenting the same credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: usize,
    pub role: Role,
    pub authenticity: Authenticity,
    pub credential: Credential,
}

impl Actor {
    pub fn new(id: usize, role: Role, authenticity: Authenticity, credential: Credential) -> Actor {
        Actor {
            id,
            role,
            authenticity,
            credential,
        }
    }

    /// Runs `schedule.rounds` rounds, pausing after each one.
    ///
    /// A rejected credential costs the round and nothing else; the actor never
    /// retries with another code and never stops early.
    pub fn run<W, R>(&self, coordinator: &Coordinator<W>, rng: &mut R, schedule: &Schedule) -> io::Result<ActorStats>
    where
        W: Write,
        R: Rng + ?Sized,
    {
        debug!(id = self.id, role = %self.role, authenticity = %self.authenticity, "actor started");

        let mut stats = ActorStats::default();

        for _ in 0..schedule.rounds {
            let outcome = self.round(coordinator, rng)?;
            stats.count(outcome);

            thread::sleep(schedule.pause);
        }

        debug!(id = self.id, role = %self.role, authenticity = %self.authenticity, ?stats, "actor finished");

        Ok(stats)
    }

    /// One admission attempt followed, if admitted, by one access.
    pub fn round<W, R>(&self, coordinator: &Coordinator<W>, rng: &mut R) -> io::Result<Outcome>
    where
        W: Write,
        R: Rng + ?Sized,
    {
        if let Err(denied) = coordinator.gate.check(self.credential) {
            debug!(id = self.id, role = %self.role, %denied, "admission denied");
            return self.report(coordinator, Outcome::Denied);
        }

        match self.role {
            Role::Reader => {
                let seen = *coordinator.resource.read();
                self.report(coordinator, Outcome::Read(seen))
            }
            Role::Writer => {
                let mut value = coordinator.resource.write();
                *value = random_value(rng);

                // Logged before `value` drops so no other writer can get in between.
                let written = *value;
                self.report(coordinator, Outcome::Written(written))
            }
        }
    }

    fn report<W: Write>(&self, coordinator: &Coordinator<W>, outcome: Outcome) -> io::Result<Outcome> {
        coordinator.logger.record(&AccessRecord {
            actor_id: self.id,
            authenticity: self.authenticity,
            role: self.role,
            outcome,
        })?;

        Ok(outcome)
    }
}
