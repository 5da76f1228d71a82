use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::actor::{Authenticity, Role};

/// What an actor got out of one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Admitted reader, with the value it saw.
    Read(u32),
    /// Admitted writer, with the value it read back after writing.
    Written(u32),
    /// Credential rejected at the gate.
    Denied,
}

impl Outcome {
    pub fn value(&self) -> Option<u32> {
        match *self {
            Outcome::Read(v) | Outcome::Written(v) => Some(v),
            Outcome::Denied => None,
        }
    }

    pub fn is_admitted(&self) -> bool {
        !matches!(self, Outcome::Denied)
    }
}

/// One access attempt, rendered as one tab separated line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessRecord {
    pub actor_id: usize,
    pub authenticity: Authenticity,
    pub role: Role,
    pub outcome: Outcome,
}

impl fmt::Display for AccessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t\t{}\t\t\t{}\t\t\t", self.actor_id, self.authenticity, self.role)?;

        match self.outcome.value() {
            Some(v) => write!(f, "{}", v),
            None => f.write_str("No permission"),
        }
    }
}

/// Serialises access lines onto a shared output stream
///
/// # Description
///
/// Each line is rendered in full before the stream mutex is taken, and is
/// then written with a single `write_all`, so lines coming from different
/// actors never mix. The logger is independent from `RwLock`: writers call it
/// while holding exclusive access, readers after leaving.
pub struct AccessLogger<W>
{
    out: Mutex<W>,
    lines: AtomicUsize,
}

impl<W: Write> AccessLogger<W>
{
    pub fn new(out: W) -> AccessLogger<W> {
        AccessLogger {
            out: Mutex::new(out),
            lines: AtomicUsize::new(0),
        }
    }

    /// Writes the table header. Not counted in `lines_written`.
    pub fn header(&self, writers: usize, readers: usize) -> io::Result<()> {
        let header = format!(
            "Number of writers: {}\nNumber of readers: {}\n\
             Thread No\tValidity(real/dummy)\tRole(reader/writer)\tValue read/written\n",
            writers, readers
        );

        let mut out = self.out.lock();
        out.write_all(header.as_bytes())?;
        out.flush()
    }

    pub fn record(&self, record: &AccessRecord) -> io::Result<()> {
        let line = format!("{}\n", record);

        {
            let mut out = self.out.lock();
            out.write_all(line.as_bytes())?;
            out.flush()?;
        }

        self.lines.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Number of access lines written so far.
    pub fn lines_written(&self) -> usize {
        self.lines.load(Ordering::Relaxed)
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}
