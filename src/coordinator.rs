use std::io::Write;

use crate::gate::AdmissionGate;
use crate::logger::AccessLogger;
use crate::rw_lock::RwLock;

/// Everything the actors share, owned in one place
///
/// Handed to actors behind an `Arc`. The protected value (and with it the
/// reader count) is only reachable through `resource`.
pub struct Coordinator<W>
{
    pub gate: AdmissionGate,
    pub resource: RwLock<u32>,
    pub logger: AccessLogger<W>,
}

impl<W: Write> Coordinator<W>
{
    pub fn new(gate: AdmissionGate, logger: AccessLogger<W>) -> Coordinator<W> {
        Coordinator {
            gate,
            resource: RwLock::new(0),
            logger,
        }
    }

    pub fn into_parts(self) -> (AdmissionGate, u32, AccessLogger<W>) {
        (self.gate, self.resource.into_inner(), self.logger)
    }
}
