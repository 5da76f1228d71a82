use rand::Rng;

use crate::helpers::{random_code, CODE_SPACE};

/// Opaque numeric access code.
pub type Credential = u32;

/// Table of valid access codes
///
/// # Description
///
/// Filled once, before any actor is spawned, and never written again. That is
/// what lets every actor query it concurrently without a lock: the only
/// ordering needed is the one `thread::spawn` already gives.
///
/// Codes are not deduplicated. Two slots may carry the same code, which only
/// means two authorized actors share it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CredentialStore
{
    codes: Vec<Credential>,
}

impl CredentialStore
{
    /// Draws `size` random six-digit codes.
    pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> CredentialStore {
        CredentialStore {
            codes: (0..size).map(|_| random_code(rng)).collect(),
        }
    }

    pub fn from_codes<I: IntoIterator<Item = Credential>>(codes: I) -> CredentialStore {
        CredentialStore {
            codes: codes.into_iter().collect(),
        }
    }

    /// Linear membership test.
    pub fn contains(&self, code: Credential) -> bool {
        self.codes.iter().any(|&c| c == code)
    }

    /// Code stored at `idx`, handed to the authorized actor with that ordinal.
    pub fn get(&self, idx: usize) -> Option<Credential> {
        self.codes.get(idx).copied()
    }

    /// Draws a code that is not in the store, for impostor actors.
    ///
    /// Returns `None` only when the store already covers every six-digit code.
    pub fn forge<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Credential> {
        if self.codes.len() >= CODE_SPACE && self.distinct() >= CODE_SPACE {
            return None;
        }

        loop {
            let code = random_code(rng);
            if !self.contains(code) {
                return Some(code);
            }
        }
    }

    fn distinct(&self) -> usize {
        let mut codes = self.codes.clone();
        codes.sort_unstable();
        codes.dedup();
        codes.len()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Credential> + '_ {
        self.codes.iter().copied()
    }
}
