use rand::Rng;

use crate::credentials::Credential;

/// Smallest six-digit access code.
pub const CODE_MIN: Credential = 100_000;

/// Largest six-digit access code.
pub const CODE_MAX: Credential = 999_999;

/// Number of distinct access codes that exist.
pub const CODE_SPACE: usize = (CODE_MAX - CODE_MIN + 1) as usize;

/// Writers store values below this bound.
pub const VALUE_BOUND: u32 = 10_000;

pub fn random_code<R: Rng + ?Sized>(rng: &mut R) -> Credential {
    rng.gen_range(CODE_MIN..=CODE_MAX)
}

pub fn random_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(0..VALUE_BOUND)
}
