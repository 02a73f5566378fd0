use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Seeded boards repeat across runs; unseeded ones draw from the OS.
pub fn board_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_os_rng()),
    }
}
