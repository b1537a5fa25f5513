use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded generator when a seed is configured, entropy-seeded otherwise.
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
