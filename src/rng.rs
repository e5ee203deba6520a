use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uses `seed` when given, otherwise draws one and logs it so the session
/// can be replayed with `--seed`.
pub fn session_rng(seed: Option<u64>) -> (u64, ChaCha8Rng) {
    let seed = seed.unwrap_or_else(rand::random::<u64>);
    tracing::info!(seed, "session rng seeded");
    (seed, seeded_rng(seed))
}
