use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::core::{EsgScore, Sector};

// Half-width of the uniform pillar jitter; gives a standard deviation of 10 points.
const PILLAR_JITTER: f64 = 17.32;

/// Sector assigned to `ticker` from its SHA-256 digest, stable across runs.
#[must_use]
pub fn hashed_sector(ticker: &str) -> Sector {
    let digest = Sha256::digest(ticker.as_bytes());
    // The digest read as a big-endian integer, modulo 8, is its last byte modulo 8.
    Sector::ALL[usize::from(digest[31]) % Sector::ALL.len()]
}

/// A deterministic ESG profile and sector for a ticker with no ESG record.
///
/// A total is drawn uniformly in `[40, 95)`, each pillar is that total plus uniform jitter
/// clipped to `[30, 99]`, and the total is then recomputed as the pillar mean. All four
/// scores are rounded to one decimal.
#[must_use]
pub fn hashed_profile(ticker: &str) -> (EsgScore, Sector) {
    let digest = Sha256::digest(ticker.as_bytes());
    let mut low = [0_u8; 4];
    low.copy_from_slice(&digest[28..32]);
    let mut rng = StdRng::seed_from_u64(u64::from(u32::from_be_bytes(low)));

    let anchor: f64 = rng.random_range(40.0..95.0);
    let mut pillar = || (anchor + rng.random_range(-PILLAR_JITTER..PILLAR_JITTER)).clamp(30.0, 99.0);
    let environmental = pillar();
    let social = pillar();
    let governance = pillar();
    let total = (environmental + social + governance) / 3.0;

    let score = EsgScore {
        total: round1(total),
        environmental: round1(environmental),
        social: round1(social),
        governance: round1(governance),
    };
    (score, hashed_sector(ticker))
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
