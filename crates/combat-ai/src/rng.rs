//! Seeding for the per-ship random sources.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::world::ShipId;

/// Runtime rolls made by leaves and random composites.
pub const STREAM_RUNTIME: u32 = 0;
/// Build-time rolls made by the tree builder.
pub const STREAM_BUILD: u32 = 1;

/// Derives an independent seed for one ship and one purpose.
///
/// Two ships sharing a base seed still get unrelated sequences, and the
/// builder's rolls never shift the context's.
///
/// # Arguments
///
/// * `base` - Seed from the AI settings
/// * `ship` - Ship the source belongs to
/// * `stream` - [`STREAM_RUNTIME`] or [`STREAM_BUILD`]
pub fn stream_seed(base: u64, ship: ShipId, stream: u32) -> u64 {
    let mut hash = base;
    hash ^= u64::from(ship.0).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(stream).wrapping_mul(0x9e3779b97f4a7c15);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Creates a source from `seed`, or from OS entropy when unseeded.
pub fn make_rng(seed: Option<u64>, ship: ShipId, stream: u32) -> ChaCha8Rng {
    match seed {
        Some(base) => ChaCha8Rng::seed_from_u64(stream_seed(base, ship, stream)),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streams_and_ships_differ() {
        let a = stream_seed(42, ShipId(1), STREAM_RUNTIME);
        assert_eq!(a, stream_seed(42, ShipId(1), STREAM_RUNTIME));
        assert_ne!(a, stream_seed(42, ShipId(2), STREAM_RUNTIME));
        assert_ne!(a, stream_seed(42, ShipId(1), STREAM_BUILD));
    }
}
