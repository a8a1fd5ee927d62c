//! The two modular-exponentiation steps of the key exchange.

use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draw a private exponent uniformly from `[1, p)`.
///
/// The randomness source is injected so tests can pass a fixed-seed
/// generator; production callers should hand in an entropy-seeded one.
///
/// # Panics
/// Panics if `p < 2` (the range would be empty).
pub fn generate_private_exponent<R: Rng>(rng: &mut R, p: &BigUint) -> BigUint {
    assert!(*p >= BigUint::from(2u32), "modulus must be at least 2");
    rng.gen_biguint_range(&BigUint::one(), p)
}

/// Seeding options for [`random_private_exponent`].
pub struct PrivateExponentConfig {
    /// Optional RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

/// Convenience wrapper: build an RNG per the config and draw an exponent.
pub fn random_private_exponent(config: &PrivateExponentConfig, p: &BigUint) -> BigUint {
    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    generate_private_exponent(&mut rng, p)
}

/// Compute `g^k mod p`, the number a party publishes.
///
/// # Panics
/// Panics if `k` lies outside `[1, p)` or `p < 2`; both are caller bugs,
/// not runtime conditions.
pub fn compute_public_number(g: &BigUint, k: &BigUint, p: &BigUint) -> BigUint {
    check_contract(k, p);
    g.modpow(k, p)
}

/// Compute `peer_public^k mod p`, the shared secret.
///
/// Both parties arrive at the same value: `(g^a)^b = (g^b)^a = g^(a*b)`
/// mod `p`.
///
/// # Panics
/// Same contract as [`compute_public_number`].
pub fn compute_shared_secret(peer_public: &BigUint, k: &BigUint, p: &BigUint) -> BigUint {
    check_contract(k, p);
    peer_public.modpow(k, p)
}

fn check_contract(k: &BigUint, p: &BigUint) {
    assert!(*p >= BigUint::from(2u32), "modulus must be at least 2");
    assert!(!k.is_zero() && k < p, "private exponent must lie in [1, p)");
}
