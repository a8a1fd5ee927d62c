//! Group parameters for the exchange: a safe prime modulus and a
//! generator of the full multiplicative group.

use std::collections::HashSet;

use num_bigint_dig::prime::probably_prime;
use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::block;
use crate::error::{Error, Result};

/// Miller-Rabin rounds for the primality checks.
const PRIME_ROUNDS: usize = 25;

/// The public parameters shared read-only by every party: an odd prime
/// modulus `p`, a generator `g` of the full multiplicative group mod `p`,
/// and the prime `r` with `p = 2r + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupParameters {
    pub p: BigUint,
    pub g: BigUint,
    pub r: BigUint,
}

impl GroupParameters {
    /// Build parameters from values the caller has already validated.
    pub fn new(p: BigUint, g: BigUint, r: BigUint) -> Self {
        GroupParameters { p, g, r }
    }

    /// Validate `(p, g)` and derive `r`.
    ///
    /// Checks that `p` is an odd prime, that `r = (p - 1) / 2` is prime,
    /// that `p` is large enough for a block to hold at least one symbol,
    /// and that `g` generates the whole group. The generator check is
    /// exhaustive and only suitable for small demonstration primes.
    pub fn validated(p: BigUint, g: BigUint) -> Result<Self> {
        if !is_odd_prime(&p) {
            return Err(Error::InvalidGroupParameters(
                "p must be an odd prime".into(),
            ));
        }
        let r: BigUint = (&p - 1u32) >> 1;
        if !probably_prime(&r, PRIME_ROUNDS) {
            return Err(Error::InvalidGroupParameters(
                "p must be a safe prime: p = 2r + 1 with r prime".into(),
            ));
        }
        if block::block_size(&p) == 0 {
            return Err(Error::InvalidGroupParameters(
                "p must be at least 29 so a block can hold one symbol".into(),
            ));
        }
        if !is_full_generator(&g, &p) {
            return Err(Error::InvalidGroupParameters(
                "g does not generate the full group mod p".into(),
            ));
        }
        Ok(GroupParameters { p, g, r })
    }
}

/// Whether `n` is an odd prime.
pub fn is_odd_prime(n: &BigUint) -> bool {
    !n.is_even() && probably_prime(n, PRIME_ROUNDS)
}

/// Whether `p` is a safe prime: an odd prime with `(p - 1) / 2` prime too.
pub fn is_safe_prime(p: &BigUint) -> bool {
    is_odd_prime(p) && probably_prime(&((p - 1u32) >> 1), PRIME_ROUNDS)
}

/// Exhaustive full-order check: `g` generates the group iff its powers
/// `g^1 .. g^(p-1)` hit every nonzero residue mod `p`.
///
/// Cost grows linearly with `p`; demonstration primes only.
pub fn is_full_generator(g: &BigUint, p: &BigUint) -> bool {
    if *p < BigUint::from(3u32) {
        return false;
    }
    let reduced = g % p;
    if reduced.is_zero() {
        return false;
    }
    let order = p - 1u32;
    let mut powers = HashSet::new();
    let mut acc = BigUint::one();
    let mut exponent = BigUint::zero();
    while exponent < order {
        acc = &acc * &reduced % p;
        powers.insert(acc.clone());
        exponent += 1u32;
    }
    BigUint::from(powers.len()) == order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u32) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn recognizes_safe_primes() {
        for p in [5u32, 7, 11, 23, 47, 59, 83, 107, 2063] {
            assert!(is_safe_prime(&big(p)), "{p} is a safe prime");
        }
        // 61 is prime but (61 - 1) / 2 = 30 is not
        assert!(!is_safe_prime(&big(61)));
        // 57 = 3 * 19
        assert!(!is_safe_prime(&big(57)));
        assert!(!is_safe_prime(&big(2)));
        assert!(!is_safe_prime(&big(3)));
    }

    #[test]
    fn full_generator_check_is_exhaustive() {
        // 2 has order 58 mod 59
        assert!(is_full_generator(&big(2), &big(59)));
        // 4 = 2^2 only reaches the quadratic residues (order 29)
        assert!(!is_full_generator(&big(4), &big(59)));
        assert!(!is_full_generator(&big(1), &big(59)));
        assert!(!is_full_generator(&big(0), &big(59)));
        // 5 generates mod 23, 2 has order 11 there
        assert!(is_full_generator(&big(5), &big(23)));
        assert!(!is_full_generator(&big(2), &big(23)));
    }

    #[test]
    fn validated_accepts_a_safe_prime_with_a_generator() {
        let group = GroupParameters::validated(big(59), big(2)).unwrap();
        assert_eq!(group.p, big(59));
        assert_eq!(group.g, big(2));
        assert_eq!(group.r, big(29));
    }

    #[test]
    fn validated_rejects_bad_parameters() {
        assert_eq!(
            GroupParameters::validated(big(57), big(2)),
            Err(Error::InvalidGroupParameters("p must be an odd prime".into()))
        );
        assert_eq!(
            GroupParameters::validated(big(61), big(2)),
            Err(Error::InvalidGroupParameters(
                "p must be a safe prime: p = 2r + 1 with r prime".into()
            ))
        );
        // 23 is a safe prime and 5 generates, but one symbol already
        // outgrows the modulus
        assert_eq!(
            GroupParameters::validated(big(23), big(5)),
            Err(Error::InvalidGroupParameters(
                "p must be at least 29 so a block can hold one symbol".into()
            ))
        );
        assert_eq!(
            GroupParameters::validated(big(59), big(4)),
            Err(Error::InvalidGroupParameters(
                "g does not generate the full group mod p".into()
            ))
        );
    }
}
