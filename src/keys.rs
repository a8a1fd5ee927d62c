//! Deriving the cipher exponent pair from a shared secret.

use num_bigint_dig::{BigInt, BigUint, Sign, ToBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// The encryption exponent `csk` and its inverse `dk` modulo `p - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherKeys {
    pub csk: BigUint,
    pub dk: BigUint,
}

/// Turn a shared secret into a cipher exponent pair.
///
/// `csk` is the secret itself when odd, `secret - 1` otherwise, so that
/// the exponent stands a chance of being invertible modulo the even
/// `p - 1`. When `gcd(csk, p - 1) != 1` no decryption exponent exists and
/// derivation fails with [`Error::InvalidKey`]; the parties must restart
/// the exchange with fresh private exponents.
///
/// # Panics
/// Panics if `shared_secret` is zero; secrets produced by the exchange
/// are always in `[1, p - 1]`.
pub fn derive_keys(shared_secret: &BigUint, p: &BigUint) -> Result<CipherKeys> {
    assert!(!shared_secret.is_zero(), "shared secret must be nonzero");
    let csk = if shared_secret.is_odd() {
        shared_secret.clone()
    } else {
        shared_secret - 1u32
    };
    let modulus = p - 1u32;
    match mod_inverse(&csk, &modulus) {
        Some(dk) => Ok(CipherKeys { csk, dk }),
        None => Err(Error::InvalidKey { csk, modulus }),
    }
}

/// Modular inverse via the extended Euclidean algorithm: `Some(x)` with
/// `(a * x) % m == 1`, or `None` when `gcd(a, m) != 1`.
fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    let a_int = a.to_bigint().unwrap();
    let m_int = m.to_bigint().unwrap();
    let (g, x, _) = extended_gcd(&a_int, &m_int);
    if !g.is_one() {
        return None;
    }
    // normalize into [0, m - 1]
    let mut inverse = x % &m_int;
    if inverse.sign() == Sign::Minus {
        inverse += &m_int;
    }
    inverse.to_biguint()
}

/// Returns `(gcd(a, b), x, y)` with `a*x + b*y = gcd(a, b)`.
fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if b.is_zero() {
        (a.clone(), BigInt::one(), BigInt::zero())
    } else {
        let (q, r) = a.div_rem(b);
        let (g, x, y) = extended_gcd(b, &r);
        (g, y.clone(), x - &q * y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u32) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn even_secrets_are_lowered_to_an_odd_exponent() {
        let keys = derive_keys(&big(14), &big(59)).unwrap();
        assert_eq!(keys.csk, big(13));
        assert_eq!(keys.dk, big(9));
        assert_eq!((keys.csk * keys.dk) % big(58), big(1));
    }

    #[test]
    fn odd_secrets_are_used_as_is() {
        let keys = derive_keys(&big(13), &big(59)).unwrap();
        assert_eq!(keys.csk, big(13));
    }

    #[test]
    fn a_secret_of_one_yields_the_identity_exponents() {
        let keys = derive_keys(&big(1), &big(59)).unwrap();
        assert_eq!(keys.csk, big(1));
        assert_eq!(keys.dk, big(1));
    }

    #[test]
    fn non_invertible_exponent_fails_key_derivation() {
        // 29 is odd and divides 58, so gcd(csk, p - 1) = 29
        assert_eq!(
            derive_keys(&big(29), &big(59)),
            Err(Error::InvalidKey {
                csk: big(29),
                modulus: big(58),
            })
        );
    }

    #[test]
    fn derived_inverses_verify_for_many_secrets() {
        let p = big(2063);
        let modulus = big(2062);
        for s in 2u32..200 {
            match derive_keys(&big(s), &p) {
                Ok(keys) => assert_eq!((keys.csk * keys.dk) % &modulus, big(1)),
                Err(Error::InvalidKey { csk, .. }) => {
                    // 2062 = 2 * 1031; only multiples of 1031 lack inverses
                    assert!((csk % big(1031)).is_zero());
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }
}
