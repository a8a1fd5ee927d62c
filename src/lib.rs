//! DISCLAIMER: This crate is a toy demonstration of Diffie-Hellman key
//! exchange over a safe-prime group, driving an exponentiation block
//! cipher on short alphabetic messages. It is *EXCLUSIVELY* for
//! demonstration and educational purposes. Absolutely DO NOT use it for
//! real cryptographic or security-sensitive operations: there is no
//! authentication, no padding randomization, and no resistance to active
//! attackers or side channels.
//!
//! If you need key agreement or encryption in production, please use a
//! vetted, well-reviewed cryptography library.
//!
//! The pieces, leaves first: [`alphabet`] maps the 29 message symbols to
//! base-29 digits, [`block`] turns fixed-width symbol blocks into big
//! integers, [`params`] validates the safe-prime group, [`exchange`]
//! performs the modular-exponentiation steps, [`keys`] derives the
//! cipher exponent pair from the shared secret, [`cipher`] encrypts and
//! decrypts block sequences, and [`party`] ties one user's state machine
//! together.

pub mod alphabet;
pub mod block;
pub mod cipher;
pub mod error;
pub mod exchange;
pub mod keys;
pub mod params;
pub mod party;

pub use error::{Error, Result};

// Re-export group parameter functionality
pub use params::{is_full_generator, is_odd_prime, is_safe_prime, GroupParameters};

// Re-export key exchange functionality
pub use exchange::{
    compute_public_number, compute_shared_secret, generate_private_exponent,
    random_private_exponent, PrivateExponentConfig,
};

// Re-export key derivation functionality
pub use keys::{derive_keys, CipherKeys};

// Re-export cipher functionality
pub use cipher::{decrypt_block, decrypt_message, encrypt_block, encrypt_message};

// Re-export party functionality
pub use party::Party;
