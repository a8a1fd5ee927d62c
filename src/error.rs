use num_bigint_dig::BigUint;
use thiserror::Error;

/// Errors surfaced by parameter validation, key derivation and the cipher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The modulus/generator pair failed validation.
    #[error("invalid group parameters: {0}")]
    InvalidGroupParameters(String),

    /// The encryption exponent has no inverse modulo `p - 1`, so no
    /// decryption exponent exists. The parties must pick fresh private
    /// exponents and rerun the exchange.
    #[error("encryption exponent {csk} is not invertible modulo {modulus}")]
    InvalidKey { csk: BigUint, modulus: BigUint },

    /// Messaging or key derivation was attempted before the preceding
    /// protocol steps completed.
    #[error("party has not completed the key exchange")]
    NotReady,

    /// A character outside the 29-symbol alphabet reached the codec.
    #[error("symbol {0:?} is outside the message alphabet")]
    InvalidSymbol(char),
}

pub type Result<T> = std::result::Result<T, Error>;
