//! Per-party protocol state, from public number to active messaging.

use num_bigint_dig::BigUint;

use crate::block;
use crate::cipher;
use crate::error::{Error, Result};
use crate::exchange;
use crate::keys::{self, CipherKeys};
use crate::params::GroupParameters;

/// Protocol progress. Each stage carries only the values that exist at
/// that point, so a secret or key cannot be read before it is computed.
#[derive(Debug, Clone)]
enum Stage {
    PublicNumberComputed,
    SharedSecretComputed { shared_secret: BigUint },
    Active { shared_secret: BigUint, keys: CipherKeys },
}

/// One side of the exchange. A party owns its private exponent, the
/// public number derived from it and, once the protocol completes, the
/// cipher exponent pair; the group parameters are its own read-only copy.
#[derive(Debug, Clone)]
pub struct Party {
    name: String,
    params: GroupParameters,
    private_exponent: BigUint,
    public_number: BigUint,
    block_size: usize,
    stage: Stage,
    received: Vec<String>,
}

impl Party {
    /// Create a party and compute its public number immediately.
    ///
    /// # Panics
    /// Panics if `private_exponent` lies outside `[1, p)`.
    pub fn new(
        name: impl Into<String>,
        params: &GroupParameters,
        private_exponent: BigUint,
    ) -> Self {
        let public_number =
            exchange::compute_public_number(&params.g, &private_exponent, &params.p);
        let block_size = block::block_size(&params.p);
        let name = name.into();
        log::debug!("{name} computed public number");
        Party {
            name,
            params: params.clone(),
            private_exponent,
            public_number,
            block_size,
            stage: Stage::PublicNumberComputed,
            received: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number this party publishes to its peer.
    pub fn public_number(&self) -> &BigUint {
        &self.public_number
    }

    /// Plaintext symbols per block for this party's modulus.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The shared secret, once the peer's public number has arrived.
    pub fn shared_secret(&self) -> Option<&BigUint> {
        match &self.stage {
            Stage::PublicNumberComputed => None,
            Stage::SharedSecretComputed { shared_secret }
            | Stage::Active { shared_secret, .. } => Some(shared_secret),
        }
    }

    /// The cipher exponent pair; [`Error::NotReady`] until keys are derived.
    pub fn keys(&self) -> Result<&CipherKeys> {
        match &self.stage {
            Stage::Active { keys, .. } => Ok(keys),
            _ => Err(Error::NotReady),
        }
    }

    /// Whether the party can send and receive messages.
    pub fn is_active(&self) -> bool {
        matches!(self.stage, Stage::Active { .. })
    }

    /// Absorb the peer's public number and compute the shared secret.
    ///
    /// Calling this again later re-keys the party: previously derived
    /// cipher exponents are dropped with the old stage.
    pub fn receive_public_number(&mut self, peer_public: &BigUint) {
        let shared_secret =
            exchange::compute_shared_secret(peer_public, &self.private_exponent, &self.params.p);
        log::debug!("{} computed shared secret", self.name);
        self.stage = Stage::SharedSecretComputed { shared_secret };
    }

    /// Derive the cipher exponents from the shared secret, making the
    /// party ready to message.
    ///
    /// Fails with [`Error::NotReady`] before the peer's public number has
    /// arrived and with [`Error::InvalidKey`] when the encryption
    /// exponent is not invertible. A no-op on an already active party.
    pub fn derive_keys(&mut self) -> Result<()> {
        match &self.stage {
            Stage::PublicNumberComputed => Err(Error::NotReady),
            Stage::SharedSecretComputed { shared_secret } => {
                let shared_secret = shared_secret.clone();
                let keys = keys::derive_keys(&shared_secret, &self.params.p)?;
                log::debug!("{} derived cipher exponents", self.name);
                self.stage = Stage::Active {
                    shared_secret,
                    keys,
                };
                Ok(())
            }
            Stage::Active { .. } => Ok(()),
        }
    }

    /// Encrypt `plaintext` and deliver the ciphertext blocks to `peer`,
    /// returning them to the caller as well.
    pub fn send_message(&self, peer: &mut Party, plaintext: &str) -> Result<Vec<String>> {
        let keys = self.keys()?;
        let blocks = cipher::encrypt_message(plaintext, &keys.csk, &self.params.p)?;
        log::debug!("{} -> {}: {} block(s)", self.name, peer.name, blocks.len());
        peer.receive_message(&blocks)?;
        Ok(blocks)
    }

    /// Decrypt a ciphertext block sequence, store and return the
    /// recovered plaintext.
    pub fn receive_message(&mut self, blocks: &[String]) -> Result<String> {
        let keys = self.keys()?;
        let plaintext = cipher::decrypt_message(blocks, &keys.dk, &self.params.p)?;
        self.received.push(plaintext.clone());
        Ok(plaintext)
    }

    /// Messages recovered so far, oldest first.
    pub fn received(&self) -> &[String] {
        &self.received
    }
}

/// Run the full exchange: swap public numbers and derive keys on both
/// sides, leaving both parties active.
pub fn exchange(a: &mut Party, b: &mut Party) -> Result<()> {
    let public_a = a.public_number.clone();
    let public_b = b.public_number.clone();
    a.receive_public_number(&public_b);
    b.receive_public_number(&public_a);
    a.derive_keys()?;
    b.derive_keys()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u32) -> BigUint {
        BigUint::from(n)
    }

    fn group_59() -> GroupParameters {
        GroupParameters::validated(big(59), big(2)).unwrap()
    }

    fn group_2063() -> GroupParameters {
        // r = 1031 is prime; 5 generates (order 2062)
        GroupParameters::new(big(2063), big(5), big(1031))
    }

    #[test]
    fn scenario_with_small_safe_prime() {
        let group = group_59();
        let mut alice = Party::new("Alice", &group, big(7));
        let mut bob = Party::new("Bob", &group, big(11));

        assert_eq!(*alice.public_number(), big(10));
        assert_eq!(*bob.public_number(), big(42));
        assert_eq!(alice.block_size(), 1);

        exchange(&mut alice, &mut bob).unwrap();
        assert_eq!(alice.shared_secret(), Some(&big(14)));
        assert_eq!(bob.shared_secret(), Some(&big(14)));

        let keys = alice.keys().unwrap();
        assert_eq!(keys.csk, big(13));
        assert_eq!(keys.dk, big(9));

        let blocks = alice.send_message(&mut bob, "HELLO").unwrap();
        assert_eq!(blocks.len(), 5);
        assert!(blocks.iter().all(|b| b.chars().count() == 2));
        assert_eq!(bob.received(), ["HELLO"]);
    }

    #[test]
    fn scenario_with_two_symbol_blocks() {
        let group = group_2063();
        let mut alice = Party::new("Alice", &group, big(7));
        let mut bob = Party::new("Bob", &group, big(11));

        exchange(&mut alice, &mut bob).unwrap();
        // 5^77 mod 2063
        assert_eq!(alice.shared_secret(), Some(&big(811)));
        assert_eq!(bob.shared_secret(), alice.shared_secret());

        alice.send_message(&mut bob, "HELLO").unwrap();
        bob.send_message(&mut alice, "WHAT IS UP?").unwrap();
        assert_eq!(bob.received(), ["HELLO"]);
        assert_eq!(alice.received(), ["WHAT IS UP?"]);
    }

    #[test]
    fn messaging_before_the_exchange_is_rejected() {
        let group = group_59();
        let alice = Party::new("Alice", &group, big(7));
        let mut bob = Party::new("Bob", &group, big(11));

        assert!(!alice.is_active());
        assert_eq!(alice.shared_secret(), None);
        assert_eq!(alice.keys().unwrap_err(), Error::NotReady);
        assert_eq!(
            alice.send_message(&mut bob, "HELLO").unwrap_err(),
            Error::NotReady
        );
        assert_eq!(bob.receive_message(&[]).unwrap_err(), Error::NotReady);
    }

    #[test]
    fn deriving_keys_before_the_secret_is_rejected() {
        let group = group_59();
        let mut alice = Party::new("Alice", &group, big(7));
        assert_eq!(alice.derive_keys().unwrap_err(), Error::NotReady);
    }

    #[test]
    fn receiving_a_public_number_again_rekeys_the_party() {
        let group = group_59();
        let mut alice = Party::new("Alice", &group, big(7));
        let mut bob = Party::new("Bob", &group, big(11));

        exchange(&mut alice, &mut bob).unwrap();
        assert!(alice.is_active());

        let bob_public = bob.public_number().clone();
        alice.receive_public_number(&bob_public);
        assert!(!alice.is_active());
        assert_eq!(
            alice.send_message(&mut bob, "HELLO").unwrap_err(),
            Error::NotReady
        );

        alice.derive_keys().unwrap();
        assert!(alice.is_active());
    }

    #[test]
    fn invalid_symbols_surface_through_send() {
        let group = group_59();
        let mut alice = Party::new("Alice", &group, big(7));
        let mut bob = Party::new("Bob", &group, big(11));
        exchange(&mut alice, &mut bob).unwrap();

        assert_eq!(
            alice.send_message(&mut bob, "HELLO!").unwrap_err(),
            Error::InvalidSymbol('!')
        );
        assert!(bob.received().is_empty());
    }
}
