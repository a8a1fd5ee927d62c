//! The exponentiation cipher over base-29 blocks.

use num_bigint_dig::BigUint;

use crate::block;
use crate::error::Result;

/// Encrypt one plaintext block: encode it to an integer below `p`, raise
/// to `csk` mod `p`, re-encode one symbol wider. Ciphertext values run up
/// to `p - 1`, which can need one extra base-29 digit.
pub fn encrypt_block(plaintext: &str, csk: &BigUint, p: &BigUint) -> Result<String> {
    let value = block::encode(plaintext)?;
    let scrambled = value.modpow(csk, p);
    Ok(block::decode(&scrambled, block::block_size(p) + 1))
}

/// Decrypt one ciphertext block back to plaintext width.
///
/// The ciphertext's possible extra leading digit is discarded on decode;
/// decrypted plaintext values are below `29^block_size` by construction.
pub fn decrypt_block(ciphertext: &str, dk: &BigUint, p: &BigUint) -> Result<String> {
    let value = block::encode(ciphertext)?;
    let recovered = value.modpow(dk, p);
    Ok(block::decode(&recovered, block::block_size(p)))
}

/// Pad `plaintext` with spaces to a whole number of blocks, split it and
/// encrypt block by block.
pub fn encrypt_message(plaintext: &str, csk: &BigUint, p: &BigUint) -> Result<Vec<String>> {
    let width = block::block_size(p);
    assert!(width > 0, "modulus too small for one symbol per block");
    let mut symbols: Vec<char> = plaintext.chars().collect();
    let leftover = symbols.len() % width;
    if leftover != 0 {
        symbols.resize(symbols.len() + width - leftover, ' ');
    }
    let mut blocks = Vec::with_capacity(symbols.len() / width);
    for chunk in symbols.chunks(width) {
        let word: String = chunk.iter().collect();
        blocks.push(encrypt_block(&word, csk, p)?);
    }
    log::debug!("encrypted {} block(s)", blocks.len());
    Ok(blocks)
}

/// Decrypt a ciphertext block sequence and strip the trailing padding
/// spaces.
///
/// The padding carries no length marker, so a message whose real content
/// ends in spaces loses them too.
pub fn decrypt_message(blocks: &[String], dk: &BigUint, p: &BigUint) -> Result<String> {
    let mut plaintext = String::new();
    for block in blocks {
        plaintext.push_str(&decrypt_block(block, dk, p)?);
    }
    log::debug!("decrypted {} block(s)", blocks.len());
    Ok(plaintext.trim_end_matches(' ').to_string())
}
