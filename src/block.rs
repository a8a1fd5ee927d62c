//! Base-29 block codec: fixed-width symbol blocks as big integers.

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use crate::alphabet;
use crate::error::Result;

/// Interpret `word` as base-29 digits, most significant symbol first.
///
/// Fails on the first symbol outside the alphabet without producing a
/// partial value.
pub fn encode(word: &str) -> Result<BigUint> {
    let radix = BigUint::from(alphabet::RADIX);
    let mut value = BigUint::zero();
    for symbol in word.chars() {
        value = value * &radix + alphabet::encode_symbol(symbol)?;
    }
    Ok(value)
}

/// Decode `value` into exactly `width` symbols, least significant digit
/// first, placed last.
///
/// Exact inverse of [`encode`] whenever `value < 29^width`; any higher
/// digits are discarded.
pub fn decode(value: &BigUint, width: usize) -> String {
    let radix = BigUint::from(alphabet::RADIX);
    let mut rest = value.clone();
    let mut symbols = Vec::with_capacity(width);
    for _ in 0..width {
        let (quotient, digit) = rest.div_rem(&radix);
        symbols.push(alphabet::decode_symbol(digit.to_u32().unwrap()));
        rest = quotient;
    }
    symbols.iter().rev().collect()
}

/// Number of alphabet symbols that always encode below `p`: the largest
/// `size` with `29^size <= p`.
pub fn block_size(p: &BigUint) -> usize {
    let radix = BigUint::from(alphabet::RADIX);
    let mut bound = radix.clone();
    let mut size = 0;
    while bound <= *p {
        bound *= &radix;
        size += 1;
    }
    size
}
