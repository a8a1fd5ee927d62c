//! Interactive two-party demonstration: prompt for a safe prime and a
//! generator, run the exchange for Alex and Bob, then relay encrypted
//! messages between them until an empty input.

use std::io::{self, Write};

use num_bigint_dig::BigUint;
use pohlig::exchange::{random_private_exponent, PrivateExponentConfig};
use pohlig::params::{is_full_generator, is_odd_prime, is_safe_prime, GroupParameters};
use pohlig::party::{exchange, Party};
use pohlig::{alphabet, block};

const RULE: &str = "--------------------------------------------------------------------------------------";

fn main() {
    let Some(p) = read_modulus() else { return };
    let Some(g) = read_generator(&p) else { return };
    let r = (&p - 1u32) >> 1;
    let group = GroupParameters::new(p, g, r);

    let entropy = PrivateExponentConfig { seed: None };
    let k1 = random_private_exponent(&entropy, &group.p);
    let k2 = random_private_exponent(&entropy, &group.p);
    let mut alex = Party::new("Alex", &group, k1);
    let mut bob = Party::new("Bob", &group, k2);

    println!(">> Generated public number for Alex: {}", alex.public_number());
    println!(">> Generated public number for Bob: {}", bob.public_number());
    println!("{RULE}");
    println!(">> Sending Alex's public number to Bob");
    println!(">> Sending Bob's public number to Alex");
    if let Err(err) = exchange(&mut alex, &mut bob) {
        println!("ERROR! {err}; restart and pick a different prime");
        return;
    }
    println!("{RULE}");
    println!(">> Generated common session key for both users");

    loop {
        println!("{RULE}");
        let Some(choice) = prompt(">> Please select sender (A for Alex, B for Bob): ") else {
            return;
        };
        if choice.is_empty() {
            return;
        }
        let (sender, receiver) = match choice.as_str() {
            "A" => (&alex, &mut bob),
            "B" => (&bob, &mut alex),
            _ => {
                println!("ERROR! Please type A for Alex and B for Bob");
                continue;
            }
        };

        let label = format!(
            ">> Please type a message for {} to send to {}: ",
            sender.name(),
            receiver.name()
        );
        let Some(text) = prompt(&label) else { return };
        let message = text.to_uppercase();
        if message.chars().any(|c| alphabet::encode_symbol(c).is_err()) {
            println!(
                "ERROR! Message must only contain letters: ['a'-'z'], ['A'-'Z'], '.', ' ', '?'"
            );
            continue;
        }
        if message.is_empty() {
            return;
        }

        match sender.send_message(receiver, &message) {
            Ok(blocks) => {
                println!(
                    ">> Sending message from {} to {}: {}",
                    sender.name(),
                    receiver.name(),
                    blocks.concat()
                );
                println!(
                    ">> User {} received message: {}",
                    receiver.name(),
                    receiver.received().last().expect("message just delivered")
                );
            }
            Err(err) => println!("ERROR! {err}"),
        }
    }
}

/// Prompt until the input is an odd prime `p = 2r + 1` with `r` prime and
/// `p` large enough to encode a symbol. `None` on end of input.
fn read_modulus() -> Option<BigUint> {
    loop {
        let line = prompt("Enter an odd prime p such that p = 2*r + 1 and r is prime: ")?;
        let Ok(p) = line.parse::<BigUint>() else {
            println!("ERROR! Please enter an odd prime number");
            continue;
        };
        if !is_odd_prime(&p) {
            println!("ERROR! Please enter an odd prime number");
        } else if !is_safe_prime(&p) {
            println!("ERROR! Please enter an odd prime p SUCH THAT p = 2*r + 1 and r is prime");
        } else if block::block_size(&p) == 0 {
            println!("ERROR! Please enter a prime of at least 29 so a block can hold a symbol");
        } else {
            return Some(p);
        }
    }
}

/// Prompt until the input generates the full group mod `p`.
fn read_generator(p: &BigUint) -> Option<BigUint> {
    loop {
        let line = prompt("Enter a generator g for the group Z_p: ")?;
        let Ok(g) = line.parse::<BigUint>() else {
            println!("ERROR! Please enter a valid generator for the group Z_p");
            continue;
        };
        if is_full_generator(&g, p) {
            return Some(g);
        }
        println!("ERROR! Please enter a valid generator for the group Z_p");
    }
}

/// Print `label`, read one line, strip the newline. `None` on end of input.
fn prompt(label: &str) -> Option<String> {
    print!("{label}");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line).ok()? == 0 {
        return None;
    }
    Some(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}
