use crc32fast::Hasher;
use rand::seq::SliceRandom;
use rand::thread_rng;

use super::{ErrorKind, Result};

/// CRC-32 (IEEE / ISO 3309 HDLC polynomial) of a string as uppercase hex
///
/// Handy for stamping config contents into annotations to force rollouts.
pub fn crc32_checksum(s: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(s.as_bytes());
    format!("{:X}", hasher.finalize())
}

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMBERS: &str = "0123456789";
const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
/// Symbols that tend to break config files, urls and shells
pub const AMBIGUOUS: &str = "<>[](){}:;'/|\\,";

/// Random password with lower and upper case letters, numbers and symbols
///
/// Every character class is present when the length allows it.
pub fn generate_password(length: usize, exclude_ambiguous: bool) -> Result<String> {
    if length == 0 {
        bail!(ErrorKind::PasswordGeneration("length must be positive".into()));
    }
    let symbols = SYMBOLS
        .chars()
        .filter(|c| !exclude_ambiguous || !AMBIGUOUS.contains(*c))
        .collect::<Vec<_>>();
    let classes = vec![
        LOWERCASE.chars().collect::<Vec<_>>(),
        UPPERCASE.chars().collect::<Vec<_>>(),
        NUMBERS.chars().collect::<Vec<_>>(),
        symbols,
    ];
    let all = classes.iter().flatten().cloned().collect::<Vec<char>>();

    let mut rng = thread_rng();
    let mut pw = Vec::with_capacity(length);
    for class in classes.iter().take(length) {
        if let Some(c) = class.choose(&mut rng) {
            pw.push(*c);
        }
    }
    while pw.len() < length {
        match all.choose(&mut rng) {
            Some(c) => pw.push(*c),
            None => bail!(ErrorKind::PasswordGeneration("empty character set".into())),
        }
    }
    pw.shuffle(&mut rng);
    Ok(pw.into_iter().collect())
}
