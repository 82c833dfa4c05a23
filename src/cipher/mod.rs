mod codec;

pub use codec::{decode_rank, encode, from_value, greater_length, normalize, to_value};

use crate::ConfigurationError;
use std::fmt;

/// A single deciphered rank character
pub type Digit = u32;

/// Bijection between an ordered alphabet and the digits `0..radix`
///
/// Symbols are stored in strictly increasing code point order so that
/// comparing two rank strings compares their digit sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherTable {
    symbols: Vec<char>,
}

impl CipherTable {
    /// Builds a table from the symbols of `alphabet`, in order
    pub fn new(alphabet: &str) -> Result<Self, ConfigurationError> {
        let symbols: Vec<char> = alphabet.chars().collect();

        if symbols.len() < 2 {
            return Err(ConfigurationError::AlphabetTooSmall(symbols.len()));
        }

        if let Some(pair) = symbols.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(ConfigurationError::UnsortedAlphabet(pair[0], pair[1]));
        }

        Ok(CipherTable { symbols })
    }

    /// Number of symbols in the alphabet
    pub fn radix(&self) -> Digit {
        self.symbols.len() as Digit
    }

    /// Returns the digit of `symbol`, or None if it is not in the alphabet
    pub fn decipher(&self, symbol: char) -> Option<Digit> {
        self.symbols
            .binary_search(&symbol)
            .ok()
            .map(|digit| digit as Digit)
    }

    /// Returns the symbol of `digit`, or None if it is not below the radix
    pub fn cipher(&self, digit: Digit) -> Option<char> {
        self.symbols.get(digit as usize).copied()
    }

    /// Lowest symbol, the one used to pad shorter ranks
    pub fn lowest(&self) -> char {
        self.symbols[0]
    }

    /// Symbols of the alphabet, in increasing order
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }
}

impl fmt::Display for CipherTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

    #[test]
    fn test_cipher_bijection() {
        let table = CipherTable::new(LOWERCASE).unwrap();

        assert_eq!(table.radix(), 26);
        for symbol in table.symbols() {
            assert_eq!(table.cipher(table.decipher(symbol).unwrap()), Some(symbol));
        }
        for digit in 0..table.radix() {
            assert_eq!(table.decipher(table.cipher(digit).unwrap()), Some(digit));
        }
    }

    #[test]
    fn test_cipher_out_of_range() {
        let table = CipherTable::new(LOWERCASE).unwrap();

        assert_eq!(table.decipher('A'), None);
        assert_eq!(table.decipher('0'), None);
        assert_eq!(table.cipher(26), None);
        assert_eq!(table.decipher('a'), Some(0));
        assert_eq!(table.decipher('z'), Some(25));
    }

    #[test]
    fn test_cipher_invalid_alphabet() {
        match CipherTable::new("a") {
            Err(ConfigurationError::AlphabetTooSmall(1)) => (),
            e => panic!("Expected AlphabetTooSmall error, got {e:?}"),
        }
        match CipherTable::new("abdc") {
            Err(ConfigurationError::UnsortedAlphabet('d', 'c')) => (),
            e => panic!("Expected UnsortedAlphabet error, got {e:?}"),
        }
        match CipherTable::new("abbc") {
            Err(ConfigurationError::UnsortedAlphabet('b', 'b')) => (),
            e => panic!("Expected UnsortedAlphabet error, got {e:?}"),
        }
    }

    #[test]
    fn test_cipher_custom_alphabet() {
        let table = CipherTable::new("0123456789").unwrap();

        assert_eq!(table.radix(), 10);
        assert_eq!(table.lowest(), '0');
        assert_eq!(table.to_string(), "0123456789");
    }
}
