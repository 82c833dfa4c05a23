use super::{CipherTable, Digit};
use crate::RankError;

/// Converts a rank into its digit sequence, most significant digit first
pub fn decode_rank(table: &CipherTable, rank: &str) -> Result<Vec<Digit>, RankError> {
    if rank.is_empty() {
        return Err(RankError::EmptyRank);
    }

    rank.chars()
        .enumerate()
        .map(|(position, symbol)| {
            table
                .decipher(symbol)
                .ok_or(RankError::UnknownSymbol { symbol, position })
        })
        .collect()
}

/// Converts a digit sequence back into a rank
pub fn encode(table: &CipherTable, digits: &[Digit]) -> Result<String, RankError> {
    digits
        .iter()
        .map(|&digit| {
            table.cipher(digit).ok_or(RankError::DigitOutOfRange {
                digit,
                radix: table.radix(),
            })
        })
        .collect()
}

/// Pads `digits` with trailing zeros up to `length`
///
/// Sequences that are already `length` digits or longer are returned as is,
/// callers pick the greater length of both operands.
pub fn normalize(digits: &[Digit], length: usize) -> Vec<Digit> {
    let mut normalized = Vec::with_capacity(usize::max(length, digits.len()));
    normalized.extend_from_slice(digits);
    normalized.resize(usize::max(length, digits.len()), 0);
    normalized
}

/// Evaluates a digit sequence in base `radix`
///
/// Fails if the value does not fit in 128 bits.
pub fn to_value(digits: &[Digit], radix: Digit) -> Result<u128, RankError> {
    digits.iter().try_fold(0u128, |value, &digit| {
        value
            .checked_mul(radix as u128)
            .and_then(|value| value.checked_add(digit as u128))
            .ok_or(RankError::ValueOverflow {
                length: digits.len(),
            })
    })
}

/// Expands `value` into exactly `length` base `radix` digits
///
/// Fails rather than truncating if `value` needs more than `length` digits.
pub fn from_value(value: u128, length: usize, radix: Digit) -> Result<Vec<Digit>, RankError> {
    let radix = radix as u128;
    let mut digits = vec![0; length];
    let mut remainder = value;

    for digit in digits.iter_mut().rev() {
        *digit = (remainder % radix) as Digit;
        remainder /= radix;
    }

    if remainder != 0 {
        return Err(RankError::ValueOverflow { length });
    }

    Ok(digits)
}

/// Returns the length of the longest rank
pub fn greater_length(a: &str, b: &str) -> usize {
    usize::max(a.chars().count(), b.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CipherTable {
        CipherTable::new("abcdefghijklmnopqrstuvwxyz").unwrap()
    }

    #[test]
    fn test_decode_rank() {
        let table = table();

        assert_eq!(decode_rank(&table, "abz").unwrap(), vec![0, 1, 25]);
        assert_eq!(decode_rank(&table, "n").unwrap(), vec![13]);

        match decode_rank(&table, "abZ") {
            Err(RankError::UnknownSymbol {
                symbol: 'Z',
                position: 2,
            }) => (),
            e => panic!("Expected UnknownSymbol error, got {e:?}"),
        }
        match decode_rank(&table, "") {
            Err(RankError::EmptyRank) => (),
            e => panic!("Expected EmptyRank error, got {e:?}"),
        }
    }

    #[test]
    fn test_encode() {
        let table = table();

        assert_eq!(encode(&table, &[1, 1, 1, 1, 1, 1]).unwrap(), "bbbbbb");
        match encode(&table, &[1, 26]) {
            Err(RankError::DigitOutOfRange {
                digit: 26,
                radix: 26,
            }) => (),
            e => panic!("Expected DigitOutOfRange error, got {e:?}"),
        }
    }

    #[test]
    fn test_codec_round_trip() {
        let table = table();

        for rank in ["a", "z", "bbbbbb", "azby", "mzzzzz", "yyyyyx", "hello"] {
            assert_eq!(encode(&table, &decode_rank(&table, rank).unwrap()).unwrap(), rank);
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(&[1, 2], 4), vec![1, 2, 0, 0]);
        assert_eq!(normalize(&[1, 2], 2), vec![1, 2]);
        // Never truncates
        assert_eq!(normalize(&[1, 2, 3], 2), vec![1, 2, 3]);
    }

    #[test]
    fn test_to_value() {
        assert_eq!(to_value(&[0, 0, 0], 26).unwrap(), 0);
        assert_eq!(to_value(&[1, 0], 26).unwrap(), 26);
        assert_eq!(to_value(&[1, 1, 1, 1, 1, 1], 26).unwrap(), 12_356_631);
        assert_eq!(to_value(&[25; 6], 26).unwrap(), 26u128.pow(6) - 1);

        match to_value(&[25; 28], 26) {
            Err(RankError::ValueOverflow { length: 28 }) => (),
            e => panic!("Expected ValueOverflow error, got {e:?}"),
        }
    }

    #[test]
    fn test_from_value() {
        assert_eq!(from_value(26, 3, 26).unwrap(), vec![0, 1, 0]);
        assert_eq!(from_value(0, 2, 26).unwrap(), vec![0, 0]);
        assert_eq!(from_value(12_356_631, 6, 26).unwrap(), vec![1; 6]);

        match from_value(26u128.pow(6), 6, 26) {
            Err(RankError::ValueOverflow { length: 6 }) => (),
            e => panic!("Expected ValueOverflow error, got {e:?}"),
        }
    }

    #[test]
    fn test_value_round_trip() {
        for length in 1..=3 {
            for value in 0..26u128.pow(length as u32) {
                let digits = from_value(value, length, 26).unwrap();
                assert_eq!(to_value(&digits, 26).unwrap(), value);
                assert_eq!(from_value(to_value(&digits, 26).unwrap(), length, 26).unwrap(), digits);
            }
        }
    }

    #[test]
    fn test_greater_length() {
        assert_eq!(greater_length("abc", "ab"), 3);
        assert_eq!(greater_length("a", "abcd"), 4);
        assert_eq!(greater_length("ab", "cd"), 2);
    }
}
