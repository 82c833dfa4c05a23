mod algebra;
mod bulk;
mod validator;

pub use algebra::{compare_digits, decrement_digits, increment_digits, mean_digits};
pub use bulk::spread_digits;
pub use validator::validate;

use crate::cipher::{self, greater_length, normalize, CipherTable, Digit};
use crate::{ConfigurationError, RankConfig};
use log::trace;
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RankError {
    #[error("rank is empty")]
    EmptyRank,
    #[error("unknown symbol '{symbol}' at position {position}")]
    UnknownSymbol { symbol: char, position: usize },
    #[error("digit {digit} is out of range for radix {radix}")]
    DigitOutOfRange { digit: Digit, radix: Digit },
    #[error("value does not fit in {length} digits")]
    ValueOverflow { length: usize },
    #[error("rank '{prev}' does not sort before '{next}'")]
    OutOfOrder { prev: String, next: String },
    #[error("rank count must be at least 1")]
    InvalidCount,
    #[error("depth {depth} is out of range for a rank of {length} digits")]
    DepthOutOfRange { depth: usize, length: usize },
    #[error("initial rank range cannot hold {count} distinct ranks")]
    BulkRangeExhausted { count: usize },
    #[error("digit sequences of {left} and {right} digits cannot be averaged")]
    LengthMismatch { left: usize, right: usize },
}

/// Rank operations bound to a validated configuration
///
/// A `Ranker` is immutable once built and can be shared between threads.
///
/// ```rust
/// use plexorank::Ranker;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let ranker = Ranker::default();
///
///     let ranks = ranker.create_bulk_ranks(3)?;
///     let between = ranker.mean(&ranks[0], &ranks[1])?;
///     assert!(ranks[0] < between && between < ranks[1]);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranker {
    table: CipherTable,
    filler: char,
    overflow: Digit,
    lowest: Vec<Digit>,
    highest: Vec<Digit>,
    lowest_rank: String,
    depth: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Ranker::new(&RankConfig::default()).expect("default rank configuration is valid")
    }
}

impl Ranker {
    /// Validates `config` and builds the corresponding cipher table
    pub fn new(config: &RankConfig) -> Result<Self, ConfigurationError> {
        let table = CipherTable::new(&config.alphabet)?;

        // Appending the lowest symbol does not move a rank under padding
        if table.decipher(config.filler).is_none() {
            return Err(ConfigurationError::FillerNotInAlphabet(config.filler));
        }
        if config.filler == table.lowest() {
            return Err(ConfigurationError::FillerIsZero(config.filler));
        }

        let overflow = table
            .decipher(config.overflow)
            .ok_or(ConfigurationError::OverflowNotInAlphabet(config.overflow))?;
        if config.overflow == table.lowest() {
            return Err(ConfigurationError::OverflowIsZero(config.overflow));
        }

        let initial = |rank: &str| {
            let digits = cipher::decode_rank(&table, rank)
                .and_then(|digits| cipher::to_value(&digits, table.radix()).map(|_| digits));
            digits.map_err(|_| ConfigurationError::InvalidInitialRank(rank.to_string()))
        };
        let lowest = initial(&config.lowest)?;
        let highest = initial(&config.highest)?;

        if lowest.len() != highest.len() || lowest >= highest {
            return Err(ConfigurationError::InvalidInitialRank(format!(
                "{}..{}",
                config.lowest, config.highest
            )));
        }

        if config.depth >= lowest.len() {
            return Err(ConfigurationError::InvalidDepth(config.depth));
        }

        Ok(Ranker {
            table,
            filler: config.filler,
            overflow,
            lowest,
            highest,
            lowest_rank: config.lowest.clone(),
            depth: config.depth,
        })
    }

    /// Alphabet the ranks are written with
    pub fn table(&self) -> &CipherTable {
        &self.table
    }

    /// Default depth used by `increment`, `decrement` and `place`
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The first rank handed out when seeding a collection
    pub fn lowest_rank(&self) -> &str {
        &self.lowest_rank
    }

    pub fn decode_rank(&self, rank: &str) -> Result<Vec<Digit>, RankError> {
        cipher::decode_rank(&self.table, rank)
    }

    pub fn encode(&self, digits: &[Digit]) -> Result<String, RankError> {
        cipher::encode(&self.table, digits)
    }

    pub fn to_value(&self, digits: &[Digit]) -> Result<u128, RankError> {
        cipher::to_value(digits, self.table.radix())
    }

    pub fn from_value(&self, value: u128, length: usize) -> Result<Vec<Digit>, RankError> {
        cipher::from_value(value, length, self.table.radix())
    }

    /// Returns a rank that sorts strictly between `prev` and `next`
    ///
    /// Both ranks are compared at the depth of the longest one. Fails with
    /// `RankError::OutOfOrder` unless `prev` sorts strictly before `next`.
    /// The result also sorts strictly between both ranks as plain strings.
    pub fn mean(&self, prev: &str, next: &str) -> Result<String, RankError> {
        let length = greater_length(prev, next);
        let low = normalize(&self.decode_rank(prev)?, length);
        let high = normalize(&self.decode_rank(next)?, length);

        if low >= high {
            return Err(RankError::OutOfOrder {
                prev: prev.to_string(),
                next: next.to_string(),
            });
        }

        let mean = mean_digits(&low, &high, self.table.radix())?;
        trace!("mean of {low:?} and {high:?} at length {length}: {mean:?}");

        // Collisions are checked at equal depth: "bbbbbba" is not a new rank
        // after "bbbbbb"
        Ok(self.validate(
            &self.encode(&low)?,
            &self.encode(&high)?,
            self.encode(&mean)?,
        ))
    }

    /// Returns a rank that sorts after `rank`, stepping the digit at `depth`
    ///
    /// `depth` counts from the last character. The rank grows by one
    /// character when the carry overflows.
    pub fn increment_at_depth(&self, rank: &str, depth: usize) -> Result<String, RankError> {
        let digits = self.decode_rank(rank)?;
        self.encode(&increment_digits(
            &digits,
            self.table.radix(),
            depth,
            self.overflow,
        )?)
    }

    /// Returns a rank that sorts before `rank`, stepping the digit at `depth`
    ///
    /// When the borrow underflows only the last character is stepped down, and
    /// a rank ending with the lowest symbol is returned unchanged.
    pub fn decrement_at_depth(&self, rank: &str, depth: usize) -> Result<String, RankError> {
        let digits = self.decode_rank(rank)?;
        self.encode(&decrement_digits(&digits, self.table.radix(), depth)?)
    }

    pub fn increment(&self, rank: &str) -> Result<String, RankError> {
        self.increment_at_depth(rank, self.depth)
    }

    pub fn decrement(&self, rank: &str) -> Result<String, RankError> {
        self.decrement_at_depth(rank, self.depth)
    }

    /// Returns `count` evenly spaced ranks starting at the lowest initial rank
    pub fn create_bulk_ranks(&self, count: usize) -> Result<Vec<String>, RankError> {
        spread_digits(&self.lowest, &self.highest, self.table.radix(), count)?
            .iter()
            .map(|digits| self.encode(digits))
            .collect()
    }

    /// Appends the filler symbol to `candidate` if it collides with a bound
    pub fn validate(&self, prev: &str, next: &str, candidate: String) -> String {
        validate(prev, next, candidate, self.filler)
    }

    /// Returns a rank for a slot between two optional neighbours
    ///
    /// With both neighbours this is `mean`. With a single neighbour the rank
    /// is stepped at the configured depth, or at the last character of a
    /// shorter rank. An empty collection starts at the lowest initial rank.
    ///
    /// At the bottom of the rank space `next` cannot be decremented, and the
    /// returned rank is then equal to `next`: the collection needs a
    /// `rebalance` before anything can be inserted first.
    pub fn place(&self, prev: Option<&str>, next: Option<&str>) -> Result<String, RankError> {
        let depth_for =
            |rank: &str| usize::min(self.depth, rank.chars().count().saturating_sub(1));

        match (prev, next) {
            (Some(prev), Some(next)) => self.mean(prev, next),
            (Some(prev), None) => self.increment_at_depth(prev, depth_for(prev)),
            (None, Some(next)) => self.decrement_at_depth(next, depth_for(next)),
            (None, None) => Ok(self.lowest_rank.clone()),
        }
    }

    /// Compares two ranks, the shorter one padded with the lowest symbol
    pub fn compare(&self, a: &str, b: &str) -> Result<Ordering, RankError> {
        Ok(compare_digits(&self.decode_rank(a)?, &self.decode_rank(b)?))
    }

    /// Returns fresh evenly spaced ranks for an existing collection
    ///
    /// The rank at index `i` of the result replaces `ranks[i]`; the relative
    /// order of the collection is preserved, ties keeping their input order.
    pub fn rebalance<S: AsRef<str>>(&self, ranks: &[S]) -> Result<Vec<String>, RankError> {
        if ranks.is_empty() {
            return Ok(Vec::new());
        }

        let digits = ranks
            .iter()
            .map(|rank| self.decode_rank(rank.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut order: Vec<usize> = (0..ranks.len()).collect();
        order.sort_by(|&a, &b| compare_digits(&digits[a], &digits[b]));

        let fresh = self.create_bulk_ranks(ranks.len())?;
        let mut res = vec![String::new(); ranks.len()];
        for (rank, index) in fresh.into_iter().zip(order) {
            res[index] = rank;
        }

        Ok(res)
    }
}
