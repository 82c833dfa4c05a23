#![doc = include_str!("../README.md")]
mod cipher;
mod config;
mod rank;

pub use cipher::CipherTable;
pub use cipher::Digit;
pub use cipher::{decode_rank, encode, from_value, greater_length, normalize, to_value};
pub use config::ConfigurationError;
pub use config::RankConfig;
pub use rank::RankError;
pub use rank::Ranker;
pub use rank::{compare_digits, decrement_digits, increment_digits, mean_digits};
pub use rank::{spread_digits, validate};
