use crate::cipher::{from_value, to_value, Digit};
use crate::RankError;
use log::debug;

/// Spreads `count` digit sequences evenly from `lowest` towards `highest`
///
/// Both bounds must have the same length. The first sequence is `lowest`;
/// the last one may fall short of `highest` because the step is floored.
pub fn spread_digits(
    lowest: &[Digit],
    highest: &[Digit],
    radix: Digit,
    count: usize,
) -> Result<Vec<Vec<Digit>>, RankError> {
    if count == 0 {
        return Err(RankError::InvalidCount);
    }
    if count == 1 {
        return Ok(vec![lowest.to_vec()]);
    }

    let length = lowest.len();
    let low = to_value(lowest, radix)?;
    let high = to_value(highest, radix)?;

    let interval = high.saturating_sub(low) / (count as u128 - 1);
    if interval == 0 {
        return Err(RankError::BulkRangeExhausted { count });
    }
    debug!("spreading {count} ranks of {length} digits every {interval}");

    (0..count as u128)
        .map(|i| from_value(low + interval * i, length, radix))
        .collect()
}
