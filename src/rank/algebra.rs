use crate::cipher::{normalize, Digit};
use crate::RankError;
use log::{debug, warn};
use std::cmp::Ordering;

/// Floor of the average of two digit sequences of the same length
///
/// Works digit by digit so that the result is exact for sequences of any
/// length: the sum is accumulated from the least significant digit, then
/// halved from the most significant one. Sequences of different lengths
/// must be normalized first.
pub fn mean_digits(
    low: &[Digit],
    high: &[Digit],
    radix: Digit,
) -> Result<Vec<Digit>, RankError> {
    if low.len() != high.len() {
        return Err(RankError::LengthMismatch {
            left: low.len(),
            right: high.len(),
        });
    }

    let mut sum = vec![0; low.len()];
    let mut carry = 0;
    for i in (0..low.len()).rev() {
        let digit = low[i] + high[i] + carry;
        sum[i] = digit % radix;
        carry = digit / radix;
    }

    let mut remainder = carry;
    for digit in sum.iter_mut() {
        let current = remainder * radix + *digit;
        *digit = current / 2;
        remainder = current % 2;
    }

    Ok(sum)
}

/// Index of the digit targeted by `depth`, counted from the least significant end
fn depth_index(digits: &[Digit], depth: usize) -> Result<usize, RankError> {
    if depth >= digits.len() {
        return Err(RankError::DepthOutOfRange {
            depth,
            length: digits.len(),
        });
    }
    Ok(digits.len() - 1 - depth)
}

/// Adds one at `depth`, carrying towards the most significant digit
///
/// If the carry runs past the most significant digit, the original sequence
/// is returned with `overflow` appended instead, which still sorts after it.
pub fn increment_digits(
    digits: &[Digit],
    radix: Digit,
    depth: usize,
    overflow: Digit,
) -> Result<Vec<Digit>, RankError> {
    let mut index = depth_index(digits, depth)?;
    let mut res = digits.to_vec();

    loop {
        res[index] += 1;
        if res[index] < radix {
            return Ok(res);
        }

        res[index] = 0;
        if index == 0 {
            debug!(
                "increment overflow at depth {depth}, growing to {} digits",
                digits.len() + 1
            );
            let mut grown = digits.to_vec();
            grown.push(overflow);
            return Ok(grown);
        }
        index -= 1;
    }
}

/// Subtracts one at `depth`, borrowing from the more significant digits
///
/// If the borrow runs past the most significant digit, only the least
/// significant digit is decremented. A sequence whose least significant digit
/// is already zero is then returned unchanged.
pub fn decrement_digits(
    digits: &[Digit],
    radix: Digit,
    depth: usize,
) -> Result<Vec<Digit>, RankError> {
    let mut index = depth_index(digits, depth)?;
    let mut res = digits.to_vec();

    loop {
        if res[index] > 0 {
            res[index] -= 1;
            return Ok(res);
        }

        res[index] = radix - 1;
        if index == 0 {
            let mut res = digits.to_vec();
            match res.last_mut() {
                Some(last) if *last > 0 => {
                    debug!("decrement underflow at depth {depth}, stepping last digit");
                    *last -= 1;
                }
                _ => warn!("decrement underflow at depth {depth}, rank cannot go lower"),
            }
            return Ok(res);
        }
        index -= 1;
    }
}

/// Compares two digit sequences as if the shorter one was padded with zeros
pub fn compare_digits(a: &[Digit], b: &[Digit]) -> Ordering {
    let length = usize::max(a.len(), b.len());
    normalize(a, length).cmp(&normalize(b, length))
}
