use log::debug;

/// Makes sure a freshly computed rank differs from both of its bounds
///
/// A candidate that collides with a bound gets `filler` appended, which sorts
/// it right after the bound it collided with and still before the next one.
pub fn validate(prev: &str, next: &str, candidate: String, filler: char) -> String {
    if candidate != prev && candidate != next {
        return candidate;
    }

    debug!("rank {candidate} collides with its bounds ({prev}, {next}), appending {filler}");
    let mut candidate = candidate;
    candidate.push(filler);
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_distinct() {
        assert_eq!(validate("bbbbbb", "ffffff", "dddddd".into(), 'n'), "dddddd");
    }

    #[test]
    fn test_validate_collision() {
        let rank = validate("bbbbbb", "bbbbbc", "bbbbbb".into(), 'n');
        assert_eq!(rank, "bbbbbbn");
        assert!("bbbbbb" < rank.as_str() && rank.as_str() < "bbbbbc");

        assert_eq!(validate("a", "b", "b".into(), 'n'), "bn");
    }
}
