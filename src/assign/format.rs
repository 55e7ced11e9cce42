//! Identifier formatting.

/// Number of characters left for the numeric suffix.
///
/// Saturates at zero; requests validate `total_length > prefix length`
/// before formatting, so zero only shows up for direct callers.
#[must_use]
pub fn suffix_width(prefix: &str, total_length: usize) -> usize {
    total_length.saturating_sub(prefix.chars().count())
}

/// Builds `prefix` followed by `seq` zero-padded to the suffix width.
///
/// A sequence number wider than the suffix width is kept whole, so the
/// result is longer than `total_length` rather than truncated.
#[must_use]
pub fn format_identifier(prefix: &str, total_length: usize, seq: u64) -> String {
    let width = suffix_width(prefix, total_length);
    format!("{prefix}{seq:0>width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_sequence_to_total_length() {
        let id = format_identifier("130129", 18, 7);
        assert_eq!(id, "130129000000000007");
        assert_eq!(id.len(), 18);
    }

    #[test]
    fn overflowing_sequence_is_kept_whole() {
        let id = format_identifier("130129", 10, 123_456);
        assert_eq!(id, "130129123456");
        assert_eq!(id.len(), 12);
    }

    #[test]
    fn exact_fit_has_no_padding() {
        assert_eq!(format_identifier("AB", 6, 1234), "AB1234");
    }

    #[test]
    fn empty_prefix_is_all_digits() {
        assert_eq!(format_identifier("", 5, 42), "00042");
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        assert_eq!(suffix_width("é北", 6), 4);
        assert_eq!(format_identifier("é北", 6, 3), "é北0003");
    }

    #[test]
    fn width_saturates_when_prefix_is_too_long() {
        assert_eq!(suffix_width("130129", 5), 0);
        assert_eq!(format_identifier("130129", 5, 9), "1301299");
    }
}
