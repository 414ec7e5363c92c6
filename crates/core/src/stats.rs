use serde::Serialize;

const PERCENTAGE_DIGITS: usize = 2;

/// Reduction as a percentage of the original length.
///
/// Serializes as a two-decimal string (`"12.50"`), or as the bare number `0`
/// when the original text was empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReductionPercentage {
    Zero(u8),
    Formatted(String),
}

impl ReductionPercentage {
    fn from_counts(reduction: i64, original_count: i64) -> Self {
        if original_count == 0 {
            return ReductionPercentage::Zero(0);
        }

        let percentage = reduction as f64 / original_count as f64 * 100.0;
        ReductionPercentage::Formatted(to_fixed(percentage, PERCENTAGE_DIGITS))
    }
}

/// Format `value` with `digits` fractional places the way JavaScript's
/// `Number.prototype.toFixed` does: the exact binary value is rounded, and a
/// tie goes to the larger magnitude.
fn to_fixed(value: f64, digits: usize) -> String {
    // 1100 places print any finite f64 without rounding.
    let exact = format!("{:.1100}", value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let (kept, dropped) = fraction.split_at(digits.min(fraction.len()));

    let mut number: Vec<u8> = whole.bytes().chain(kept.bytes()).collect();
    if dropped.bytes().next().is_some_and(|d| d >= b'5') {
        let mut carry = true;
        for d in number.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            number.insert(0, b'1');
        }
    }

    let number: String = number.into_iter().map(char::from).collect();
    let (int_part, frac_part) = number.split_at(number.len() - kept.len());
    let sign = if value < 0.0 { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    }
}

/// Size statistics comparing the submitted text with its transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub original_count: usize,
    pub processed_count: usize,
    pub hash_count: usize,
    pub line_count: usize,
    pub reduction: i64,
    pub reduction_percentage: ReductionPercentage,
}

/// Compute statistics for a transformation.
///
/// Lengths are counted in UTF-16 code units, like JavaScript's `length`.
/// `hash_count` counts every `#` in the original regardless of the mode that
/// produced `processed`.
pub fn compute_stats(original: &str, processed: &str) -> Stats {
    let original_count = original.encode_utf16().count();
    let processed_count = processed.encode_utf16().count();
    let hash_count = original.matches('#').count();
    let line_count = processed.split('\n').count();
    let reduction = original_count as i64 - processed_count as i64;

    Stats {
        original_count,
        processed_count,
        hash_count,
        line_count,
        reduction,
        reduction_percentage: ReductionPercentage::from_counts(reduction, original_count as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{transform, HASH_SENTINEL};

    #[test]
    fn test_stats_for_equal_lengths() {
        let stats = compute_stats("abc#def", "abc\ndef");

        assert_eq!(
            stats,
            Stats {
                original_count: 7,
                processed_count: 7,
                hash_count: 1,
                line_count: 2,
                reduction: 0,
                reduction_percentage: ReductionPercentage::Formatted("0.00".to_string()),
            }
        );
    }

    #[test]
    fn test_stats_for_empty_original() {
        let stats = compute_stats("", "x");

        assert_eq!(stats.original_count, 0);
        assert_eq!(stats.reduction, -1);
        assert_eq!(stats.reduction_percentage, ReductionPercentage::Zero(0));
    }

    #[test]
    fn test_empty_processed_still_counts_one_line() {
        assert_eq!(compute_stats("abc", "").line_count, 1);
    }

    #[test]
    fn test_negative_reduction_from_sentinel() {
        let original = "#";
        let processed = transform(original, "hash").unwrap();
        assert_eq!(processed, HASH_SENTINEL);

        let stats = compute_stats(original, &processed);
        assert!(stats.reduction < 0);
        assert_eq!(
            stats.reduction_percentage,
            ReductionPercentage::Formatted("-2700.00".to_string())
        );
    }

    #[test]
    fn test_percentage_rounds_to_two_decimals() {
        let stats = compute_stats("abc", "a");
        assert_eq!(
            stats.reduction_percentage,
            ReductionPercentage::Formatted("66.67".to_string())
        );
    }

    #[test]
    fn test_hash_count_counts_every_hash() {
        assert_eq!(compute_stats("## a#b #", "").hash_count, 4);
        assert_eq!(compute_stats("no marks", "").hash_count, 0);
    }

    #[test]
    fn test_counts_utf16_code_units() {
        let stats = compute_stats("日本 語", "日本\n語");
        assert_eq!(stats.original_count, 4);
        assert_eq!(stats.processed_count, 4);

        let stats = compute_stats("😀 x", "😀\nx");
        assert_eq!(stats.original_count, 4);
        assert_eq!(stats.processed_count, 4);
        assert_eq!(stats.line_count, 2);
    }

    #[test]
    fn test_percentage_tie_rounds_up() {
        let original = "a".repeat(800);

        let stats = compute_stats(&original, &"a".repeat(799));
        assert_eq!(
            stats.reduction_percentage,
            ReductionPercentage::Formatted("0.13".to_string())
        );

        let stats = compute_stats(&original, &"a".repeat(801));
        assert_eq!(
            stats.reduction_percentage,
            ReductionPercentage::Formatted("-0.13".to_string())
        );
    }

    #[test]
    fn test_to_fixed_matches_javascript() {
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(-0.125, 2), "-0.13");
        assert_eq!(to_fixed(0.0, 2), "0.00");
        assert_eq!(to_fixed(99.995, 2), "99.99");
        assert_eq!(to_fixed(99.999, 2), "100.00");
        assert_eq!(to_fixed(-0.001, 2), "-0.00");
        assert_eq!(to_fixed(2.5, 0), "3");
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let json = serde_json::to_value(compute_stats("abc#def", "abc\ndef")).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "originalCount": 7,
                "processedCount": 7,
                "hashCount": 1,
                "lineCount": 2,
                "reduction": 0,
                "reductionPercentage": "0.00"
            })
        );
    }

    #[test]
    fn test_zero_percentage_serializes_as_number() {
        let json = serde_json::to_value(compute_stats("", "")).unwrap();
        assert_eq!(json["reductionPercentage"], serde_json::json!(0));
    }
}
