//! Natural ("human") string ordering.
//!
//! Runs of ASCII digits compare by numeric value, everything else compares
//! byte-wise ignoring ASCII case, so `file2.md` sorts before `file10.md` and
//! `a2.md` before `B1.md`. Comparison is locale independent.

use std::cmp::Ordering;

/// Compare two strings in natural order.
///
/// Digit runs of equal numeric value are ordered by leading zero count, fewer
/// zeros first (`a1` < `a01` < `a001`). Digit runs may be arbitrarily long.
/// Names that differ only in case fall back to byte order (`A.md` < `a.md`),
/// so the ordering is total.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use md_directives::natural::natural_cmp;
///
/// assert_eq!(natural_cmp("a2.md", "a10.md"), Ordering::Less);
/// assert_eq!(natural_cmp("b.md", "a10.md"), Ordering::Greater);
/// assert_eq!(natural_cmp("B1.md", "a2.md"), Ordering::Greater);
/// ```
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    compare(a, b, u8::to_ascii_lowercase).then_with(|| compare(a, b, |&c| c))
}

/// Sort strings in ascending natural order.
pub fn sort_natural(names: &mut [String]) {
    names.sort_by(|a, b| natural_cmp(a, b));
}

fn compare(a: &[u8], b: &[u8], fold: impl Fn(&u8) -> u8) -> Ordering {
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let run_a = digit_run(&a[i..]);
            let run_b = digit_run(&b[j..]);
            let ordering = compare_numeric(run_a, run_b);
            if ordering != Ordering::Equal {
                return ordering;
            }
            i += run_a.len();
            j += run_b.len();
        } else {
            let ordering = fold(&a[i]).cmp(&fold(&b[j]));
            if ordering != Ordering::Equal {
                return ordering;
            }
            i += 1;
            j += 1;
        }
    }

    (a.len() - i).cmp(&(b.len() - j))
}

fn digit_run(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(bytes.len());
    &bytes[..end]
}

fn compare_numeric(a: &[u8], b: &[u8]) -> Ordering {
    let trimmed_a = trim_zeros(a);
    let trimmed_b = trim_zeros(b);
    // Equal-length digit strings without leading zeros compare like numbers.
    trimmed_a
        .len()
        .cmp(&trimmed_b.len())
        .then_with(|| trimmed_a.cmp(trimmed_b))
        .then_with(|| a.len().cmp(&b.len()))
}

fn trim_zeros(digits: &[u8]) -> &[u8] {
    let start = digits
        .iter()
        .position(|&b| b != b'0')
        .unwrap_or(digits.len());
    &digits[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(|&n| n.to_owned()).collect();
        sort_natural(&mut names);
        names
    }

    #[test]
    fn test_numeric_runs_compare_by_value() {
        assert_eq!(
            sorted(&["a2.md", "a10.md", "a1.md"]),
            vec!["a1.md", "a2.md", "a10.md"]
        );
    }

    #[test]
    fn test_multiple_numeric_runs() {
        assert_eq!(
            sorted(&["v1.10.md", "v1.2.md", "v1.9.md"]),
            vec!["v1.2.md", "v1.9.md", "v1.10.md"]
        );
    }

    #[test]
    fn test_text_before_number() {
        assert_eq!(
            sorted(&["chapter10.md", "appendix.md", "chapter9.md"]),
            vec!["appendix.md", "chapter9.md", "chapter10.md"]
        );
    }

    #[test]
    fn test_leading_zeros_tie_break() {
        assert_eq!(natural_cmp("a01", "a1"), Ordering::Greater);
        assert_eq!(natural_cmp("a1", "a001"), Ordering::Less);
        assert_eq!(natural_cmp("a010", "a9"), Ordering::Greater);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("abc", "abcd"), Ordering::Less);
        assert_eq!(natural_cmp("a1", "a1b"), Ordering::Less);
    }

    #[test]
    fn test_letters_ignore_case() {
        assert_eq!(sorted(&["B1.md", "a2.md"]), vec!["a2.md", "B1.md"]);
        assert_eq!(natural_cmp("Chapter10", "chapter9"), Ordering::Greater);
    }

    #[test]
    fn test_case_only_difference_uses_byte_order() {
        assert_eq!(natural_cmp("A.md", "a.md"), Ordering::Less);
        assert_eq!(natural_cmp("a.md", "A.md"), Ordering::Greater);
        assert_eq!(sorted(&["intro.md", "Intro.md"]), vec!["Intro.md", "intro.md"]);
    }

    #[test]
    fn test_long_digit_runs_do_not_overflow() {
        assert_eq!(
            natural_cmp("x99999999999999999999999", "x100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_equal() {
        assert_eq!(natural_cmp("same10.md", "same10.md"), Ordering::Equal);
    }
}
