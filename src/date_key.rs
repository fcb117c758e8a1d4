//! Sort keys for the loosely formatted dates the blog prints.
//!
//! Dates look like `2024.03.05 10:30`, sometimes without the time part. The
//! key is only used for ordering; the raw string is what gets displayed.

/// `(year, month, day, hour, minute)`, compared lexicographically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(pub [i64; 5]);

impl DateKey {
    /// Sorts below every real date.
    pub const SENTINEL: DateKey = DateKey([0; 5]);

    /// Parse a date string into a key. Anything unparseable becomes
    /// [`DateKey::SENTINEL`].
    pub fn parse(raw: &str) -> DateKey {
        let normalized = raw.replace(['.', ':'], " ");
        let parts: Result<Vec<i64>, _> = normalized
            .split_whitespace()
            .map(str::parse::<i64>)
            .collect();

        match parts {
            Ok(parts) => {
                let mut key = [0i64; 5];
                for (slot, value) in key.iter_mut().zip(parts) {
                    *slot = value;
                }
                DateKey(key)
            }
            Err(_) => DateKey::SENTINEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_date() {
        assert_eq!(DateKey::parse("2024.03.05 10:30"), DateKey([2024, 3, 5, 10, 30]));
    }

    #[test]
    fn test_parse_pads_missing_components() {
        assert_eq!(DateKey::parse("2024.6.1"), DateKey([2024, 6, 1, 0, 0]));
        assert_eq!(DateKey::parse("  2024 "), DateKey([2024, 0, 0, 0, 0]));
    }

    #[test]
    fn test_parse_drops_extra_components() {
        assert_eq!(
            DateKey::parse("2024.03.05 10:30:59"),
            DateKey([2024, 3, 5, 10, 30])
        );
    }

    #[test]
    fn test_parse_failures_are_sentinel() {
        assert_eq!(DateKey::parse(""), DateKey::SENTINEL);
        assert_eq!(DateKey::parse("bad"), DateKey::SENTINEL);
        assert_eq!(DateKey::parse("2024/03/05"), DateKey::SENTINEL);
        assert_eq!(DateKey::parse("2024.03.05 10:xx"), DateKey::SENTINEL);
    }

    #[test]
    fn test_ordering() {
        let older = DateKey::parse("2024.01.01");
        let newer = DateKey::parse("2024.01.01 00:01");
        assert!(newer > older);
        assert!(older > DateKey::SENTINEL);
    }
}
