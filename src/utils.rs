use chrono::{DateTime, SecondsFormat, Utc};

pub(crate) trait LetChain {
    fn let_<F, R>(self, f: F) -> R
    where
        Self: Sized,
        F: FnOnce(Self) -> R;
}
impl<T> LetChain for T {
    #[inline]
    fn let_<F, R>(self, f: F) -> R
    where
        Self: Sized,
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

pub(crate) trait AlsoChain {
    fn also_<F, R>(self, f: F) -> Self
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> R;
}
impl<T> AlsoChain for T {
    #[inline]
    fn also_<F, R>(mut self, f: F) -> Self
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> R,
    {
        f(&mut self);
        self
    }
}

/// Fixed-width RFC 3339, so stored timestamps sort lexically.
pub(crate) fn stamp(at: &DateTime<Utc>) -> String { at.to_rfc3339_opts(SecondsFormat::Millis, true) }

pub(crate) fn parse_stamp(raw: &str) -> ::anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

/// Number of pages needed for `total` items, at least one.
pub(crate) fn page_count(total: u64, limit: u32) -> u64 {
    match limit {
        0 => 1,
        l => ((total + l as u64 - 1) / l as u64).max(1),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn stamps_sort_like_times() {
        let a = Utc.timestamp_millis_opt(1_000).unwrap();
        let b = Utc.timestamp_millis_opt(20_000_000).unwrap();

        assert!(stamp(&a) < stamp(&b));
        assert_eq!(parse_stamp(&stamp(&b)).unwrap(), b);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(5, 0), 1);
    }

    #[test]
    fn chains_pass_values_through() {
        let v = 2.let_(|n| n * 3).also_(|n| *n += 1);
        assert_eq!(v, 7);
    }
}
