//! Date header value (`Date`, `Expires`, `Last-Modified`).
//!
//! An unset timestamp renders the current instant at serialization
//! time, so `Expires` defaults to "now" on every write.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::header::data::millis_to_time;
use crate::header::HeaderData;

// 9999-12-31T23:59:59Z, the last instant an IMF-fixdate can express.
pub(crate) const MAX_HTTP_DATE_SECS: u64 = 253_402_300_799;

/// Format an instant as an IMF-fixdate, clamped to the representable range.
pub fn format_http_date(time: SystemTime) -> String {
    let max = UNIX_EPOCH + Duration::from_secs(MAX_HTTP_DATE_SECS);
    let clamped = time.clamp(UNIX_EPOCH, max);
    httpdate::fmt_http_date(clamped)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Stamp {
    #[default]
    Unset,
    At(SystemTime),
    Verbatim(String),
}

impl From<HeaderData> for Stamp {
    fn from(data: HeaderData) -> Self {
        match data {
            HeaderData::Absent | HeaderData::Millis(0) => Stamp::Unset,
            HeaderData::Millis(ms) => Stamp::At(millis_to_time(ms)),
            HeaderData::Instant(t) if t == UNIX_EPOCH => Stamp::Unset,
            HeaderData::Instant(t) => Stamp::At(t),
            HeaderData::Text(s) if s.trim().is_empty() => Stamp::Unset,
            HeaderData::Text(s) => match httpdate::parse_http_date(&s) {
                Ok(t) => Stamp::At(t),
                Err(_) => Stamp::Verbatim(s),
            },
            other => {
                let text = other.to_text();
                if text.is_empty() {
                    Stamp::Unset
                } else {
                    Stamp::Verbatim(text)
                }
            }
        }
    }
}

/// A header holding one optional instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timestamp {
    stamp: Stamp,
}

impl Timestamp {
    pub fn new(data: HeaderData) -> Self {
        Self { stamp: data.into() }
    }

    /// Timestamps hold a single instant, so adding replaces it.
    pub fn add(&mut self, data: HeaderData) {
        self.set(data);
    }

    pub fn set(&mut self, data: HeaderData) {
        self.stamp = data.into();
    }

    /// The held instant, if one was set and parsed.
    pub fn instant(&self) -> Option<SystemTime> {
        match self.stamp {
            Stamp::At(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        self.stamp == Stamp::Unset
    }

    pub fn serialize(&self) -> String {
        match &self.stamp {
            Stamp::Unset => format_http_date(SystemTime::now()),
            Stamp::At(t) => format_http_date(*t),
            Stamp::Verbatim(s) => s.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_instant() {
        let t = UNIX_EPOCH + Duration::from_secs(784_111_777);
        let stamp = Timestamp::new(t.into());
        assert_eq!(stamp.serialize(), "Sun, 06 Nov 1994 08:49:37 GMT");
        assert_eq!(stamp.instant(), Some(t));
    }

    #[test]
    fn test_pre_epoch_millis_clamp_to_epoch() {
        let stamp = Timestamp::new(HeaderData::Millis(-1_000));
        assert_eq!(stamp.serialize(), "Thu, 01 Jan 1970 00:00:00 GMT");
    }

    #[test]
    fn test_unset_renders_now() {
        for data in [HeaderData::Absent, HeaderData::Millis(0), HeaderData::Instant(UNIX_EPOCH)] {
            let stamp = Timestamp::new(data);
            assert!(stamp.is_unset());

            let before = httpdate::parse_http_date(&format_http_date(SystemTime::now())).unwrap();
            let rendered = stamp.serialize();
            let after = SystemTime::now();

            assert!(rendered.ends_with("GMT"));
            let parsed = httpdate::parse_http_date(&rendered).unwrap();
            assert!(parsed >= before && parsed <= after);
        }
    }

    #[test]
    fn test_text_is_parsed_or_kept() {
        let mut stamp = Timestamp::new("Sun, 06 Nov 1994 08:49:37 GMT".into());
        assert!(stamp.instant().is_some());
        assert_eq!(stamp.serialize(), "Sun, 06 Nov 1994 08:49:37 GMT");

        stamp.set("tomorrow-ish".into());
        assert_eq!(stamp.instant(), None);
        assert_eq!(stamp.serialize(), "tomorrow-ish");
    }

    #[test]
    fn test_millis() {
        let stamp = Timestamp::new(HeaderData::Millis(784_111_777_000));
        assert_eq!(stamp.serialize(), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_clear_resets_to_now() {
        let mut stamp = Timestamp::new(HeaderData::Millis(784_111_777_000));
        stamp.set(HeaderData::Absent);
        assert!(stamp.is_unset());
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(
            format_http_date(UNIX_EPOCH - Duration::from_secs(10)),
            "Thu, 01 Jan 1970 00:00:00 GMT"
        );
    }
}
