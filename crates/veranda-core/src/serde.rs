// Module name shadows the `serde` crate — use `::serde` for the external crate.
use ::serde::Serializer;
use chrono::{DateTime, SecondsFormat, Utc};

/// Wire format for timestamps: RFC 3339 with millisecond precision, the
/// shape the mobile clients parse.
pub fn iso_millis(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current wall-clock time in the wire format.
pub fn iso_now() -> String {
    iso_millis(&Utc::now())
}

/// `serialize_with` adapter for `DateTime<Utc>` fields.
pub fn to_rfc3339_ms<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&iso_millis(dt))
}
