use time::format_description::well_known::Rfc3339;

/// A UTC timestamp as stored in SQLite.
///
/// Wraps `time::PrimitiveDateTime` so every value is written in a single,
/// offset-free TEXT format: stored timestamps sort and compare correctly
/// inside SQL (the due-queries depend on this), which a raw
/// `OffsetDateTime` with a stray non-UTC offset would break. Conversion
/// from [`time::OffsetDateTime`] normalizes to UTC; conversion back assumes
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, sqlx::Type)]
#[sqlx(transparent)]
pub struct DateTime(time::PrimitiveDateTime);

impl From<time::OffsetDateTime> for DateTime {
    fn from(value: time::OffsetDateTime) -> Self {
        let utc = value.to_offset(time::UtcOffset::UTC);
        Self(time::PrimitiveDateTime::new(utc.date(), utc.time()))
    }
}

impl From<DateTime> for time::OffsetDateTime {
    fn from(value: DateTime) -> Self {
        value.0.assume_utc()
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.assume_utc().format(&Rfc3339) {
            Ok(formatted) => f.write_str(&formatted),
            Err(_) => Err(std::fmt::Error),
        }
    }
}
