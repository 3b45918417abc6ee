// Loose ISO-8601 timestamp parsing
use crate::model::TimestampError;
use crate::utils::digit_runs;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

const COMPONENTS: [&str; 6] = ["year", "month", "day", "hour", "minute", "second"];

/// Numeric components of a timestamp, in the order they appear in the text.
///
/// `month` is the 1-based calendar month as written. `fraction` keeps the
/// raw digits following the seconds, read as a decimal fraction of a second.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampParts {
    pub year: Option<u32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub fraction: Option<String>,
}

impl TimestampParts {
    /// Splits `text` on runs of non-digits and assigns the pieces positionally.
    /// Anything after the seventh piece is ignored.
    pub fn split(text: &str) -> Result<Self, TimestampError> {
        let runs = digit_runs(text);
        if runs.is_empty() {
            return Err(TimestampError::Empty);
        }

        let mut numbers = [None; 6];
        for (slot, (name, run)) in numbers.iter_mut().zip(COMPONENTS.iter().zip(&runs)) {
            let value = run.parse::<u32>().map_err(|_| TimestampError::InvalidNumber {
                component: *name,
                value: run.to_string(),
            })?;
            *slot = Some(value);
        }

        let [year, month, day, hour, minute, second] = numbers;
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            fraction: runs.get(6).map(|run| run.to_string()),
        })
    }

    /// Builds the UTC date/time.
    ///
    /// Year, month and day are required; hour, minute, second and fraction
    /// default to zero. Values are validated instead of rolled over, so
    /// `month = 13` is an error rather than January of the next year.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, TimestampError> {
        let year = self.year.ok_or(TimestampError::MissingComponent("year"))?;
        let month = self.month.ok_or(TimestampError::MissingComponent("month"))?;
        let day = self.day.ok_or(TimestampError::MissingComponent("day"))?;

        if !(1..=12).contains(&month) {
            return Err(TimestampError::OutOfRange {
                component: "month",
                value: month,
            });
        }
        let date = calendar_date(year, month, day)?;

        let hour = bounded("hour", self.hour.unwrap_or(0), 23)?;
        let minute = bounded("minute", self.minute.unwrap_or(0), 59)?;
        let second = bounded("second", self.second.unwrap_or(0), 59)?;
        let nanos = self.fraction.as_deref().map_or(0, fraction_nanos);

        let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos).ok_or(
            TimestampError::OutOfRange {
                component: "second",
                value: second,
            },
        )?;

        Ok(Utc.from_utc_datetime(&date.and_time(time)))
    }
}

/// Parses a loosely delimited ISO-8601 timestamp such as
/// `2021-03-05T14:30:00.250Z` into a UTC date/time.
///
/// Any run of non-digit characters works as a separator.
pub fn parse_iso_string(text: &str) -> Result<DateTime<Utc>, TimestampError> {
    TimestampParts::split(text)?.to_datetime()
}

fn calendar_date(year: u32, month: u32, day: u32) -> Result<NaiveDate, TimestampError> {
    let out_of_range_year = TimestampError::OutOfRange {
        component: "year",
        value: year,
    };
    let signed_year = i32::try_from(year).map_err(|_| out_of_range_year.clone())?;

    match NaiveDate::from_ymd_opt(signed_year, month, day) {
        Some(date) => Ok(date),
        // month is already validated, so a missing first day means the year is unsupported
        None if NaiveDate::from_ymd_opt(signed_year, month, 1).is_none() => Err(out_of_range_year),
        None => Err(TimestampError::OutOfRange {
            component: "day",
            value: day,
        }),
    }
}

fn bounded(component: &'static str, value: u32, max: u32) -> Result<u32, TimestampError> {
    if value > max {
        return Err(TimestampError::OutOfRange { component, value });
    }
    Ok(value)
}

/// Decimal fraction digits to nanoseconds; digits past the ninth are dropped.
fn fraction_nanos(digits: &str) -> u32 {
    digits
        .bytes()
        .take(9)
        .chain(std::iter::repeat(b'0'))
        .take(9)
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}
