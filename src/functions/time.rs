use chrono::{
    DateTime, Duration, FixedOffset, Months, NaiveDate, NaiveTime, Offset, TimeZone, Utc,
};

#[derive(Clone, Copy, Debug)]
pub struct ResetTime {
    pub hour: u32,
    pub minute: u32,
    pub timezone_offset_secs: i32,
}

impl ResetTime {
    pub const fn new(hour: u32, minute: u32, timezone_offset_secs: i32) -> Self {
        Self {
            hour,
            minute,
            timezone_offset_secs,
        }
    }

    pub const fn brt(hour: u32, minute: u32) -> Self {
        Self::new(hour, minute, -3 * 60 * 60)
    }

    pub fn timezone_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.timezone_offset_secs).unwrap_or_else(|| Utc.fix())
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl Default for ResetTime {
    fn default() -> Self {
        Self::brt(21, 0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetPeriod {
    Daily,
    Weekly,
    Monthly,
}

/// Discord timestamp in short date/time format (f)
pub fn describe_absolute(target: DateTime<Utc>) -> String {
    format!("<t:{}:f>", target.timestamp())
}

/// Discord timestamp in relative format (R)
pub fn describe_relative(target: DateTime<Utc>) -> String {
    format!("<t:{}:R>", target.timestamp())
}

pub fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses an RFC3339 timestamp and formats it relatively for embeds
pub fn describe_relative_from_str(value: &str) -> Option<String> {
    parse_rfc3339(value).map(describe_relative)
}

/// Calculates the next reset after `reference`.
///
/// Daily resets land on the next occurrence of the reset time; weekly and monthly
/// resets are counted from the reference's local date.
pub fn next_reset_from(
    reference: DateTime<Utc>,
    period: ResetPeriod,
    reset_config: &ResetTime,
) -> DateTime<Utc> {
    let offset = reset_config.timezone_offset();
    let reset_time = reset_config.as_naive_time();
    let local = reference.with_timezone(&offset);
    let date = local.date_naive();

    let target_date = match period {
        ResetPeriod::Daily => {
            if local.time() < reset_time {
                date
            } else {
                date + Duration::days(1)
            }
        }
        ResetPeriod::Weekly => date + Duration::days(7),
        ResetPeriod::Monthly => add_one_month(date),
    };

    offset
        .from_local_datetime(&target_date.and_time(reset_time))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(reference + Duration::days(1))
}

/// Adds one month, clamping to the last day of the target month
pub fn add_one_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

/// Parses short durations such as `30m`, `12h`, `7d` or `2w`.
pub fn parse_duration(value: &str) -> Option<Duration> {
    let trimmed = value.trim();
    if trimmed.len() < 2 || !trimmed.is_ascii() {
        return None;
    }
    let (amount, unit) = trimmed.split_at(trimmed.len() - 1);
    let amount: i64 = amount.parse().ok().filter(|amount| *amount > 0)?;
    match unit.to_ascii_lowercase().as_str() {
        "m" => Duration::try_minutes(amount),
        "h" => Duration::try_hours(amount),
        "d" => Duration::try_days(amount),
        "w" => Duration::try_weeks(amount),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_reset_before_and_after_reset_time() {
        let reset = ResetTime::brt(21, 0);
        // 20:00 BRT
        let before = Utc.with_ymd_and_hms(2026, 10, 18, 23, 0, 0).unwrap();
        assert_eq!(
            next_reset_from(before, ResetPeriod::Daily, &reset),
            Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap()
        );
        // 22:00 BRT
        let after = Utc.with_ymd_and_hms(2026, 10, 19, 1, 0, 0).unwrap();
        assert_eq!(
            next_reset_from(after, ResetPeriod::Daily, &reset),
            Utc.with_ymd_and_hms(2026, 10, 20, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn monthly_reset_clamps_day() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert_eq!(add_one_month(date), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        let leap = NaiveDate::from_ymd_opt(2028, 1, 31).unwrap();
        assert_eq!(add_one_month(leap), NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    }

    #[test]
    fn weekly_reset_is_seven_local_days_later() {
        let reset = ResetTime::brt(21, 0);
        let reference = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        assert_eq!(
            next_reset_from(reference, ResetPeriod::Weekly, &reset),
            Utc.with_ymd_and_hms(2026, 10, 26, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn durations_parse() {
        assert_eq!(parse_duration("30m"), Some(Duration::minutes(30)));
        assert_eq!(parse_duration("2W"), Some(Duration::weeks(2)));
        assert_eq!(parse_duration("0d"), None);
        assert_eq!(parse_duration("10y"), None);
        assert_eq!(parse_duration("h"), None);
    }

    #[test]
    fn rfc3339_round_trip() {
        let now = Utc.with_ymd_and_hms(2026, 5, 5, 5, 5, 5).unwrap();
        assert_eq!(parse_rfc3339(&now.to_rfc3339()), Some(now));
        assert!(describe_relative_from_str("garbage").is_none());
    }
}
