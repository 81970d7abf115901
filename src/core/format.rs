//! Display formatting for reports
//!
//! Currency amounts are rendered Indonesian-style (`Rp 1.234.567`),
//! undefined values as `N/A`, and timestamps in the report time zone.

use crate::domain::{BreakEven, MedRoiError, Result, RoiInput, RoiPercentage};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Placeholder for values that cannot be computed
pub const NOT_AVAILABLE: &str = "N/A";

/// Offset of Western Indonesian Time
pub const WIB_OFFSET_HOURS: i32 = 7;

/// Formats an amount with `.` thousands separators and no decimals
///
/// Rounds half to even.
///
/// ```
/// use medroi::core::format::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(1234567.4), "Rp"), "Rp 1.234.567");
/// assert_eq!(format_currency(dec!(-6000), "Rp"), "Rp -6.000");
/// ```
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp(0);
    let digits = rounded.abs().trunc().to_string();
    let grouped = group_thousands(&digits, '.');
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    if symbol.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{symbol} {sign}{grouped}")
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// `12.3%`, or `N/A` when undefined
pub fn format_percentage(roi: RoiPercentage) -> String {
    match roi {
        RoiPercentage::Defined(v) => format!("{:.1}%", v.round_dp(1)),
        RoiPercentage::Undefined => NOT_AVAILABLE.to_string(),
    }
}

/// Months with one decimal, or `N/A`
pub fn format_months(months: Option<Decimal>) -> String {
    match months {
        Some(m) => format!("{:.1}", m.round_dp(1)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `Year 3`, or `N/A` when not reached within the horizon
pub fn format_break_even(break_even: BreakEven) -> String {
    match break_even {
        BreakEven::Year(y) => format!("Year {y}"),
        BreakEven::NotReached => NOT_AVAILABLE.to_string(),
    }
}

/// Builds the fixed offset for a whole-hour zone
///
/// # Errors
///
/// Returns a configuration error if the offset is outside ±23 hours.
pub fn report_offset(offset_hours: i32) -> Result<FixedOffset> {
    offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            MedRoiError::Configuration(format!(
                "Invalid report timezone offset: {offset_hours} hours"
            ))
        })
}

/// Current time in the report zone
pub fn report_now(offset_hours: i32) -> Result<DateTime<FixedOffset>> {
    Ok(Utc::now().with_timezone(&report_offset(offset_hours)?))
}

/// Short zone label used after timestamps
pub fn zone_label(offset_hours: i32) -> String {
    if offset_hours == WIB_OFFSET_HOURS {
        "WIB".to_string()
    } else {
        format!("UTC{offset_hours:+}")
    }
}

/// `2024-03-05 14:30:00 WIB`
pub fn format_timestamp(at: &DateTime<FixedOffset>, offset_hours: i32) -> String {
    format!(
        "{} {}",
        at.format("%Y-%m-%d %H:%M:%S"),
        zone_label(offset_hours)
    )
}

/// Report file name: `yymmdd hospitalname location consultantname.pdf`
///
/// Characters that are not allowed in file names on common platforms are
/// replaced with `_` and runs of whitespace collapse to one space.
///
/// ```
/// use chrono::NaiveDate;
/// use medroi::core::format::report_file_name;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(
///     report_file_name(date, "RS Sehat", "Jakarta", "Budi"),
///     "240305 RS Sehat Jakarta Budi.pdf"
/// );
/// ```
pub fn report_file_name(date: NaiveDate, hospital: &str, location: &str, consultant: &str) -> String {
    let stem = format!(
        "{} {} {} {}",
        date.format("%y%m%d"),
        sanitize(hospital),
        sanitize(location),
        sanitize(consultant)
    );
    format!("{stem}.pdf")
}

/// File name for a given input on a given date
pub fn report_file_name_for(date: NaiveDate, input: &RoiInput) -> String {
    report_file_name(
        date,
        &input.hospital.name,
        &input.hospital.location,
        &input.consultant.name,
    )
}

fn sanitize(part: &str) -> String {
    let replaced: String = part
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
