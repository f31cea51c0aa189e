//! Display formatting for money, quantities and dates.

use chrono::NaiveDate;

/// Thousands separated with commas, fixed decimals.
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (sign, digits) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer, fraction) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    // "-0.00" reads as a loss
    let sign = if grouped.chars().all(|c| c == '0' || c == ',')
        && fraction.map_or(true, |f| f.chars().all(|c| c == '0'))
    {
        ""
    } else {
        sign
    };

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

pub fn format_money(value: f64) -> String {
    format_number(value, 2)
}

/// Whole quantities without decimals, fractional ones with up to three.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format_number(value, 0)
    } else {
        let text = format_number(value, 3);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// "2024-03-15" or "2024-03-15T14:02:26Z" -> "15 Mar 2024"
pub fn format_date(value: &str) -> String {
    let date_part = value.split('T').next().unwrap_or(value);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d %b %Y").to_string(),
        Err(_) => value.to_string(),
    }
}

pub fn parse_amount(text: &str) -> f64 {
    text.trim().replace(',', "").parse().unwrap_or(0.0)
}

/// Today's date in the browser, `YYYY-MM-DD`.
pub fn today_iso() -> String {
    let iso: String = js_sys::Date::new_0().to_iso_string().into();
    iso.chars().take(10).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "1,234.56");
        assert_eq!(format_money(1234567.891), "1,234,567.89");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-1234.5), "-1,234.50");
        assert_eq!(format_money(-0.001), "0.00");
        assert_eq!(format_money(999.0), "999.00");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(12000.0), "12,000");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(0.125), "0.125");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15 Mar 2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15 Mar 2024");
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,250.50"), 1250.5);
        assert_eq!(parse_amount(" 3 "), 3.0);
        assert_eq!(parse_amount("abc"), 0.0);
    }
}
