//! Utilities for date and time formatting

/// Format ISO datetime string to DD.MM.YYYY HH:MM:SS format
/// Example: "2024-03-15T14:02:26.123Z" -> "15.03.2024 14:02:26"
///
/// A bare date is formatted as DD.MM.YYYY, anything else is returned as is.
pub fn format_datetime(datetime_str: &str) -> String {
    match datetime_str.split_once('T') {
        Some((date_part, time_part)) => match split_date(date_part) {
            Some((year, month, day)) => {
                // Дробная часть секунд и смещение зоны (Z, +hh:mm, -hh:mm) отбрасываются
                let time = time_part
                    .split(['.', 'Z', '+', '-'])
                    .next()
                    .unwrap_or(time_part);
                format!("{}.{}.{} {}", day, month, year, time)
            }
            None => datetime_str.to_string(),
        },
        None => format_date(datetime_str),
    }
}

/// Format ISO date string to DD.MM.YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    match split_date(date_part) {
        Some((year, month, day)) => format!("{}.{}.{}", day, month, year),
        None => date_str.to_string(),
    }
}

fn split_date(date_part: &str) -> Option<(&str, &str, &str)> {
    let (year, rest) = date_part.split_once('-')?;
    let (month, day) = rest.split_once('-')?;
    if year.len() == 4 && month.len() == 2 && day.len() == 2 {
        Some((year, month, day))
    } else {
        None
    }
}
