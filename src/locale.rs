//! Locale-aware parsing for marketplace exports.
//!
//! Turkish exports format amounts as `1.250,50` (dot thousands, comma
//! decimal) and dates as `DD/MM/YYYY`, sometimes with a trailing time.

/// Parse a number formatted with `.` as thousands separator and `,` as
/// decimal separator. Malformed input resolves to `0.0` — spreadsheet
/// ingestion is best-effort and must never fail a whole file over one cell.
pub fn parse_locale_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    let normalized = cleaned.replace('.', "").replace(',', ".");
    normalized.parse().unwrap_or(0.0)
}

/// Lowercase and fold Turkish accented characters to ASCII so that
/// free-text matching ("Çekirdek 500 Gr") is accent-insensitive.
pub fn fold_turkish(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'Ç' | 'ç' => 'c',
            'Ğ' | 'ğ' => 'g',
            'I' | 'ı' => 'i',
            'İ' => 'i',
            'Ö' | 'ö' => 'o',
            'Ş' | 'ş' => 's',
            'Ü' | 'ü' => 'u',
            _ => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Normalize a source date to ISO `YYYY-MM-DD`.
///
/// `DD/MM/YYYY` (optionally followed by a time) is rewritten; anything else
/// non-empty passes through unchanged; empty input resolves to today.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return today();
    }
    if raw.contains('/') {
        let date_part = raw.split(' ').next().unwrap_or(raw);
        let parts: Vec<&str> = date_part.split('/').collect();
        if parts.len() == 3 {
            return format!("{}-{}-{}", parts[2], parts[1], parts[0]);
        }
    }
    // Spreadsheet date cells come through the reader as bare day serials
    // like "45672" or "45672,605". Bare years stay outside the window.
    if let Ok(serial) = raw.replace(',', ".").parse::<f64>() {
        if (20000.0..80000.0).contains(&serial) {
            return excel_serial_to_date(serial);
        }
    }
    raw.to_string()
}

/// Convert an Excel day serial to ISO `YYYY-MM-DD`.
pub fn excel_serial_to_date(serial: f64) -> String {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = chrono::NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default();
    let date = base + chrono::Duration::days(serial as i64);
    date.format("%Y-%m-%d").to_string()
}

/// Today as ISO `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Current month as `YYYY-MM`, used as the default report window.
pub fn current_month() -> String {
    chrono::Local::now().format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale_number() {
        assert_eq!(parse_locale_number("1.250,50"), 1250.50);
        assert_eq!(parse_locale_number("450"), 450.0);
        assert_eq!(parse_locale_number("12,5"), 12.5);
        assert_eq!(parse_locale_number(""), 0.0);
        assert_eq!(parse_locale_number("abc"), 0.0);
    }

    #[test]
    fn test_parse_locale_number_strips_currency() {
        assert_eq!(parse_locale_number("₺1.250,50"), 1250.50);
        assert_eq!(parse_locale_number("1.250,50 TL"), 1250.50);
        assert_eq!(parse_locale_number("-42,50"), -42.5);
    }

    #[test]
    fn test_fold_turkish() {
        assert_eq!(fold_turkish("Çekirdek Öğütülmüş"), "cekirdek ogutulmus");
        assert_eq!(fold_turkish("KAHVE"), "kahve");
        assert_eq!(fold_turkish("Şeker 1 KG"), "seker 1 kg");
    }

    #[test]
    fn test_normalize_date_dmy() {
        assert_eq!(normalize_date("15/01/2025"), "2025-01-15");
        assert_eq!(normalize_date("15/01/2025 14:32"), "2025-01-15");
    }

    #[test]
    fn test_normalize_date_passthrough() {
        assert_eq!(normalize_date("2025-01-15"), "2025-01-15");
    }

    #[test]
    fn test_normalize_date_excel_serial() {
        assert_eq!(normalize_date("45672"), "2025-01-15");
        assert_eq!(normalize_date("45672,605"), "2025-01-15");
        assert_eq!(normalize_date("45672.605"), "2025-01-15");
        // A bare year is not a day serial.
        assert_eq!(normalize_date("2025"), "2025");
    }

    #[test]
    fn test_excel_serial_to_date() {
        assert_eq!(excel_serial_to_date(45658.0), "2025-01-01");
        assert_eq!(excel_serial_to_date(44927.0), "2023-01-01");
    }

    #[test]
    fn test_normalize_date_empty_is_today() {
        let d = normalize_date("");
        assert_eq!(d, today());
        assert_eq!(d.len(), 10);
    }
}
