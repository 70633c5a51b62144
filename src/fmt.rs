/// Format a float as Turkish lira with locale separators: ₺1.234,56
pub fn money(val: f64) -> String {
    let negative = val < 0.0;
    let abs = val.abs();
    let cents = format!("{:.2}", abs);
    let parts: Vec<&str> = cents.split('.').collect();
    let int_part = parts[0];
    let dec_part = parts[1];

    let mut with_dots = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_dots.push('.');
        }
        with_dots.push(c);
    }
    let with_dots: String = with_dots.chars().rev().collect();

    if negative {
        format!("-₺{with_dots},{dec_part}")
    } else {
        format!("₺{with_dots},{dec_part}")
    }
}

/// Format a weight in kilograms: 12,50 KG
pub fn kg(val: f64) -> String {
    format!("{:.2} KG", val).replace('.', ",")
}

/// Format a percentage with one decimal: %25,0
pub fn percent(val: f64) -> String {
    format!("%{:.1}", val).replace('.', ",")
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "₺1.234,56");
        assert_eq!(money(-500.00), "-₺500,00");
        assert_eq!(money(0.0), "₺0,00");
        assert_eq!(money(1000000.99), "₺1.000.000,99");
        assert_eq!(money(42.10), "₺42,10");
    }

    #[test]
    fn test_kg_and_percent() {
        assert_eq!(kg(12.5), "12,50 KG");
        assert_eq!(percent(25.0), "%25,0");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
    }
}
