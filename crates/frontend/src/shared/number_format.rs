//! Форматирование сумм

/// Группирует цифры целой части по разрядам через пробел
///
/// # Примеры
///
/// ```
/// use finance_frontend::shared::number_format::number_with_space;
/// assert_eq!(number_with_space(1234567.0), "1 234 567");
/// assert_eq!(number_with_space(1500.5), "1 500.5");
/// ```
pub fn number_with_space(sum: f64) -> String {
    // `{}` у f64 не печатает ".0" для целых значений
    let formatted = sum.to_string();
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, decimal_part) = match unsigned.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}
