//! Утилиты форматирования чисел для таблиц и графиков (формат pt-BR)

/// Заглушка для отсутствующих и нечисловых значений
pub const EMPTY_CELL: &str = "-";

/// Форматирует число с разделителем тысяч (точка) и десятичной запятой
///
/// Нечисловые значения (`NaN`, бесконечность) дают [`EMPTY_CELL`].
///
/// # Примеры
///
/// ```rust,ignore
/// use frontend::shared::components::table::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1.234,57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    if !value.is_finite() {
        return EMPTY_CELL.to_string();
    }

    let formatted = format!("{:.*}", decimals.min(6) as usize, value);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    // Вставляем точку каждые 3 цифры с конца целой части
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    // "-0" после округления не показываем
    let sign = if digits.chars().all(|c| c == '0')
        && decimal_part.map_or(true, |d| d.chars().all(|c| c == '0'))
    {
        ""
    } else {
        sign
    };

    match decimal_part {
        Some(d) => format!("{}{},{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Денежное значение: `R$ 1.234.567,89`
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return EMPTY_CELL.to_string();
    }
    format!("R$ {}", format_number_with_decimals(value, 2))
}

/// Целое число с разделителем тысяч
pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

/// Процент с одним знаком: `12,5%`; `None` и нечисловые -> [`EMPTY_CELL`]
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}%", format_number_with_decimals(v, 1)),
        _ => EMPTY_CELL.to_string(),
    }
}
