use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
pub(crate) struct NumberFormat {
    group_sep: char,
    decimal_sep: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::new(',', '.')
    }
}

impl NumberFormat {
    const fn new(group_sep: char, decimal_sep: char) -> Self {
        NumberFormat {
            group_sep,
            decimal_sep,
        }
    }

    /// Separators for a language tag such as `de` or `fr-CA`.
    ///
    /// Only the language part is considered; a missing or blank tag keeps
    /// the `1,234.56` default.
    pub(crate) fn from_locale(locale: Option<&str>) -> Result<Self, AppError> {
        let tag = locale.map(str::trim).unwrap_or_default();
        if tag.is_empty() {
            return Ok(NumberFormat::default());
        }
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or(tag)
            .to_ascii_lowercase();

        match language.as_str() {
            "en" | "zh" | "ja" => Ok(NumberFormat::default()),
            "de" | "es" | "it" | "pt" => Ok(NumberFormat::new('.', ',')),
            "fr" | "ru" => Ok(NumberFormat::new(' ', ',')),
            _ => Err(AppError::UnsupportedLocale {
                input: tag.to_string(),
            }),
        }
    }
}

fn group_digits(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(sep);
        }
        grouped.push(c);
    }
    grouped
}

pub(super) fn format_number(n: u64, format: NumberFormat) -> String {
    group_digits(&n.to_string(), format.group_sep)
}

/// Format number in compact form (K, M, B suffixes)
pub(super) fn format_compact(n: u64, format: NumberFormat) -> String {
    let (scaled, suffix) = if n >= 1_000_000_000 {
        (n as f64 / 1_000_000_000.0, "B")
    } else if n >= 1_000_000 {
        (n as f64 / 1_000_000.0, "M")
    } else if n >= 1_000 {
        (n as f64 / 1_000.0, "K")
    } else {
        return n.to_string();
    };
    format!("{}{suffix}", format_decimal(scaled, 1, format))
}

/// Fixed-point number with locale separators
pub(super) fn format_decimal(value: f64, decimals: usize, format: NumberFormat) -> String {
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), ""));
    let sign = if value < 0.0 && raw.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        "-"
    } else {
        ""
    };
    let grouped = group_digits(int_part, format.group_sep);
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}{}{frac_part}", format.decimal_sep)
    }
}

pub(super) fn format_cost(cost: f64, format: NumberFormat) -> String {
    format_cost_precise(cost, 2, format)
}

pub(super) fn format_cost_precise(cost: f64, decimals: usize, format: NumberFormat) -> String {
    let body = format_decimal(cost, decimals, format);
    match body.strip_prefix('-') {
        Some(abs) => format!("-${abs}"),
        None => format!("${body}"),
    }
}

pub(super) fn format_percent(value: f64, format: NumberFormat) -> String {
    format!("{}%", format_decimal(value, 1, format))
}

fn paint(mut cell: Cell, color: Option<Color>, bold: bool) -> Cell {
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

pub(super) fn styled_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    paint(Cell::new(text), color, bold)
}

/// Right-aligned cell for numeric columns
pub(super) fn right_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    paint(
        Cell::new(text).set_alignment(CellAlignment::Right),
        color,
        bold,
    )
}

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    paint(Cell::new(text), tint(use_color, Color::Cyan), true)
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

/// Full UTF-8 borders with a single-line header rule
pub(super) fn create_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);
    table
}

/// `Some(color)` only when color output is on
pub(super) fn tint(use_color: bool, color: Color) -> Option<Color> {
    use_color.then_some(color)
}
