use comfy_table::Color;
use llmcost::engine::{ContentUnit, ContextWindowResult, SortMode, UsagePercent};
use serde::Serialize;

use super::format::{
    create_styled_table, format_compact, format_cost, format_cost_precise, format_decimal,
    format_number, header_cell, right_cell, styled_cell, tint,
};
use super::{CatalogInfo, TableOptions, print_footer};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContextReport {
    pub(crate) catalog: CatalogInfo,
    pub(crate) size: f64,
    pub(crate) unit: ContentUnit,
    pub(crate) sort: SortMode,
    pub(crate) token_count: u64,
    pub(crate) max_context: u64,
    pub(crate) fitting_models: usize,
    pub(crate) results: Vec<ContextWindowResult>,
}

fn usage_cell_text(usage: UsagePercent, opts: &TableOptions) -> String {
    match usage {
        UsagePercent::Finite(v) => format!("{}%", format_decimal(v, 1, opts.number_format)),
        UsagePercent::Overflow => usage.to_string(),
    }
}

pub(crate) fn print_context_table(report: &ContextReport, opts: TableOptions) {
    let c = opts.use_color;
    let nf = opts.number_format;
    let green = tint(c, Color::Green);
    let red = tint(c, Color::Red);

    println!("\n  Context Window Fit\n");
    println!(
        "  {} tokens, fits {} of {} models (largest window {})\n",
        format_number(report.token_count, nf),
        report.fitting_models,
        report.results.len(),
        format_compact(report.max_context, nf),
    );

    let mut table = create_styled_table();
    let mut header = vec![
        header_cell("Model", c),
        header_cell("Window", c),
        header_cell("Fits", c),
        header_cell("Usage", c),
        header_cell("Input Cost", c),
    ];
    if !opts.compact {
        header.extend([
            header_cell("Provider", c),
            header_cell("Overflow", c),
            header_cell("$/1M", c),
        ]);
    }
    table.set_header(header);

    for r in &report.results {
        let (fits, fit_color) = if r.is_valid {
            ("yes", green)
        } else {
            ("no", red)
        };
        let mut row = vec![
            styled_cell(&r.model_name, None, false),
            right_cell(&format_compact(r.context_window, nf), None, false),
            styled_cell(fits, fit_color, false),
            right_cell(&usage_cell_text(r.usage_percent, &opts), None, false),
            right_cell(&format_cost_precise(r.input_cost, 4, nf), None, false),
        ];
        if !opts.compact {
            let overflow = if r.overflow_tokens > 0 {
                format_number(r.overflow_tokens, nf)
            } else {
                "-".to_string()
            };
            row.extend([
                styled_cell(&r.provider, None, false),
                right_cell(&overflow, red.filter(|_| r.overflow_tokens > 0), false),
                right_cell(&format_cost(r.price_per_million, nf), None, false),
            ]);
        }
        table.add_row(row);
    }

    println!("{table}");
    print_footer(&report.catalog, c);
}
