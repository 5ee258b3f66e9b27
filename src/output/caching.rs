use comfy_table::Color;
use llmcost::engine::{CachingRoiInputs, CachingRoiResult};
use serde::Serialize;

use super::format::{
    create_styled_table, format_cost, format_number, format_percent, header_cell, right_cell,
    styled_cell, tint,
};
use super::{CatalogInfo, TableOptions, print_footer};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CachingReport {
    pub(crate) catalog: CatalogInfo,
    pub(crate) inputs: CachingRoiInputs,
    pub(crate) results: Vec<CachingRoiResult>,
}

pub(crate) fn print_caching_table(report: &CachingReport, opts: TableOptions) {
    let c = opts.use_color;
    let nf = opts.number_format;
    let green = tint(c, Color::Green);
    let inputs = &report.inputs;

    println!("\n  Prompt Caching ROI\n");
    println!(
        "  {} requests/day, {} static + {} dynamic input, {} output tokens, {} writes\n",
        format_number(inputs.requests_per_day, nf),
        format_number(inputs.static_tokens, nf),
        format_number(inputs.dynamic_tokens, nf),
        format_number(inputs.output_tokens, nf),
        format_percent(inputs.cache_write_percent, nf),
    );

    if report.results.is_empty() {
        println!("  No models with cached-input pricing.");
        print_footer(&report.catalog, c);
        return;
    }

    let mut table = create_styled_table();
    let mut header = vec![
        header_cell("Model", c),
        header_cell("No Cache", c),
        header_cell("Cached", c),
        header_cell("Savings/mo", c),
        header_cell("%", c),
    ];
    if !opts.compact {
        header.extend([
            header_cell("Annual", c),
            header_cell("Discount", c),
            header_cell("Break-even", c),
        ]);
    }
    table.set_header(header);

    for r in &report.results {
        let savings_color = if r.monthly_savings > 0.0 {
            green
        } else {
            tint(c, Color::Red)
        };
        let mut row = vec![
            styled_cell(&r.model_name, None, false),
            right_cell(&format_cost(r.cost_no_cache, nf), None, false),
            right_cell(&format_cost(r.cost_cached, nf), None, false),
            right_cell(&format_cost(r.monthly_savings, nf), savings_color, false),
            right_cell(&format_percent(r.savings_percent, nf), savings_color, false),
        ];
        if !opts.compact {
            row.extend([
                right_cell(&format_cost(r.annual_savings, nf), None, false),
                right_cell(&format_percent(r.cache_discount, nf), None, false),
                right_cell(
                    &format!("{} req", format_number(r.break_even_requests, nf)),
                    None,
                    false,
                ),
            ]);
        }
        table.add_row(row);
    }

    println!("{table}");
    print_footer(&report.catalog, c);
}
