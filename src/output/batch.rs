use comfy_table::Color;
use llmcost::engine::{BatchApiInputs, BatchApiResult};
use serde::Serialize;

use super::format::{
    create_styled_table, format_compact, format_cost, format_cost_precise, format_number,
    format_percent, header_cell, right_cell, styled_cell, tint,
};
use super::{CatalogInfo, TableOptions, print_footer};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchReport {
    pub(crate) catalog: CatalogInfo,
    pub(crate) inputs: BatchApiInputs,
    pub(crate) results: Vec<BatchApiResult>,
}

pub(crate) fn print_batch_table(report: &BatchReport, opts: TableOptions) {
    let c = opts.use_color;
    let nf = opts.number_format;
    let green = tint(c, Color::Green);
    let inputs = &report.inputs;

    println!("\n  Batch API Savings\n");
    println!(
        "  {} records x ({} input + {} output tokens)\n",
        format_number(inputs.records, nf),
        format_number(inputs.avg_input_tokens, nf),
        format_number(inputs.avg_output_tokens, nf),
    );

    if report.results.is_empty() {
        println!("  No models with batch pricing.");
        print_footer(&report.catalog, c);
        return;
    }

    let mut table = create_styled_table();
    let mut header = vec![
        header_cell("Model", c),
        header_cell("Real-time", c),
        header_cell("Batch", c),
        header_cell("Savings", c),
        header_cell("%", c),
    ];
    if !opts.compact {
        header.extend([
            header_cell("Per Record", c),
            header_cell("Discount", c),
            header_cell("Tokens In", c),
            header_cell("Tokens Out", c),
        ]);
    }
    table.set_header(header);

    for r in &report.results {
        // Near-zero savings are shown dimmed rather than green
        let savings_color = if r.is_trivial_savings {
            tint(c, Color::DarkGrey)
        } else {
            green
        };
        let mut row = vec![
            styled_cell(&r.model_name, None, false),
            right_cell(&format_cost(r.cost_real_time, nf), None, false),
            right_cell(&format_cost(r.cost_batch, nf), None, false),
            right_cell(&format_cost(r.savings, nf), savings_color, false),
            right_cell(&format_percent(r.savings_percent, nf), savings_color, false),
        ];
        if !opts.compact {
            row.extend([
                right_cell(&format_cost_precise(r.cost_per_record, 6, nf), None, false),
                right_cell(&format_percent(r.batch_discount, nf), None, false),
                right_cell(&format_compact(r.total_input_tokens, nf), None, false),
                right_cell(&format_compact(r.total_output_tokens, nf), None, false),
            ]);
        }
        table.add_row(row);
    }

    println!("{table}");
    print_footer(&report.catalog, c);
}
