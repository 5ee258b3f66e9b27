use llmcost::catalog::Model;
use serde::Serialize;

use super::format::{
    create_styled_table, format_compact, format_cost, header_cell, right_cell, styled_cell,
};
use super::{CatalogInfo, TableOptions, print_footer};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ModelsReport {
    pub(crate) catalog: CatalogInfo,
    pub(crate) models: Vec<Model>,
}

fn optional_price(price: Option<f64>, opts: &TableOptions) -> String {
    match price {
        Some(p) if p > 0.0 => format_cost(p, opts.number_format),
        _ => "-".to_string(),
    }
}

pub(crate) fn print_models_table(report: &ModelsReport, opts: TableOptions) {
    let c = opts.use_color;
    let nf = opts.number_format;

    let mut table = create_styled_table();
    let mut header = vec![
        header_cell("ID", c),
        header_cell("Provider", c),
        header_cell("Input/1M", c),
        header_cell("Output/1M", c),
        header_cell("Context", c),
    ];
    if !opts.compact {
        header.extend([
            header_cell("Cached/1M", c),
            header_cell("Batch In/1M", c),
            header_cell("Batch Out/1M", c),
            header_cell("Latency", c),
        ]);
    }
    table.set_header(header);

    for m in &report.models {
        let mut row = vec![
            styled_cell(&m.id, None, false),
            styled_cell(&m.provider, None, false),
            right_cell(&format_cost(m.pricing.input_1m, nf), None, false),
            right_cell(&format_cost(m.pricing.output_1m, nf), None, false),
            right_cell(&format_compact(m.declared_context_window(), nf), None, false),
        ];
        if !opts.compact {
            row.extend([
                right_cell(&optional_price(m.pricing.cached_input_1m, &opts), None, false),
                right_cell(&optional_price(m.pricing.batch_input_1m, &opts), None, false),
                right_cell(&optional_price(m.pricing.batch_output_1m, &opts), None, false),
                right_cell(&format!("{:.2}", m.latency_index()), None, false),
            ]);
        }
        table.add_row(row);
    }

    println!("\n  Pricing Catalog\n");
    println!("{table}");
    print_footer(&report.catalog, c);
}
