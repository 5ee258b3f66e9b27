use comfy_table::{Cell, Color};
use llmcost::engine::{
    AggressiveComparison, RoutedCost, SensitivityAnalysis, SimulationResult, UsageScenario,
};
use llmcost::insights::ScenarioProfile;
use serde::Serialize;

use super::format::{
    create_styled_table, format_compact, format_cost, format_number, format_percent, header_cell,
    right_cell, styled_cell, tint,
};
use super::{CatalogInfo, EngineInfo, TableOptions, print_footer};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SimulationReport {
    pub(crate) scenario_id: String,
    pub(crate) engine: EngineInfo,
    pub(crate) catalog: CatalogInfo,
    pub(crate) usage: UsageScenario,
    pub(crate) profile: ScenarioProfile,
    pub(crate) results: Vec<SimulationResult>,
    pub(crate) best_value: Option<String>,
    pub(crate) comparison: Option<AggressiveComparison>,
    pub(crate) sensitivity: Vec<SensitivityAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) routing: Option<RoutedCost>,
}

impl SimulationReport {
    fn best_sensitivity(&self) -> Option<&SensitivityAnalysis> {
        let best = self.best_value.as_deref()?;
        self.sensitivity.iter().find(|s| s.model_id == best)
    }
}

fn print_ranking_table(report: &SimulationReport, opts: &TableOptions) {
    let c = opts.use_color;
    let nf = opts.number_format;
    let green = tint(c, Color::Green);
    let yellow = tint(c, Color::Yellow);

    let mut table = create_styled_table();
    if opts.compact {
        table.set_header(vec![
            header_cell("#", c),
            header_cell("Model", c),
            header_cell("Monthly", c),
            header_cell("Score", c),
        ]);
    } else {
        table.set_header(vec![
            header_cell("#", c),
            header_cell("Model", c),
            header_cell("Provider", c),
            header_cell("Daily", c),
            header_cell("Monthly", c),
            header_cell("Context", c),
            header_cell("Latency", c),
            header_cell("Score", c),
            header_cell("Notes", c),
        ]);
    }

    for (i, r) in report.results.iter().enumerate() {
        let is_best = report.best_value.as_deref() == Some(r.model_id.as_str());
        let name_color = if is_best { yellow } else { None };
        let rank = (i + 1).to_string();
        let score = format!("{:.4}", r.value_score);

        if opts.compact {
            table.add_row(vec![
                right_cell(&rank, None, false),
                styled_cell(&r.model_name, name_color, is_best),
                right_cell(&format_cost(r.monthly_cost, nf), green, false),
                right_cell(&score, None, is_best),
            ]);
        } else {
            table.add_row(vec![
                right_cell(&rank, None, false),
                styled_cell(&r.model_name, name_color, is_best),
                Cell::new(&r.provider),
                right_cell(&format_cost(r.daily_costs.total, nf), None, false),
                right_cell(&format_cost(r.monthly_cost, nf), green, false),
                right_cell(&format_compact(r.context_window, nf), None, false),
                right_cell(&format!("{:.2}", r.latency_index), None, false),
                right_cell(&score, None, is_best),
                Cell::new(&r.score_explanation),
            ]);
        }
    }

    println!("{table}");
}

fn print_comparison(comparison: &AggressiveComparison, opts: &TableOptions) {
    let nf = opts.number_format;
    println!(
        "\n  {} vs {}: {}/mo difference",
        comparison.winner.model_name,
        comparison.runner_up.model_name,
        format_cost(comparison.monthly_savings, nf)
    );
    println!("  {}", comparison.savings_narration);
    if let Some(context) = &comparison.context_narration {
        println!("  {context}");
    }
}

fn print_sensitivity(sensitivity: &SensitivityAnalysis, opts: &TableOptions) {
    let c = opts.use_color;
    let nf = opts.number_format;
    let green = tint(c, Color::Green);

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Traffic", c),
        header_cell("Monthly", c),
        header_cell("Annual", c),
    ]);
    for (label, monthly, annual) in [
        ("1x", sensitivity.cost_1x, sensitivity.annual_cost_1x),
        ("2x", sensitivity.cost_2x, sensitivity.annual_cost_2x),
        ("3x", sensitivity.cost_3x, sensitivity.annual_cost_3x),
    ] {
        table.add_row(vec![
            Cell::new(label),
            right_cell(&format_cost(monthly, nf), None, false),
            right_cell(&format_cost(annual, nf), green, false),
        ]);
    }

    println!("\n  Growth projection for {}\n", sensitivity.model_name);
    println!("{table}");
}

fn print_routing(routing: &RoutedCost, opts: &TableOptions) {
    let nf = opts.number_format;
    println!(
        "\n  Routing {}% to {} and the rest to {}: {}/mo, saves {} ({}) vs {} alone",
        routing.primary_percent,
        routing.primary_id,
        routing.secondary_id,
        format_cost(routing.blended_monthly_cost, nf),
        format_cost(routing.savings_vs_secondary, nf),
        format_percent(routing.savings_percent, nf),
        routing.secondary_id,
    );
}

fn print_profile(report: &SimulationReport) {
    let profile = &report.profile;
    let workload = profile
        .workload
        .map_or_else(|| "n/a".to_string(), |w| w.to_string());
    println!(
        "\n  Segment: {} ({}) | Caching: {} | Workload: {}",
        profile.segment,
        profile.segment.description(),
        profile.sophistication,
        workload
    );
}

pub(crate) fn print_simulation(report: &SimulationReport, opts: TableOptions) {
    let nf = opts.number_format;
    let usage = &report.usage;

    println!("\n  Chatbot Cost Simulation  {}\n", report.scenario_id);
    println!(
        "  {} messages/day, {} input + {} output tokens/message, {} cache hits\n",
        format_number(usage.messages_per_day, nf),
        format_number(usage.tokens_input_per_message, nf),
        format_number(usage.tokens_output_per_message, nf),
        format_percent(usage.cache_hit_rate * 100.0, nf),
    );

    print_ranking_table(report, &opts);

    if let Some(comparison) = &report.comparison {
        print_comparison(comparison, &opts);
    }
    if !opts.compact
        && let Some(sensitivity) = report.best_sensitivity()
    {
        print_sensitivity(sensitivity, &opts);
    }
    if let Some(routing) = &report.routing {
        print_routing(routing, &opts);
    }
    print_profile(report);

    let weights = &report.engine.weight_description;
    println!(
        "  Value score: {}% cost efficiency, {}% context capacity ({} v{})",
        weights.cost_efficiency_percent,
        weights.context_capacity_percent,
        report.engine.name,
        report.engine.version
    );
    print_footer(&report.catalog, opts.use_color);
}
