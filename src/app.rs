use chrono::Local;
use rayon::prelude::*;
use serde::Serialize;

use llmcost::catalog::{LoadOptions, LoadedCatalog, Model, load_catalog};
use llmcost::engine::{
    BatchApiInputs, CachingRoiInputs, UsageScenario, analyze_context, calculate_aggressive_comparison,
    calculate_all_sensitivity_analysis, calculate_batch, calculate_caching_roi,
    calculate_routed_cost, filter_batch_models, filter_cacheable_models, find_best_value,
    max_context, normalize_to_tokens, simulate_all_models, sort_context_results,
};
use llmcost::insights::ScenarioProfile;
use llmcost::scenario::generate_scenario_id;

use crate::cli::{BatchArgs, CachingArgs, Cli, Commands, ContextArgs, SimulateArgs};
use crate::error::AppError;
use crate::output::{
    BatchReport, CachingReport, CatalogInfo, ContextReport, EngineInfo, ModelsReport,
    NumberFormat, SimulationReport, TableOptions, print_batch_table, print_caching_table,
    print_context_table, print_models_table, print_simulation,
};

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), AppError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(AppError::invalid(
            field,
            format!("must be between {min} and {max}, got {value}"),
        ))
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), AppError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AppError::invalid(
            field,
            format!("must be a non-negative number, got {value}"),
        ))
    }
}

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) catalog: &'a LoadedCatalog,
    /// Catalog models narrowed by `--models`
    pub(crate) models: Vec<Model>,
    pub(crate) number_format: NumberFormat,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(
        cli: &'a Cli,
        catalog: &'a LoadedCatalog,
        number_format: NumberFormat,
    ) -> Result<Self, AppError> {
        for id in catalog.catalog.unknown_ids(&cli.models) {
            tracing::warn!("Ignoring unknown model ID: {id}");
        }
        let models = catalog.catalog.select(&cli.models);
        if models.is_empty() {
            return Err(AppError::NoModels);
        }
        tracing::debug!("Comparing {} models", models.len());

        Ok(Self {
            cli,
            catalog,
            models,
            number_format,
        })
    }

    fn table_options(&self) -> TableOptions {
        TableOptions {
            use_color: self.cli.use_color(),
            compact: self.cli.compact,
            number_format: self.number_format,
        }
    }

    fn catalog_info(&self) -> CatalogInfo {
        CatalogInfo::from_loaded(self.catalog)
    }

    /// Resolve `--model` against the full catalog, or fall back to `eligible`.
    fn target_models(
        &self,
        id: Option<&str>,
        eligible: impl FnOnce(&[Model]) -> Vec<&Model>,
    ) -> Result<Vec<&Model>, AppError> {
        match id {
            Some(id) => self
                .catalog
                .catalog
                .find(id)
                .map(|m| vec![m])
                .ok_or_else(|| AppError::UnknownModel { id: id.to_string() }),
            None => Ok(eligible(&self.models)),
        }
    }
}

fn handle_simulate(args: &SimulateArgs, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    check_range("--cache-rate", args.cache_rate, 0.0, 1.0)?;
    check_range("--primary-share", args.primary_share, 0.0, 100.0)?;
    let weights = ctx.cli.weights();
    check_non_negative("--alpha", weights.alpha)?;
    check_non_negative("--beta", weights.beta)?;

    let usage = UsageScenario {
        messages_per_day: args.messages,
        tokens_input_per_message: args.input_tokens,
        tokens_output_per_message: args.output_tokens,
        cache_hit_rate: args.cache_rate,
    };

    let results = simulate_all_models(&usage, &ctx.models, &weights);
    let routing = match (&args.route_primary, &args.route_secondary) {
        (Some(primary), Some(secondary)) => {
            for id in [primary, secondary] {
                if !results.iter().any(|r| r.model_id == *id) {
                    return Err(AppError::UnknownModel { id: id.clone() });
                }
            }
            calculate_routed_cost(&results, primary, secondary, args.primary_share)
        }
        _ => None,
    };

    let report = SimulationReport {
        scenario_id: generate_scenario_id(&usage, &Local::now()).to_string(),
        engine: EngineInfo::new(weights),
        catalog: ctx.catalog_info(),
        usage,
        profile: ScenarioProfile::from_usage(&usage),
        best_value: find_best_value(&results).map(|r| r.model_id.clone()),
        comparison: calculate_aggressive_comparison(&results),
        sensitivity: calculate_all_sensitivity_analysis(&usage, &ctx.models),
        routing,
        results,
    };

    if ctx.cli.json {
        print_json(&report)
    } else {
        print_simulation(&report, ctx.table_options());
        Ok(())
    }
}

fn handle_batch(args: &BatchArgs, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let inputs = BatchApiInputs {
        records: args.records,
        avg_input_tokens: args.avg_input,
        avg_output_tokens: args.avg_output,
    };
    let models = ctx.target_models(args.model.as_deref(), filter_batch_models)?;
    let results = models
        .par_iter()
        .map(|m| calculate_batch(&inputs, m))
        .collect();

    let report = BatchReport {
        catalog: ctx.catalog_info(),
        inputs,
        results,
    };
    if ctx.cli.json {
        print_json(&report)
    } else {
        print_batch_table(&report, ctx.table_options());
        Ok(())
    }
}

fn handle_caching(args: &CachingArgs, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    check_range("--write-percent", args.write_percent, 0.0, 100.0)?;

    let inputs = CachingRoiInputs {
        static_tokens: args.static_tokens,
        dynamic_tokens: args.dynamic_tokens,
        output_tokens: args.output_tokens,
        requests_per_day: args.requests,
        cache_write_percent: args.write_percent,
    };
    let models = ctx.target_models(args.model.as_deref(), filter_cacheable_models)?;
    let results = models
        .par_iter()
        .map(|m| calculate_caching_roi(&inputs, m))
        .collect();

    let report = CachingReport {
        catalog: ctx.catalog_info(),
        inputs,
        results,
    };
    if ctx.cli.json {
        print_json(&report)
    } else {
        print_caching_table(&report, ctx.table_options());
        Ok(())
    }
}

fn handle_context(args: &ContextArgs, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    check_non_negative("--size", args.size)?;

    let unit = args.unit.into();
    let sort = args.sort.into();
    let token_count = normalize_to_tokens(args.size, unit);
    let results = sort_context_results(analyze_context(&ctx.models, token_count), sort);

    let report = ContextReport {
        catalog: ctx.catalog_info(),
        size: args.size,
        unit,
        sort,
        token_count,
        max_context: max_context(&ctx.models),
        fitting_models: results.iter().filter(|r| r.is_valid).count(),
        results,
    };
    if ctx.cli.json {
        print_json(&report)
    } else {
        print_context_table(&report, ctx.table_options());
        Ok(())
    }
}

fn handle_models(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let report = ModelsReport {
        catalog: ctx.catalog_info(),
        models: ctx.models.clone(),
    };
    if ctx.cli.json {
        print_json(&report)
    } else {
        print_models_table(&report, ctx.table_options());
        Ok(())
    }
}

/// Load the catalog and dispatch the selected command
pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    // Reject a bad locale before touching the network
    let number_format = NumberFormat::from_locale(cli.locale.as_deref())?;

    let loaded = load_catalog(&LoadOptions {
        source: cli.catalog.as_deref(),
        offline: cli.offline,
    })?;
    let ctx = CommandContext::new(cli, &loaded, number_format)?;

    match &cli.command {
        Some(Commands::Simulate(args)) => handle_simulate(args, &ctx),
        Some(Commands::Batch(args)) => handle_batch(args, &ctx),
        Some(Commands::Caching(args)) => handle_caching(args, &ctx),
        Some(Commands::Context(args)) => handle_context(args, &ctx),
        Some(Commands::Models) => handle_models(&ctx),
        None => handle_simulate(&SimulateArgs::default(), &ctx),
    }
}
