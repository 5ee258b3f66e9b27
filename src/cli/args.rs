//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;

use clap::{Parser, ValueEnum};
use llmcost::engine::ValueWeights;

use crate::config::{Config, ConfigColorMode};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Parser)]
#[command(name = "llmcost")]
#[command(about = "Simulate and rank LLM chatbot costs across providers", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Pricing catalog: local JSON file or http(s) URL
    #[arg(long, global = true, value_name = "PATH|URL")]
    pub(crate) catalog: Option<String>,

    /// Never touch the network (cached or bundled catalog)
    #[arg(short = 'O', long, global = true)]
    pub(crate) offline: bool,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Compact output (fewer columns)
    #[arg(short = 'c', long, global = true)]
    pub(crate) compact: bool,

    /// Locale for number formatting (e.g., "en", "zh", "de")
    #[arg(long, global = true, value_name = "LOCALE")]
    pub(crate) locale: Option<String>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Cost-efficiency weight of the value score
    #[arg(long, global = true, value_name = "WEIGHT")]
    pub(crate) alpha: Option<f64>,

    /// Context-capacity weight of the value score
    #[arg(long, global = true, value_name = "WEIGHT")]
    pub(crate) beta: Option<f64>,

    /// Restrict comparison to these model IDs
    #[arg(long, global = true, value_delimiter = ',', value_name = "ID,...")]
    pub(crate) models: Vec<String>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.offline && config.offline {
            self.offline = true;
        }
        if !self.compact && config.compact {
            self.compact = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        // Option values: only apply if CLI didn't set them
        if self.locale.is_none() {
            self.locale = config.locale.clone();
        }
        if self.catalog.is_none() {
            self.catalog = config.catalog.clone();
        }
        if self.alpha.is_none() {
            self.alpha = config.alpha;
        }
        if self.beta.is_none() {
            self.beta = config.beta;
        }
        if self.models.is_empty() {
            self.models = config.models.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    /// Value-score weights, unset ones falling back to the defaults
    pub(crate) fn weights(&self) -> ValueWeights {
        let defaults = ValueWeights::default();
        ValueWeights::new(
            self.alpha.unwrap_or(defaults.alpha),
            self.beta.unwrap_or(defaults.beta),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{DEFAULT_MESSAGES, DEFAULT_PRIMARY_SHARE};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("llmcost").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["batch", "-j", "-O", "--models", "a,b"]);
        assert!(cli.json);
        assert!(cli.offline);
        assert_eq!(cli.models, vec!["a", "b"]);
    }

    #[test]
    fn simulate_defaults() {
        let cli = parse(&["simulate"]);
        let Some(Commands::Simulate(args)) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.messages, DEFAULT_MESSAGES);
        assert_eq!(args.primary_share, DEFAULT_PRIMARY_SHARE);
        assert!(args.route_primary.is_none());
    }

    #[test]
    fn route_flags_require_each_other() {
        let result = Cli::try_parse_from(["llmcost", "simulate", "--route-primary", "a"]);
        assert!(result.is_err());
        let cli = parse(&["simulate", "--route-primary", "a", "--route-secondary", "b"]);
        let Some(Commands::Simulate(args)) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.route_primary.as_deref(), Some("a"));
        assert_eq!(args.route_secondary.as_deref(), Some("b"));
    }

    #[test]
    fn config_fills_unset_values_only() {
        let config: Config = toml::from_str(
            r#"
offline = true
color = "never"
locale = "de"
alpha = 0.9
models = ["x"]
"#,
        )
        .unwrap();
        let cli = parse(&["--locale", "fr", "--models", "y"]).with_config(&config);
        assert!(cli.offline);
        assert_eq!(cli.color, ColorMode::Never);
        assert_eq!(cli.locale.as_deref(), Some("fr"));
        assert_eq!(cli.models, vec!["y"]);
        assert_eq!(cli.alpha, Some(0.9));
    }

    #[test]
    fn weights_fall_back_per_field() {
        let cli = parse(&["--alpha", "0.5"]);
        let w = cli.weights();
        assert_eq!(w.alpha, 0.5);
        assert_eq!(w.beta, ValueWeights::DEFAULT_BETA);
    }

    #[test]
    fn no_color_wins() {
        let cli = parse(&["--color", "always", "--no-color"]);
        assert!(!cli.use_color());
    }
}
