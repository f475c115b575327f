//! Classify command implementation.
//!
//! Shows how a keyword would be interpreted as a column filter.

use grid_filter_rs::{Classifier, MatchStrategy};

use super::config::load_config;
use super::{CommandContext, Result};
use crate::output::{format_classification_json, format_classification_table};

/// Options for the classify command.
pub struct ClassifyOptions {
    /// Keyword as typed.
    pub keyword: String,
    /// Strategy override; the config value is used when absent.
    pub strategy: Option<MatchStrategy>,
}

/// Executes the classify command.
pub fn execute(ctx: &CommandContext, opts: &ClassifyOptions) -> Result<()> {
    let strategy = match opts.strategy {
        Some(strategy) => strategy,
        None => load_config()?.match_strategy,
    };

    let expression = Classifier::classify(&opts.keyword, strategy);

    if ctx.json_output {
        let output = format_classification_json(&opts.keyword, strategy, &expression)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_classification_table(&opts.keyword, strategy, &expression, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}
