//! Keyword classification output formatting.

use grid_filter_rs::{FilterExpression, MatchStrategy};
use owo_colors::OwoColorize;
use serde::Serialize;

/// JSON output structure for the classify command.
#[derive(Serialize)]
pub struct ClassificationOutput<'a> {
    pub keyword: &'a str,
    pub strategy: MatchStrategy,
    pub expression: &'a FilterExpression,
    pub canonical: String,
}

/// Formats a classification as JSON.
pub fn format_classification_json(
    keyword: &str,
    strategy: MatchStrategy,
    expression: &FilterExpression,
) -> Result<String, serde_json::Error> {
    let output = ClassificationOutput {
        keyword,
        strategy,
        expression,
        canonical: expression.to_string(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats a classification as a short key/value listing.
pub fn format_classification_table(
    keyword: &str,
    strategy: MatchStrategy,
    expression: &FilterExpression,
    use_colors: bool,
) -> String {
    let kind = expression.kind().to_string();
    let kind = if use_colors {
        kind.green().bold().to_string()
    } else {
        kind
    };

    let mut output = String::new();
    output.push_str(&format!("Keyword:  {keyword:?}\n"));
    output.push_str(&format!("Strategy: {strategy}\n"));
    output.push_str(&format!("Kind:     {kind}\n"));

    match expression {
        FilterExpression::None => {
            output.push_str("(empty keyword, column is not filtered)\n");
        }
        FilterExpression::Range(lo, hi) => {
            output.push_str(&format!("Low:      {lo}\n"));
            output.push_str(&format!("High:     {hi}\n"));
        }
        FilterExpression::Equals(v) | FilterExpression::NotEquals(v) => {
            output.push_str(&format!("Operand:  {v}\n"));
        }
        FilterExpression::Contains(s)
        | FilterExpression::Fuzzy(s)
        | FilterExpression::Tokens(s)
        | FilterExpression::GreaterThan(s)
        | FilterExpression::LessThan(s)
        | FilterExpression::ContainsNumber(s) => {
            output.push_str(&format!("Operand:  {s:?}\n"));
        }
    }

    output
}
