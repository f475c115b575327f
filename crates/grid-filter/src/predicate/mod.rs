//! Predicates for classified filter expressions.

mod comparable;
mod evaluator;

pub use comparable::{ComparablePair, ComparableValue};
pub use evaluator::{PredicateContext, PredicateEvaluator};

#[cfg(test)]
mod evaluator_tests;
