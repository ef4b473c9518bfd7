//! Predatory-pattern heuristics
//!
//! Seven rules, each with a severity tier and an impact weight. Rules are
//! plain descriptors evaluated in declaration order; see [`rules::RULES`].

mod base;
mod evaluator;
pub mod rules;

pub use base::{HeuristicRule, RuleCondition, RuleContext, RuleOutcome};
pub use evaluator::HeuristicEvaluator;
pub use rules::{rule, RULES};
