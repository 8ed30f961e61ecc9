mod condition_evaluator;
mod rule_engine;

pub use condition_evaluator::ConditionEvaluator;
pub use rule_engine::{Route, RuleEngine};
