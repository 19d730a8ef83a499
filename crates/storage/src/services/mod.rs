pub mod access;
pub mod match_rules;
pub mod standings;
