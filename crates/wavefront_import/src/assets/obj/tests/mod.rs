//! Cross-component import scenarios

mod import_scenarios;
