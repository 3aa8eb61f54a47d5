//! different utility modules used throughout the project
/// logger set-up and saving of the per-step history into csv
pub mod logger;
/// TOML task files: coefficients, solver settings and the list of runs
pub mod task_parser;
