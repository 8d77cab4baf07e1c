//! different utility modules used throughout the project
/// errors raised while building a run configuration
pub mod errors;
/// logger setup and saving of comparison results into csv file
pub mod logger;
/// log-log plot of the absolute error against number of subintervals
pub mod plots;
/// pretty-printed tables of comparison results
pub mod report;
/// run configuration: preset defaults, task file and command line flags merged together
pub mod run_config;
/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" into HashMap
pub mod task_parser;
/// tiny module to format elapsed time
pub mod timer;
