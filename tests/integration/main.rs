//! Integration tests for the imgcsv CLI.

mod helpers;

mod cli_test;
mod config_test;
mod export_test;
