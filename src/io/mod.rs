pub mod run_log;
pub mod scenario;
pub mod series_csv;
