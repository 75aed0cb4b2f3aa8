mod config_tests;
mod telemetry_tests;
mod certificate_tests;
