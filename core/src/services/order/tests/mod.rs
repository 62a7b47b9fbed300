mod lifecycle_tests;
mod service_tests;
mod status_tests;
