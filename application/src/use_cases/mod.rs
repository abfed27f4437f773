//! Use cases (application services)

pub mod moderate_thread;
