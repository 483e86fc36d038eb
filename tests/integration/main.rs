//! Integration tests for dr-fair-value

mod e2e_test;
mod pricing_test;
mod session_test;
