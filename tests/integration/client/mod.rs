//! API client against a mock server, and session persistence

pub mod api_client_test;
