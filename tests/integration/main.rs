//! Integration tests for Resource-Scout
//!
//! These tests use wiremock to serve seed pages and linked files and run
//! discovery and cache refreshes end to end.

mod discovery_tests;
mod refresh_tests;
