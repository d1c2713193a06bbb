//! Integration tests for the scraper
//!
//! These tests use wiremock to serve a small fake catalog and run the
//! pipeline against it end-to-end.

mod crawl_tests;
