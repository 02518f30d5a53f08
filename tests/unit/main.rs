//! Unit tests for the public normalization, data URI and configuration API
