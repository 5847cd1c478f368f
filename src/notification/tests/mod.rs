//! Unit tests for notification adapters and services.
