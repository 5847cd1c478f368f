//! Unit tests for the registry context.
