//! Unit tests for selection labels and label resolution.
