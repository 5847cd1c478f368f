//! Unit tests for the session board.
