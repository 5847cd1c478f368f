//! Unit tests for view projections and board reassignment planning.
