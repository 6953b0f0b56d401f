//! Unit tests for emergency broadcast.
