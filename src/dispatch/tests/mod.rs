//! Unit tests for the dispatch engine.
