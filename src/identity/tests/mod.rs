//! Unit tests for identity domain logic and services.
