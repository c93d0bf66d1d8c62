//! Test-only crate. Scenarios live under `tests/`.
