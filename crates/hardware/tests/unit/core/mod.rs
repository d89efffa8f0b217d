//! Tests for the processor model.
