//! Integration tests for glmat.
//!
//! This crate contains end-to-end tests that chain builders, products and
//! inverses the way a renderer does when it fills its uniforms.
