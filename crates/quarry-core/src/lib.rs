//! Core fact model for quarry.
//!
//! This crate provides the language-agnostic data model shared by the
//! extraction front ends and the resolution engine:
//! - [`facts`]: the repository graph (solutions, projects, namespaces,
//!   compilation units, classes and their members)
//! - [`types`]: structured generic type trees parsed from textual type
//!   expressions
//! - [`primitives`]: the fixed table of primitive spellings and their
//!   canonical runtime names
//! - [`adapter`]: the extractor trait seam for pluggable language front ends
//! - [`error`]: model consistency errors

pub mod adapter;
pub mod error;
pub mod facts;
pub mod primitives;
pub mod types;
