//! Crate-level scenario tests.

mod rag_ranking;
mod support;
