//! # TANGLE
//!
//! Cross-language dependency graph extraction for source trees.
//!
//! Tangle walks a project, classifies files by language, pulls textual
//! import/include/use declarations out of each one, resolves them against
//! the filesystem and configured path aliases, and folds everything into a
//! directed file-dependency graph.
//!
//! ## Pipeline
//!
//! scan -> extract -> resolve -> merge, with per-file fault isolation: one
//! unreadable file is counted and logged, never fatal.
//!
//! ## Supported Languages
//!
//! C, C++, C#, Python, JavaScript, TypeScript, Rust, Go, Java, Kotlin

pub mod config;
pub mod core;
pub mod error;
pub mod export;
