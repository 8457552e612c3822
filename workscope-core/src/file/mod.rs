//! The file module is the sandboxed view of the project root that every tool
//! goes through.
//!
//! ## Architecture
//!
//! ### resolver.rs
//! Maps caller supplied paths onto the configured root:
//! - Rejects any path with a `..` segment before touching the disk
//! - Normalizes lexically and checks containment component by component, so
//!   `root_eviltwin` is never mistaken for a child of `root`
//!
//! ### ignore.rs
//! Glob rules evaluated against bare entry names plus the hidden-entry policy.
//!
//! ### tree.rs
//! Recursive project structure. Per-entry failures become diagnostics instead
//! of aborting the walk.
//!
//! ### access.rs, lines.rs, writer.rs
//! Whole-file reads (text, base64 or directory listing), line range slices and
//! the destructive line writer.

pub mod access;
pub mod ignore;
pub mod lines;
pub mod resolver;
pub mod tree;
pub mod writer;
