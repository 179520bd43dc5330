//! # ngimport
//!
//! **Selector index and auto-import engine** for Angular-style component
//! trees. Scan once, import anywhere.
//!
//! ngimport maintains a live index mapping component selectors (the tag
//! names used in templates) to the files and exported class names that
//! declare them, and uses that index to rewrite a target file: one
//! import line prepended, one entry added to the `@Component` imports
//! array. Extraction is deliberately regex-based and heuristic, not a
//! parser.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use ngimport::service::IndexService;
//!
//! let mut service = IndexService::new(PathBuf::from("."), ".component.ts".to_string());
//! service.ensure_ready();
//! if let Some(record) = service.lookup("app-foo") {
//!     println!("{} declared in {}", record.symbol_name, record.file_path);
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! ngimport reindex                          # Full scan → .ngimport/index.json
//! ngimport complete app-                    # Selectors containing a fragment
//! ngimport import app-foo src/bar.component.ts
//! ngimport watch                            # Live rebuilds (timer + new files)
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Path-alias resolution from `tsconfig.json` `compilerOptions.paths`.
pub mod alias;

/// Command-line argument parsing.
pub mod args;

/// Configuration file support (`.ngimport/config.toml`).
pub mod config;

/// Regex-based extraction of a component's selector and class name.
pub mod extract;

/// Ignore-rule loading and matching for the tree scanner.
pub mod ignore;

/// Import insertion: pure text rewriting of the target file.
pub mod rewrite;

/// Recursive directory scan for component files.
pub mod scanner;

/// `IndexService`: index ownership, rebuild orchestration, queries.
pub mod service;

/// Persistence of the selector index to `.ngimport/index.json`.
pub mod store;

/// Common types used throughout the crate.
pub mod types;

/// Watch mode: timer-driven and notification-driven rebuilds.
pub mod watch;

// ============================================================================
// Re-exports for convenience
// ============================================================================

/// Indexed metadata for one component.
pub use types::ComponentRecord;

/// Selector-to-record map, rebuilt wholesale on each pass.
pub use types::SelectorIndex;

/// Per-rebuild telemetry.
pub use types::RebuildStats;

/// The index owner every consumer goes through.
pub use service::IndexService;

/// Operation-scoped import failures surfaced to the user.
pub use service::ImportError;

/// One full index pass over a project root.
pub use service::build_index;

/// The pure text rewrite.
pub use rewrite::rewrite;
