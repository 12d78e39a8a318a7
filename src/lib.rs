//! Incrementally maintained line chunks between two versions of a document.
//!
//! [`build`] diffs two texts into a sorted list of line-aligned [`Chunk`]s.
//! After an edit to either side, [`update_a`]/[`update_b`] re-diff only a
//! window around the edited spans and carry every other chunk over.
//! [`accept_chunk`] and [`reject_chunk`] resolve one chunk by producing an
//! ordinary edit, which goes back through the same update path.
//!
//! ```
//! use chunkdiff::{apply_edits, build, reject_chunk, update_b, DiffConfig};
//!
//! let config = DiffConfig::default();
//! let (a, b) = ("fn main() {\n    run();\n}\n", "fn main() {\n    walk();\n}\n");
//! let chunks = build(a, b, &config);
//! assert_eq!(chunks.len(), 1);
//!
//! let edit = reject_chunk(&chunks, a, b, chunks[0].from_b).unwrap();
//! let (b, changes) = apply_edits(b, &[edit]).unwrap();
//! assert_eq!(b, a);
//! assert!(update_b(&chunks, a, &b, &changes, &config).unwrap().is_empty());
//! ```

pub mod changes;
pub mod chunk;
pub mod collapse;
pub mod comparison;
pub mod config;
pub mod error;
pub mod mapping;
pub mod merge;
pub mod myers;
pub mod navigation;
pub mod reveal;
pub mod update;

pub use changes::{apply_edits, ChangeDescription, ChangeSpan, Edit};
pub use chunk::{build, build_with, Chunk};
pub use collapse::{collapse_unchanged, CollapseConfig, CollapsedRange};
pub use comparison::Comparison;
pub use config::DiffConfig;
pub use error::{ChunkError, Result};
pub use mapping::{find_pos, map_pos, Boundary, Side};
pub use merge::{accept_chunk, chunk_at, reject_chunk};
pub use myers::{Change, DiffOutcome, DiffPrimitive, MyersDiff};
pub use navigation::{next_chunk, previous_chunk};
pub use reveal::{ChunkCount, Reveal, RevealClass, Tick, TypewriterScheduler};
pub use update::{update_a, update_a_with, update_b, update_b_with};
