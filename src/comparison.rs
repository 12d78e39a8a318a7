use crate::changes::{apply_edits, Edit};
use crate::chunk::{build_with, Chunk};
use crate::collapse::{collapse_unchanged, CollapseConfig, CollapsedRange};
use crate::config::DiffConfig;
use crate::error::Result;
use crate::mapping::{map_pos, Boundary, Side};
use crate::merge::{accept_chunk, reject_chunk};
use crate::myers::{DiffPrimitive, MyersDiff};
use crate::navigation::{next_chunk, previous_chunk};
use crate::update::{update_a_with, update_b_with};
use std::sync::Arc;

/// A document pair together with its chunk list.
///
/// Every edit goes through the incremental update path, accept and reject
/// included. The chunk list is replaced on each change, so a
/// [`snapshot`](Self::snapshot) taken earlier stays valid.
///
/// ```
/// use chunkdiff::{Comparison, DiffConfig};
///
/// let mut cmp = Comparison::new("a\nb\nc\n", "a\nx\nc\n", DiffConfig::default());
/// assert_eq!(cmp.chunks().len(), 1);
/// assert!(cmp.accept(2).unwrap());
/// assert_eq!(cmp.a(), "a\nx\nc\n");
/// assert!(cmp.chunks().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Comparison<D = MyersDiff> {
    a: String,
    b: String,
    chunks: Arc<[Chunk]>,
    config: DiffConfig,
    diff: D,
}

impl Comparison<MyersDiff> {
    pub fn new(a: impl Into<String>, b: impl Into<String>, config: DiffConfig) -> Self {
        Self::with_primitive(MyersDiff, a, b, config)
    }
}

impl<D: DiffPrimitive> Comparison<D> {
    pub fn with_primitive(
        diff: D,
        a: impl Into<String>,
        b: impl Into<String>,
        config: DiffConfig,
    ) -> Self {
        let (a, b) = (a.into(), b.into());
        let chunks = build_with(&diff, &a, &b, &config).into();
        Comparison {
            a,
            b,
            chunks,
            config,
            diff,
        }
    }

    pub fn a(&self) -> &str {
        &self.a
    }

    pub fn b(&self) -> &str {
        &self.b
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn snapshot(&self) -> Arc<[Chunk]> {
        Arc::clone(&self.chunks)
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Applies `edits` (in A's current coordinates) to A.
    pub fn edit_a(&mut self, edits: &[Edit]) -> Result<()> {
        let (a, changes) = apply_edits(&self.a, edits)?;
        let chunks = update_a_with(&self.diff, &self.chunks, &a, &self.b, &changes, &self.config)?;
        self.a = a;
        self.chunks = chunks.into();
        Ok(())
    }

    /// Applies `edits` (in B's current coordinates) to B.
    pub fn edit_b(&mut self, edits: &[Edit]) -> Result<()> {
        let (b, changes) = apply_edits(&self.b, edits)?;
        let chunks = update_b_with(&self.diff, &self.chunks, &self.a, &b, &changes, &self.config)?;
        self.b = b;
        self.chunks = chunks.into();
        Ok(())
    }

    /// Copies B's version of the chunk at `pos` (a B position) into A.
    /// Returns `false` when no chunk covers `pos`.
    pub fn accept(&mut self, pos: usize) -> Result<bool> {
        match accept_chunk(&self.chunks, &self.a, &self.b, pos) {
            Some(edit) => self.edit_a(&[edit]).map(|()| true),
            None => Ok(false),
        }
    }

    /// Restores A's version of the chunk at `pos` (a B position) in B.
    pub fn reject(&mut self, pos: usize) -> Result<bool> {
        match reject_chunk(&self.chunks, &self.a, &self.b, pos) {
            Some(edit) => self.edit_b(&[edit]).map(|()| true),
            None => Ok(false),
        }
    }

    /// Replaces A wholesale and rebuilds the chunk list.
    pub fn set_a(&mut self, a: impl Into<String>) {
        self.a = a.into();
        self.rebuild();
    }

    /// Replaces B wholesale and rebuilds the chunk list.
    pub fn set_b(&mut self, b: impl Into<String>) {
        self.b = b.into();
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.chunks = build_with(&self.diff, &self.a, &self.b, &self.config).into();
    }

    pub fn map_pos(&self, pos: usize, side: Side, boundary: Boundary) -> (usize, usize) {
        map_pos(&self.chunks, &self.a, &self.b, pos, side, boundary)
    }

    pub fn next_chunk(&self, pos: usize, side: Side) -> Option<&Chunk> {
        next_chunk(&self.chunks, pos, side)
    }

    pub fn previous_chunk(&self, pos: usize, side: Side) -> Option<&Chunk> {
        previous_chunk(&self.chunks, pos, side)
    }

    pub fn collapse_unchanged(&self, side: Side, config: &CollapseConfig) -> Vec<CollapsedRange> {
        collapse_unchanged(&self.chunks, side.pick(&self.a, &self.b), side, config)
    }
}
