use crate::myers::Change;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A line-aligned region that differs between document A and document B.
///
/// `from_*`/`to_*` are byte offsets; a chunk is empty on a side when
/// `from == to`. `to` includes the line break that terminates the chunk's
/// last line, so it can point one past the end of a document whose last line
/// has no line break. `changes` are relative to `from_a`/`from_b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chunk {
    pub changes: Vec<Change>,
    pub from_a: usize,
    pub to_a: usize,
    pub from_b: usize,
    pub to_b: usize,
    /// `false` when the diff gave up on this region and the chunk is one
    /// undifferentiated block.
    pub precise: bool,
}

impl Chunk {
    pub fn new(
        changes: Vec<Change>,
        from_a: usize,
        to_a: usize,
        from_b: usize,
        to_b: usize,
        precise: bool,
    ) -> Self {
        Chunk {
            changes,
            from_a,
            to_a,
            from_b,
            to_b,
            precise,
        }
    }

    /// A position on the last line covered on the A side: its terminating
    /// line break, or `from_a` when the chunk is empty in A.
    pub fn end_a(&self) -> usize {
        self.from_a.max(self.to_a.saturating_sub(1))
    }

    /// Same as [`end_a`](Self::end_a) for the B side.
    pub fn end_b(&self) -> usize {
        self.from_b.max(self.to_b.saturating_sub(1))
    }

    /// A copy of this chunk moved forward by the given deltas.
    pub fn offset(&self, off_a: isize, off_b: isize) -> Chunk {
        if off_a == 0 && off_b == 0 {
            return self.clone();
        }
        Chunk {
            changes: self.changes.clone(),
            from_a: self.from_a.wrapping_add_signed(off_a),
            to_a: self.to_a.wrapping_add_signed(off_a),
            from_b: self.from_b.wrapping_add_signed(off_b),
            to_b: self.to_b.wrapping_add_signed(off_b),
            precise: self.precise,
        }
    }

    /// Changes translated to absolute document offsets.
    pub fn absolute_changes(&self) -> impl Iterator<Item = Change> + '_ {
        self.changes
            .iter()
            .map(move |c| c.shifted(self.from_a, self.from_b))
    }

    /// Grows this chunk to cover `next` as well, keeping the changes of both.
    pub(crate) fn absorb(&mut self, next: Chunk) {
        let from_a = self.from_a.min(next.from_a);
        let from_b = self.from_b.min(next.from_b);
        let changes: Vec<Change> = self
            .absolute_changes()
            .chain(next.absolute_changes())
            .map(|c| c.relative_to(from_a, from_b))
            .collect();
        *self = Chunk::new(
            changes,
            from_a,
            self.to_a.max(next.to_a),
            from_b,
            self.to_b.max(next.to_b),
            self.precise && next.precise,
        );
    }

    /// Structural identity for host-side caches: equal chunks hash equally no
    /// matter which chunk store they came from.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
