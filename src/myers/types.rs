/// A minimal replace span produced by a [`DiffPrimitive`]: the bytes
/// `from_a..to_a` of A correspond to the bytes `from_b..to_b` of B.
///
/// Inside a [`Chunk`](crate::Chunk) the offsets are relative to the chunk's
/// own `from_a`/`from_b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Change {
    pub from_a: usize,
    pub to_a: usize,
    pub from_b: usize,
    pub to_b: usize,
}

impl Change {
    pub fn new(from_a: usize, to_a: usize, from_b: usize, to_b: usize) -> Self {
        Change {
            from_a,
            to_a,
            from_b,
            to_b,
        }
    }

    /// Moves the change forward by `off_a` on the A side and `off_b` on the B side.
    pub fn shifted(&self, off_a: usize, off_b: usize) -> Self {
        Change::new(
            self.from_a + off_a,
            self.to_a + off_a,
            self.from_b + off_b,
            self.to_b + off_b,
        )
    }

    /// Re-expresses an absolute change relative to the given origin.
    pub fn relative_to(&self, origin_a: usize, origin_b: usize) -> Self {
        Change::new(
            self.from_a - origin_a,
            self.to_a - origin_a,
            self.from_b - origin_b,
            self.to_b - origin_b,
        )
    }

    pub fn is_insertion(&self) -> bool {
        self.from_a == self.to_a && self.from_b < self.to_b
    }

    pub fn is_deletion(&self) -> bool {
        self.from_b == self.to_b && self.from_a < self.to_a
    }

    pub fn is_empty(&self) -> bool {
        self.from_a == self.to_a && self.from_b == self.to_b
    }
}

/// Result of a single diff call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    /// Ordered, non-overlapping changes with offsets relative to the compared slices.
    Precise(Vec<Change>),
    /// The inputs needed more edit steps than the scan limit allows.
    LimitExceeded,
}

/// The diff algorithm the chunk builder runs on whole documents or on update
/// windows.
///
/// Implementations must be deterministic: identical inputs give identical
/// outcomes, otherwise incremental updates drift away from full rebuilds.
/// Every offset returned must lie on a `char` boundary of its slice.
pub trait DiffPrimitive {
    fn diff(&self, a: &str, b: &str, scan_limit: usize) -> DiffOutcome;
}

impl<F> DiffPrimitive for F
where
    F: Fn(&str, &str, usize) -> DiffOutcome,
{
    fn diff(&self, a: &str, b: &str, scan_limit: usize) -> DiffOutcome {
        self(a, b, scan_limit)
    }
}

/// One step of an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Equal,
    Delete,
    Insert,
}
