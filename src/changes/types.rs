/// Replace `from..to` of a document with `insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub from: usize,
    pub to: usize,
    pub insert: String,
}

impl Edit {
    pub fn new(from: usize, to: usize, insert: impl Into<String>) -> Self {
        Edit {
            from,
            to,
            insert: insert.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Edit::new(at, at, text)
    }

    pub fn delete(from: usize, to: usize) -> Self {
        Edit::new(from, to, String::new())
    }

    pub fn is_noop(&self) -> bool {
        self.from == self.to && self.insert.is_empty()
    }
}

/// One changed range: `old_from..old_to` in the document before the edit
/// became `new_from..new_to` in the document after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeSpan {
    pub old_from: usize,
    pub old_to: usize,
    pub new_from: usize,
    pub new_to: usize,
}

impl ChangeSpan {
    pub fn new(old_from: usize, old_to: usize, new_from: usize, new_to: usize) -> Self {
        ChangeSpan {
            old_from,
            old_to,
            new_from,
            new_to,
        }
    }

    pub fn len_delta(&self) -> isize {
        (self.new_to - self.new_from) as isize - (self.old_to - self.old_from) as isize
    }
}
