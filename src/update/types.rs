/// A window of the old document pair that has to be re-diffed.
///
/// Bounds are in the coordinates of the documents before the edit;
/// `diff_a`/`diff_b` are the net length changes of the edits it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UpdateRange {
    pub from_a: usize,
    pub to_a: usize,
    pub from_b: usize,
    pub to_b: usize,
    pub diff_a: isize,
    pub diff_b: isize,
}

impl UpdateRange {
    pub fn new(from: (usize, usize), to: (usize, usize), diff_a: isize, diff_b: isize) -> Self {
        UpdateRange {
            from_a: from.0,
            to_a: to.0,
            from_b: from.1,
            to_b: to.1,
            diff_a,
            diff_b,
        }
    }
}
