pub mod types;
pub use types::*;

use std::cmp::max;
use std::ops::Range;

/// Forward search state: the furthest reaching `x` on every diagonal `k`.
#[derive(Clone)]
struct V {
    data: Vec<usize>,
    offset: isize,
}

impl V {
    fn new(size: usize) -> Self {
        V {
            data: vec![0; 2 * size + 1],
            offset: size as isize,
        }
    }

    fn get(&self, k: isize) -> usize {
        self.data[(k + self.offset) as usize]
    }

    fn set(&mut self, k: isize, val: usize) {
        self.data[(k + self.offset) as usize] = val;
    }

    /// Copies the diagonals `-d-1..=d+1`, the only ones the traceback of
    /// round `d` reads.
    fn snapshot(&self, d: isize) -> Row {
        let lo = (self.offset - d - 1).max(0) as usize;
        let hi = ((self.offset + d + 1) as usize).min(self.data.len() - 1);
        Row {
            data: self.data[lo..=hi].to_vec(),
            lo: lo as isize - self.offset,
        }
    }
}

struct Row {
    data: Vec<usize>,
    lo: isize,
}

impl Row {
    fn get(&self, k: isize) -> usize {
        self.data[(k - self.lo) as usize]
    }
}

/// Line- then character-level Myers diff.
///
/// The common prefix and suffix are stripped first, the remaining middle is
/// diffed line by line, and every run of differing lines is refined
/// character by character. Each pass gives up once it needs more than
/// `scan_limit` edit steps.
///
/// ```
/// use chunkdiff::myers::{Change, DiffOutcome, DiffPrimitive, MyersDiff};
///
/// let outcome = MyersDiff.diff("a\nb\nc", "a\nx\nc", 100);
/// assert_eq!(outcome, DiffOutcome::Precise(vec![Change::new(2, 3, 2, 3)]));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MyersDiff;

impl DiffPrimitive for MyersDiff {
    fn diff(&self, a: &str, b: &str, scan_limit: usize) -> DiffOutcome {
        match diff_text(a, b, scan_limit) {
            Some(changes) => DiffOutcome::Precise(changes),
            None => DiffOutcome::LimitExceeded,
        }
    }
}

fn diff_text(a: &str, b: &str, limit: usize) -> Option<Vec<Change>> {
    let (prefix, suffix) = common_affixes(a, b);
    let mid_a = &a[prefix..a.len() - suffix];
    let mid_b = &b[prefix..b.len() - suffix];

    let lines_a: Vec<&str> = mid_a.split_inclusive('\n').collect();
    let lines_b: Vec<&str> = mid_b.split_inclusive('\n').collect();
    let line_steps = shortest_edit(&lines_a, &lines_b, limit)?;
    let line_offsets_a = offsets(lines_a.iter().map(|l| l.len()));
    let line_offsets_b = offsets(lines_b.iter().map(|l| l.len()));

    let mut changes = vec![];
    for (ra, rb) in runs(&line_steps) {
        let block_a = line_offsets_a[ra.start]..line_offsets_a[ra.end];
        let block_b = line_offsets_b[rb.start]..line_offsets_b[rb.end];
        let base_a = prefix + block_a.start;
        let base_b = prefix + block_b.start;
        for change in diff_chars(&mid_a[block_a], &mid_b[block_b], limit)? {
            changes.push(change.shifted(base_a, base_b));
        }
    }

    Some(normalize(changes, a, b))
}

fn diff_chars(a: &str, b: &str, limit: usize) -> Option<Vec<Change>> {
    let chars_a: Vec<char> = a.chars().collect();
    let chars_b: Vec<char> = b.chars().collect();
    let steps = shortest_edit(&chars_a, &chars_b, limit)?;
    let offsets_a = offsets(chars_a.iter().map(|c| c.len_utf8()));
    let offsets_b = offsets(chars_b.iter().map(|c| c.len_utf8()));
    Some(
        runs(&steps)
            .into_iter()
            .map(|(ra, rb)| {
                Change::new(
                    offsets_a[ra.start],
                    offsets_a[ra.end],
                    offsets_b[rb.start],
                    offsets_b[rb.end],
                )
            })
            .collect(),
    )
}

/// Byte lengths of the shared prefix and suffix, both ending on char
/// boundaries and never overlapping each other.
pub(crate) fn common_affixes(a: &str, b: &str) -> (usize, usize) {
    let (ba, bb) = (a.as_bytes(), b.as_bytes());
    let mut prefix = ba.iter().zip(bb).take_while(|(x, y)| x == y).count();
    while !a.is_char_boundary(prefix) {
        prefix -= 1;
    }
    let room = ba.len().min(bb.len()) - prefix;
    let mut suffix = ba
        .iter()
        .rev()
        .zip(bb.iter().rev())
        .take(room)
        .take_while(|(x, y)| x == y)
        .count();
    while !a.is_char_boundary(a.len() - suffix) || !b.is_char_boundary(b.len() - suffix) {
        suffix -= 1;
    }
    (prefix, suffix)
}

/// Running sums of element lengths, starting at zero.
fn offsets(lengths: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut acc = 0;
    let mut out = vec![0];
    for len in lengths {
        acc += len;
        out.push(acc);
    }
    out
}

/// Groups consecutive non-equal steps into element ranges on both sides.
fn runs(steps: &[Step]) -> Vec<(Range<usize>, Range<usize>)> {
    let mut result = vec![];
    let (mut x, mut y) = (0, 0);
    let mut open: Option<(usize, usize)> = None;
    for step in steps {
        match step {
            Step::Equal => {
                if let Some((sx, sy)) = open.take() {
                    result.push((sx..x, sy..y));
                }
                x += 1;
                y += 1;
            }
            Step::Delete => {
                open.get_or_insert((x, y));
                x += 1;
            }
            Step::Insert => {
                open.get_or_insert((x, y));
                y += 1;
            }
        }
    }
    if let Some((sx, sy)) = open {
        result.push((sx..x, sy..y));
    }
    result
}

/// Computes the shortest edit script from `old` to `new` using the Myers
/// algorithm, or `None` when it needs more than `limit` edit steps.
pub(crate) fn shortest_edit<T: Eq>(old: &[T], new: &[T], limit: usize) -> Option<Vec<Step>> {
    if old.is_empty() || new.is_empty() {
        if old.len() + new.len() > limit {
            return None;
        }
        let mut steps = vec![Step::Delete; old.len()];
        steps.extend(std::iter::repeat(Step::Insert).take(new.len()));
        return Some(steps);
    }

    let n = old.len();
    let m = new.len();
    let maxi = (n + m).min(limit);
    let mut v = V::new(maxi + 1);
    let mut trace: Vec<Row> = Vec::new();
    for d in 0..=maxi as isize {
        for k in (-d..=d).step_by(2) {
            let mut x = if k == -d {
                v.get(k + 1)
            } else if k == d {
                v.get(k - 1) + 1
            } else {
                max(v.get(k + 1), v.get(k - 1) + 1)
            };
            let mut y = (x as isize - k) as usize;
            while x < n && y < m && old[x] == new[y] {
                x += 1;
                y += 1;
            }
            v.set(k, x);
            if x >= n && y >= m {
                trace.push(v.snapshot(d));
                return Some(traceback(old, new, trace, x, y));
            }
        }
        trace.push(v.snapshot(d));
    }
    None
}

fn traceback<T: Eq>(old: &[T], new: &[T], trace: Vec<Row>, mut x: usize, mut y: usize) -> Vec<Step> {
    let mut steps = Vec::new();
    for d in (0..trace.len()).rev() {
        let row = &trace[d];
        let d = d as isize;
        let k = x as isize - y as isize;
        let prev_k = if k == -d {
            k + 1
        } else if k == d || row.get(k - 1) + 1 >= row.get(k + 1) {
            k - 1
        } else {
            k + 1
        };
        let prev_x = row.get(prev_k);
        let prev_y = prev_x as isize - prev_k;
        while x as isize > prev_x as isize && y as isize > prev_y && old[x - 1] == new[y - 1] {
            steps.push(Step::Equal);
            x -= 1;
            y -= 1;
        }
        if d > 0 {
            if prev_k == k - 1 {
                steps.push(Step::Delete);
            } else {
                steps.push(Step::Insert);
            }
        }
        x = prev_x;
        y = prev_y as usize;
    }
    while x > 0 && y > 0 {
        steps.push(Step::Equal);
        x -= 1;
        y -= 1;
    }

    steps.reverse();
    steps
}

/// Cleans up raw changes so they read well once snapped to lines:
/// replacements lose shared leading/trailing chars, and insertions or
/// deletions that open with a line break slide past an identical following
/// line break. Changes that end up touching are merged.
fn normalize(changes: Vec<Change>, a: &str, b: &str) -> Vec<Change> {
    let mut trimmed: Vec<Change> = changes
        .into_iter()
        .map(|c| trim_shared(c, a, b))
        .filter(|c| !c.is_empty())
        .collect();

    for i in 0..trimmed.len() {
        let (limit_a, limit_b) = match trimmed.get(i + 1) {
            Some(next) => (next.from_a, next.from_b),
            None => (a.len(), b.len()),
        };
        trimmed[i] = slide_past_line_breaks(trimmed[i], a, b, limit_a, limit_b);
    }

    let mut merged: Vec<Change> = Vec::with_capacity(trimmed.len());
    for change in trimmed {
        match merged.last_mut() {
            Some(last) if last.to_a >= change.from_a || last.to_b >= change.from_b => {
                last.to_a = last.to_a.max(change.to_a);
                last.to_b = last.to_b.max(change.to_b);
            }
            _ => merged.push(change),
        }
    }
    merged
}

fn trim_shared(mut c: Change, a: &str, b: &str) -> Change {
    while c.from_a < c.to_a && c.from_b < c.to_b {
        match (a[c.from_a..c.to_a].chars().next(), b[c.from_b..c.to_b].chars().next()) {
            (Some(x), Some(y)) if x == y => {
                c.from_a += x.len_utf8();
                c.from_b += y.len_utf8();
            }
            _ => break,
        }
    }
    while c.from_a < c.to_a && c.from_b < c.to_b {
        match (a[c.from_a..c.to_a].chars().next_back(), b[c.from_b..c.to_b].chars().next_back()) {
            (Some(x), Some(y)) if x == y => {
                c.to_a -= x.len_utf8();
                c.to_b -= y.len_utf8();
            }
            _ => break,
        }
    }
    c
}

fn slide_past_line_breaks(mut c: Change, a: &str, b: &str, limit_a: usize, limit_b: usize) -> Change {
    let (ba, bb) = (a.as_bytes(), b.as_bytes());
    if c.is_insertion() {
        while c.from_a < limit_a
            && c.to_b < limit_b
            && bb[c.from_b] == b'\n'
            && ba.get(c.from_a) == Some(&b'\n')
        {
            c = c.shifted(1, 1);
        }
    } else if c.is_deletion() {
        while c.to_a < limit_a
            && c.from_b < limit_b
            && ba[c.from_a] == b'\n'
            && bb.get(c.from_b) == Some(&b'\n')
        {
            c = c.shifted(1, 1);
        }
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn precise(a: &str, b: &str) -> Vec<Change> {
        match MyersDiff.diff(a, b, 1000) {
            DiffOutcome::Precise(changes) => changes,
            DiffOutcome::LimitExceeded => panic!("limit exceeded"),
        }
    }

    /// Rebuilds B by copying A outside the changes and B inside them.
    fn patch(a: &str, b: &str, changes: &[Change]) -> String {
        let mut out = String::new();
        let mut pos = 0;
        for c in changes {
            out.push_str(&a[pos..c.from_a]);
            out.push_str(&b[c.from_b..c.to_b]);
            pos = c.to_a;
        }
        out.push_str(&a[pos..]);
        out
    }

    proptest! {
        #[test]
        fn test_length_invariant(old: Vec<u8>, new: Vec<u8>) {
            let steps = shortest_edit(&old, &new, usize::MAX).unwrap();
            let deletes = steps.iter().filter(|s| matches!(s, Step::Delete)).count();
            let equals = steps.iter().filter(|s| matches!(s, Step::Equal)).count();
            let inserts = steps.iter().filter(|s| matches!(s, Step::Insert)).count();
            prop_assert_eq!(old.len(), deletes + equals);
            prop_assert_eq!(new.len(), inserts + equals);
        }

        #[test]
        fn test_identical_is_all_equal(els: Vec<u8>) {
            let steps = shortest_edit(&els, &els, 0).unwrap();
            prop_assert!(steps.iter().all(|s| *s == Step::Equal));
        }

        #[test]
        fn test_changes_rebuild_b(a in "[ab\n]{0,24}", b in "[ab\n]{0,24}") {
            let changes = precise(&a, &b);
            prop_assert_eq!(patch(&a, &b, &changes), b);
        }

        #[test]
        fn test_changes_sorted_and_disjoint(a in "[abé\n]{0,24}", b in "[abé\n]{0,24}") {
            let changes = precise(&a, &b);
            for pair in changes.windows(2) {
                prop_assert!(pair[0].to_a < pair[1].from_a);
                prop_assert!(pair[0].to_b < pair[1].from_b);
            }
            for c in &changes {
                prop_assert!(a.is_char_boundary(c.from_a) && a.is_char_boundary(c.to_a));
                prop_assert!(b.is_char_boundary(c.from_b) && b.is_char_boundary(c.to_b));
            }
        }
    }

    #[test]
    fn test_single_line_replacement() {
        assert_eq!(precise("a\nb\nc", "a\nx\nc"), vec![Change::new(2, 3, 2, 3)]);
    }

    #[test]
    fn test_inserted_lines() {
        assert_eq!(
            precise("1\n2\n3\n4\n5", "1\n2\nX\nY\n3\n4\n5"),
            vec![Change::new(4, 4, 4, 8)]
        );
    }

    #[test]
    fn test_identical_inputs() {
        assert_eq!(precise("same\ntext", "same\ntext"), vec![]);
        assert_eq!(precise("", ""), vec![]);
    }

    #[test]
    fn test_multibyte_boundaries() {
        let changes = precise("caffè\n", "caffé\n");
        assert_eq!(changes, vec![Change::new(4, 6, 4, 6)]);
    }

    #[test]
    fn test_common_affixes_respect_char_boundaries() {
        // "é" and "è" share their first UTF-8 byte.
        assert_eq!(common_affixes("é", "è"), (0, 0));
        assert_eq!(common_affixes("abc", "abc"), (3, 0));
        assert_eq!(common_affixes("xab", "yab"), (0, 2));
    }

    #[test]
    fn test_insertion_starting_with_line_break_slides() {
        let c = slide_past_line_breaks(Change::new(1, 1, 1, 3), "a\nc", "a\nb\nc", 3, 5);
        assert_eq!(c, Change::new(2, 2, 2, 4));
    }

    #[test]
    fn test_limit_exceeded() {
        assert_eq!(MyersDiff.diff("abcdef", "uvwxyz", 3), DiffOutcome::LimitExceeded);
        assert!(matches!(MyersDiff.diff("abcdef", "abcxef", 3), DiffOutcome::Precise(_)));
    }

    #[test]
    fn test_closure_primitive() {
        let stub = |_: &str, _: &str, _: usize| DiffOutcome::Precise(vec![Change::new(0, 1, 0, 1)]);
        assert_eq!(
            stub.diff("a", "b", 0),
            DiffOutcome::Precise(vec![Change::new(0, 1, 0, 1)])
        );
    }

    #[test]
    fn test_duplicates() {
        let steps = shortest_edit(&["a", "a", "b"], &["a", "b", "b"], 10).unwrap();
        assert_eq!(steps, vec![Step::Equal, Step::Delete, Step::Equal, Step::Insert]);
    }
}
