mod types;
pub use types::*;

use crate::config::DiffConfig;
use crate::myers::{common_affixes, Change, DiffOutcome, DiffPrimitive, MyersDiff};
use std::ops::Range;
use tracing::{instrument, warn};

/// Builds the chunk list for two full documents with the default Myers diff.
///
/// ```
/// use chunkdiff::{build, DiffConfig};
///
/// let chunks = build("a\nb\nc", "a\nx\nc", &DiffConfig::default());
/// assert_eq!(chunks.len(), 1);
/// assert_eq!((chunks[0].from_a, chunks[0].to_a), (2, 4));
/// ```
pub fn build(a: &str, b: &str, config: &DiffConfig) -> Vec<Chunk> {
    build_with(&MyersDiff, a, b, config)
}

/// Same as [`build`] with a caller-supplied diff algorithm.
#[instrument(skip_all, fields(a_len = a.len(), b_len = b.len()))]
pub fn build_with<D>(diff: &D, a: &str, b: &str, config: &DiffConfig) -> Vec<Chunk>
where
    D: DiffPrimitive + ?Sized,
{
    let chunks = diff_window(diff, a, b, 0..a.len(), 0..b.len(), config);
    debug_check_invariant(&chunks);
    chunks
}

/// Diffs `a[range_a]` against `b[range_b]` and turns the result into chunks
/// snapped to the lines of the full documents.
///
/// When the diff gives up, the window's differing middle becomes a single
/// imprecise change.
pub(crate) fn diff_window<D>(
    diff: &D,
    a: &str,
    b: &str,
    range_a: Range<usize>,
    range_b: Range<usize>,
    config: &DiffConfig,
) -> Vec<Chunk>
where
    D: DiffPrimitive + ?Sized,
{
    let slice_a = &a[range_a.clone()];
    let slice_b = &b[range_b.clone()];
    let (changes, precise) = match diff.diff(slice_a, slice_b, config.scan_limit) {
        DiffOutcome::Precise(changes) => (changes, true),
        DiffOutcome::LimitExceeded => {
            warn!(
                from_a = range_a.start,
                to_a = range_a.end,
                scan_limit = config.scan_limit,
                "scan limit exceeded, falling back to a single imprecise chunk"
            );
            (coarse_change(slice_a, slice_b).into_iter().collect(), false)
        }
    };
    to_chunks(
        &changes,
        a,
        b,
        range_a.start,
        range_b.start,
        precise,
        config.coalesce_lines,
    )
}

/// One change covering everything between the shared prefix and suffix.
fn coarse_change(a: &str, b: &str) -> Option<Change> {
    let (prefix, suffix) = common_affixes(a, b);
    let change = Change::new(prefix, a.len() - suffix, prefix, b.len() - suffix);
    (!change.is_empty()).then_some(change)
}

/// Snaps raw changes (relative to `off_a`/`off_b`) to whole lines and groups
/// the ones separated by at most `coalesce_lines` unchanged lines.
pub(crate) fn to_chunks(
    changes: &[Change],
    a: &str,
    b: &str,
    off_a: usize,
    off_b: usize,
    precise: bool,
    coalesce_lines: usize,
) -> Vec<Chunk> {
    let mut chunks = vec![];
    let mut i = 0;
    while i < changes.len() {
        let change = changes[i].shifted(off_a, off_b);
        let (from_a, from_b) = from_line(change.from_a, change.from_b, a, b);
        let (mut to_a, mut to_b) = to_line(change.to_a, change.to_b, a, b);
        let mut inner = vec![change.relative_to(from_a, from_b)];
        while let Some(next) = changes.get(i + 1) {
            let next = next.shifted(off_a, off_b);
            let (next_a, next_b) = from_line(next.from_a, next.from_b, a, b);
            if lines_between(a, to_a, next_a) > coalesce_lines
                && lines_between(b, to_b, next_b) > coalesce_lines
            {
                break;
            }
            inner.push(next.relative_to(from_a, from_b));
            (to_a, to_b) = to_line(next.to_a, next.to_b, a, b);
            i += 1;
        }
        chunks.push(Chunk::new(
            inner,
            from_a,
            to_a.max(from_a),
            from_b,
            to_b.max(from_b),
            precise,
        ));
        i += 1;
    }
    chunks
}

/// Appends `chunk`, folding it into the last chunk when at most
/// `coalesce_lines` unchanged lines separate the two on either side.
/// Chunks that touch or overlap are always folded.
pub(crate) fn push_coalesced(
    chunks: &mut Vec<Chunk>,
    chunk: Chunk,
    a: &str,
    b: &str,
    coalesce_lines: usize,
) {
    match chunks.last_mut() {
        Some(last)
            if lines_between(a, last.to_a, chunk.from_a) <= coalesce_lines
                || lines_between(b, last.to_b, chunk.from_b) <= coalesce_lines =>
        {
            last.absorb(chunk);
        }
        _ => chunks.push(chunk),
    }
}

fn from_line(from_a: usize, from_b: usize, a: &str, b: &str) -> (usize, usize) {
    (line_start(a, from_a), line_start(b, from_b))
}

/// Keeps an end that already sits on a line start in both documents,
/// otherwise extends both past the line break ending their line.
fn to_line(to_a: usize, to_b: usize, a: &str, b: &str) -> (usize, usize) {
    if line_start(a, to_a) == to_a && line_start(b, to_b) == to_b {
        (to_a, to_b)
    } else {
        (line_end(a, to_a) + 1, line_end(b, to_b) + 1)
    }
}

/// Offset of the first byte of the line containing `pos`.
pub(crate) fn line_start(text: &str, pos: usize) -> usize {
    let pos = pos.min(text.len());
    text.as_bytes()[..pos]
        .iter()
        .rposition(|&c| c == b'\n')
        .map_or(0, |i| i + 1)
}

/// Offset of the line break ending the line containing `pos`, or the
/// document length on the last line.
pub(crate) fn line_end(text: &str, pos: usize) -> usize {
    let pos = pos.min(text.len());
    text.as_bytes()[pos..]
        .iter()
        .position(|&c| c == b'\n')
        .map_or(text.len(), |i| pos + i)
}

/// Number of complete lines between two line starts.
fn lines_between(text: &str, from: usize, to: usize) -> usize {
    let to = to.min(text.len());
    if to <= from {
        return 0;
    }
    text.as_bytes()[from..to].iter().filter(|&&c| c == b'\n').count()
}

pub(crate) fn debug_check_invariant(chunks: &[Chunk]) {
    debug_assert!(
        chunks
            .iter()
            .all(|c| c.from_a <= c.to_a && c.from_b <= c.to_b),
        "chunk with reversed bounds"
    );
    debug_assert!(
        chunks
            .windows(2)
            .all(|w| w[0].to_a <= w[1].from_a && w[0].to_b <= w[1].from_b),
        "chunks out of order or overlapping"
    );
}
