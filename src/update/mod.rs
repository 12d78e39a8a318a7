//! Incremental maintenance of a chunk list.
//!
//! Instead of diffing the whole document pair again, every edited span is
//! widened by a margin of context, the widened windows are aligned to chunk
//! boundaries, and only those windows are re-diffed. Chunks outside the
//! windows are carried over, shifted by the length change of the edits
//! before them.

mod types;
pub(crate) use types::UpdateRange;

use crate::changes::ChangeDescription;
use crate::chunk::{debug_check_invariant, diff_window, push_coalesced, Chunk};
use crate::config::DiffConfig;
use crate::error::{ChunkError, Result};
use crate::mapping::{ceil_char_boundary, find_pos, floor_char_boundary, Boundary, Side};
use crate::myers::{DiffPrimitive, MyersDiff};
use tracing::{debug, instrument, trace};

/// Re-derives `chunks` after document A was edited.
///
/// `a` is the new text of A, `b` the unchanged text of B, and `changes`
/// describes the edit in A's old coordinates.
///
/// ```
/// use chunkdiff::{apply_edits, build, update_a, DiffConfig, Edit};
///
/// let config = DiffConfig::default();
/// let b = "a\nx\nc\n";
/// let chunks = build("a\nb\nc\n", b, &config);
/// let (a, changes) = apply_edits("a\nb\nc\n", &[Edit::new(2, 3, "x")]).unwrap();
/// assert!(update_a(&chunks, &a, b, &changes, &config).unwrap().is_empty());
/// ```
pub fn update_a(
    chunks: &[Chunk],
    a: &str,
    b: &str,
    changes: &ChangeDescription,
    config: &DiffConfig,
) -> Result<Vec<Chunk>> {
    update_a_with(&MyersDiff, chunks, a, b, changes, config)
}

/// Re-derives `chunks` after document B was edited. See [`update_a`].
pub fn update_b(
    chunks: &[Chunk],
    a: &str,
    b: &str,
    changes: &ChangeDescription,
    config: &DiffConfig,
) -> Result<Vec<Chunk>> {
    update_b_with(&MyersDiff, chunks, a, b, changes, config)
}

/// [`update_a`] with a caller-supplied diff algorithm.
#[instrument(skip_all, fields(side = "a", a_len = a.len(), b_len = b.len()))]
pub fn update_a_with<D>(
    diff: &D,
    chunks: &[Chunk],
    a: &str,
    b: &str,
    changes: &ChangeDescription,
    config: &DiffConfig,
) -> Result<Vec<Chunk>>
where
    D: DiffPrimitive + ?Sized,
{
    update(diff, chunks, a, b, changes, Side::A, config)
}

/// [`update_b`] with a caller-supplied diff algorithm.
#[instrument(skip_all, fields(side = "b", a_len = a.len(), b_len = b.len()))]
pub fn update_b_with<D>(
    diff: &D,
    chunks: &[Chunk],
    a: &str,
    b: &str,
    changes: &ChangeDescription,
    config: &DiffConfig,
) -> Result<Vec<Chunk>>
where
    D: DiffPrimitive + ?Sized,
{
    update(diff, chunks, a, b, changes, Side::B, config)
}

fn update<D>(
    diff: &D,
    chunks: &[Chunk],
    a: &str,
    b: &str,
    changes: &ChangeDescription,
    side: Side,
    config: &DiffConfig,
) -> Result<Vec<Chunk>>
where
    D: DiffPrimitive + ?Sized,
{
    let edited = side.pick(a, b);
    if changes.new_len() != edited.len() {
        return Err(ChunkError::LengthMismatch {
            expected: changes.new_len(),
            actual: edited.len(),
        });
    }
    if changes.is_empty() {
        return Ok(chunks.to_vec());
    }
    let other = side.pick(b, a);
    let ranges = find_ranges(chunks, changes, side, other, config.margin);
    let updated = update_chunks(diff, &ranges, chunks, a, b, config);
    debug_check_invariant(&updated);
    Ok(updated)
}

/// Widens every changed span by `margin` on the edited side, aligns the
/// result to chunk boundaries and merges windows that overlap.
pub(crate) fn find_ranges(
    chunks: &[Chunk],
    changes: &ChangeDescription,
    side: Side,
    other: &str,
    margin: usize,
) -> Vec<UpdateRange> {
    let old_len = changes.old_len();
    let mut ranges: Vec<UpdateRange> = vec![];
    for span in changes.iter_changed_ranges() {
        let mut from = (0, 0);
        let mut to = side.pick((old_len, other.len()), (other.len(), old_len));
        if span.old_from > margin {
            let pos = find_pos(chunks, span.old_from - margin, side, Boundary::Start);
            from = snap(pos, side, other, Boundary::Start);
        }
        if span.old_to.saturating_add(margin) < old_len {
            let pos = find_pos(chunks, span.old_to + margin, side, Boundary::End);
            to = snap(pos, side, other, Boundary::End);
        }
        let delta = span.len_delta();
        let (diff_a, diff_b) = side.pick((delta, 0), (0, delta));
        match ranges.last_mut() {
            Some(last) if side.pick(last.to_a, last.to_b) >= side.pick(from.0, from.1) => {
                last.to_a = to.0;
                last.to_b = to.1;
                last.diff_a += diff_a;
                last.diff_b += diff_b;
            }
            _ => ranges.push(UpdateRange::new(from, to, diff_a, diff_b)),
        }
    }
    ranges
}

/// Moves an aligned position pair onto a char boundary.
///
/// Outside chunks both documents hold the same text, so a boundary of the
/// unedited document is a boundary of the edited one too.
fn snap(pos: (usize, usize), side: Side, other: &str, boundary: Boundary) -> (usize, usize) {
    let at = side.other().pick(pos.0, pos.1);
    if at >= other.len() || other.is_char_boundary(at) {
        return pos;
    }
    match boundary {
        Boundary::Start => {
            let back = at - floor_char_boundary(other, at);
            (pos.0 - back, pos.1 - back)
        }
        Boundary::End => {
            let forward = ceil_char_boundary(other, at) - at;
            (pos.0 + forward, pos.1 + forward)
        }
    }
}

/// Walks the old chunks once, copying the ones outside every window and
/// replacing the ones inside with a fresh diff of the window.
///
/// A window chunk snaps to whole lines and can reach past its window up to
/// the chunk next to it, so every chunk goes through the same coalescing
/// rule as a full build before it lands in the result.
fn update_chunks<D>(
    diff: &D,
    ranges: &[UpdateRange],
    chunks: &[Chunk],
    a: &str,
    b: &str,
    config: &DiffConfig,
) -> Vec<Chunk>
where
    D: DiffPrimitive + ?Sized,
{
    let coalesce = config.coalesce_lines;
    let mut result = Vec::with_capacity(chunks.len() + ranges.len());
    let (mut off_a, mut off_b) = (0isize, 0isize);
    let mut next = 0;
    let mut reused = 0;
    let mut recomputed = 0;
    for range in ranges {
        while let Some(chunk) = chunks.get(next) {
            if chunk.to_a > range.from_a || chunk.to_b > range.from_b {
                break;
            }
            push_coalesced(&mut result, chunk.offset(off_a, off_b), a, b, coalesce);
            reused += 1;
            next += 1;
        }

        let to_a = range.to_a.wrapping_add_signed(off_a + range.diff_a).min(a.len());
        let to_b = range.to_b.wrapping_add_signed(off_b + range.diff_b).min(b.len());
        let from_a = range.from_a.wrapping_add_signed(off_a).min(to_a);
        let from_b = range.from_b.wrapping_add_signed(off_b).min(to_b);
        trace!(from_a, to_a, from_b, to_b, "re-diffing window");
        for chunk in diff_window(diff, a, b, from_a..to_a, from_b..to_b, config) {
            push_coalesced(&mut result, chunk, a, b, coalesce);
            recomputed += 1;
        }
        off_a += range.diff_a;
        off_b += range.diff_b;

        // Only chunks starting inside the window were re-diffed; one starting
        // right at its end is still carried over.
        while let Some(chunk) = chunks.get(next) {
            if chunk.from_a >= range.to_a && chunk.from_b >= range.to_b {
                break;
            }
            next += 1;
        }
    }
    for chunk in &chunks[next..] {
        push_coalesced(&mut result, chunk.offset(off_a, off_b), a, b, coalesce);
        reused += 1;
    }
    debug!(windows = ranges.len(), reused, recomputed, "chunks updated");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changes::{apply_edits, Edit};
    use crate::chunk::build;
    use crate::myers::Change;
    use pretty_assertions::assert_eq;

    fn lines(count: usize, upper: &[usize]) -> String {
        (0..count)
            .map(|i| {
                if upper.contains(&i) {
                    format!("LINE{i:02}\n")
                } else {
                    format!("line{i:02}\n")
                }
            })
            .collect()
    }

    fn bounds(chunks: &[Chunk]) -> Vec<(usize, usize, usize, usize)> {
        chunks
            .iter()
            .map(|c| (c.from_a, c.to_a, c.from_b, c.to_b))
            .collect()
    }

    #[test]
    fn test_edit_far_from_chunks_keeps_their_shape() {
        let a = lines(30, &[]);
        let b = lines(30, &[2, 27]);
        let config = DiffConfig::default().with_margin(14);
        let chunks = build(&a, &b, &config);
        assert_eq!(chunks.len(), 2);

        let (new_b, changes) = apply_edits(&b, &[Edit::insert(105, "extra\n")]).unwrap();
        let updated = update_b(&chunks, &a, &new_b, &changes, &config).unwrap();
        assert_eq!(updated.len(), 3);
        assert_eq!(updated[0], chunks[0]);
        assert_eq!((updated[1].from_a, updated[1].to_a), (105, 105));
        assert_eq!(&new_b[updated[1].from_b..updated[1].to_b], "extra\n");
        assert_eq!(updated[2], chunks[1].offset(0, 6));
        assert_eq!(updated, build(&a, &new_b, &config));
    }

    #[test]
    fn test_edit_resolving_a_chunk() {
        let config = DiffConfig::default();
        let a = "a\nb\nc\n";
        let chunks = build(a, "a\nx\nc\n", &config);
        let (b, changes) = apply_edits("a\nx\nc\n", &[Edit::new(2, 3, "b")]).unwrap();
        assert_eq!(update_b(&chunks, a, &b, &changes, &config), Ok(vec![]));
    }

    #[test]
    fn test_empty_change_returns_chunks() {
        let config = DiffConfig::default();
        let chunks = build("a\nb\n", "a\nc\n", &config);
        let updated = update_a(&chunks, "a\nb\n", "a\nc\n", &ChangeDescription::empty(4), &config);
        assert_eq!(updated, Ok(chunks));
    }

    #[test]
    fn test_length_mismatch() {
        let config = DiffConfig::default();
        let (_, changes) = apply_edits("abc", &[Edit::insert(1, "x")]).unwrap();
        assert_eq!(
            update_a(&[], "abc", "abc", &changes, &config),
            Err(ChunkError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_nearby_spans_share_a_window() {
        let doc = lines(30, &[]);
        let edits = [Edit::insert(70, "x"), Edit::insert(84, "y"), Edit::insert(175, "z")];
        let (_, changes) = apply_edits(&doc, &edits).unwrap();
        let ranges = find_ranges(&[], &changes, Side::B, &doc, 7);
        assert_eq!(
            ranges,
            vec![
                UpdateRange::new((63, 63), (91, 91), 0, 2),
                UpdateRange::new((168, 168), (182, 182), 0, 1),
            ]
        );
    }

    #[test]
    fn test_window_snaps_to_chunk_boundaries() {
        let a = lines(10, &[]);
        let b = lines(10, &[4]);
        let config = DiffConfig::default();
        let chunks = build(&a, &b, &config);
        assert_eq!((chunks[0].from_b, chunks[0].to_b), (28, 35));
        let (_, changes) = apply_edits(&b, &[Edit::insert(38, "q")]).unwrap();
        let ranges = find_ranges(&chunks, &changes, Side::B, &a, 5);
        assert_eq!(ranges, vec![UpdateRange::new((28, 28), (43, 43), 0, 1)]);
    }

    #[test]
    fn test_window_bounds_land_on_char_boundaries() {
        let a = "aé\n".repeat(10);
        let config = DiffConfig::default().with_margin(2);
        let (b, changes) = apply_edits(&a, &[Edit::insert(20, "x")]).unwrap();
        let ranges = find_ranges(&[], &changes, Side::B, &a, 2);
        assert_eq!(ranges, vec![UpdateRange::new((17, 17), (23, 23), 0, 1)]);

        let updated = update_b(&[], &a, &b, &changes, &config).unwrap();
        assert_eq!(updated, build(&a, &b, &config));
        assert_eq!(
            (updated[0].from_a, updated[0].to_a, updated[0].from_b, updated[0].to_b),
            (20, 24, 20, 25)
        );
    }

    #[test]
    fn test_chunks_after_several_windows_are_shifted() {
        let a = lines(40, &[]);
        let b = lines(40, &[38]);
        let config = DiffConfig::default().with_margin(7);
        let chunks = build(&a, &b, &config);
        let edits = [Edit::delete(7, 14), Edit::insert(140, "new\n")];
        let (new_a, changes) = apply_edits(&a, &edits).unwrap();
        let updated = update_a(&chunks, &new_a, &b, &changes, &config).unwrap();
        assert_eq!(updated.len(), 3);
        assert_eq!(updated[2], chunks[0].offset(-3, 0));
        assert_eq!(updated, build(&new_a, &b, &config));
    }

    #[test]
    fn test_repeated_edits_on_a_line_longer_than_the_margin() {
        let config = DiffConfig::default();
        let a = format!("head\n{}\nz\ntail\n", "a".repeat(3000));
        let mut b = a.replace("\nz\n", "\nZ\n");
        let mut chunks = build(&a, &b, &config);
        assert_eq!(bounds(&chunks), vec![(3006, 3008, 3006, 3008)]);

        // The window ends inside the long line, so the line's chunk reaches
        // the z/Z chunk right after it and the two have to be joined.
        for at in [105, 205] {
            let (new_b, changes) = apply_edits(&b, &[Edit::new(at, at + 1, "b")]).unwrap();
            chunks = update_b(&chunks, &a, &new_b, &changes, &config).unwrap();
            b = new_b;
            assert_eq!(bounds(&chunks), vec![(5, 3008, 5, 3008)]);
        }
        assert_eq!(bounds(&chunks), bounds(&build(&a, &b, &config)));
        let covered: Vec<Change> = chunks[0].absolute_changes().collect();
        assert!(covered.iter().any(|c| c.from_b <= 3006 && 3006 < c.to_b));
    }

    #[test]
    fn test_window_chunk_joins_the_chunk_it_reaches() {
        let config = DiffConfig::default().with_margin(0);
        let a = "k\nx\nk\nk\nk\ny\n";
        let b = "k\nX\nk\nk\nk\nY\n";
        let chunks = build(a, b, &config);
        assert_eq!(bounds(&chunks), vec![(2, 4, 2, 4), (10, 12, 10, 12)]);

        // The edited line sits right before the second chunk, so its chunk
        // ends where the second one starts.
        let (new_b, changes) = apply_edits(b, &[Edit::new(8, 9, "q")]).unwrap();
        let ranges = find_ranges(&chunks, &changes, Side::B, a, 0);
        assert_eq!(ranges, vec![UpdateRange::new((8, 8), (9, 9), 0, 0)]);
        let updated = update_b(&chunks, a, &new_b, &changes, &config).unwrap();
        assert_eq!(bounds(&updated), vec![(2, 4, 2, 4), (8, 12, 8, 12)]);
        assert_eq!(bounds(&updated), bounds(&build(a, &new_b, &config)));
    }

    #[test]
    fn test_chunk_starting_at_window_end_is_carried_over() {
        let config = DiffConfig::default();
        let a = format!("head\n{}\nz\ntail\n", "a".repeat(3000));
        let mut b = a.replace("\nz\n", "\nZ\n");
        b.replace_range(105..106, "b");
        let touching = vec![
            Chunk::new(vec![Change::new(100, 101, 100, 101)], 5, 3006, 5, 3006, true),
            Chunk::new(vec![Change::new(0, 1, 0, 1)], 3006, 3008, 3006, 3008, true),
        ];

        let (new_b, changes) = apply_edits(&b, &[Edit::new(205, 206, "b")]).unwrap();
        let ranges = find_ranges(&touching, &changes, Side::B, &a, config.margin);
        assert_eq!(ranges, vec![UpdateRange::new((0, 0), (3006, 3006), 0, 0)]);
        let updated = update_b(&touching, &a, &new_b, &changes, &config).unwrap();
        assert_eq!(bounds(&updated), vec![(5, 3008, 5, 3008)]);
        assert!(updated[0]
            .absolute_changes()
            .any(|c| c.from_b == 3006 && c.to_b == 3007));
    }
}
