//! Runs of unchanged lines a host can fold away.

use crate::chunk::Chunk;
use crate::mapping::Side;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollapseConfig {
    /// Unchanged lines kept visible next to every chunk.
    pub margin: usize,
    /// Shortest run of lines worth collapsing.
    pub min_size: usize,
}

impl Default for CollapseConfig {
    fn default() -> Self {
        CollapseConfig {
            margin: 3,
            min_size: 4,
        }
    }
}

/// A foldable run: `from` is the start of its first line, `to` the end of
/// its last line (before the line break).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapsedRange {
    pub from: usize,
    pub to: usize,
    pub lines: usize,
}

/// Unchanged runs of `doc` (the `side` document) that are at least
/// `config.margin` lines away from every chunk and at least
/// `config.min_size` lines long. The run before the first chunk has no
/// leading margin and the run after the last one extends to the end.
pub fn collapse_unchanged(
    chunks: &[Chunk],
    doc: &str,
    side: Side,
    config: &CollapseConfig,
) -> Vec<CollapsedRange> {
    let lines = Lines::new(doc);
    let mut ranges = vec![];
    let mut prev_line = 1;
    for i in 0..=chunks.len() {
        let chunk = chunks.get(i);
        let first = if i == 0 { 1 } else { prev_line + config.margin };
        let last = match chunk {
            Some(chunk) => {
                let (from, _) = side.range(chunk);
                lines.number_at(from).saturating_sub(1 + config.margin)
            }
            None => lines.count(),
        };
        if last >= first && last - first + 1 >= config.min_size {
            ranges.push(CollapsedRange {
                from: lines.start(first),
                to: lines.end(last),
                lines: last - first + 1,
            });
        }
        if let Some(chunk) = chunk {
            let (_, to) = side.range(chunk);
            prev_line = lines.number_at(to.min(doc.len()));
        }
    }
    ranges
}

/// 1-based line lookup over a document.
struct Lines {
    starts: Vec<usize>,
    len: usize,
}

impl Lines {
    fn new(doc: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(doc.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Lines {
            starts,
            len: doc.len(),
        }
    }

    fn count(&self) -> usize {
        self.starts.len()
    }

    fn number_at(&self, pos: usize) -> usize {
        self.starts.partition_point(|&start| start <= pos)
    }

    fn start(&self, number: usize) -> usize {
        self.starts[number - 1]
    }

    fn end(&self, number: usize) -> usize {
        self.starts.get(number).map_or(self.len, |next| next - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::build;
    use crate::config::DiffConfig;
    use pretty_assertions::assert_eq;

    fn alphabet(upper: &[char]) -> String {
        ('a'..='t')
            .map(|c| {
                let c = if upper.contains(&c) { c.to_ascii_uppercase() } else { c };
                format!("{c}\n")
            })
            .collect()
    }

    #[test]
    fn test_collapse_around_one_chunk() {
        let a = alphabet(&[]);
        let b = alphabet(&['j']);
        let chunks = build(&a, &b, &DiffConfig::default());
        let ranges = collapse_unchanged(&chunks, &a, Side::A, &CollapseConfig::default());
        assert_eq!(
            ranges,
            vec![
                CollapsedRange { from: 0, to: 11, lines: 6 },
                CollapsedRange { from: 26, to: 40, lines: 8 },
            ]
        );
        assert_eq!(&a[0..11], "a\nb\nc\nd\ne\nf");
    }

    #[test]
    fn test_short_runs_stay_visible() {
        let a = "a\nb\nc\nd\n";
        let chunks = build(a, "a\nB\nc\nd\n", &DiffConfig::default());
        assert_eq!(collapse_unchanged(&chunks, a, Side::A, &CollapseConfig::default()), vec![]);
    }

    #[test]
    fn test_identical_documents_collapse_entirely() {
        let a = alphabet(&[]);
        let ranges = collapse_unchanged(&[], &a, Side::B, &CollapseConfig::default());
        assert_eq!(ranges, vec![CollapsedRange { from: 0, to: 40, lines: 21 }]);
    }

    #[test]
    fn test_config_defaults_from_partial_table() {
        let config: CollapseConfig = serde_json::from_str(r#"{ "min_size": 10 }"#).unwrap();
        assert_eq!(config, CollapseConfig { margin: 3, min_size: 10 });
    }
}
