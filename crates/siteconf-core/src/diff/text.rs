//! Line-based unified diff
//!
//! Used when either side of a comparison is not a structured document.

const CONTEXT_LINES: usize = 3;

/// Upper bound on LCS table cells; larger inputs are shown as a full replace
const MAX_LCS_CELLS: usize = 4_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineOp {
    Equal { old: usize, new: usize },
    Delete { old: usize },
    Insert { new: usize },
}

impl LineOp {
    fn is_change(self) -> bool {
        !matches!(self, LineOp::Equal { .. })
    }
}

/// Unified diff of `previous` against `current`
///
/// Returns an empty string when the line sequences are equal. Otherwise the
/// output starts with `--- previous` / `+++ current` headers followed by
/// `@@ -a,b +c,d @@` hunks with three lines of context.
pub fn unified_diff(previous: &str, current: &str) -> String {
    let old: Vec<&str> = previous.lines().collect();
    let new: Vec<&str> = current.lines().collect();
    let ops = line_ops(&old, &new);

    if !ops.iter().any(|op| op.is_change()) {
        return String::new();
    }

    let mut out = String::from("--- previous\n+++ current\n");
    for (start, end) in hunk_ranges(&ops) {
        render_hunk(&mut out, &ops[start..end], &ops[..start], &old, &new);
    }
    out
}

fn line_ops(old: &[&str], new: &[&str]) -> Vec<LineOp> {
    let prefix = old
        .iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let mut ops: Vec<LineOp> = (0..prefix)
        .map(|i| LineOp::Equal { old: i, new: i })
        .collect();

    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];
    ops.extend(middle_ops(old_mid, new_mid, prefix));

    let old_tail = old.len() - suffix;
    let new_tail = new.len() - suffix;
    ops.extend((0..suffix).map(|i| LineOp::Equal {
        old: old_tail + i,
        new: new_tail + i,
    }));
    ops
}

/// LCS alignment of the differing middle section
fn middle_ops(old: &[&str], new: &[&str], offset: usize) -> Vec<LineOp> {
    let (n, m) = (old.len(), new.len());

    if (n + 1).saturating_mul(m + 1) > MAX_LCS_CELLS {
        let deletes = (0..n).map(|i| LineOp::Delete { old: offset + i });
        let inserts = (0..m).map(|j| LineOp::Insert { new: offset + j });
        return deletes.chain(inserts).collect();
    }

    // lcs[i][j] = LCS length of old[i..] and new[j..]
    let width = m + 1;
    let mut lcs = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i * width + j] = if old[i] == new[j] {
                lcs[(i + 1) * width + j + 1] + 1
            } else {
                lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i] == new[j] {
            ops.push(LineOp::Equal {
                old: offset + i,
                new: offset + j,
            });
            i += 1;
            j += 1;
        } else if lcs[(i + 1) * width + j] >= lcs[i * width + j + 1] {
            ops.push(LineOp::Delete { old: offset + i });
            i += 1;
        } else {
            ops.push(LineOp::Insert { new: offset + j });
            j += 1;
        }
    }
    ops.extend((i..n).map(|i| LineOp::Delete { old: offset + i }));
    ops.extend((j..m).map(|j| LineOp::Insert { new: offset + j }));
    ops
}

/// Op index ranges of each hunk, changes padded with context and merged
fn hunk_ranges(ops: &[LineOp]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for (idx, op) in ops.iter().enumerate() {
        if !op.is_change() {
            continue;
        }
        let start = idx.saturating_sub(CONTEXT_LINES);
        let end = (idx + 1 + CONTEXT_LINES).min(ops.len());
        match ranges.last_mut() {
            Some(last) if start <= last.1 => last.1 = end,
            _ => ranges.push((start, end)),
        }
    }
    ranges
}

fn render_hunk(out: &mut String, hunk: &[LineOp], before: &[LineOp], old: &[&str], new: &[&str]) {
    let old_before = before
        .iter()
        .filter(|op| !matches!(op, LineOp::Insert { .. }))
        .count();
    let new_before = before
        .iter()
        .filter(|op| !matches!(op, LineOp::Delete { .. }))
        .count();
    let old_len = hunk
        .iter()
        .filter(|op| !matches!(op, LineOp::Insert { .. }))
        .count();
    let new_len = hunk
        .iter()
        .filter(|op| !matches!(op, LineOp::Delete { .. }))
        .count();

    // An empty side points at the line before the hunk
    let old_start = if old_len == 0 { old_before } else { old_before + 1 };
    let new_start = if new_len == 0 { new_before } else { new_before + 1 };

    out.push_str(&format!(
        "@@ -{},{} +{},{} @@\n",
        old_start, old_len, new_start, new_len
    ));
    for op in hunk {
        let (marker, line) = match *op {
            LineOp::Equal { old: i, .. } => (' ', old[i]),
            LineOp::Delete { old: i } => ('-', old[i]),
            LineOp::Insert { new: j } => ('+', new[j]),
        };
        out.push(marker);
        out.push_str(line);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_inputs_yield_empty() {
        assert_eq!(unified_diff("a\nb\n", "a\nb"), "");
    }

    #[test]
    fn test_single_line_change() {
        assert_eq!(
            unified_diff("foo 1", "foo 2"),
            "--- previous\n+++ current\n@@ -1,1 +1,1 @@\n-foo 1\n+foo 2\n"
        );
    }

    #[test]
    fn test_context_is_limited_to_three_lines() {
        let previous = "1\n2\n3\n4\n5\n6\n7\n8\n9\n";
        let current = "1\n2\n3\n4\n5\nsix\n7\n8\n9\n";
        assert_eq!(
            unified_diff(previous, current),
            "--- previous\n+++ current\n@@ -3,7 +3,7 @@\n 3\n 4\n 5\n-6\n+six\n 7\n 8\n 9\n"
        );
    }

    #[test]
    fn test_distant_changes_form_separate_hunks() {
        let previous: String = (1..=20).map(|i| format!("{}\n", i)).collect();
        let current: String = (1..=20)
            .map(|i| match i {
                2 => "two\n".to_string(),
                19 => "nineteen\n".to_string(),
                _ => format!("{}\n", i),
            })
            .collect();
        let diff = unified_diff(&previous, &current);
        assert_eq!(diff.matches("@@ -").count(), 2);
    }

    #[test]
    fn test_pure_insertion_at_start() {
        assert_eq!(
            unified_diff("b", "a\nb"),
            "--- previous\n+++ current\n@@ -1,1 +1,2 @@\n+a\n b\n"
        );
    }

    #[test]
    fn test_insertion_into_empty() {
        assert_eq!(
            unified_diff("", "x"),
            "--- previous\n+++ current\n@@ -0,0 +1,1 @@\n+x\n"
        );
    }
}
