/// Scores how alike two strings are
#[cfg_attr(test, mockall::automock)]
pub trait StringSimilarityMatcher: Send + Sync {
    /// Similarity ratio in `[0, 1]`, 1.0 meaning identical
    fn ratio(&self, a: &str, b: &str) -> f64;
}

/// Ratcliff/Obershelp "gestalt" matcher
///
/// The ratio is `2 * M / (|a| + |b|)` where `M` is the number of characters
/// in the matching blocks found by repeatedly taking the longest common
/// substring and recursing on both sides of it. Case-sensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceMatcher;

impl StringSimilarityMatcher for SequenceMatcher {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let total = a.len() + b.len();
        if total == 0 {
            return 1.0;
        }

        2.0 * matching_characters(&a, &b) as f64 / total as f64
    }
}

/// Window of `a` and `b` still to be matched: `(a_lo, a_hi, b_lo, b_hi)`
type Window = (usize, usize, usize, usize);

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending: Vec<Window> = vec![(0, a.len(), 0, b.len())];

    while let Some(window @ (a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, window);
        if size == 0 {
            continue;
        }

        matched += size;
        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }

    matched
}

/// Longest common block inside the window as `(start_a, start_b, size)`.
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
fn longest_match(a: &[char], b: &[char], (a_lo, a_hi, b_lo, b_hi): Window) -> (usize, usize, usize) {
    let width = b_hi - b_lo + 1;
    let mut best = (a_lo, b_lo, 0);
    // run[j] = length of the common run ending at a[i - 1] and b[b_lo + j - 1]
    let mut previous = vec![0usize; width];

    for i in a_lo..a_hi {
        let mut current = vec![0usize; width];
        for j in b_lo..b_hi {
            if a[i] != b[j] {
                continue;
            }
            let run = previous[j - b_lo] + 1;
            current[j - b_lo + 1] = run;
            if run > best.2 {
                best = (i + 1 - run, j + 1 - run, run);
            }
        }
        previous = current;
    }

    best
}
