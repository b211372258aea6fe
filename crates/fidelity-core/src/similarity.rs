//! Partial-ratio string similarity.
//!
//! The score of two strings is the best alignment of the shorter one against
//! an equally long window of the longer one, on a 0–100 scale:
//!
//! 1. find the matching blocks between `shorter` and `longer` with a
//!    longest-common-block decomposition (Ratcliff/Obershelp);
//! 2. for each block, slide a window of `shorter.len()` characters over
//!    `longer` so that the block lines up;
//! 3. score each window with `2·M / T` (M matched characters, T total);
//! 4. report the best window, rounded half-to-even, short-circuiting to 100
//!    when a window scores above 0.995.
//!
//! Equal strings score 100; otherwise an empty side scores 0.
//!
//! The block decomposition drops "popular" characters from the longer
//! sequence's index once it reaches 200 characters (a character is popular
//! when it occurs more than `len / 100 + 1` times). Long URLs hit this, so it
//! changes scores and must be kept for comparable results.

use std::collections::HashMap;

const AUTOJUNK_MIN_LEN: usize = 200;
const PERFECT_WINDOW: f64 = 0.995;

/// Partial-ratio similarity of two strings, 0–100.
///
/// Comparison is case-sensitive; callers that want case-insensitive matching
/// lowercase both sides first.
pub fn partial_ratio(s1: &str, s2: &str) -> u8 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    partial_ratio_chars(&a, &b)
}

/// [`partial_ratio`] over pre-split character sequences.
pub fn partial_ratio_chars(s1: &[char], s2: &[char]) -> u8 {
    if s1 == s2 {
        return 100;
    }
    if s1.is_empty() || s2.is_empty() {
        return 0;
    }

    let (shorter, longer) = if s1.len() <= s2.len() {
        (s1, s2)
    } else {
        (s2, s1)
    };

    let blocks = BlockMatcher::new(shorter, longer).matching_blocks();
    let mut best = 0.0_f64;
    for block in blocks {
        let long_start = block.b.saturating_sub(block.a);
        let long_end = (long_start + shorter.len()).min(longer.len());
        let window = &longer[long_start..long_end];

        let score = ratio(shorter, window);
        if score > PERFECT_WINDOW {
            return 100;
        }
        if score > best {
            best = score;
        }
    }

    (best * 100.0).round_ties_even() as u8
}

/// `2·M / T` similarity of two sequences, in [0, 1].
fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched: usize = BlockMatcher::new(a, b)
        .matching_blocks()
        .iter()
        .map(|block| block.size)
        .sum();
    2.0 * matched as f64 / total as f64
}

/// A run of `size` equal characters at `a[a..]` and `b[b..]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Block {
    a: usize,
    b: usize,
    size: usize,
}

struct BlockMatcher<'s> {
    a: &'s [char],
    b: &'s [char],
    b_index: HashMap<char, Vec<usize>>,
}

impl<'s> BlockMatcher<'s> {
    fn new(a: &'s [char], b: &'s [char]) -> Self {
        let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, ch) in b.iter().enumerate() {
            b_index.entry(*ch).or_default().push(j);
        }
        if b.len() >= AUTOJUNK_MIN_LEN {
            let popular = b.len() / 100 + 1;
            b_index.retain(|_, positions| positions.len() <= popular);
        }
        Self { a, b, b_index }
    }

    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Block {
        let (a, b) = (self.a, self.b);
        let mut best = Block {
            a: alo,
            b: blo,
            size: 0,
        };

        // run length of the match ending at b[j], for the previous row of a
        let mut run_at: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next_run_at = HashMap::new();
            if let Some(positions) = self.b_index.get(&a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_at.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_run_at.insert(j, k);
                    if k > best.size {
                        best = Block {
                            a: i + 1 - k,
                            b: j + 1 - k,
                            size: k,
                        };
                    }
                }
            }
            run_at = next_run_at;
        }

        // Popular characters are missing from the index; grow across them.
        while best.a > alo && best.b > blo && a[best.a - 1] == b[best.b - 1] {
            best.a -= 1;
            best.b -= 1;
            best.size += 1;
        }
        while best.a + best.size < ahi
            && best.b + best.size < bhi
            && a[best.a + best.size] == b[best.b + best.size]
        {
            best.size += 1;
        }

        best
    }

    /// Non-overlapping, non-adjacent matching blocks in ascending order,
    /// terminated by a zero-size sentinel at `(len(a), len(b))`.
    fn matching_blocks(&self) -> Vec<Block> {
        let (la, lb) = (self.a.len(), self.b.len());
        let mut pending = vec![(0, la, 0, lb)];
        let mut found = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let block = self.longest_match(alo, ahi, blo, bhi);
            if block.size == 0 {
                continue;
            }
            found.push(block);
            if alo < block.a && blo < block.b {
                pending.push((alo, block.a, blo, block.b));
            }
            if block.a + block.size < ahi && block.b + block.size < bhi {
                pending.push((block.a + block.size, ahi, block.b + block.size, bhi));
            }
        }
        found.sort();

        let mut merged: Vec<Block> = Vec::with_capacity(found.len() + 1);
        for block in found {
            match merged.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged.push(Block {
            a: la,
            b: lb,
            size: 0,
        });
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn equal_strings_score_100() {
        assert_eq!(partial_ratio("http://x.com/a.js", "http://x.com/a.js"), 100);
        assert_eq!(partial_ratio("", ""), 100);
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(partial_ratio("", "http://x.com/"), 0);
        assert_eq!(partial_ratio("http://x.com/", ""), 0);
    }

    #[test]
    fn substring_scores_100() {
        assert_eq!(
            partial_ratio(
                "http://x.com/a.js",
                "https://web.archive.org/web/20200101000000js_/http://x.com/a.js"
            ),
            100
        );
        assert_eq!(partial_ratio("this is a test", "this is a test!"), 100);
    }

    #[test]
    fn score_is_symmetric_in_argument_order() {
        let a = "http://x.com/static/app.js?v=1";
        let b = "http://x.com/static/app.js?v=2&cache=0";
        assert_eq!(partial_ratio(a, b), partial_ratio(b, a));
    }

    #[test]
    fn single_substitution_in_ten_scores_90() {
        assert_eq!(partial_ratio("abcdefghij", "abcdefghiX"), 90);
    }

    #[test]
    fn single_substitution_in_eleven_rounds_to_91() {
        assert_eq!(partial_ratio("abcdefghijk", "abcdefghijX"), 91);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(partial_ratio("abc", "xyz"), 0);
    }

    #[test]
    fn case_is_significant() {
        assert_eq!(partial_ratio("ABC", "abc"), 0);
    }

    #[test]
    fn matching_blocks_collapse_adjacent_runs() {
        let a = chars("abxcd");
        let b = chars("abcd");
        let blocks = BlockMatcher::new(&a, &b).matching_blocks();
        assert_eq!(
            blocks,
            vec![
                Block { a: 0, b: 0, size: 2 },
                Block { a: 3, b: 2, size: 2 },
                Block { a: 5, b: 4, size: 0 },
            ]
        );
    }

    #[test]
    fn long_sequences_still_align_across_popular_characters() {
        let path = "a/".repeat(150);
        let archived = format!("http://x.com/{path}end.js");
        let current = format!("https://cdn.x.com/{path}end.js");
        assert!(archived.chars().count() >= AUTOJUNK_MIN_LEN);
        assert!(partial_ratio(&archived, &current) > 90);
    }
}
