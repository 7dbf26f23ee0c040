use std::collections::HashMap;

use crate::naming::normalize;

// Right-hand tokens at least this long leave characters that occur more than
// `len / 100 + 1` times out of the block index.
const POPULAR_MIN_LEN: usize = 200;

/// Similarity of two column labels in `[0.0, 1.0]`.
///
/// Both labels are normalized first; an empty token on either side scores
/// 0.0. Otherwise the score is `2 * M / (len_a + len_b)`, where `M` counts the
/// characters covered by the matching blocks of `left` against `right` (see
/// [`matching_characters`]). The block search anchors on `left`, so for a few
/// pairs swapping the arguments changes the score.
pub fn score(left: &str, right: &str) -> f64 {
    let left = normalize(left);
    let right = normalize(right);
    token_score(&left, &right)
}

/// Like [`score`], for tokens that are already normalized.
pub fn token_score(left: &str, right: &str) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    if left == right {
        return 1.0;
    }
    let left = left.chars().collect::<Vec<_>>();
    let right = right.chars().collect::<Vec<_>>();
    let matches = matching_characters(&left, &right);
    2.0 * matches as f64 / (left.len() + right.len()) as f64
}

/// Characters covered by the matching blocks of `left` against `right`.
///
/// The longest common block is taken first (earliest in `left`, then earliest
/// in `right`, on ties), and the search repeats on the pieces before and after
/// it until no block remains.
pub fn matching_characters(left: &[char], right: &[char]) -> usize {
    let index = BlockIndex::new(right);
    let mut pending = vec![(0, left.len(), 0, right.len())];
    let mut total = 0;
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = index.longest_match(left, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        total += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }
    total
}

struct BlockIndex<'a> {
    right: &'a [char],
    positions: HashMap<char, Vec<usize>>,
}

impl<'a> BlockIndex<'a> {
    fn new(right: &'a [char]) -> Self {
        let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, ch) in right.iter().enumerate() {
            positions.entry(*ch).or_default().push(j);
        }
        if right.len() >= POPULAR_MIN_LEN {
            let limit = right.len() / 100 + 1;
            positions.retain(|_, found| found.len() <= limit);
        }
        Self { right, positions }
    }

    /// Longest block `left[i..i + size] == right[j..j + size]` inside
    /// `left[alo..ahi]` and `right[blo..bhi]`, as `(i, j, size)`.
    fn longest_match(
        &self,
        left: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        // run length of the block ending at each right position for the previous left char
        let mut runs: HashMap<usize, usize> = HashMap::new();
        for (i, ch) in left.iter().enumerate().take(ahi).skip(alo) {
            let mut next = HashMap::new();
            if let Some(found) = self.positions.get(ch) {
                for &j in found {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let previous = j
                        .checked_sub(1)
                        .and_then(|p| runs.get(&p))
                        .copied()
                        .unwrap_or(0);
                    let size = previous + 1;
                    next.insert(j, size);
                    if size > best_size {
                        best_i = i + 1 - size;
                        best_j = j + 1 - size;
                        best_size = size;
                    }
                }
            }
            runs = next;
        }

        // Characters left out of the index can still extend a block.
        while best_i > alo && best_j > blo && left[best_i - 1] == self.right[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && left[best_i + best_size] == self.right[best_j + best_size]
        {
            best_size += 1;
        }
        (best_i, best_j, best_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(token: &str) -> Vec<char> {
        token.chars().collect()
    }

    #[test]
    fn identical_tokens_score_one() {
        assert_eq!(score("Name", " name "), 1.0);
        assert_eq!(score("ID", "id"), 1.0);
    }

    #[test]
    fn empty_tokens_score_zero() {
        assert_eq!(score("", "name"), 0.0);
        assert_eq!(score("name", "%%"), 0.0);
        assert_eq!(score("", ""), 0.0);
    }

    #[test]
    fn ratio_counts_matching_characters() {
        // "name" is fully contained in "full_name": 2 * 4 / (4 + 9)
        assert_eq!(score("Name", "full_name"), 8.0 / 13.0);
        // "dep" then "t": 2 * 4 / (4 + 10)
        assert_eq!(score("Dept", "department"), 8.0 / 14.0);
        assert_eq!(score("abc", "xyz"), 0.0);
    }

    #[test]
    fn blocks_are_not_a_longest_subsequence() {
        // "___" is the longest block and nothing matches on either side of it,
        // although a, b, c, d, e appear in order in both tokens.
        assert_eq!(score("abcde___", "___azbzczdze"), 0.3);
        assert_eq!(matching_characters(&chars("abcde___"), &chars("___azbzczdze")), 3);
        assert_eq!(score("orderdate", "date_of_order"), 0.45454545454545453);
    }

    #[test]
    fn ratios_are_exact_fractions() {
        assert_eq!(score("abcdefghij", "abcdefgxyz"), 0.7);
        assert_eq!(score("qty", "quantity"), 0.5454545454545454);
        assert_eq!(score("customer_id", "cust no"), 0.5882352941176471);
        assert_eq!(score("amount", "total_amount"), 0.6666666666666666);
        assert_eq!(score("zipcode", "postcode"), 0.6666666666666666);
        assert_eq!(score("xabcyabcz", "abcabc"), 0.8);
        assert_eq!(score("abab", "baba"), 0.75);
    }

    #[test]
    fn block_search_anchors_on_the_left_token() {
        assert_eq!(score("ab", "bacb"), 0.6666666666666666);
        assert_eq!(score("bacb", "ab"), 0.3333333333333333);
    }

    #[test]
    fn popular_characters_in_long_tokens_still_extend_blocks() {
        let long = "a".repeat(250);
        let token = format!("{long}b");
        // every "a" is left out of the index on the right, the "b" anchors the
        // block and it grows back over the run of "a"s
        assert_eq!(matching_characters(&chars("aab"), &chars(&token)), 3);
        assert_eq!(token_score("aab", &token), 0.023622047244094488);
    }
}
