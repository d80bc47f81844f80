/**
 * UUCF
 * Copyright (C) 2018 Sebastian Schelter
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::Error;
use crate::types::UserId;

/// A user who rated the item in question, together with its similarity to the target user. The
/// similarity is `None` if it is undefined, as happens for centered vectors with a zero norm.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Neighbor {
    pub user: UserId,
    pub similarity: Option<f64>,
}

impl Neighbor {

    /// Weight of this neighbor in a prediction, undefined similarities count as zero.
    pub fn weight(&self) -> f64 {
        self.similarity.unwrap_or(0.0)
    }
}

/// Ranking order for neighbors: higher similarity comes first, neighbors with an undefined
/// similarity come after all others, and ties are ordered by ascending user id. A neighbor is
/// "less" than another if it ranks ahead of it, so that the top of a max-heap always holds the
/// weakest neighbor kept so far. There is no total order on floating point numbers, incomparable
/// similarities fall back to the user id.
fn cmp_rank(neighbor_a: &Neighbor, neighbor_b: &Neighbor) -> Ordering {
    let by_similarity = match (neighbor_a.similarity, neighbor_b.similarity) {
        (Some(similarity_a), Some(similarity_b)) => {
            similarity_b.partial_cmp(&similarity_a).unwrap_or(Ordering::Equal)
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_similarity.then_with(|| neighbor_a.user.cmp(&neighbor_b.user))
}

impl Eq for Neighbor {}

impl Ord for Neighbor {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_rank(self, other)
    }
}

impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(cmp_rank(self, other))
    }
}

/// Keeps the `n` best ranked candidates, best first. The target user never makes it into the
/// result, even if it shows up among the candidates.
pub fn top_n<I>(target: UserId, candidates: I, n: usize) -> Vec<Neighbor>
    where I: IntoIterator<Item=Neighbor> {

    if n == 0 {
        return Vec::new();
    }

    let mut heap = BinaryHeap::with_capacity(n);

    for candidate in candidates {
        if candidate.user == target {
            continue;
        }

        if heap.len() < n {
            heap.push(candidate);
        } else if let Some(mut weakest) = heap.peek_mut() {
            if candidate < *weakest {
                *weakest = candidate;
            }
        }
    }

    heap.into_sorted_vec()
}

/// Ranks the raters of an item by their similarity to the target user and keeps the `n` most
/// similar ones. `candidate_for` compares a rater to the target user, it yields `None` for raters
/// who cannot be compared at all (users without ratings). Errors from looking up raters are
/// passed through unchanged.
pub fn select_neighbors<R, F>(
    target: UserId,
    raters: R,
    n: usize,
    mut candidate_for: F,
) -> Result<Vec<Neighbor>, Error>
    where R: IntoIterator<Item=UserId>,
          F: FnMut(UserId) -> Result<Option<Neighbor>, Error> {

    let mut candidates = Vec::new();

    for user in raters {
        if user == target {
            continue;
        }

        if let Some(candidate) = candidate_for(user)? {
            candidates.push(candidate);
        }
    }

    Ok(top_n(target, candidates, n))
}
