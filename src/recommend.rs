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

use std::collections::BinaryHeap;
use std::cmp::Ordering;

use crate::error::Error;
use crate::scorer::UserUserScorer;
use crate::store::{ItemRaterIndex, RatingVectorStore};
use crate::types::{ItemId, UserId};

/// Result type used to find the top-k items per user via a binary heap
#[derive(PartialEq, Debug)]
struct ScoredItem {
    item: ItemId,
    score: f64,
}

/// Ordering for our max-heap, higher scores rank first and ties go to the smaller item id.
fn cmp_reverse(scored_item_a: &ScoredItem, scored_item_b: &ScoredItem) -> Ordering {
    match scored_item_b.score.partial_cmp(&scored_item_a.score) {
        Some(Ordering::Equal) | None => scored_item_a.item.cmp(&scored_item_b.item),
        Some(ordering) => ordering,
    }
}

impl Eq for ScoredItem {}

impl Ord for ScoredItem {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_reverse(self, other)
    }
}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(cmp_reverse(self, other))
    }
}

/// Recommends the `k` candidate items with the highest predicted rating which `user` has not
/// rated yet, best first.
pub fn recommend<S, R, I>(
    scorer: &UserUserScorer<S, R>,
    user: UserId,
    candidate_items: I,
    k: usize,
) -> Result<Vec<(ItemId, f64)>, Error>
    where S: RatingVectorStore,
          R: ItemRaterIndex,
          I: IntoIterator<Item=ItemId> {

    if k == 0 {
        return Ok(Vec::new());
    }

    let history = scorer.ratings().ratings_of(user)?;

    let unrated_items = candidate_items.into_iter()
        .filter(|item| !history.contains(*item));

    let scores = scorer.score(user, unrated_items)?;

    let mut heap = BinaryHeap::with_capacity(k);

    for (item, score) in scores.into_iter() {
        let scored_item = ScoredItem { item, score };

        if heap.len() < k {
            heap.push(scored_item);
        } else if let Some(mut top) = heap.peek_mut() {
            if scored_item < *top {
                *top = scored_item;
            }
        }
    }

    Ok(heap.into_sorted_vec()
        .into_iter()
        .map(|scored_item| (scored_item.item, scored_item.score))
        .collect())
}


#[cfg(test)]
mod tests {

    use crate::recommend::{recommend, ScoredItem};
    use crate::scorer::UserUserScorer;
    use crate::store::InMemoryRatings;

    #[test]
    fn scored_item_ordering_reversed() {
        let item_a = ScoredItem { item: 1, score: 0.5 };
        let item_b = ScoredItem { item: 2, score: 1.5 };
        let item_c = ScoredItem { item: 3, score: 0.3 };
        let item_d = ScoredItem { item: 4, score: 0.5 };

        assert!(item_a > item_b);
        assert!(item_a < item_c);
        assert!(item_b < item_c);
        assert!(item_a < item_d);
    }

    fn ratings() -> InMemoryRatings {
        vec![
            (1, 1, 5.0),
            (1, 2, 1.0),
            (2, 1, 5.0),
            (2, 2, 1.0),
            (2, 3, 5.0),
            (2, 4, 1.0),
            (2, 5, 3.0),
        ].into_iter().collect()
    }

    #[test]
    fn recommends_unrated_items_by_score() {
        let store = ratings();
        let scorer = UserUserScorer::new(&store, &store);

        let recommendations = recommend(&scorer, 1, store.items(), 2).unwrap();

        let items: Vec<u64> = recommendations.iter().map(|&(item, _)| item).collect();
        assert_eq!(items, vec![3, 5]);
        assert!(recommendations[0].1 > recommendations[1].1);
    }

    #[test]
    fn nothing_for_unknown_user() {
        let store = ratings();
        let scorer = UserUserScorer::new(&store, &store);

        assert!(recommend(&scorer, 42, store.items(), 10).unwrap().is_empty());
    }
}
