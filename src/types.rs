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

use std::iter::FromIterator;

use fnv::{FnvHashMap, FnvHashSet};

pub type UserId = u64;
pub type ItemId = u64;

/// Predicted ratings per item. Items without a computable prediction are absent.
pub type ScoreResult = FnvHashMap<ItemId, f64>;

/// A user's sparse ratings, only items that were actually rated have an entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RatingVector {
    ratings: FnvHashMap<ItemId, f64>,
}

impl RatingVector {

    pub fn new() -> Self {
        RatingVector { ratings: FnvHashMap::default() }
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn get(&self, item: ItemId) -> Option<f64> {
        self.ratings.get(&item).cloned()
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.ratings.contains_key(&item)
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item=(ItemId, f64)> + 'a {
        self.ratings.iter().map(|(item, rating)| (*item, *rating))
    }

    pub fn items<'a>(&'a self) -> impl Iterator<Item=ItemId> + 'a {
        self.ratings.keys().cloned()
    }

    pub fn sum(&self) -> f64 {
        self.ratings.values().sum()
    }

    /// Arithmetic mean of the present ratings, `None` if nothing was rated.
    pub fn mean(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            None
        } else {
            Some(self.sum() / self.ratings.len() as f64)
        }
    }

    /// Euclidean norm over all entries of this vector.
    pub fn norm(&self) -> f64 {
        self.ratings.values()
            .map(|value| value * value)
            .sum::<f64>()
            .sqrt()
    }
}

/// Later entries for the same item replace earlier ones.
impl FromIterator<(ItemId, f64)> for RatingVector {
    fn from_iter<I: IntoIterator<Item=(ItemId, f64)>>(entries: I) -> Self {
        let mut ratings = FnvHashMap::default();
        for (item, rating) in entries {
            ratings.insert(item, rating);
        }
        RatingVector { ratings }
    }
}

/// The items to score for a single user.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreRequest {
    pub user: UserId,
    pub items: FnvHashSet<ItemId>,
}

impl ScoreRequest {
    pub fn new<I: IntoIterator<Item=ItemId>>(user: UserId, items: I) -> Self {
        ScoreRequest { user, items: items.into_iter().collect() }
    }
}
