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

use crate::error::Error;
use crate::types::{ItemId, RatingVector, UserId};

/// Access to the rating history of users. Users without history have an empty vector.
pub trait RatingVectorStore {
    fn ratings_of(&self, user: UserId) -> Result<RatingVector, Error>;
}

/// Access to the users who rated an item. Items nobody rated have no raters.
pub trait ItemRaterIndex {
    fn raters_of(&self, item: ItemId) -> Result<FnvHashSet<UserId>, Error>;
}

impl<'a, T: RatingVectorStore + ?Sized> RatingVectorStore for &'a T {
    fn ratings_of(&self, user: UserId) -> Result<RatingVector, Error> {
        (**self).ratings_of(user)
    }
}

impl<'a, T: ItemRaterIndex + ?Sized> ItemRaterIndex for &'a T {
    fn raters_of(&self, item: ItemId) -> Result<FnvHashSet<UserId>, Error> {
        (**self).raters_of(item)
    }
}

/// Rating data held in memory, indexed both by user and by item.
#[derive(Debug, Default)]
pub struct InMemoryRatings {
    user_ratings: FnvHashMap<UserId, RatingVector>,
    item_raters: FnvHashMap<ItemId, FnvHashSet<UserId>>,
}

impl InMemoryRatings {

    pub fn num_users(&self) -> usize {
        self.user_ratings.len()
    }

    pub fn num_items(&self) -> usize {
        self.item_raters.len()
    }

    pub fn num_ratings(&self) -> usize {
        self.user_ratings.values().map(|ratings| ratings.len()).sum()
    }

    /// All items which received at least one rating.
    pub fn items<'a>(&'a self) -> impl Iterator<Item=ItemId> + 'a {
        self.item_raters.keys().cloned()
    }
}

/// Builds the store from `(user, item, rating)` triples. If a user rated an item more than once,
/// the last rating counts.
impl FromIterator<(UserId, ItemId, f64)> for InMemoryRatings {

    fn from_iter<I: IntoIterator<Item=(UserId, ItemId, f64)>>(ratings: I) -> Self {

        let mut histories: FnvHashMap<UserId, Vec<(ItemId, f64)>> =
            FnvHashMap::with_capacity_and_hasher(100, Default::default());

        let mut item_raters: FnvHashMap<ItemId, FnvHashSet<UserId>> =
            FnvHashMap::with_capacity_and_hasher(100, Default::default());

        for (user, item, rating) in ratings {
            histories.entry(user).or_insert_with(Vec::new).push((item, rating));
            item_raters.entry(item).or_insert_with(FnvHashSet::default).insert(user);
        }

        let user_ratings = histories.into_iter()
            .map(|(user, history)| (user, history.into_iter().collect()))
            .collect();

        InMemoryRatings { user_ratings, item_raters }
    }
}

impl RatingVectorStore for InMemoryRatings {
    fn ratings_of(&self, user: UserId) -> Result<RatingVector, Error> {
        Ok(self.user_ratings.get(&user).cloned().unwrap_or_default())
    }
}

impl ItemRaterIndex for InMemoryRatings {
    fn raters_of(&self, item: ItemId) -> Result<FnvHashSet<UserId>, Error> {
        Ok(self.item_raters.get(&item).cloned().unwrap_or_default())
    }
}
