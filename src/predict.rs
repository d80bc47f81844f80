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

use crate::error::Undefined;
use crate::types::{ItemId, RatingVector};

/// Predicts the rating of the target user for `item` from the neighbors who rated it:
///
/// ```text
/// p(u, i) = mean(u) + sum_v sim(u, v) * (r(v, i) - mean(v)) / sum_v sim(u, v)
/// ```
///
/// `neighbors` holds the similarity of each neighbor to the target user together with the
/// neighbor's full rating vector. Neighbors who did not rate `item` do not contribute. Without
/// contributing neighbors, or if their similarities sum up to exactly zero, there is no prediction.
/// The same holds if the prediction does not come out as a finite number.
pub fn predict_rating<'a, I>(user_mean: f64, item: ItemId, neighbors: I) -> Result<f64, Undefined>
    where I: IntoIterator<Item=(f64, &'a RatingVector)> {

    let mut weighted_offsets = 0.0;
    let mut similarity_sum = 0.0;

    for (similarity, ratings) in neighbors {
        if let (Some(rating), Some(mean)) = (ratings.get(item), ratings.mean()) {
            weighted_offsets += similarity * (rating - mean);
            similarity_sum += similarity;
        }
    }

    if similarity_sum == 0.0 {
        return Err(Undefined::NoPrediction);
    }

    let prediction = user_mean + weighted_offsets / similarity_sum;

    if prediction.is_finite() {
        Ok(prediction)
    } else {
        Err(Undefined::NoPrediction)
    }
}
