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
use crate::types::RatingVector;

/// Shifts all ratings by the vector's mean, which removes the individual rating-scale bias of a
/// user. The key domain stays the same.
pub fn mean_center(ratings: &RatingVector) -> Result<RatingVector, Undefined> {
    let mean = ratings.mean().ok_or(Undefined::EmptyVector)?;

    Ok(ratings.iter()
        .map(|(item, rating)| (item, rating - mean))
        .collect())
}
