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

extern crate csv;
extern crate fnv;
extern crate scoped_pool;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
#[macro_use]
extern crate log;
extern crate thiserror;
#[cfg(test)]
extern crate rand;

pub mod types;
pub mod error;
pub mod centering;
pub mod similarity;
pub mod neighbors;
pub mod predict;
pub mod store;
pub mod scorer;
pub mod batch;
pub mod recommend;
pub mod io;
pub mod utils;

pub use crate::error::{Error, Undefined};
pub use crate::scorer::{ScorerConfig, UserUserScorer, DEFAULT_NEIGHBOR_COUNT};
pub use crate::store::{InMemoryRatings, ItemRaterIndex, RatingVectorStore};
pub use crate::types::{ItemId, RatingVector, ScoreRequest, ScoreResult, UserId};
