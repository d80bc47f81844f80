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

use std::io;

use thiserror::Error;

use crate::types::UserId;

/// Conditions under which a partial result is mathematically undefined. These are handled inside
/// the scorer by dropping the affected candidate or item and never reach callers of `score`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Undefined {
    #[error("cannot center a rating vector without entries")]
    EmptyVector,
    #[error("cosine similarity with a zero norm vector")]
    UndefinedSimilarity,
    #[error("no neighbors with a non-zero similarity sum")]
    NoPrediction,
}

/// Failures which are passed on to the caller unchanged.
#[derive(Error, Debug)]
pub enum Error {
    #[error("rating store failure: {0}")]
    Store(String),
    #[error("scoring for user {0} did not finish")]
    Incomplete(UserId),
    #[error("malformed query '{0}', expected USER:ITEM[,ITEM...]")]
    Query(String),
    #[error("csv input: {0}")]
    Csv(#[from] csv::Error),
    #[error("json output: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
