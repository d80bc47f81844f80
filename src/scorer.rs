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

use fnv::FnvHashMap;

use crate::centering::mean_center;
use crate::error::Error;
use crate::neighbors::{select_neighbors, Neighbor};
use crate::predict::predict_rating;
use crate::similarity::cosine_similarity;
use crate::store::{ItemRaterIndex, RatingVectorStore};
use crate::types::{ItemId, RatingVector, ScoreRequest, ScoreResult, UserId};

pub const DEFAULT_NEIGHBOR_COUNT: usize = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScorerConfig {
    /// Maximum number of neighbors used per predicted item.
    pub neighbor_count: usize,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        ScorerConfig { neighbor_count: DEFAULT_NEIGHBOR_COUNT }
    }
}

/// A rater of some requested item, as seen from the target user of a single `score` call.
struct Candidate {
    ratings: RatingVector,
    similarity: Option<f64>,
}

/// Candidates of one `score` call, `None` marks users without any ratings.
type Candidates = FnvHashMap<UserId, Option<Candidate>>;

/// Predicts ratings with user-user collaborative filtering. The scorer holds no state besides its
/// collaborators and configuration, concurrent calls to `score` are safe whenever the
/// collaborators allow concurrent reads.
pub struct UserUserScorer<S, R> {
    ratings: S,
    raters: R,
    config: ScorerConfig,
}

impl<S, R> UserUserScorer<S, R>
    where S: RatingVectorStore,
          R: ItemRaterIndex {

    pub fn new(ratings: S, raters: R) -> Self {
        Self::with_config(ratings, raters, ScorerConfig::default())
    }

    pub fn with_config(ratings: S, raters: R, config: ScorerConfig) -> Self {
        UserUserScorer { ratings, raters, config }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn ratings(&self) -> &S {
        &self.ratings
    }

    pub fn score_request(&self, request: &ScoreRequest) -> Result<ScoreResult, Error> {
        self.score(request.user, request.items.iter().cloned())
    }

    /// Predicts the ratings of `user` for `items`. Items for which no prediction can be computed
    /// are absent from the result, a user without ratings gets no predictions at all. Failures of
    /// the rating store or the rater index are returned unchanged.
    pub fn score<I>(&self, user: UserId, items: I) -> Result<ScoreResult, Error>
        where I: IntoIterator<Item=ItemId> {

        let mut scores = ScoreResult::default();

        let user_ratings = self.ratings.ratings_of(user)?;

        let (user_mean, user_centered) = match (user_ratings.mean(), mean_center(&user_ratings)) {
            (Some(mean), Ok(centered)) => (mean, centered),
            _ => return Ok(scores),
        };

        let mut candidates = Candidates::default();

        for item in items {

            let raters = self.raters.raters_of(item)?;

            let neighbors = select_neighbors(
                user,
                raters,
                self.config.neighbor_count,
                |rater| self.candidate_for(&user_centered, rater, &mut candidates),
            )?;

            let neighbor_ratings = neighbors.iter()
                .filter_map(|neighbor| {
                    candidates.get(&neighbor.user)
                        .and_then(Option::as_ref)
                        .map(|candidate| (neighbor.weight(), &candidate.ratings))
                });

            if let Ok(prediction) = predict_rating(user_mean, item, neighbor_ratings) {
                scores.insert(item, prediction);
            }
        }

        Ok(scores)
    }

    /// Compares `rater` to the target user, once per `score` call. Raters without ratings cannot
    /// be centered and are not eligible as neighbors.
    fn candidate_for(
        &self,
        user_centered: &RatingVector,
        rater: UserId,
        candidates: &mut Candidates,
    ) -> Result<Option<Neighbor>, Error> {

        if let Some(candidate) = candidates.get(&rater) {
            return Ok(candidate.as_ref()
                .map(|candidate| Neighbor { user: rater, similarity: candidate.similarity }));
        }

        let ratings = self.ratings.ratings_of(rater)?;

        let candidate = mean_center(&ratings).ok()
            .map(|centered| {
                let similarity = cosine_similarity(user_centered, &centered).ok();
                Candidate { ratings, similarity }
            });

        let neighbor = candidate.as_ref()
            .map(|candidate| Neighbor { user: rater, similarity: candidate.similarity });
        candidates.insert(rater, candidate);

        Ok(neighbor)
    }
}
