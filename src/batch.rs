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

use std::sync::Mutex;
use std::time::Instant;

use scoped_pool::Pool;

use crate::error::Error;
use crate::scorer::UserUserScorer;
use crate::store::{ItemRaterIndex, RatingVectorStore};
use crate::types::{ScoreRequest, ScoreResult};
use crate::utils;

/// Scores all requests on a pool of `pool_size` threads which share the scorer. Results are
/// returned in the order of the requests. The first failing request fails the whole batch.
pub fn score_all<S, R>(
    scorer: &UserUserScorer<S, R>,
    requests: &[ScoreRequest],
    pool_size: usize,
) -> Result<Vec<ScoreResult>, Error>
    where S: RatingVectorStore + Sync,
          R: ItemRaterIndex + Sync {

    let batch_start = Instant::now();

    let pool = Pool::new(pool_size.max(1));

    let results: Vec<Slot> = requests.iter()
        .map(|_| Mutex::new(None))
        .collect();

    pool.scoped(|scope| {
        for (request, slot) in requests.iter().zip(results.iter()) {
            scope.execute(move || {
                let result = scorer.score_request(request);

                if let Ok(ref scores) = result {
                    debug!("{} of {} items scored for user {}",
                        scores.len(), request.items.len(), request.user);
                }

                if let Ok(mut slot) = slot.lock() {
                    *slot = Some(result);
                }
            });
        }
    });

    pool.shutdown();

    let duration_for_batch = utils::to_millis(batch_start.elapsed());
    info!("{} requests scored with {} neighbors in {}ms",
        requests.len(), scorer.config().neighbor_count, duration_for_batch);

    collect_results(requests, results)
}

type Slot = Mutex<Option<Result<ScoreResult, Error>>>;

/// Unpacks the per-request slots in request order. A slot that was never filled means the
/// scoring task for its request did not run to completion.
fn collect_results(
    requests: &[ScoreRequest],
    slots: Vec<Slot>,
) -> Result<Vec<ScoreResult>, Error> {

    requests.iter()
        .zip(slots.into_iter())
        .map(|(request, slot)| {
            let result = match slot.into_inner() {
                Ok(result) => result,
                Err(poisoned) => poisoned.into_inner(),
            };

            result.unwrap_or_else(|| Err(Error::Incomplete(request.user)))
        })
        .collect()
}

#[cfg(test)]
mod tests {

    use std::sync::Mutex;

    use crate::batch::{collect_results, score_all, Slot};
    use crate::error::Error;
    use crate::scorer::{ScorerConfig, UserUserScorer};
    use crate::store::InMemoryRatings;
    use crate::types::{ScoreRequest, ScoreResult};

    fn ratings() -> InMemoryRatings {
        vec![
            (1, 1, 4.0),
            (1, 2, 2.0),
            (2, 1, 5.0),
            (2, 2, 1.0),
            (2, 3, 4.0),
            (2, 4, 2.0),
            (3, 1, 2.0),
            (3, 3, 5.0),
            (3, 4, 3.0),
        ].into_iter().collect()
    }

    #[test]
    fn same_results_as_sequential_scoring() {
        let store = ratings();
        let scorer = UserUserScorer::with_config(&store, &store, ScorerConfig { neighbor_count: 2 });

        let requests: Vec<ScoreRequest> = (1..5)
            .map(|user| ScoreRequest::new(user, 1..6))
            .collect();

        let results = score_all(&scorer, &requests, 3).unwrap();

        assert_eq!(results.len(), requests.len());

        for (request, result) in requests.iter().zip(results.iter()) {
            assert_eq!(result, &scorer.score_request(request).unwrap());
        }

        // user 4 has no ratings at all
        assert!(results[3].is_empty());
    }

    #[test]
    fn empty_batch() {
        let store = ratings();
        let scorer = UserUserScorer::new(&store, &store);

        assert!(score_all(&scorer, &[], 2).unwrap().is_empty());
    }

    #[test]
    fn unfinished_request_is_reported_for_its_user() {
        let requests = vec![ScoreRequest::new(1, vec![1]), ScoreRequest::new(2, vec![1])];

        let mut scores = ScoreResult::default();
        scores.insert(1, 4.0);

        let slots: Vec<Slot> = vec![Mutex::new(Some(Ok(scores))), Mutex::new(None)];

        match collect_results(&requests, slots) {
            Err(Error::Incomplete(user)) => assert_eq!(user, 2),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn filled_slots_are_returned_in_request_order() {
        let requests = vec![ScoreRequest::new(1, vec![1]), ScoreRequest::new(2, vec![1])];

        let mut first = ScoreResult::default();
        first.insert(1, 4.0);
        let second = ScoreResult::default();

        let slots: Vec<Slot> = vec![
            Mutex::new(Some(Ok(first.clone()))),
            Mutex::new(Some(Ok(second.clone()))),
        ];

        assert_eq!(collect_results(&requests, slots).unwrap(), vec![first, second]);
    }
}
