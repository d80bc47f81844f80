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

use std::fs::File;
use std::io::prelude::*;
use std::io::stdout;
use std::path::Path;

use crate::error::Error;
use crate::store::InMemoryRatings;
use crate::types::{ItemId, ScoreRequest, ScoreResult, UserId};

/// Reads tab separated input without headers. Lines may carry additional columns (such as a
/// timestamp) after the ones we are interested in.
pub fn tsv_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(b'\t')
        .from_reader(input)
}

pub fn csv_reader(file: &str) -> Result<csv::Reader<File>, Error> {
    let input = File::open(Path::new(file))?;
    Ok(tsv_reader(input))
}

/// Yields a `(user, item, rating)` triple per line. Malformed lines and ratings which are not
/// finite numbers (`NaN`, `inf`) are skipped.
pub fn ratings_from_csv<'a, R>(
    reader: &'a mut csv::Reader<R>
) -> impl Iterator<Item=(UserId, ItemId, f64)> + 'a
    where R: Read {

    reader.deserialize::<(UserId, ItemId, f64)>()
        .filter_map(|result| {
            match result {
                Ok((user, item, rating)) if !rating.is_finite() => {
                    warn!("Skipping non-finite rating {} of user {} for item {}", rating, user, item);
                    None
                },
                Ok(rating) => Some(rating),
                Err(failure) => {
                    warn!("Skipping malformed rating: {}", failure);
                    None
                }
            }
        })
}

/// Loads all ratings from the file at `ratings_path` into memory.
pub fn read_ratings(ratings_path: &str) -> Result<InMemoryRatings, Error> {

    let mut reader = csv_reader(ratings_path)?;
    let ratings: InMemoryRatings = ratings_from_csv(&mut reader).collect();

    info!(
        "Found {} ratings from {} users for {} items in {}.",
        ratings.num_ratings(),
        ratings.num_users(),
        ratings.num_items(),
        ratings_path,
    );

    Ok(ratings)
}

/// Parses a query of the form `USER:ITEM[,ITEM...]`.
pub fn parse_query(query: &str) -> Result<ScoreRequest, Error> {

    let malformed = || Error::Query(query.to_string());

    let mut parts = query.splitn(2, ':');

    let user: UserId = parts.next()
        .and_then(|user| user.trim().parse().ok())
        .ok_or_else(malformed)?;

    let items = parts.next().ok_or_else(malformed)?;

    let items = items.split(',')
        .map(|item| item.trim().parse::<ItemId>().map_err(|_| malformed()))
        .collect::<Result<Vec<ItemId>, Error>>()?;

    Ok(ScoreRequest::new(user, items))
}

/// Parses queries and merges those for the same user, in order of the first query per user.
pub fn requests_from_queries<I, Q>(queries: I) -> Result<Vec<ScoreRequest>, Error>
    where I: IntoIterator<Item=Q>,
          Q: AsRef<str> {

    let mut requests: Vec<ScoreRequest> = Vec::new();

    for query in queries {
        let request = parse_query(query.as_ref())?;

        match requests.iter_mut().find(|existing| existing.user == request.user) {
            Some(existing) => existing.items.extend(request.items),
            None => requests.push(request),
        }
    }

    Ok(requests)
}

/// Struct used for JSON serialization of predicted scores. Field names will be used in JSON.
#[derive(Serialize)]
struct Score {
    user: UserId,
    item: ItemId,
    score: f64,
}

#[derive(Serialize)]
struct RecommendedItem {
    item: ItemId,
    score: f64,
}

#[derive(Serialize)]
struct Recommendations<'a> {
    user: UserId,
    recommendations: &'a [RecommendedItem],
}

/// Output goes to a file at `output_path` if one is supplied, to stdout otherwise.
pub fn output(output_path: Option<String>) -> Result<Box<dyn Write>, Error> {
    let out: Box<dyn Write> = match output_path {
        Some(path) => Box::new(File::create(&Path::new(&path))?),
        _ => Box::new(stdout()),
    };

    Ok(out)
}

/// Writes a JSON line per predicted score, in ascending item order per user.
pub fn write_scores<W: Write>(
    out: &mut W,
    requests: &[ScoreRequest],
    results: &[ScoreResult],
) -> Result<(), Error> {

    for (request, scores) in requests.iter().zip(results.iter()) {

        let mut items: Vec<&ItemId> = scores.keys().collect();
        items.sort();

        for item in items {
            let score = Score { user: request.user, item: *item, score: scores[item] };
            writeln!(out, "{}", serde_json::to_string(&score)?)?;
        }
    }

    out.flush()?;

    Ok(())
}

/// Writes a JSON line with the recommended items for a user.
pub fn write_recommendations<W: Write>(
    out: &mut W,
    user: UserId,
    recommended_items: &[(ItemId, f64)],
) -> Result<(), Error> {

    let recommendations: Vec<RecommendedItem> = recommended_items.iter()
        .map(|&(item, score)| RecommendedItem { item, score })
        .collect();

    let line = Recommendations { user, recommendations: &recommendations };
    writeln!(out, "{}", serde_json::to_string(&line)?)?;

    Ok(())
}


#[cfg(test)]
mod tests {

    use crate::error::Error;
    use crate::io::{
        parse_query, ratings_from_csv, requests_from_queries, tsv_reader, write_recommendations,
        write_scores,
    };
    use crate::store::{InMemoryRatings, RatingVectorStore};
    use crate::types::{ScoreRequest, ScoreResult};

    #[test]
    fn reads_ratings_and_skips_malformed_lines() {
        let input = "1\t10\t4.0\n1\t20\t2.5\t881250949\nnot\ta\trating\n2\t10\t5\n";

        let mut reader = tsv_reader(input.as_bytes());
        let ratings: InMemoryRatings = ratings_from_csv(&mut reader).collect();

        assert_eq!(ratings.num_ratings(), 3);
        assert_eq!(ratings.ratings_of(1).unwrap().get(20), Some(2.5));
        assert_eq!(ratings.ratings_of(2).unwrap().get(10), Some(5.0));
    }

    #[test]
    fn skips_non_finite_ratings() {
        let input = "1\t10\t4.0\n2\t10\tNaN\n3\t10\tinf\n3\t20\t-inf\n3\t30\t2.0\n";

        let mut reader = tsv_reader(input.as_bytes());
        let ratings: InMemoryRatings = ratings_from_csv(&mut reader).collect();

        assert_eq!(ratings.num_ratings(), 2);
        assert!(ratings.ratings_of(2).unwrap().is_empty());

        let user_three = ratings.ratings_of(3).unwrap();
        assert_eq!(user_three.len(), 1);
        assert_eq!(user_three.get(30), Some(2.0));
    }

    #[test]
    fn query() {
        let request = parse_query("42:1, 2,3").unwrap();

        assert_eq!(request, ScoreRequest::new(42, vec![1, 2, 3]));
    }

    #[test]
    fn malformed_queries() {
        for query in &["42", "42:", "user:1", "42:1,x", ":1"] {
            match parse_query(query) {
                Err(Error::Query(rejected)) => assert_eq!(&rejected, query),
                other => panic!("unexpected result for {}: {:?}", query, other),
            }
        }
    }

    #[test]
    fn queries_for_same_user_are_merged() {
        let requests = requests_from_queries(vec!["7:1", "3:2", "7:4,5"]).unwrap();

        assert_eq!(requests, vec![
            ScoreRequest::new(7, vec![1, 4, 5]),
            ScoreRequest::new(3, vec![2]),
        ]);
    }

    #[test]
    fn scores_as_json_lines() {
        let requests = vec![ScoreRequest::new(7, vec![1, 2, 3])];

        let mut scores = ScoreResult::default();
        scores.insert(3, 2.5);
        scores.insert(1, 4.0);

        let mut out: Vec<u8> = Vec::new();
        write_scores(&mut out, &requests, &[scores]).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert_eq!(
            written,
            "{\"user\":7,\"item\":1,\"score\":4.0}\n{\"user\":7,\"item\":3,\"score\":2.5}\n"
        );
    }

    #[test]
    fn recommendations_as_json_line() {
        let mut out: Vec<u8> = Vec::new();
        write_recommendations(&mut out, 7, &[(3, 4.5), (1, 2.0)]).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert_eq!(
            written,
            "{\"user\":7,\"recommendations\":[{\"item\":3,\"score\":4.5},{\"item\":1,\"score\":2.0}]}\n"
        );
    }
}
