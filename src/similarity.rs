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

/// Cosine similarity of two sparse vectors. Only co-occurring items contribute to the dot product,
/// while each norm is taken over all entries of its own vector. The similarity is undefined if
/// either norm is zero or the ratings are not finite.
pub fn cosine_similarity(a: &RatingVector, b: &RatingVector) -> Result<f64, Undefined> {

    let norms = a.norm() * b.norm();

    if norms == 0.0 || !norms.is_finite() {
        return Err(Undefined::UndefinedSimilarity);
    }

    // Walk the shorter vector and probe the longer one
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut products: Vec<(ItemId, f64)> = shorter.iter()
        .filter_map(|(item, value)| longer.get(item).map(|other_value| (item, value * other_value)))
        .collect();

    // Sum in item order, so that the result does not depend on the order of the arguments
    products.sort_by_key(|&(item, _)| item);

    let dot: f64 = products.iter().map(|&(_, product)| product).sum();
    let similarity = dot / norms;

    if similarity.is_finite() {
        Ok(similarity)
    } else {
        Err(Undefined::UndefinedSimilarity)
    }
}


#[cfg(test)]
mod tests {

    use crate::error::Undefined;
    use crate::similarity::cosine_similarity;
    use crate::types::RatingVector;

    fn close_enough_to(value: f64, expected: f64) -> bool {
        (value - expected).abs() < 1e-9
    }

    #[test]
    fn identical_direction() {
        let a: RatingVector = vec![(1, 1.0), (2, -1.0)].into_iter().collect();
        let b: RatingVector = vec![(1, 2.0), (2, -2.0)].into_iter().collect();

        assert!(close_enough_to(cosine_similarity(&a, &b).unwrap(), 1.0));
    }

    #[test]
    fn opposite_direction() {
        let a: RatingVector = vec![(1, 1.0), (2, -1.0)].into_iter().collect();
        let b: RatingVector = vec![(1, -3.0), (2, 3.0)].into_iter().collect();

        assert!(close_enough_to(cosine_similarity(&a, &b).unwrap(), -1.0));
    }

    #[test]
    fn norms_cover_non_overlapping_entries() {
        let a: RatingVector = vec![(1, 1.0), (2, -1.0)].into_iter().collect();
        let b: RatingVector = vec![(1, 1.0), (3, -1.0)].into_iter().collect();

        // dot = 1, both norms are sqrt(2)
        assert!(close_enough_to(cosine_similarity(&a, &b).unwrap(), 0.5));
    }

    #[test]
    fn disjoint_vectors_are_uncorrelated() {
        let a: RatingVector = vec![(1, 1.0), (2, -1.0)].into_iter().collect();
        let b: RatingVector = vec![(3, 1.0), (4, -1.0)].into_iter().collect();

        assert_eq!(cosine_similarity(&a, &b), Ok(0.0));
    }

    #[test]
    fn zero_norm_is_undefined() {
        let a: RatingVector = vec![(1, 1.0), (2, -1.0)].into_iter().collect();
        let flat: RatingVector = vec![(1, 0.0), (2, 0.0)].into_iter().collect();

        assert_eq!(cosine_similarity(&a, &flat), Err(Undefined::UndefinedSimilarity));
        assert_eq!(cosine_similarity(&flat, &a), Err(Undefined::UndefinedSimilarity));
    }

    #[test]
    fn non_finite_ratings_are_undefined() {
        let a: RatingVector = vec![(1, 1.0), (2, -1.0)].into_iter().collect();
        let infinite: RatingVector = vec![(1, ::std::f64::INFINITY), (2, -1.0)].into_iter().collect();
        let not_a_number: RatingVector = vec![(1, ::std::f64::NAN), (2, -1.0)].into_iter().collect();

        assert_eq!(cosine_similarity(&a, &infinite), Err(Undefined::UndefinedSimilarity));
        assert_eq!(cosine_similarity(&not_a_number, &a), Err(Undefined::UndefinedSimilarity));
    }

    #[test]
    fn exactly_symmetric_for_vectors_of_equal_length() {
        let a: RatingVector = vec![(1, 0.1), (2, -0.7), (3, 0.3), (4, 0.2), (5, 0.1)]
            .into_iter().collect();
        let b: RatingVector = vec![(5, 0.9), (4, -0.3), (3, 0.7), (2, -1.1), (1, -0.2)]
            .into_iter().collect();

        assert_eq!(a.len(), b.len());
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn symmetric() {
        let a: RatingVector = vec![(1, 0.5), (2, -1.5), (3, 1.0)].into_iter().collect();
        let b: RatingVector = vec![(2, 2.0), (3, -1.0), (4, -1.0), (5, 0.0)].into_iter().collect();

        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }
}
