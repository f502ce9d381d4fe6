use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::Review;

/// Secondary ordering, applied alone when rating order is `None`. With both
/// set to `None` reviews keep upstream order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOrder {
    /// Newest first.
    #[default]
    Latest,
    /// Oldest first.
    Earliest,
    None,
}

impl DateOrder {
    /// `none`/`default` disable date ordering; unknown values keep the default.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("earliest") {
            DateOrder::Earliest
        } else if raw.eq_ignore_ascii_case("none") || raw.eq_ignore_ascii_case("default") {
            DateOrder::None
        } else {
            DateOrder::Latest
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingOrder {
    #[default]
    Highest,
    Lowest,
    None,
}

impl RatingOrder {
    /// `none`/`default` disable rating ordering; unknown values keep the default.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("lowest") {
            RatingOrder::Lowest
        } else if raw.eq_ignore_ascii_case("none") || raw.eq_ignore_ascii_case("default") {
            RatingOrder::None
        } else {
            RatingOrder::Highest
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSort {
    pub date_order: DateOrder,
    pub rating_order: RatingOrder,
}

impl ReviewSort {
    pub fn new(date_order: DateOrder, rating_order: RatingOrder) -> Self {
        Self {
            date_order,
            rating_order,
        }
    }

    pub fn compare(&self, a: &Review, b: &Review) -> Ordering {
        let by_rating = match self.rating_order {
            RatingOrder::Highest => b.rating.cmp(&a.rating),
            RatingOrder::Lowest => a.rating.cmp(&b.rating),
            RatingOrder::None => Ordering::Equal,
        };
        by_rating.then_with(|| match self.date_order {
            DateOrder::Latest => b.date.cmp(&a.date),
            DateOrder::Earliest => a.date.cmp(&b.date),
            DateOrder::None => Ordering::Equal,
        })
    }

    pub fn apply(&self, reviews: &[Review]) -> Vec<Review> {
        sort_reviews(reviews, self.date_order, self.rating_order)
    }
}

/// Sorted copy of `reviews`. Equal (rating, date) pairs keep input order.
pub fn sort_reviews(
    reviews: &[Review],
    date_order: DateOrder,
    rating_order: RatingOrder,
) -> Vec<Review> {
    let sort = ReviewSort::new(date_order, rating_order);
    let mut sorted = reviews.to_vec();
    sorted.sort_by(|a, b| sort.compare(a, b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::stub::review;

    fn summary(reviews: &[Review]) -> Vec<(u8, String)> {
        reviews
            .iter()
            .map(|r| (r.rating, r.date.format("%Y-%m-%d").to_string()))
            .collect()
    }

    #[test]
    fn highest_then_latest() {
        let input = vec![
            review("a", 3, (2024, 1, 1)),
            review("b", 5, (2024, 2, 1)),
            review("c", 5, (2024, 1, 15)),
        ];
        let sorted = sort_reviews(&input, DateOrder::Latest, RatingOrder::Highest);
        assert_eq!(
            summary(&sorted),
            vec![
                (5, "2024-02-01".to_string()),
                (5, "2024-01-15".to_string()),
                (3, "2024-01-01".to_string()),
            ]
        );
        // Input untouched.
        assert_eq!(input[0].rating, 3);
    }

    #[test]
    fn lowest_then_earliest() {
        let input = vec![
            review("a", 4, (2024, 3, 1)),
            review("b", 1, (2024, 2, 1)),
            review("c", 4, (2024, 1, 1)),
        ];
        let sorted = sort_reviews(&input, DateOrder::Earliest, RatingOrder::Lowest);
        let names: Vec<&str> = sorted.iter().map(|r| r.reviewer_name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn no_rating_order_sorts_by_date_only() {
        let input = vec![
            review("a", 5, (2024, 1, 1)),
            review("b", 1, (2024, 3, 1)),
            review("c", 3, (2024, 2, 1)),
        ];
        let sorted = sort_reviews(&input, DateOrder::Latest, RatingOrder::None);
        let names: Vec<&str> = sorted.iter().map(|r| r.reviewer_name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn no_date_order_keeps_input_order_within_rating() {
        let input = vec![
            review("old", 4, (2024, 1, 1)),
            review("low", 2, (2024, 6, 1)),
            review("new", 4, (2024, 5, 1)),
        ];
        let sorted = sort_reviews(&input, DateOrder::None, RatingOrder::Highest);
        let names: Vec<&str> = sorted.iter().map(|r| r.reviewer_name.as_str()).collect();
        assert_eq!(names, vec!["old", "new", "low"]);

        let untouched = sort_reviews(&input, DateOrder::None, RatingOrder::None);
        let names: Vec<&str> = untouched.iter().map(|r| r.reviewer_name.as_str()).collect();
        assert_eq!(names, vec!["old", "low", "new"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let input = vec![
            review("first", 4, (2024, 1, 1)),
            review("second", 4, (2024, 1, 1)),
            review("third", 4, (2024, 1, 1)),
        ];
        for date_order in [DateOrder::Latest, DateOrder::Earliest] {
            let sorted = sort_reviews(&input, date_order, RatingOrder::Highest);
            let names: Vec<&str> = sorted.iter().map(|r| r.reviewer_name.as_str()).collect();
            assert_eq!(names, vec!["first", "second", "third"]);
        }
    }

    #[test]
    fn parses_control_values() {
        assert_eq!(DateOrder::parse("earliest"), DateOrder::Earliest);
        assert_eq!(DateOrder::parse("default"), DateOrder::None);
        assert_eq!(DateOrder::parse("sideways"), DateOrder::Latest);
        assert_eq!(RatingOrder::parse("LOWEST"), RatingOrder::Lowest);
        assert_eq!(RatingOrder::parse("default"), RatingOrder::None);
        assert_eq!(RatingOrder::parse("bogus"), RatingOrder::Highest);
        assert_eq!(
            ReviewSort::default(),
            ReviewSort::new(DateOrder::Latest, RatingOrder::Highest)
        );
    }

    #[test]
    fn empty_input_is_fine() {
        assert!(sort_reviews(&[], DateOrder::Latest, RatingOrder::Highest).is_empty());
    }
}
