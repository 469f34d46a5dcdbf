//! Property tests for the star rating: monotonicity, the always-achievable
//! floor star, and the 0..=5 range.

use certgen_lib::{Level, Skill, star_rating};
use proptest::prelude::*;

fn levels() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Starters),
        Just(Level::Movers),
        Just(Level::Flyers),
    ]
}

fn skills() -> impl Strategy<Value = Skill> {
    prop_oneof![
        Just(Skill::Listening),
        Just(Skill::ReadingWriting),
        Just(Skill::Speaking),
    ]
}

proptest! {
    #[test]
    fn star_rating_is_monotonic_in_points(
        level in levels(),
        skill in skills(),
        a in 0.0f64..=50.0,
        b in 0.0f64..=50.0,
    ) {
        let thresholds = level.star_thresholds(skill);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(star_rating(Some(lo), &thresholds) <= star_rating(Some(hi), &thresholds));
    }

    #[test]
    fn zero_points_earn_exactly_one_star(level in levels(), skill in skills()) {
        prop_assert_eq!(star_rating(Some(0.0), &level.star_thresholds(skill)), 1);
    }

    #[test]
    fn present_points_never_rate_zero_stars(
        level in levels(),
        skill in skills(),
        points in 0.0f64..=100.0,
    ) {
        let stars = star_rating(Some(points), &level.star_thresholds(skill));
        prop_assert!((1..=5).contains(&stars));
    }

    #[test]
    fn missing_points_always_rate_zero(level in levels(), skill in skills()) {
        prop_assert_eq!(star_rating(None, &level.star_thresholds(skill)), 0);
    }
}
