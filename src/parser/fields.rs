use std::collections::HashMap;
use std::fmt;

use super::document::Predicate;
use super::selector::{Leaf, Step};

/// Comparison page columns this crate knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Personality,
    Size,
    LifeExpectancy,
    Trainability,
    Grooming,
    Shedding,
    ActivityLevel,
    Barking,
}

impl Field {
    #[cfg(test)]
    pub const ALL: [Field; 8] = [
        Field::Personality,
        Field::Size,
        Field::LifeExpectancy,
        Field::Trainability,
        Field::Grooming,
        Field::Shedding,
        Field::ActivityLevel,
        Field::Barking,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Personality => "personality",
            Field::Size => "size",
            Field::LifeExpectancy => "life_exp",
            Field::Trainability => "trainability",
            Field::Grooming => "grooming",
            Field::Shedding => "shedding",
            Field::ActivityLevel => "activity_level",
            Field::Barking => "barking",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where one field lives: the comparison row, then a descent from the
/// candidate's cell to the leaf.
#[derive(Debug, Clone)]
pub struct FieldSelector {
    pub row: Predicate,
    pub descent: Vec<Step>,
    pub leaf: Leaf,
}

/// Bar graphs sit at cell > div > div.bar-graph__bg > div.bar-graph__section.
const BAR_DESCENT: [Step; 3] = [Step::Content(1), Step::Content(3), Step::Content(1)];

const ROW_CLASS: &str = "breed-results-comparison__row";

#[derive(Debug, Clone)]
pub struct FieldSelectors {
    by_field: HashMap<Field, FieldSelector>,
}

impl FieldSelectors {
    /// Row positions of the AKC breed comparison page.
    pub fn akc() -> Self {
        let row = |n: usize| Predicate::tag("div").with_class(ROW_CLASS).nth_child(n);
        let text = |n: usize| FieldSelector { row: row(n), descent: Vec::new(), leaf: Leaf::Text };
        let bar = |n: usize| FieldSelector {
            row: row(n),
            descent: BAR_DESCENT.to_vec(),
            leaf: Leaf::Attr("style"),
        };

        let by_field = HashMap::from([
            (Field::Personality, text(5)),
            (
                Field::Size,
                FieldSelector { row: row(14), descent: vec![Step::Content(1)], leaf: Leaf::Text },
            ),
            (Field::LifeExpectancy, text(17)),
            (Field::Trainability, text(23)),
            (Field::Grooming, bar(29)),
            (Field::Shedding, bar(32)),
            (Field::ActivityLevel, text(35)),
            (Field::Barking, bar(38)),
        ]);
        Self { by_field }
    }

    pub fn get(&self, field: Field) -> Option<&FieldSelector> {
        self.by_field.get(&field)
    }
}

impl Default for FieldSelectors {
    fn default() -> Self {
        Self::akc()
    }
}

/// Label → 1..=5 rating for the text-valued comparison rows.
#[derive(Debug, Clone)]
pub struct RatingTable {
    ratings: HashMap<&'static str, u8>,
}

impl RatingTable {
    pub fn get(&self, label: &str) -> Option<u8> {
        self.ratings.get(label).copied()
    }

    #[cfg(test)]
    pub fn labels(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        self.ratings.iter().map(|(k, v)| (*k, *v))
    }
}

impl Default for RatingTable {
    fn default() -> Self {
        let ratings = HashMap::from([
            ("May Be Stubborn", 1),
            ("Independent", 2),
            ("Agreeable", 3),
            ("Easy Training", 4),
            ("Eager to Please", 5),
            ("Couch Potato", 1),
            ("Calm", 2),
            ("Regular Exercise", 3),
            ("Energetic", 4),
            ("Needs Lots of Activity", 5),
        ]);
        Self { ratings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_has_a_selector() {
        let selectors = FieldSelectors::akc();
        for field in Field::ALL {
            assert!(selectors.get(field).is_some(), "{field} missing");
        }
    }

    #[test]
    fn rating_table_is_exact() {
        let table = RatingTable::default();
        assert_eq!(table.get("Eager to Please"), Some(5));
        assert_eq!(table.get("Couch Potato"), Some(1));
        assert_eq!(table.get("eager to please"), None);
        assert_eq!(table.labels().count(), 10);
    }
}
