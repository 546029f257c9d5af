use serde::Serialize;
use tracing::warn;

use super::document::Document;
use super::error::ExtractError;
use super::extract::FieldExtractor;
use super::fields::Field;
use super::normalize::{estimate_life_exp, reverse_scale};

/// Score used when a breed has no barking bar.
const MEDIUM_BARKING: u8 = 3;
/// Raw rating assumed when a grooming or shedding bar is missing.
const FALLBACK_BAR_RATING: u8 = 1;

/// One output row. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreedRecord {
    pub name: String,
    pub personality: Option<String>,
    pub size: String,
    pub estimated_life_exp: Option<f64>,
    pub trainability_score: Option<u8>,
    pub grooming_score: Option<u8>,
    pub shedding_score: Option<u8>,
    pub activity_level_score: Option<u8>,
    pub barking_score: Option<u8>,
}

impl BreedRecord {
    pub const COLUMNS: [&'static str; 9] = [
        "name",
        "personality",
        "size",
        "estimated_life_exp",
        "trainability_score",
        "grooming_score",
        "shedding_score",
        "activity_level_score",
        "barking_score",
    ];

    /// Cells in `COLUMNS` order; missing values are empty.
    pub fn to_row(&self) -> Vec<String> {
        fn opt<T: ToString>(v: Option<T>) -> String {
            v.map(|v| v.to_string()).unwrap_or_default()
        }
        vec![
            self.name.clone(),
            self.personality.clone().unwrap_or_default(),
            self.size.clone(),
            self.estimated_life_exp.map(|v| format!("{v:?}")).unwrap_or_default(),
            opt(self.trainability_score),
            opt(self.grooming_score),
            opt(self.shedding_score),
            opt(self.activity_level_score),
            opt(self.barking_score),
        ]
    }
}

/// Builds a record for candidate `index` of a comparison page.
///
/// Personality, grooming, shedding and barking fall back with a warning.
/// Size, life expectancy, trainability and activity level errors propagate.
pub fn build(
    ex: &FieldExtractor<'_>,
    doc: &Document,
    index: usize,
    name: &str,
) -> Result<BreedRecord, ExtractError> {
    let personality = match ex.text(Field::Personality, doc, index) {
        Ok(p) => Some(p),
        Err(e) => {
            warn!(field = %Field::Personality, breed = name, error = %e, "no personality info");
            None
        }
    };

    let size = ex.extract(Field::Size, doc, index)?;
    let estimated_life_exp = estimate_life_exp(&ex.extract(Field::LifeExpectancy, doc, index)?)?;
    let trainability = ex.rating(Field::Trainability, doc, index)?;

    let grooming = bar_or_default(ex, Field::Grooming, doc, index, name);
    let shedding = bar_or_default(ex, Field::Shedding, doc, index, name);
    let activity_level = ex.rating(Field::ActivityLevel, doc, index)?;

    let barking_score = match ex.bar(Field::Barking, doc, index) {
        Ok(rating) => reverse_scale(rating),
        Err(e) => {
            warn!(
                field = %Field::Barking,
                breed = name,
                error = %e,
                "missing barking data, setting to medium ({MEDIUM_BARKING})"
            );
            MEDIUM_BARKING
        }
    };

    Ok(BreedRecord {
        name: name.to_string(),
        personality,
        size,
        estimated_life_exp: Some(estimated_life_exp),
        trainability_score: Some(trainability),
        grooming_score: Some(reverse_scale(grooming)),
        shedding_score: Some(reverse_scale(shedding)),
        activity_level_score: Some(reverse_scale(activity_level)),
        barking_score: Some(barking_score),
    })
}

fn bar_or_default(ex: &FieldExtractor<'_>, field: Field, doc: &Document, index: usize, name: &str) -> u8 {
    ex.bar(field, doc, index).unwrap_or_else(|e| {
        warn!(field = %field, breed = name, error = %e, "no {field} info");
        FALLBACK_BAR_RATING
    })
}
