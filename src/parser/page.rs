//! Single breed pages (`/dog-breeds/<slug>/`), as opposed to the
//! multi-breed comparison page.

use serde::Serialize;
use tracing::warn;

use super::document::{Document, Predicate};
use super::error::ExtractError;
use super::normalize::{bar_rating, clean_percentage, clean_text, estimate_life_exp};
use super::selector::{Locator, Step};

/// One row scraped from a breed's own page. Bar scores are on the 1..=5
/// scale as drawn, without rescaling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreedPageRecord {
    pub name: String,
    pub personality: Option<String>,
    pub estimated_life_exp: Option<f64>,
    pub grooming_score: Option<u8>,
    pub shedding_score: Option<u8>,
    pub exercise_score: Option<u8>,
    pub trainability_score: Option<u8>,
    pub temperament_score: Option<u8>,
}

impl BreedPageRecord {
    pub const COLUMNS: [&'static str; 8] = [
        "name",
        "personality",
        "estimated_life_exp",
        "grooming_score",
        "shedding_score",
        "exercise_score",
        "trainability_score",
        "temperament_score",
    ];

    pub fn to_row(&self) -> Vec<String> {
        fn opt<T: ToString>(v: Option<T>) -> String {
            v.map(|v| v.to_string()).unwrap_or_default()
        }
        vec![
            self.name.clone(),
            self.personality.clone().unwrap_or_default(),
            self.estimated_life_exp.map(|v| format!("{v:?}")).unwrap_or_default(),
            opt(self.grooming_score),
            opt(self.shedding_score),
            opt(self.exercise_score),
            opt(self.trainability_score),
            opt(self.temperament_score),
        ]
    }
}

/// Locators for every value on a breed page.
#[derive(Debug, Clone)]
pub struct PageSelectors {
    pub name: Locator,
    pub personality: Locator,
    pub life_exp: Locator,
    pub grooming: Locator,
    pub shedding: Locator,
    pub exercise: Locator,
    pub trainability: Locator,
    pub temperament: Locator,
}

const ATTRIBUTE_ROW: &str = "attribute-list__row";

fn div(n: usize) -> Step {
    Step::Child(Predicate::tag("div").nth_child(n))
}

/// `#<panel> > div:1 > div:4 > div:<section> > div:1 > div:3 > div:1`
fn panel_bar(panel: &'static str, section: usize) -> Locator {
    Locator {
        anchor: Predicate::id(panel),
        steps: vec![div(1), div(4), div(section), div(1), div(3), div(1)],
    }
}

impl PageSelectors {
    pub fn akc() -> Self {
        Self {
            name: Locator { anchor: Predicate::id("page-title"), steps: Vec::new() },
            personality: Locator {
                anchor: Predicate::tag("span").with_class("attribute-list__text--lg"),
                steps: Vec::new(),
            },
            life_exp: Locator {
                anchor: Predicate::tag("li").with_class(ATTRIBUTE_ROW).nth_child(5),
                steps: vec![Step::Child(Predicate::tag("span").nth_child(2))],
            },
            grooming: panel_bar("panel-GROOMING", 1),
            shedding: panel_bar("panel-GROOMING", 2),
            exercise: panel_bar("panel-EXERCISE", 1),
            trainability: panel_bar("panel-TRAINING", 1),
            temperament: panel_bar("panel-TRAINING", 2),
        }
    }
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self::akc()
    }
}

fn text(doc: &Document, loc: &Locator, what: &'static str) -> Result<String, ExtractError> {
    let el = loc.resolve(doc).ok_or(ExtractError::PageElementMissing(what))?;
    Ok(clean_text(&el.text()).trim().to_string())
}

fn bar(doc: &Document, loc: &Locator, what: &'static str) -> Result<u8, ExtractError> {
    let style = loc
        .resolve(doc)
        .and_then(|el| el.attr("style"))
        .ok_or(ExtractError::PageElementMissing(what))?;
    clean_percentage(style).map(bar_rating)
}

fn optional<T>(value: Result<T, ExtractError>, what: &str, breed: &str) -> Option<T> {
    value
        .inspect_err(|e| warn!(breed, error = %e, "no {what} info"))
        .ok()
}

/// Builds a record from one breed page. Only the name is required; every
/// other value is left empty with a warning when it cannot be read.
pub fn build_page(selectors: &PageSelectors, doc: &Document) -> Result<BreedPageRecord, ExtractError> {
    let name = text(doc, &selectors.name, "name")?;
    if name.is_empty() {
        return Err(ExtractError::PageElementMissing("name"));
    }

    let personality = optional(text(doc, &selectors.personality, "personality"), "personality", &name)
        .filter(|p| !p.is_empty());
    let estimated_life_exp = optional(
        text(doc, &selectors.life_exp, "life expectancy").and_then(|t| estimate_life_exp(&t)),
        "life expectancy",
        &name,
    );

    Ok(BreedPageRecord {
        personality,
        estimated_life_exp,
        grooming_score: optional(bar(doc, &selectors.grooming, "grooming"), "grooming", &name),
        shedding_score: optional(bar(doc, &selectors.shedding, "shedding"), "shedding", &name),
        exercise_score: optional(bar(doc, &selectors.exercise, "exercise"), "exercise", &name),
        trainability_score: optional(
            bar(doc, &selectors.trainability, "trainability"),
            "trainability",
            &name,
        ),
        temperament_score: optional(
            bar(doc, &selectors.temperament, "temperament"),
            "temperament",
            &name,
        ),
        name,
    })
}
