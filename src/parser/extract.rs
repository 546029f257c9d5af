use super::document::Document;
use super::error::ExtractError;
use super::fields::{Field, FieldSelectors, RatingTable};
use super::normalize::{bar_rating, clean_percentage, clean_text};
use super::selector::{descend, Leaf};

/// Reads raw field values for one candidate column of a comparison page.
pub struct FieldExtractor<'a> {
    selectors: &'a FieldSelectors,
    ratings: &'a RatingTable,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(selectors: &'a FieldSelectors, ratings: &'a RatingTable) -> Self {
        Self { selectors, ratings }
    }

    /// Raw leaf value (text or attribute) of `field` for candidate `index`.
    pub fn extract(&self, field: Field, doc: &Document, index: usize) -> Result<String, ExtractError> {
        let selector = self
            .selectors
            .get(field)
            .ok_or(ExtractError::RowNotFound { field })?;
        let row = doc
            .find_first(&selector.row)
            .ok_or(ExtractError::RowNotFound { field })?;
        let cell = row
            .element_child(index)
            .ok_or(ExtractError::CellNotFound { field, index })?;
        let leaf = descend(cell, &selector.descent)
            .map_err(|step| ExtractError::PathBroken { field, step })?;

        selector.leaf.read(leaf).ok_or_else(|| match selector.leaf {
            Leaf::Attr(attr) => ExtractError::AttributeMissing { field, attr },
            Leaf::Text => ExtractError::PathBroken { field, step: selector.descent.len() },
        })
    }

    /// Cleaned cell text.
    pub fn text(&self, field: Field, doc: &Document, index: usize) -> Result<String, ExtractError> {
        self.extract(field, doc, index).map(|raw| clean_text(&raw))
    }

    /// Text label looked up in the rating table.
    pub fn rating(&self, field: Field, doc: &Document, index: usize) -> Result<u8, ExtractError> {
        let label = self.text(field, doc, index)?;
        self.lookup(field, &label)
    }

    pub fn lookup(&self, field: Field, label: &str) -> Result<u8, ExtractError> {
        self.ratings
            .get(label)
            .ok_or_else(|| ExtractError::UnknownRating { field, text: label.to_string() })
    }

    /// Bar width converted to a 1..=5 rating, before any rescaling.
    pub fn bar(&self, field: Field, doc: &Document, index: usize) -> Result<u8, ExtractError> {
        let style = self.extract(field, doc, index)?;
        clean_percentage(&style).map(bar_rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fixture::{CandidateHtml, ComparisonPage};

    fn tables() -> (FieldSelectors, RatingTable) {
        (FieldSelectors::akc(), RatingTable::default())
    }

    #[test]
    fn every_rating_label_maps_exactly() {
        let (selectors, ratings) = tables();
        let ex = FieldExtractor::new(&selectors, &ratings);
        for (label, expected) in ratings.labels() {
            let cand = CandidateHtml { trainability: label.to_string(), ..Default::default() };
            let doc = Document::parse(&ComparisonPage::new(vec![cand]).render());
            assert_eq!(ex.rating(Field::Trainability, &doc, 0).unwrap(), expected, "{label}");
        }
    }

    #[test]
    fn unknown_label_is_a_lookup_error() {
        let (selectors, ratings) = tables();
        let ex = FieldExtractor::new(&selectors, &ratings);
        let cand = CandidateHtml { activity_level: "Bogus Label".into(), ..Default::default() };
        let doc = Document::parse(&ComparisonPage::new(vec![cand]).render());
        let err = ex.rating(Field::ActivityLevel, &doc, 0).unwrap_err();
        assert!(matches!(err, ExtractError::UnknownRating { field: Field::ActivityLevel, .. }));
    }

    #[test]
    fn reads_text_cells_per_candidate() {
        let (selectors, ratings) = tables();
        let ex = FieldExtractor::new(&selectors, &ratings);
        let a = CandidateHtml { size: "Small".into(), life_exp: "12-14 years".into(), ..Default::default() };
        let b = CandidateHtml { size: "Large".into(), ..Default::default() };
        let doc = Document::parse(&ComparisonPage::new(vec![a, b]).render());
        assert_eq!(ex.extract(Field::Size, &doc, 0).unwrap(), "Small");
        assert_eq!(ex.extract(Field::Size, &doc, 1).unwrap(), "Large");
        assert_eq!(ex.extract(Field::LifeExpectancy, &doc, 0).unwrap(), "12-14 years");
    }

    #[test]
    fn reads_bar_width() {
        let (selectors, ratings) = tables();
        let ex = FieldExtractor::new(&selectors, &ratings);
        let cand = CandidateHtml { grooming: Some(40), shedding: Some(100), ..Default::default() };
        let doc = Document::parse(&ComparisonPage::new(vec![cand]).render());
        assert_eq!(ex.bar(Field::Grooming, &doc, 0).unwrap(), 2);
        assert_eq!(ex.bar(Field::Shedding, &doc, 0).unwrap(), 5);
    }

    #[test]
    fn missing_bar_is_a_structural_error() {
        let (selectors, ratings) = tables();
        let ex = FieldExtractor::new(&selectors, &ratings);
        let cand = CandidateHtml { barking: None, ..Default::default() };
        let doc = Document::parse(&ComparisonPage::new(vec![cand]).render());
        let err = ex.bar(Field::Barking, &doc, 0).unwrap_err();
        assert!(matches!(err, ExtractError::PathBroken { field: Field::Barking, .. }));
    }

    #[test]
    fn missing_cell_is_reported() {
        let (selectors, ratings) = tables();
        let ex = FieldExtractor::new(&selectors, &ratings);
        let doc = Document::parse(&ComparisonPage::new(vec![CandidateHtml::default()]).render());
        let err = ex.extract(Field::Personality, &doc, 3).unwrap_err();
        assert!(matches!(err, ExtractError::CellNotFound { index: 3, .. }));

        let empty = Document::parse("<html><body></body></html>");
        assert!(matches!(
            ex.extract(Field::Size, &empty, 0),
            Err(ExtractError::RowNotFound { field: Field::Size })
        ));
    }
}
