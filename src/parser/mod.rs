pub mod document;
pub mod error;
pub mod extract;
pub mod fields;
pub mod normalize;
pub mod page;
pub mod record;
pub mod selector;

#[cfg(test)]
pub mod fixture;

pub use document::Document;
pub use extract::FieldExtractor;
pub use fields::{FieldSelectors, RatingTable};
pub use page::{BreedPageRecord, PageSelectors};
pub use record::BreedRecord;
