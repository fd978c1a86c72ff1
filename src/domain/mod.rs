//! Domain aggregates exposed by the clinical records service layer.

pub mod clinical_record;
pub mod patient;
pub mod types;
