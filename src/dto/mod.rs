//! Response payloads that combine several domain values.

pub mod records;
