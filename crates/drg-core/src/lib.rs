//! Core data layer for MS-DRG definition comparison: the record model, the
//! Appendix A parser, and the catalog of available dataset versions.

pub mod appendix;
pub mod catalog;
pub mod record;

pub use appendix::{ParseError, parse_appendix, read_appendix};
pub use catalog::{APPENDIX_A, CatalogError, VersionCatalog};
pub use record::{DrgRecord, RecordSet};
