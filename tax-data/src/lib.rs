//! CSV ingestion for the tax engine: federal bracket schedules and batches
//! of returns.

pub mod loader;
pub mod returns;

pub use loader::{TaxBracketLoader, TaxBracketLoaderError, TaxBracketRecord};
pub use returns::{CsvLoadError, ReturnRecord, StateProfile, load_from_file, load_from_str};
