pub mod accrual;
pub mod occurrence;
pub mod summary;

pub use accrual::AccrualService;
pub use occurrence::OccurrenceService;
pub use summary::SummaryService;
