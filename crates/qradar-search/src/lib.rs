#![deny(warnings)]
pub mod metrics;
pub mod searcher;

pub use metrics::accuracy;
pub use searcher::{
    ClassicalSearcher, GuidedSearcher, SearchOutcome, Searcher, run_classical, run_guided,
    run_search,
};
