//! Case domain models and wire conversions.

mod convert;
mod model;

pub use model::{
    Analysis, Case, CaseState, Content, ContentType, Decision, Flag, FlagSource, Level,
    Likelihood, Priority, Review, ReviewStats, SafeSearchScores,
};
