pub mod dataset;
pub mod feature_collection;
pub mod properties;

pub use dataset::*;
pub use feature_collection::*;
pub use properties::FeatureSummary;
