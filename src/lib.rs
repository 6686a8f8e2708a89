// Receipt Points - Core Library
// Exposes all modules for use in the CLI, the API server, and tests

pub mod error;
pub mod logging;
pub mod receipt;
pub mod rules;   // Points rules and scorer
pub mod schema;  // Receipt validation
pub mod store;   // In-memory receipt store

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use error::ReceiptError;
pub use receipt::{Item, Receipt, ScoredReceipt};
pub use rules::{breakdown, score, PointsBreakdown, PointsRule, RuleContribution};
pub use schema::{
    is_valid_amount, is_valid_date, is_valid_description, is_valid_retailer, is_valid_time,
    validate,
};
pub use store::ReceiptStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
