pub mod expression;
pub mod scale;
pub mod series;
pub mod types;

pub use expression::{ExpressionSanitizer, SanitizeRules, sanitize_expression};
pub use scale::LinearScale;
pub use series::{IterationRecord, SolverFault, SolverOutcome, sample_points};
pub use types::{DataBounds, DataPoint, Viewport};
