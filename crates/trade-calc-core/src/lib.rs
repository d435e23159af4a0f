pub mod analysis;
pub mod error;
pub mod form;
pub mod sync;
pub mod types;
pub mod validation;

pub use analysis::{analyze_trade, calculate, AnalysisResult, MtfAnalysis, StopLossAnalysis};
pub use error::{FieldErrors, TradeCalcError};
pub use form::{Field, PricePair, TradeFormState};
pub use sync::{sync_from_percent, sync_from_price};
pub use types::*;
pub use validation::{validate, MtfParams, TradeInput};

/// Standard result type for all trade-calc operations
pub type TradeCalcResult<T> = Result<T, TradeCalcError>;
