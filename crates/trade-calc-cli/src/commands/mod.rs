pub mod sync;
pub mod trade;
