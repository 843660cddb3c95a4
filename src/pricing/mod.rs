//! Pricing module - pure quote calculation and money display

pub mod currency;
pub mod model;

pub use currency::{format_amount, Currency};
pub use model::{calculate, Dimensions, Quote, QuoteBreakdown, QuoteRequest};
