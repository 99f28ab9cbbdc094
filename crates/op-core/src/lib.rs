//! # op-core
//!
//! Core types, error definitions and cancellation shared by every crate in
//! the pricing workspace.
//!
//! All rates, volatilities, dividend yields and correlations are expressed as
//! decimal fractions (0.05 = 5 %). Conversion from percentages happens once,
//! at the outer boundary (see `op-instruments`).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Cooperative cancellation token with optional deadline.
pub mod cancellation;

/// Error types and the `ensure!` / `instability!` / `fail!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the workspace.
pub type Real = f64;

/// Alias used for counts (paths, steps, observations).
pub type Size = usize;

/// A continuously-compounded rate expressed as a decimal (0.05 = 5 %).
pub type Rate = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A price or value.
pub type Price = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use cancellation::CancellationToken;
pub use errors::{Error, Result, Violation};
