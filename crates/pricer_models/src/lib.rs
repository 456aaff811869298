//! # Pricer Models (L2: Business Logic)
//!
//! Valuation models for European options on a dividend-paying underlying.
//!
//! This crate provides:
//! - Standard normal distribution functions
//! - Closed-form Black-Scholes-Merton price and Greeks
//! - Discrete-time valuation on a step grid with pluggable strategies
//!
//! Finite-difference Greeks for the discrete mode live one layer up, in
//! `pricer_pricing`.
//!
//! ## Design Principles
//!
//! - **Static dispatch** for the closed form, trait objects only at the
//!   discretisation seam
//! - **Validated inputs** via `pricer_core::types::OptionParameters`
//! - **Builder pattern** for ergonomic API with sensible defaults

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod discrete;
