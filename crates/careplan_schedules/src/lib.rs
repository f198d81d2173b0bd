//! # Careplan Schedules (L2: Business Logic)
//!
//! Recurrence engine for care plan schedules.
//!
//! This crate provides:
//! - Schedule definitions with daily and weekly time tables
//! - Event counting for any calendar date, honouring skip intervals
//! - An extension trait for custom recurrence rules
//! - Range queries (per-date counts, next event date)
//! - A JSON codec and structural equality for persisted specs
//!
//! ## Design Principles
//!
//! - **Enum-based rules** for static dispatch of the built-in kinds
//! - **Date-only arithmetic**: time of day never moves a period boundary
//! - **Validated construction**: an invalid spec is never observable

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod schedules;
