//! # Repository Layer
//!
//! Data access layer implementing the Repository pattern.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Repository Pattern                         │
//! │                                                                 │
//! │   Session Loop / CSV Import                                    │
//! │        │                                                        │
//! │        │  (domain types from shelfstock-core)                   │
//! │        ▼                                                        │
//! │   ┌──────────────────┐      ┌──────────────────┐               │
//! │   │ProductRepository │      │ BrandRepository  │               │
//! │   └────────┬─────────┘      └────────┬─────────┘               │
//! │            │                         │                          │
//! │            │  (SQL via sqlx)         │                          │
//! │            ▼                         ▼                          │
//! │   ┌─────────────────────────────────────────┐                  │
//! │   │              SQLite Pool                 │                  │
//! │   └─────────────────────────────────────────┘                  │
//! │                                                                 │
//! │  Benefits:                                                      │
//! │  - Callers never see SQL strings                                │
//! │  - Swap/mock data layer for testing                             │
//! │  - Domain rows decode straight into core types                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod brand;
pub mod product;
