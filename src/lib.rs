//! # askdoc
//!
//! Ask natural-language questions about a single document.
//!
//! askdoc ingests one document (PDF or plain text), splits it into
//! fixed-size chunks, represents every chunk as a unit-normalized
//! term-frequency vector, and answers questions by retrieving the top-K
//! most similar chunks and handing only those chunks to a chat language
//! model. A per-session request gate bounds how many question/answer
//! round-trips a session may perform.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────┐   ┌─────────┐   ┌───────────┐   ┌──────────┐
//! │ Extract │──▶│  Chunk  │──▶│ Vectorize │──▶│ Ingested │
//! │ (bytes) │   │ (fixed) │   │ (tf, L2)  │   │ Document │
//! └─────────┘   └─────────┘   └───────────┘   └────┬─────┘
//!                                                  │
//!              question ──▶ gate ──▶ embed ──▶ top-K
//!                                                  │
//!                                context + question
//!                                                  ▼
//!                                           ┌────────────┐
//!                                           │ Chat model │
//!                                           └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! askdoc ask report.pdf "What is the conclusion of section 3?"
//! askdoc chat report.pdf        # interactive question loop
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`error`] | Error taxonomy |
//! | [`extract`] | Document text extraction |
//! | [`chunk`] | Fixed-size text chunking |
//! | [`vectorize`] | Vocabulary and term-frequency embedding |
//! | [`retrieve`] | Top-K cosine similarity retrieval |
//! | [`gate`] | Per-session request budget |
//! | [`model`] | Chat model abstraction and providers |
//! | [`session`] | Ingest/answer orchestration |

pub mod chunk;
pub mod config;
pub mod error;
pub mod extract;
pub mod gate;
pub mod model;
pub mod models;
pub mod retrieve;
pub mod session;
pub mod vectorize;
