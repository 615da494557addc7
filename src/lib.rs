//! # Diet Server
//!
//! Personal diet-tracking HTTP API built with Rust, Axum, and Tokio.
//! Users register anonymously (identified by a `sessionId` cookie), record
//! meals with an on-diet flag, and query adherence metrics including their
//! longest unbroken on-diet streak.
//!
//! ## Architecture
//! The server is organized into modules:
//! - `server`: core server initialization and route wiring
//! - `config`: environment variable configuration management
//! - `session`: session minting and the owner-key cookie contract
//! - `services`: meal ownership rules and the summary/streak engine
//! - `routes`: HTTP route handlers organized by functionality
//! - `database`: the `MealStore` contract plus PostgreSQL and in-memory backends

pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod server;
pub mod services;
pub mod session;
