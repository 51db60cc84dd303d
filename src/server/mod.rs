//! Server-side API backend and business logic.
//!
//! This module contains the complete backend: HTTP endpoints, the Steam sign-in handshake,
//! per-request session enrichment, the player store and the clients for Steam, ip-api.com
//! and Discord. The backend uses Axum as the web framework, SeaORM for database
//! operations, and Serenity for the Discord webhook.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Business logic and external collaborators
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session wrappers, API key guard and session enrichment
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, HTTP client, collaborators)
//! - **Startup** (`startup`) - Initialization of tracing, database, sessions and clients
//! - **Router** (`router`) - Axum route configuration and API documentation
//!
//! # Request Flow
//!
//! 1. **Session layer** loads the session from the cookie
//! 2. **Enrichment middleware** registers first-time players and attaches their claims
//! 3. **Controller** validates access, calls the service
//! 4. **Service** executes business logic, orchestrates data operations
//! 5. **Data** queries database, converts entities to domain models
//! 6. **Controller** converts domain model to DTO, returns HTTP response

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
