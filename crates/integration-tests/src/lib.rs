//! Integration tests for Survived.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! docker compose up -d postgres
//! cargo run -p survived-cli -- migrate
//!
//! # Start the server
//! cargo run -p survived-server
//!
//! # Run the ignored integration tests
//! cargo test -p survived-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! - `SURVIVED_BASE_URL` - server base URL (default `http://localhost:3000`)
//! - `SURVIVED_DATABASE_URL` - test database connection string
//! - `SURVIVED_TOKEN_SECRET` - must match the running server's secret
//!
//! # Test Categories
//!
//! - `check_in_flow` - idempotency, date window, and concurrency tests
//! - `leaderboard` - ordering and pagination tests
//!
//! Each test creates its own users with unique phone numbers, so the
//! suite can run repeatedly against the same database.
