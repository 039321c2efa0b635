//! # Repository Module
//!
//! Entity repositories for the catalog tables.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Service (catalog-api)                                                 │
//! │       │                                                                 │
//! │       │  db.with_transaction(|tx| ...)                                 │
//! │       ▼                                                                 │
//! │  ProductRepository / CategoryRepository                                │
//! │  ├── create(tx, ...)            writes take the transaction            │
//! │  ├── update(tx, ...)                                                   │
//! │  ├── delete(tx, id)                                                    │
//! │  ├── find_by_id(conn, id)       reads take any connection              │
//! │  ├── find_all(conn, params)     ← search query builder                 │
//! │  └── count(conn)                                                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Repositories hold no state, so they are unit structs that can be      │
//! │  moved into a unit of work freely.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`] - Product listing, lookup and writes
//! - [`CategoryRepository`] - Category listing, lookup and writes
//!
//! [`ProductRepository`]: product::ProductRepository
//! [`CategoryRepository`]: category::CategoryRepository

pub mod category;
pub mod product;
