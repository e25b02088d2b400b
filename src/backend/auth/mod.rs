//! Authentication Module
//!
//! Owner accounts, password hashing and JWT sessions.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers (register, login, me)
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email, password → user created → JWT returned
//! 2. **Login**: email, password → bcrypt check → JWT returned
//! 3. **Me**: bearer JWT → middleware verifies → user returned
//!
//! Token lifetime comes from `JWT_EXPIRES_IN` (default one day).

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, login, register};
