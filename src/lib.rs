/// Authentication and authorization: password hashing, roles, time-gated
/// access policy, input validation, enrollment and login.
pub mod auth;
/// Application settings loading.
pub mod config;
/// Logging setup (formatting, filters, sinks).
pub mod logging;
/// Interactive Signup / Login / Quit shell.
pub mod shell;
/// Append-only credential and role record stores.
pub mod store;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Enrollment and login orchestration, authorization engine, password hashing.
pub use auth::{
    ActiveWindow, AuthManager, AuthorizationEngine, Clock, FixedClock, HasherConfig, LoginReport,
    Operation, PasswordHasher, Role, SystemClock, Validator, WeakPasswordList,
};
/// config
pub use config::Settings;
/// Logging entry point.
pub use logging::{init_logging, LoggingConfig, LoggingHandle};
/// Operation errors and result types.
pub use rolegate_error::{
    AuthError, ErrorExt, PasswordError, StatusCode, StoreError, ValidationError,
};
/// Record stores.
pub use store::{
    CredentialRecord, CredentialStore, FlatFileStore, MemoryStore, RecordStore, RoleAssignment,
    RoleStore, StoreResult,
};
