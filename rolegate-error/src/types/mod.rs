pub mod auth;
pub mod password;
pub mod storage;
pub mod validation;

// Публичный экспорт всех типов ошибок из вложенных модулей, чтобы упростить
// доступ к ним из внешнего кода.
pub use auth::*;
pub use password::*;
pub use storage::*;
pub use validation::*;
