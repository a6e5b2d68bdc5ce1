pub mod manager;
pub mod password;
pub mod policy;
pub mod role;
pub mod validation;

pub use manager::*;
pub use password::*;
pub use policy::*;
pub use role::*;
pub use validation::*;
