//! Identity material and storage credentials.

pub mod assertion;
pub mod credentials;
pub mod secret;

pub use assertion::*;
pub use credentials::*;
pub use secret::*;
