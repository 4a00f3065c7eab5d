pub mod types;
pub mod login;
pub mod profile;

pub use login::*;
pub use profile::*;
