pub mod instance;

pub use instance::{Instance, Rejection, generate_instance};
