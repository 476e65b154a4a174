pub mod delivery;
pub mod fallback;
pub mod invoke_model;
pub mod parse_output;
pub mod session_keys;
pub mod validation;

pub use delivery::DeliveryTask;
pub use fallback::{FallbackReason, FallbackTask};
pub use invoke_model::InvokeModelTask;
pub use parse_output::ParseModelOutputTask;
pub use validation::ValidationTask;
