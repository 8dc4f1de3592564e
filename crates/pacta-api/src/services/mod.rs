pub mod contracts;
pub mod session;

pub use contracts::ContractWorkflow;
