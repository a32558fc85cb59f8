//! Service layer: orchestration over the provider collaborator.

mod gateway;

pub use gateway::SmsGateway;
