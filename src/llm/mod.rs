pub mod broker;
pub mod factory;
pub mod gateway;
pub mod gateways;
pub mod models;
pub mod provider;

pub use broker::LlmBroker;
pub use factory::{BrokerFactory, GatewayBrokerFactory};
pub use gateway::{CompletionConfig, LlmGateway};
pub use models::{LlmMessage, MessageRole, Turn};
pub use provider::Provider;
