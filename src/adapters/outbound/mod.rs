/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod console;
pub mod network;
