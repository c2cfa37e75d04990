/// Ports module defining interfaces for hexagonal architecture
///
/// The CLI drives the application use cases directly, so only outbound
/// (driven) ports are defined.
pub mod outbound;
