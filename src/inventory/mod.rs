//! Inventory domain: value objects and pure services for finding
//! Dockerfiles and the base images they declare.
pub mod domain;
pub mod services;
