//! Domain model for the configuration access client.
//!
//! This crate contains every coordinate newtype, payload type, service DTO, and
//! error type shared by the client and its callers. The transport crate builds
//! on these types; it never adds domain rules of its own.
//!
//! ## Architectural Layer
//!
//! **Domain types only.** This crate has no I/O dependencies. It describes
//! *what* is addressed and returned; `config-client` decides *how* it travels.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Coordinate newtypes (`ApplicationName`, `ProfileName`, `Label`) and `RequestId` |
//! | [`types`] | `ConfigCoordinate`, `ContentHandling`, `Payload`, service envelope and DTOs |
//! | [`errors`] | The client error taxonomy |

pub mod errors;
pub mod identifiers;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::ClientError;
pub use identifiers::{ApplicationName, Label, ProfileName, RequestId, DEFAULT_LABEL};
pub use types::{
    ApiResult, ConfigCoordinate, ConfigFile, ConfigProperty, ContentHandling, HealthStatus,
    Payload, ResultCode, Timestamp,
};
