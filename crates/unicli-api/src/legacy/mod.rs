// Legacy API client modules
//
// Hand-written client for the UniFi controller's session-authenticated
// endpoints. Covers stat/ reads and cmd/stamgr commands wrapped in the
// standard `{ meta: { rc, msg }, data: [...] }` envelope.

pub mod auth;
pub mod client;
pub mod clients;
pub mod devices;
pub mod events;
pub mod models;

pub use client::LegacyClient;
