// unicli-api: Async Rust client for the UniFi controller's legacy API

pub mod auth;
pub mod error;
pub mod legacy;
pub mod mac;
pub mod session;
pub mod transport;

pub use auth::{ControllerPlatform, PlatformSelection};
pub use error::Error;
pub use legacy::LegacyClient;
pub use legacy::events::EventQuery;
pub use legacy::models::{LegacyClientEntry, LegacyDevice, LegacyEvent};
pub use mac::MacAddress;
pub use session::{Session, SessionConfig};
pub use transport::{TlsMode, TransportConfig};
