mod client;
mod collect;
mod error;
mod parse;
mod records;

pub use client::HttpTransport;
#[cfg(test)]
pub use client::{ApiRequest, ApiResponse, Method, Transport};
pub use collect::{Credential, DEFAULT_API_BASE, GatewayConfig, NotionGateway};
pub use error::GatewayError;
pub use parse::{decode_circles, decode_roles};
#[cfg(test)]
pub use records::PersonRef;
pub use records::{CircleRecord, InvalidRecord, RoleRecord};
