//! Typed Rust client for the HTTPSMS gateway protocol.
//!
//! The crate has a domain layer of validated types (source address, destinations,
//! optional protocol fields), a transport layer for the wire format (GSM 7-bit text
//! conversion, GET query serialization, plain-text replies) and a small client layer
//! that performs requests, retries transient failures and batches large destination
//! lists. The [`alarm`] module holds the date rules of the claims notification job.
//!
//! ```rust,no_run
//! use httpsms::{Credentials, HttpSmsClient, SendSms};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), httpsms::HttpSmsError> {
//!     let client = HttpSmsClient::new(Credentials::init("user", "secret", "H")?);
//!     let request = SendSms::parse(
//!         "Cbf",
//!         "471234567890,449876543210",
//!         "This is my test message.",
//!         [("vp", "2000")],
//!     )?;
//!     let reply = client.send_sms(&request).await?;
//!     for code in reply.iter() {
//!         println!("{code}");
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod alarm;
pub mod client;
pub mod domain;
mod transport;

pub use client::{Credentials, HttpSmsClient, HttpSmsClientBuilder, HttpSmsError};
pub use domain::{
    ClientType, DataCoding, DeliveryReceipt, Destination, GatewayTimestamp,
    MAX_DESTINATIONS_PER_MESSAGE, Message, OptionalField, Options, Password, Reply, ReplyCode,
    SendSms, SourceAddress, SourceType, UserDataHeader, UserReference, Username, ValidationError,
    ValidityPeriod,
};
pub use transport::encode_gsm;
