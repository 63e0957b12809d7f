//! Transport layer: wire-format details (GSM text encoding, query serialization,
//! reply decoding).

mod gsm;
mod send_sms;

pub use gsm::encode_gsm;
pub use send_sms::{decode_send_sms_reply, encode_send_sms_query, escape, join_query};
