use url::form_urlencoded::byte_serialize;

use crate::domain::{DataCoding, Destination, Message, Reply, ReplyCode, SourceType};
use crate::transport::gsm::encode_gsm;

/// Query parameters for one physical send, in wire order, values already escaped.
///
/// Source address and body are form-urlencoded; destinations and optional fields are
/// passed through as validated. Normal/flash bodies (or bodies with no coding scheme) are
/// converted to GSM and the coding scheme is rewritten to the matching GSM variant. A
/// source address with non-digits and no explicit type is sent as alphanumeric.
pub fn encode_send_sms_query(message: &Message) -> Vec<(&'static str, String)> {
    let options = message.options();
    let (body, data_coding) = match options.data_coding {
        None | Some(DataCoding::Normal) => {
            (encode_gsm(message.body()), Some(DataCoding::NormalGsm))
        }
        Some(DataCoding::Flash) => (encode_gsm(message.body()), Some(DataCoding::FlashGsm)),
        other => (message.body().to_owned(), other),
    };
    let source_type = options.source_type.or_else(|| {
        message
            .source()
            .is_alphanumeric()
            .then_some(SourceType::Alphanumeric)
    });

    let destinations = message
        .destinations()
        .iter()
        .map(Destination::as_str)
        .collect::<Vec<_>>()
        .join(",");

    let mut params = vec![
        ("SA", escape(message.source().as_str())),
        ("DA", destinations),
        ("M", escape(&body)),
    ];
    if let Some(user_reference) = options.user_reference.as_ref() {
        params.push(("UR", escape(user_reference.as_str())));
    }
    if let Some(header) = options.user_data_header.as_ref() {
        params.push(("UD", escape(header.as_str())));
    }
    if let Some(source_type) = source_type {
        params.push(("ST", source_type.code().to_string()));
    }
    if let Some(data_coding) = data_coding {
        params.push(("DC", data_coding.code().to_string()));
    }
    if let Some(receipt) = options.delivery_receipt {
        params.push(("DR", receipt.code().to_string()));
    }
    if let Some(validity) = options.validity_period {
        params.push(("V", validity.value().to_string()));
    }
    if let Some(delay_until) = options.delay_until.as_ref() {
        params.push(("DU", delay_until.as_str().to_owned()));
    }
    if let Some(local_time) = options.local_time.as_ref() {
        params.push(("LT", local_time.as_str().to_owned()));
    }
    params
}

/// Join already-escaped parameters into a query string.
pub fn join_query<K: AsRef<str>>(params: &[(K, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={value}", key.as_ref()))
        .collect::<Vec<_>>()
        .join("&")
}

/// Form-urlencode one query value.
pub fn escape(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

/// Decode a `200 OK` body into per-destination reply codes.
///
/// The body is whitespace separated: a leading message identifier, one code per
/// destination, then optionally a trailing `UR...` echo of the user reference.
pub fn decode_send_sms_reply(body: &str) -> Reply {
    let mut tokens = body.split_whitespace().collect::<Vec<_>>();
    if tokens.last().is_some_and(|last| last.starts_with("UR")) {
        tokens.pop();
    }
    let codes = tokens
        .into_iter()
        .skip(1)
        .map(ReplyCode::new)
        .collect();
    Reply::new(codes)
}
