//! Domain layer: strong types with validation and invariants (no I/O).

mod options;
mod request;
mod response;
mod validation;
mod value;

pub use options::{OptionalField, Options};
pub use request::{MAX_DESTINATIONS_PER_MESSAGE, Message, SendSms};
pub use response::Reply;
pub use validation::ValidationError;
pub use value::{
    ClientType, DataCoding, DeliveryReceipt, Destination, GatewayTimestamp, Password, ReplyCode,
    SourceAddress, SourceType, UserDataHeader, UserReference, Username, ValidityPeriod,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rejects_empty() {
        assert!(matches!(
            Username::new("   "),
            Err(ValidationError::Empty {
                field: Username::FIELD
            })
        ));
    }

    #[test]
    fn message_requires_a_destination() {
        let source = SourceAddress::new("Cbf").unwrap();
        let err = Message::new(source, Vec::new(), "hi", Options::default()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Empty {
                field: Destination::FIELD
            }
        ));
    }

    #[test]
    fn typed_options_attach_to_messages() {
        let options = Options::default()
            .with(OptionalField::DataCoding(DataCoding::Flash))
            .with(OptionalField::ValidityPeriod(ValidityPeriod::new(2000).unwrap()));
        let message = Message::new(
            SourceAddress::new("Cbf").unwrap(),
            Destination::parse_list("471234567890,449876543210").unwrap(),
            "This is my test message.",
            options,
        )
        .unwrap();
        assert_eq!(message.options().data_coding, Some(DataCoding::Flash));
        assert_eq!(message.options().validity_period.unwrap().value(), 2000);
    }

    #[test]
    fn reply_preserves_order() {
        let reply = Reply::new(vec![ReplyCode::new("-20"), ReplyCode::new("0")]);
        let codes: Vec<_> = reply.iter().map(ReplyCode::as_str).collect();
        assert_eq!(codes, ["-20", "0"]);
        assert_eq!(reply.len(), 2);
    }
}
