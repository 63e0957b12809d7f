use crate::domain::options::Options;
use crate::domain::validation::ValidationError;
use crate::domain::value::{Destination, SourceAddress};

/// Destinations the gateway accepts in one physical request.
pub const MAX_DESTINATIONS_PER_MESSAGE: usize = 10;

/// One outbound message, sendable in a single physical request.
///
/// Invariant: 1 to [`MAX_DESTINATIONS_PER_MESSAGE`] validated destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    source: SourceAddress,
    destinations: Vec<Destination>,
    body: String,
    options: Options,
}

impl Message {
    pub fn new(
        source: SourceAddress,
        destinations: Vec<Destination>,
        body: impl Into<String>,
        options: Options,
    ) -> Result<Self, ValidationError> {
        check_destination_count(&destinations)?;
        Ok(Self {
            source,
            destinations,
            body: body.into(),
            options,
        })
    }

    /// Build a message from raw strings: source address, comma-separated destinations
    /// and body text.
    pub fn parse(
        source: &str,
        destinations: &str,
        body: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(
            SourceAddress::new(source)?,
            Destination::parse_list(destinations)?,
            body,
            Options::default(),
        )
    }

    pub fn set_source_address(&mut self, source: &str) -> Result<(), ValidationError> {
        self.source = SourceAddress::new(source)?;
        Ok(())
    }

    pub fn set_destinations(&mut self, destinations: &str) -> Result<(), ValidationError> {
        let parsed = Destination::parse_list(destinations)?;
        check_destination_count(&parsed)?;
        self.destinations = parsed;
        Ok(())
    }

    /// Store the body unmodified; GSM conversion happens when the message is sent.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Validate and merge legacy `key=value` optional fields into this message.
    ///
    /// Nothing is applied if any recognised key is invalid.
    pub fn set_optional<'a, I>(&mut self, pairs: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let parsed = Options::from_pairs(pairs)?;
        let merged = &mut self.options;
        merged.source_type = parsed.source_type.or(merged.source_type);
        merged.data_coding = parsed.data_coding.or(merged.data_coding);
        merged.delivery_receipt = parsed.delivery_receipt.or(merged.delivery_receipt);
        merged.validity_period = parsed.validity_period.or(merged.validity_period);
        if parsed.user_reference.is_some() {
            merged.user_reference = parsed.user_reference;
        }
        if parsed.user_data_header.is_some() {
            merged.user_data_header = parsed.user_data_header;
        }
        if parsed.delay_until.is_some() {
            merged.delay_until = parsed.delay_until;
        }
        if parsed.local_time.is_some() {
            merged.local_time = parsed.local_time;
        }
        Ok(())
    }

    pub fn source(&self) -> &SourceAddress {
        &self.source
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

fn check_destination_count(destinations: &[Destination]) -> Result<(), ValidationError> {
    if destinations.is_empty() {
        return Err(ValidationError::Empty {
            field: Destination::FIELD,
        });
    }
    if destinations.len() > MAX_DESTINATIONS_PER_MESSAGE {
        return Err(ValidationError::TooManyDestinations {
            max: MAX_DESTINATIONS_PER_MESSAGE,
            actual: destinations.len(),
        });
    }
    Ok(())
}

/// A send request with any number of destinations.
///
/// The client splits it into [`Message`]s of at most [`MAX_DESTINATIONS_PER_MESSAGE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSms {
    source: SourceAddress,
    destinations: Vec<Destination>,
    body: String,
    options: Options,
}

impl SendSms {
    pub fn new(
        source: SourceAddress,
        destinations: Vec<Destination>,
        body: impl Into<String>,
        options: Options,
    ) -> Result<Self, ValidationError> {
        if destinations.is_empty() {
            return Err(ValidationError::Empty {
                field: Destination::FIELD,
            });
        }
        Ok(Self {
            source,
            destinations,
            body: body.into(),
            options,
        })
    }

    /// Validate every parameter up front, before anything is sent.
    pub fn parse<'a, I>(
        source: &str,
        destinations: &str,
        body: impl Into<String>,
        optional: I,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::new(
            SourceAddress::new(source)?,
            Destination::parse_list(destinations)?,
            body,
            Options::from_pairs(optional)?,
        )
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Build the message carrying this request's content to `destinations`.
    pub(crate) fn message_for(
        &self,
        destinations: Vec<Destination>,
    ) -> Result<Message, ValidationError> {
        Message::new(
            self.source.clone(),
            destinations,
            self.body.clone(),
            self.options.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value::{DataCoding, DeliveryReceipt};

    fn numbers(count: usize) -> String {
        (1..=count)
            .map(|n| format!("346000000{n:02}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn message_enforces_destination_limit() {
        assert!(Message::parse("Cbf", &numbers(10), "hi").is_ok());
        let err = Message::parse("Cbf", &numbers(11), "hi").unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooManyDestinations {
                max: MAX_DESTINATIONS_PER_MESSAGE,
                actual: 11
            }
        );
    }

    #[test]
    fn setters_validate_and_keep_previous_value_on_error() {
        let mut message = Message::parse("Cbf", "471234567890", "hi").unwrap();
        assert!(message.set_source_address("ThisIsTooLongForText").is_err());
        assert_eq!(message.source().as_str(), "Cbf");

        assert!(message.set_destinations("471234567890,bad").is_err());
        message.set_destinations("+449876543210").unwrap();
        assert_eq!(message.destinations()[0].as_str(), "449876543210");

        message.set_body("Ünïcode kept raw");
        assert_eq!(message.body(), "Ünïcode kept raw");
    }

    #[test]
    fn set_optional_merges_and_rejects_atomically() {
        let mut message = Message::parse("Cbf", "471234567890", "hi").unwrap();
        message.set_optional([("dc", "1")]).unwrap();
        message.set_optional([("dr", "1"), ("ur", "AF31C0D")]).unwrap();
        assert_eq!(message.options().data_coding, Some(DataCoding::Normal));
        assert_eq!(message.options().delivery_receipt, Some(DeliveryReceipt::Yes));

        assert!(message.set_optional([("dr", "0"), ("vp", "20000")]).is_err());
        assert_eq!(message.options().delivery_receipt, Some(DeliveryReceipt::Yes));
        assert!(message.options().validity_period.is_none());
    }

    #[test]
    fn send_sms_accepts_any_number_of_destinations() {
        let request = SendSms::parse("Cbf", &numbers(25), "hi", []).unwrap();
        assert_eq!(request.destinations().len(), 25);
        assert!(SendSms::parse("Cbf", &numbers(2), "hi", [("vp", "20000")]).is_err());
    }
}
