use crate::domain::validation::ValidationError;
use crate::domain::value::{
    DataCoding, DeliveryReceipt, GatewayTimestamp, SourceType, UserDataHeader, UserReference,
    ValidityPeriod,
};

/// One optional protocol field with its validated payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionalField {
    SourceType(SourceType),
    DataCoding(DataCoding),
    DeliveryReceipt(DeliveryReceipt),
    UserReference(UserReference),
    UserDataHeader(UserDataHeader),
    ValidityPeriod(ValidityPeriod),
    DelayUntil(GatewayTimestamp),
    LocalTime(GatewayTimestamp),
}

impl OptionalField {
    pub const DELAY_UNTIL_KEY: &'static str = "du";
    pub const LOCAL_TIME_KEY: &'static str = "lt";

    /// Parse a legacy `key=value` pair.
    ///
    /// Returns `Ok(None)` for keys this protocol does not know.
    pub fn parse(key: &str, value: &str) -> Result<Option<Self>, ValidationError> {
        Ok(Some(match key {
            SourceType::KEY => Self::SourceType(SourceType::parse(value)?),
            DataCoding::KEY => Self::DataCoding(DataCoding::parse(value)?),
            DeliveryReceipt::KEY => Self::DeliveryReceipt(DeliveryReceipt::parse(value)?),
            UserReference::KEY => Self::UserReference(UserReference::new(value)?),
            UserDataHeader::KEY => Self::UserDataHeader(UserDataHeader::new(value)?),
            ValidityPeriod::KEY => Self::ValidityPeriod(ValidityPeriod::parse(value)?),
            Self::DELAY_UNTIL_KEY => {
                Self::DelayUntil(GatewayTimestamp::parse(Self::DELAY_UNTIL_KEY, value)?)
            }
            Self::LOCAL_TIME_KEY => {
                Self::LocalTime(GatewayTimestamp::parse(Self::LOCAL_TIME_KEY, value)?)
            }
            _ => return Ok(None),
        }))
    }
}

/// Optional fields attached to a message; at most one value per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub source_type: Option<SourceType>,
    pub data_coding: Option<DataCoding>,
    pub delivery_receipt: Option<DeliveryReceipt>,
    pub user_reference: Option<UserReference>,
    pub user_data_header: Option<UserDataHeader>,
    pub validity_period: Option<ValidityPeriod>,
    pub delay_until: Option<GatewayTimestamp>,
    pub local_time: Option<GatewayTimestamp>,
}

impl Options {
    /// Build options from legacy string pairs such as `("vp", "2000")`.
    ///
    /// Every recognised key is validated; unknown keys are ignored. When `du` is present
    /// without `lt`, local time is stamped with the current time.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut fields = Vec::new();
        for (key, value) in pairs {
            if let Some(field) = OptionalField::parse(key, value)? {
                fields.push(field);
            }
        }

        // An explicit `lt` later in the list overrides the stamp taken for `du`.
        let mut options = Self::default();
        for field in fields {
            options.set(field);
        }
        Ok(options)
    }

    /// Store one field, replacing any previous value of the same kind.
    ///
    /// Setting [`OptionalField::DelayUntil`] also stamps local time if none is set yet.
    pub fn set(&mut self, field: OptionalField) {
        match field {
            OptionalField::SourceType(v) => self.source_type = Some(v),
            OptionalField::DataCoding(v) => self.data_coding = Some(v),
            OptionalField::DeliveryReceipt(v) => self.delivery_receipt = Some(v),
            OptionalField::UserReference(v) => self.user_reference = Some(v),
            OptionalField::UserDataHeader(v) => self.user_data_header = Some(v),
            OptionalField::ValidityPeriod(v) => self.validity_period = Some(v),
            OptionalField::DelayUntil(v) => {
                self.delay_until = Some(v);
                if self.local_time.is_none() {
                    self.local_time = Some(GatewayTimestamp::now());
                }
            }
            OptionalField::LocalTime(v) => self.local_time = Some(v),
        }
    }

    /// Builder-style [`Options::set`].
    pub fn with(mut self, field: OptionalField) -> Self {
        self.set(field);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_are_ignored() {
        let options = Options::from_pairs([("zz", "whatever"), ("dr", "1")]).unwrap();
        assert_eq!(options.delivery_receipt, Some(DeliveryReceipt::Yes));
        assert_eq!(
            options,
            Options {
                delivery_receipt: Some(DeliveryReceipt::Yes),
                ..Default::default()
            }
        );
    }

    #[test]
    fn out_of_range_validity_period_names_the_key() {
        let err = Options::from_pairs([("vp", "20000")]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidOptionalField { field: "vp", .. }
        ));
    }

    #[test]
    fn every_key_is_validated_independently() {
        for (key, bad) in [
            ("st", "2"),
            ("dc", "3"),
            ("dr", "9"),
            ("ur", "x"),
            ("ud", "zz"),
            ("vp", "0"),
            ("du", "123"),
            ("lt", "abcdefghij"),
        ] {
            match Options::from_pairs([(key, bad)]) {
                Err(ValidationError::InvalidOptionalField { field, .. }) => assert_eq!(field, key),
                other => panic!("{key}={bad} should fail, got {other:?}"),
            }
        }
    }

    #[test]
    fn delay_until_without_local_time_stamps_now() {
        let options = Options::from_pairs([("du", "1900000000")]).unwrap();
        assert_eq!(options.delay_until.as_ref().unwrap().as_str(), "1900000000");
        assert_eq!(options.local_time.as_ref().unwrap().as_str().len(), 10);
    }

    #[test]
    fn explicit_local_time_is_kept_regardless_of_order() {
        let options = Options::from_pairs([("du", "1900000000"), ("lt", "1700000000")]).unwrap();
        assert_eq!(options.local_time.unwrap().as_str(), "1700000000");

        let options = Options::from_pairs([("lt", "1700000000"), ("du", "1900000000")]).unwrap();
        assert_eq!(options.local_time.unwrap().as_str(), "1700000000");
    }

    #[test]
    fn typed_set_fills_local_time_once() {
        let local = GatewayTimestamp::parse("lt", "1700000000").unwrap();
        let until = GatewayTimestamp::parse("du", "1900000000").unwrap();
        let options = Options::default()
            .with(OptionalField::LocalTime(local.clone()))
            .with(OptionalField::DelayUntil(until));
        assert_eq!(options.local_time, Some(local));
    }
}
