use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::validation::ValidationError;

static SOURCE_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,16}|.{1,11})$").expect("source address pattern"));

static DESTINATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+|00)?([1-9][0-9]{7,15})$").expect("destination pattern")
});

static HEX_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Fa-f0-9]{1,17}$").expect("user data header pattern"));

static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("timestamp pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// HTTPSMS account username (`UN`).
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Query parameter used by HTTPSMS (`UN`).
    pub const FIELD: &'static str = "UN";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// HTTPSMS account password (`P`).
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Query parameter used by HTTPSMS (`P`).
    pub const FIELD: &'static str = "P";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// One-character client identifier sent as `S`.
pub enum ClientType {
    #[default]
    H,
    S,
    D,
    M,
}

impl ClientType {
    /// Query parameter used by HTTPSMS (`S`).
    pub const FIELD: &'static str = "S";

    /// Parse `H`, `S`, `D` or `M`.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Ok(match value {
            "H" => Self::H,
            "S" => Self::S,
            "D" => Self::D,
            "M" => Self::M,
            other => {
                return Err(ValidationError::InvalidClientType {
                    input: other.to_owned(),
                });
            }
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::H => "H",
            Self::S => "S",
            Self::D => "D",
            Self::M => "M",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message originator (`SA`).
///
/// Invariant: up to 16 digits, or up to 11 arbitrary characters.
pub struct SourceAddress(String);

impl SourceAddress {
    /// Query parameter used by HTTPSMS (`SA`).
    pub const FIELD: &'static str = "SA";

    /// Create a validated [`SourceAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !SOURCE_ADDRESS.is_match(&value) {
            return Err(ValidationError::InvalidSourceAddress { input: value });
        }
        Ok(Self(value))
    }

    /// Borrow the source address as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the address contains anything other than ASCII digits.
    pub fn is_alphanumeric(&self) -> bool {
        self.0.chars().any(|c| !c.is_ascii_digit())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Destination number in international format, normalized to digits only.
///
/// Accepts an optional `+` or `00` prefix followed by 8 to 16 digits, the first of
/// which is `1..=9`.
pub struct Destination(String);

impl Destination {
    /// Query parameter used by HTTPSMS (`DA`).
    pub const FIELD: &'static str = "DA";

    /// Parse a single destination.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Self::normalize(value).ok_or_else(|| ValidationError::InvalidDestination {
            input: value.to_owned(),
        })
    }

    /// Parse a comma-separated destination list.
    ///
    /// Any invalid entry rejects the whole list; the error names the original input.
    pub fn parse_list(value: &str) -> Result<Vec<Self>, ValidationError> {
        value
            .split(',')
            .map(|part| {
                Self::normalize(part).ok_or_else(|| ValidationError::InvalidDestination {
                    input: value.to_owned(),
                })
            })
            .collect()
    }

    fn normalize(value: &str) -> Option<Self> {
        DESTINATION
            .captures(value.trim())
            .and_then(|caps| caps.get(1))
            .map(|digits| Self(digits.as_str().to_owned()))
    }

    /// Digits-only form as sent to HTTPSMS.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Type of number of the source address (`ST`).
pub enum SourceType {
    National,
    International,
    Alphanumeric,
}

impl SourceType {
    pub const KEY: &'static str = "st";

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Ok(match value {
            "0" => Self::National,
            "1" => Self::International,
            "5" => Self::Alphanumeric,
            _ => {
                return Err(ValidationError::InvalidOptionalField {
                    field: Self::KEY,
                    reason: "source address type must be 0, 1 or 5",
                });
            }
        })
    }

    pub fn code(self) -> u8 {
        match self {
            Self::National => 0,
            Self::International => 1,
            Self::Alphanumeric => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Data coding scheme (`DC`).
pub enum DataCoding {
    Flash,
    Normal,
    Binary,
    Ucs2,
    FlashUcs2,
    NormalGsm,
    FlashGsm,
}

impl DataCoding {
    pub const KEY: &'static str = "dc";

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Ok(match value {
            "0" => Self::Flash,
            "1" => Self::Normal,
            "2" => Self::Binary,
            "4" => Self::Ucs2,
            "5" => Self::FlashUcs2,
            "6" => Self::NormalGsm,
            "7" => Self::FlashGsm,
            _ => {
                return Err(ValidationError::InvalidOptionalField {
                    field: Self::KEY,
                    reason: "data coding scheme must be 0..=7 excluding 3",
                });
            }
        })
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Flash => 0,
            Self::Normal => 1,
            Self::Binary => 2,
            Self::Ucs2 => 4,
            Self::FlashUcs2 => 5,
            Self::NormalGsm => 6,
            Self::FlashGsm => 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Delivery receipt request (`DR`).
pub enum DeliveryReceipt {
    No,
    Yes,
    RecordOnly,
}

impl DeliveryReceipt {
    pub const KEY: &'static str = "dr";

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Ok(match value {
            "0" => Self::No,
            "1" => Self::Yes,
            "2" => Self::RecordOnly,
            _ => {
                return Err(ValidationError::InvalidOptionalField {
                    field: Self::KEY,
                    reason: "delivery receipt request must be 0, 1 or 2",
                });
            }
        })
    }

    pub fn code(self) -> u8 {
        match self {
            Self::No => 0,
            Self::Yes => 1,
            Self::RecordOnly => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// User reference echoed back in delivery receipts (`UR`).
///
/// Invariant: 2 to 15 characters.
pub struct UserReference(String);

impl UserReference {
    pub const KEY: &'static str = "ur";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !(2..=15).contains(&value.chars().count()) {
            return Err(ValidationError::InvalidOptionalField {
                field: Self::KEY,
                reason: "user reference must be 2 to 15 characters",
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// User data header in hexadecimal (`UD`).
///
/// Invariant: 1 to 17 hex digits.
pub struct UserDataHeader(String);

impl UserDataHeader {
    pub const KEY: &'static str = "ud";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !HEX_HEADER.is_match(&value) {
            return Err(ValidationError::InvalidOptionalField {
                field: Self::KEY,
                reason: "user data header must be 1 to 17 hex digits",
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Minutes the gateway keeps attempting delivery (`V`).
///
/// Invariant: `1..=10080`.
pub struct ValidityPeriod(u16);

impl ValidityPeriod {
    pub const KEY: &'static str = "vp";

    pub const MIN: u16 = 1;
    pub const MAX: u16 = 10080;

    pub fn new(minutes: u16) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&minutes) {
            return Err(Self::out_of_range());
        }
        Ok(Self(minutes))
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let minutes = value
            .trim()
            .parse::<u16>()
            .map_err(|_| Self::out_of_range())?;
        Self::new(minutes)
    }

    fn out_of_range() -> ValidationError {
        ValidationError::InvalidOptionalField {
            field: Self::KEY,
            reason: "validity period must be between 1 and 10080",
        }
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Ten-digit Unix timestamp used by `DU` and `LT`.
pub struct GatewayTimestamp(String);

impl GatewayTimestamp {
    /// Validate a ten-digit timestamp for the optional field `key`.
    pub fn parse(key: &'static str, value: &str) -> Result<Self, ValidationError> {
        if !TIMESTAMP.is_match(value) {
            return Err(ValidationError::InvalidOptionalField {
                field: key,
                reason: "must be a 10 digit unix timestamp",
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Per-destination status token returned by the gateway.
///
/// Codes are preserved as-is; only the two sentinels below carry meaning for this crate.
pub struct ReplyCode(String);

impl ReplyCode {
    /// Synthesized for every destination of a batch the gateway rejected outright.
    pub const INVALID_DESTINATION: &'static str = "-15";
    /// The gateway asks for this destination to be resent.
    pub const RETRY_REQUESTED: &'static str = "-20";

    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn invalid_destination() -> Self {
        Self(Self::INVALID_DESTINATION.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_retry_requested(&self) -> bool {
        self.0 == Self::RETRY_REQUESTED
    }

    pub fn is_invalid_destination(&self) -> bool {
        self.0 == Self::INVALID_DESTINATION
    }
}

impl fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_newtypes_validate() {
        assert_eq!(Username::new(" user ").unwrap().as_str(), "user");
        assert!(Username::new("  ").is_err());
        assert_eq!(Password::new(" pw ").unwrap().as_str(), " pw ");
        assert!(Password::new("").is_err());
        assert_eq!(format!("{:?}", Password::new("secret").unwrap()), "Password(..)");
    }

    #[test]
    fn client_type_accepts_only_known_letters() {
        assert_eq!(ClientType::parse("M").unwrap(), ClientType::M);
        assert_eq!(ClientType::default().as_str(), "H");
        assert!(matches!(
            ClientType::parse("X"),
            Err(ValidationError::InvalidClientType { .. })
        ));
        assert!(ClientType::parse("h").is_err());
    }

    #[test]
    fn source_address_accepts_digits_or_short_text() {
        assert!(SourceAddress::new("1234567890123456").is_ok());
        assert!(SourceAddress::new("Temboury").is_ok());
        assert!(SourceAddress::new("Abogados 11").is_ok());
        assert!(SourceAddress::new("12345678901234567").is_err());
        assert!(SourceAddress::new("TwelveChars!").is_err());
        assert!(matches!(
            SourceAddress::new(""),
            Err(ValidationError::InvalidSourceAddress { .. })
        ));
    }

    #[test]
    fn source_address_alphanumeric_detection() {
        assert!(!SourceAddress::new("447700900000").unwrap().is_alphanumeric());
        assert!(SourceAddress::new("Cbf").unwrap().is_alphanumeric());
        assert!(SourceAddress::new("4477a").unwrap().is_alphanumeric());
    }

    #[test]
    fn destinations_normalize_to_digits() {
        assert_eq!(Destination::parse("+34600000001").unwrap().as_str(), "34600000001");
        assert_eq!(Destination::parse("0034600000001").unwrap().as_str(), "34600000001");
        assert_eq!(Destination::parse("34600000001").unwrap().as_str(), "34600000001");
        assert!(Destination::parse("0600000001").is_err());
        assert!(Destination::parse("1234567").is_err());
        assert!(Destination::parse("12345678901234567").is_err());
    }

    #[test]
    fn destination_list_error_names_original_input() {
        let list = Destination::parse_list("471234567890,449876543210").unwrap();
        assert_eq!(list.len(), 2);

        let err = Destination::parse_list("471234567890,nope").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDestination {
                input: "471234567890,nope".to_owned()
            }
        );
        assert!(Destination::parse_list("").is_err());
    }

    #[test]
    fn coded_enums_round_trip_their_wire_codes() {
        for code in ["0", "1", "5"] {
            assert_eq!(SourceType::parse(code).unwrap().code().to_string(), code);
        }
        for code in ["0", "1", "2", "4", "5", "6", "7"] {
            assert_eq!(DataCoding::parse(code).unwrap().code().to_string(), code);
        }
        assert!(DataCoding::parse("3").is_err());
        assert!(SourceType::parse("2").is_err());
        assert!(DeliveryReceipt::parse("3").is_err());
    }

    #[test]
    fn user_reference_length_is_bounded() {
        assert!(UserReference::new("a").is_err());
        assert!(UserReference::new("ab").is_ok());
        assert!(UserReference::new("a".repeat(15)).is_ok());
        assert!(UserReference::new("a".repeat(16)).is_err());
    }

    #[test]
    fn user_data_header_must_be_short_hex() {
        assert!(UserDataHeader::new("0A1f").is_ok());
        assert!(UserDataHeader::new("f".repeat(17)).is_ok());
        assert!(UserDataHeader::new("f".repeat(18)).is_err());
        assert!(UserDataHeader::new("xyz").is_err());
        assert!(UserDataHeader::new("").is_err());
    }

    #[test]
    fn validity_period_range_is_enforced() {
        assert!(ValidityPeriod::parse("0").is_err());
        assert_eq!(ValidityPeriod::parse("1").unwrap().value(), 1);
        assert_eq!(ValidityPeriod::parse("10080").unwrap().value(), 10080);
        assert!(ValidityPeriod::parse("20000").is_err());
        assert!(ValidityPeriod::parse("soon").is_err());
    }

    #[test]
    fn gateway_timestamp_requires_ten_digits() {
        assert!(GatewayTimestamp::parse("du", "1700000000").is_ok());
        assert!(GatewayTimestamp::parse("du", "170000000").is_err());
        assert_eq!(GatewayTimestamp::now().as_str().len(), 10);
    }

    #[test]
    fn reply_code_sentinels() {
        assert!(ReplyCode::new("-20").is_retry_requested());
        assert!(ReplyCode::invalid_destination().is_invalid_destination());
        assert!(!ReplyCode::new("0").is_retry_requested());
    }
}
