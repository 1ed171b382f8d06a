use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::Error;

/// A device reference as accepted on the wire: the raw numeric id, the
/// base58-encoded external id, or an object carrying an `id` field. All
/// three forms normalize to the canonical numeric id via [`DeviceRef::resolve`]
/// before any set logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum DeviceRef {
    Numeric(i64),
    Encoded(String),
    Record { id: i64 },
}

impl DeviceRef {
    pub fn resolve(&self) -> Result<i64, Error> {
        match self {
            Self::Numeric(id) | Self::Record { id } => Ok(*id),
            Self::Encoded(encoded) => decode_device_id(encoded),
        }
    }
}

pub fn decode_device_id(encoded: &str) -> Result<i64, Error> {
    let bytes = match bs58::decode(encoded)
        .with_alphabet(bs58::Alphabet::FLICKR)
        .into_vec()
    {
        Ok(v) => v,
        Err(_err) => return Err(Error::InvalidDeviceId),
    };

    if bytes.len() > 8 {
        return Err(Error::InvalidDeviceId);
    }

    let mut buf = [0u8; 8];
    buf[8 - bytes.len()..].copy_from_slice(&bytes);
    Ok(i64::from_be_bytes(buf))
}

/// External encoding shared by devices, applications and snapshots.
pub fn encode_external_id(id: i64) -> String {
    bs58::encode(id.to_be_bytes())
        .with_alphabet(bs58::Alphabet::FLICKR)
        .into_string()
}
