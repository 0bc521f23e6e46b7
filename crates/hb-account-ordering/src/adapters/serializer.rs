//! Record encoding for stored families, accounts and migration markers.

use crate::domain::errors::SerializationError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn encode<T: Serialize>(record: &T) -> Result<Vec<u8>, SerializationError> {
    bincode::serialize(record).map_err(|e| SerializationError {
        message: e.to_string(),
    })
}

pub fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T, SerializationError> {
    bincode::deserialize(data).map_err(|e| SerializationError {
        message: e.to_string(),
    })
}
