//! Binary wire codec.
//!
//! Messages travel as bincode frames. The codec is generic so the client and
//! the relay share it for both directions.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// A frame could not be encoded or decoded.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("wire codec: {0}")]
    Codec(#[from] bincode::Error),
}

/// Encode a message into a frame.
pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, WireError> {
    Ok(bincode::serialize(message)?)
}

/// Decode a frame.
pub fn decode<T: DeserializeOwned>(frame: &[u8]) -> Result<T, WireError> {
    Ok(bincode::deserialize(frame)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardUid, RoomId};
    use crate::sync::{Inbound, Outbound};

    #[test]
    fn test_frame_round_trip() {
        let msg = Outbound::ChallengeResult {
            room_id: RoomId(4321),
            defender_uid: CardUid(0xdead_beef),
            amount: 4,
        };
        let frame = encode(&msg).unwrap();
        let back: Outbound = decode(&frame).unwrap();
        assert_eq!(msg, back);
    }

    #[test]
    fn test_truncated_frame() {
        let frame = encode(&Inbound::TurnEnded { from: crate::core::PeerId(3) }).unwrap();
        let result: Result<Inbound, _> = decode(&frame[..frame.len() - 1]);
        assert!(matches!(result, Err(WireError::Codec(_))));
    }
}
