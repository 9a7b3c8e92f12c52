use crate::net::messages::{ClientEnvelope, ClientMessage, ServerMessage, PROTOCOL_VERSION};

/// Wire formats for the arena: clients send either a JSON envelope on a
/// text frame or a bincode (version, message) pair on a binary frame; the
/// server always replies with the bincode pair on binary frames. The JSON
/// envelope's flattened tag/data shape does not survive bincode (unknown-
/// length map), hence the plain pair on the binary side.

pub fn decode_client_json(bytes: &[u8]) -> Result<ClientMessage, serde_json::Error> {
    let env: ClientEnvelope = serde_json::from_slice(bytes)?;
    Ok(env.msg)
}

pub fn decode_client_bin(bytes: &[u8]) -> Result<ClientMessage, bincode::Error> {
    let (v, msg): (u8, ClientMessage) = bincode::deserialize(bytes)?;
    if v != PROTOCOL_VERSION {
        return Err(Box::new(bincode::ErrorKind::Custom(format!(
            "unsupported protocol version {}",
            v
        ))));
    }
    Ok(msg)
}

pub fn encode_server_bin(msg: &ServerMessage) -> Result<Vec<u8>, bincode::Error> {
    bincode::serialize(&(PROTOCOL_VERSION, msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_text_frame_shape_is_accepted() {
        let bytes = br#"{"v":1,"t":"input","data":{"angle":1.5,"boosting":true}}"#;
        match decode_client_json(bytes).unwrap() {
            ClientMessage::Input { angle, boosting } => {
                assert_eq!(angle, 1.5);
                assert!(boosting);
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn client_respawn_needs_no_payload() {
        let bytes = br#"{"v":1,"t":"respawn"}"#;
        assert!(matches!(
            decode_client_json(bytes).unwrap(),
            ClientMessage::Respawn
        ));
    }

    #[test]
    fn client_binary_frame_round_trip() {
        let bytes = bincode::serialize(&(
            PROTOCOL_VERSION,
            ClientMessage::Input {
                angle: 2.0,
                boosting: false,
            },
        ))
        .unwrap();
        match decode_client_bin(&bytes).unwrap() {
            ClientMessage::Input { angle, boosting } => {
                assert_eq!(angle, 2.0);
                assert!(!boosting);
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn client_binary_frame_rejects_other_versions() {
        let bytes = bincode::serialize(&(7u8, ClientMessage::Respawn)).unwrap();
        assert!(decode_client_bin(&bytes).is_err());
    }

    #[test]
    fn server_binary_frame_round_trip() {
        let encoded = encode_server_bin(&ServerMessage::PlayerDied {
            id: "player_3".to_owned(),
            killer_id: None,
            killer_name: "the void".to_owned(),
            score: 512.0,
        })
        .unwrap();
        let (v, decoded): (u8, ServerMessage) = bincode::deserialize(&encoded).unwrap();
        assert_eq!(v, PROTOCOL_VERSION);
        match decoded {
            ServerMessage::PlayerDied {
                id,
                killer_id,
                killer_name,
                score,
            } => {
                assert_eq!(id, "player_3");
                assert_eq!(killer_id, None);
                assert_eq!(killer_name, "the void");
                assert_eq!(score, 512.0);
            }
            other => panic!("unexpected message {:?}", other),
        }
    }
}
