use serde::{Deserialize, Serialize};

use super::errors::{ProofError, ProofResult};
use crate::abi::{word_to_u64, word_to_u8, ParamType, Token};

/// Oracle request as committed in the oracle store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestPacket {
    pub client_id: String,
    pub oracle_script_id: u64,
    #[serde(with = "hex::serde")]
    pub calldata: Vec<u8>,
    pub ask_count: u64,
    pub min_count: u64,
}

impl RequestPacket {
    /// Tuple `(string, uint64, bytes, uint64, uint64)`.
    pub fn encode_token(&self) -> Token {
        Token::Tuple(vec![
            Token::string(&self.client_id),
            Token::uint(self.oracle_script_id),
            Token::bytes(self.calldata.clone()),
            Token::uint(self.ask_count),
            Token::uint(self.min_count),
        ])
    }

    /// Decode schema matching [`RequestPacket::encode_token`].
    pub fn param_type() -> ParamType {
        ParamType::Tuple(vec![
            ParamType::String,
            ParamType::Uint(64),
            ParamType::Bytes,
            ParamType::Uint(64),
            ParamType::Uint(64),
        ])
    }

    /// Rebuilds a request packet from a decoded tuple.
    pub fn from_token(token: Token) -> ProofResult<Self> {
        let members = token.into_tuple()?;
        let [client_id, oracle_script_id, calldata, ask_count, min_count] =
            <[Token; 5]>::try_from(members).map_err(|_| ProofError::UnexpectedLayout {
                field: "request_packet",
            })?;
        Ok(Self {
            client_id: utf8("request_packet.client_id", client_id)?,
            oracle_script_id: word_to_u64(oracle_script_id.as_word()?)?,
            calldata: calldata.into_bytes()?,
            ask_count: word_to_u64(ask_count.as_word()?)?,
            min_count: word_to_u64(min_count.as_word()?)?,
        })
    }
}

/// Oracle response as committed in the oracle store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResponsePacket {
    pub client_id: String,
    pub request_id: u64,
    pub ans_count: u64,
    pub request_time: u64,
    pub resolve_time: u64,
    pub resolve_status: u8,
    #[serde(with = "hex::serde")]
    pub result: Vec<u8>,
}

impl ResponsePacket {
    /// Tuple `(string, uint64, uint64, uint64, uint64, uint8, bytes)`.
    pub fn encode_token(&self) -> Token {
        Token::Tuple(vec![
            Token::string(&self.client_id),
            Token::uint(self.request_id),
            Token::uint(self.ans_count),
            Token::uint(self.request_time),
            Token::uint(self.resolve_time),
            Token::uint(self.resolve_status),
            Token::bytes(self.result.clone()),
        ])
    }

    /// Decode schema matching [`ResponsePacket::encode_token`].
    pub fn param_type() -> ParamType {
        ParamType::Tuple(vec![
            ParamType::String,
            ParamType::Uint(64),
            ParamType::Uint(64),
            ParamType::Uint(64),
            ParamType::Uint(64),
            ParamType::Uint(8),
            ParamType::Bytes,
        ])
    }

    /// Rebuilds a response packet from a decoded tuple.
    pub fn from_token(token: Token) -> ProofResult<Self> {
        let members = token.into_tuple()?;
        let [client_id, request_id, ans_count, request_time, resolve_time, resolve_status, result] =
            <[Token; 7]>::try_from(members).map_err(|_| ProofError::UnexpectedLayout {
                field: "response_packet",
            })?;
        Ok(Self {
            client_id: utf8("response_packet.client_id", client_id)?,
            request_id: word_to_u64(request_id.as_word()?)?,
            ans_count: word_to_u64(ans_count.as_word()?)?,
            request_time: word_to_u64(request_time.as_word()?)?,
            resolve_time: word_to_u64(resolve_time.as_word()?)?,
            resolve_status: word_to_u8(resolve_status.as_word()?)?,
            result: result.into_bytes()?,
        })
    }
}

fn utf8(field: &'static str, token: Token) -> ProofResult<String> {
    String::from_utf8(token.into_bytes()?).map_err(|_| ProofError::InvalidString { field })
}
