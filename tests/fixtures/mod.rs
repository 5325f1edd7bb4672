#![allow(dead_code)]

use once_cell::sync::Lazy;
use oracle_bridge_proof::{BlockRelayProof, OracleDataProof};
use serde::Deserialize;

/// Relay proof of block 3021518 and its expected encoding.
#[derive(Debug, Deserialize)]
pub struct BlockRelayFixture {
    pub proof: BlockRelayProof,
    #[serde(with = "hex::serde")]
    pub expected_eth_data: Vec<u8>,
}

/// Oracle data proof at version 180, encoded against version 191.
#[derive(Debug, Deserialize)]
pub struct OracleDataFixture {
    pub target_version: u64,
    pub proof: OracleDataProof,
    #[serde(with = "hex::serde")]
    pub expected_eth_data: Vec<u8>,
}

pub static BLOCK_RELAY: Lazy<BlockRelayFixture> = Lazy::new(|| {
    serde_json::from_str(include_str!("block_relay.json")).expect("parse block relay fixture")
});

pub static ORACLE_DATA: Lazy<OracleDataFixture> = Lazy::new(|| {
    serde_json::from_str(include_str!("oracle_data.json")).expect("parse oracle data fixture")
});

pub fn block_relay() -> BlockRelayProof {
    BLOCK_RELAY.proof.clone()
}

pub fn oracle_data() -> OracleDataProof {
    ORACLE_DATA.proof.clone()
}

/// Routes `tracing` output through the test harness; `RUST_LOG` filters it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn hex_words(bytes: &[u8]) -> String {
    bytes
        .chunks(32)
        .map(hex::encode)
        .collect::<Vec<_>>()
        .join("\n")
}
