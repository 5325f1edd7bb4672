use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::errors::{ProofError, ProofResult};
use super::types::Bytes32;
use crate::abi::{ParamType, Token};
use crate::config::{COMMITTED_STORES, ORACLE_STORE_NAME};
use crate::hash::{branch_hash, encode_length_prefixed, leaf_hash, simple_hash_from_byte_slices, tmhash};

/// Sub-roots of the multi-store, grouped so the verifier can rebuild the
/// application hash from the oracle store root alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MultiStoreProof {
    pub acc_to_gov_stores_merkle_hash: Bytes32,
    pub main_and_mint_stores_merkle_hash: Bytes32,
    pub oracle_iavl_state_hash: Bytes32,
    pub params_stores_merkle_hash: Bytes32,
    pub slashing_to_upgrade_stores_merkle_hash: Bytes32,
}

impl MultiStoreProof {
    /// Builds the proof from raw slices given in canonical order.
    pub fn from_slices(
        acc_to_gov: &[u8],
        main_and_mint: &[u8],
        oracle_iavl_state: &[u8],
        params: &[u8],
        slashing_to_upgrade: &[u8],
    ) -> ProofResult<Self> {
        Ok(Self {
            acc_to_gov_stores_merkle_hash: Bytes32::from_slice(
                "acc_to_gov_stores_merkle_hash",
                acc_to_gov,
            )?,
            main_and_mint_stores_merkle_hash: Bytes32::from_slice(
                "main_and_mint_stores_merkle_hash",
                main_and_mint,
            )?,
            oracle_iavl_state_hash: Bytes32::from_slice(
                "oracle_iavl_state_hash",
                oracle_iavl_state,
            )?,
            params_stores_merkle_hash: Bytes32::from_slice(
                "params_stores_merkle_hash",
                params,
            )?,
            slashing_to_upgrade_stores_merkle_hash: Bytes32::from_slice(
                "slashing_to_upgrade_stores_merkle_hash",
                slashing_to_upgrade,
            )?,
        })
    }

    /// The five sub-roots in wire order.
    pub fn hashes(&self) -> [Bytes32; 5] {
        [
            self.acc_to_gov_stores_merkle_hash,
            self.main_and_mint_stores_merkle_hash,
            self.oracle_iavl_state_hash,
            self.params_stores_merkle_hash,
            self.slashing_to_upgrade_stores_merkle_hash,
        ]
    }

    /// Static tuple of five `bytes32` words.
    pub fn encode_token(&self) -> Token {
        Token::Tuple(self.hashes().iter().map(Bytes32::to_token).collect())
    }

    /// Five `bytes32` words.
    pub fn param_type() -> ParamType {
        ParamType::Tuple(vec![ParamType::FixedBytes(32); 5])
    }

    /// Rebuilds the proof from a decoded tuple.
    pub fn from_token(token: Token) -> ProofResult<Self> {
        let members = token.into_tuple()?;
        let words = members
            .iter()
            .map(|member| member.as_word().map(Bytes32::from_word))
            .collect::<Result<Vec<_>, _>>()?;
        match words.as_slice() {
            [acc, main, oracle, params, slashing] => Ok(Self {
                acc_to_gov_stores_merkle_hash: *acc,
                main_and_mint_stores_merkle_hash: *main,
                oracle_iavl_state_hash: *oracle,
                params_stores_merkle_hash: *params,
                slashing_to_upgrade_stores_merkle_hash: *slashing,
            }),
            _ => Err(ProofError::UnexpectedLayout {
                field: "multi_store_proof",
            }),
        }
    }

    /// Application hash committed in the block header.
    ///
    /// Only the oracle store leaf is hashed here; the other stores enter
    /// through their grouped sub-roots.
    pub fn app_hash(&self) -> Bytes32 {
        let oracle = leaf_hash(&store_leaf(
            ORACLE_STORE_NAME,
            self.oracle_iavl_state_hash.as_bytes(),
        ));
        let oracle_and_params = branch_hash(&oracle, self.params_stores_merkle_hash.as_bytes());
        let main_to_params = branch_hash(
            self.main_and_mint_stores_merkle_hash.as_bytes(),
            &oracle_and_params,
        );
        let acc_to_params = branch_hash(self.acc_to_gov_stores_merkle_hash.as_bytes(), &main_to_params);
        Bytes32::new(branch_hash(
            &acc_to_params,
            self.slashing_to_upgrade_stores_merkle_hash.as_bytes(),
        ))
    }

    /// Groups the twelve committed store roots into the five sub-roots.
    ///
    /// `roots` must name exactly the committed stores.
    pub fn from_store_roots(roots: &BTreeMap<String, Bytes32>) -> ProofResult<Self> {
        if roots.len() != COMMITTED_STORES.len() {
            return Err(ProofError::UnexpectedStoreCount {
                expected: COMMITTED_STORES.len(),
                got: roots.len(),
            });
        }
        let mut leaves = Vec::with_capacity(COMMITTED_STORES.len());
        for name in COMMITTED_STORES {
            let root = roots.get(name).ok_or(ProofError::MissingStore { name })?;
            leaves.push(store_leaf(name, root.as_bytes()));
        }
        let oracle = roots
            .get(ORACLE_STORE_NAME)
            .ok_or(ProofError::MissingStore {
                name: ORACLE_STORE_NAME,
            })?;

        Ok(Self {
            acc_to_gov_stores_merkle_hash: Bytes32::new(simple_hash_from_byte_slices(&leaves[..4])),
            main_and_mint_stores_merkle_hash: Bytes32::new(simple_hash_from_byte_slices(
                &leaves[4..6],
            )),
            oracle_iavl_state_hash: *oracle,
            params_stores_merkle_hash: Bytes32::new(simple_hash_from_byte_slices(&leaves[7..8])),
            slashing_to_upgrade_stores_merkle_hash: Bytes32::new(simple_hash_from_byte_slices(
                &leaves[8..],
            )),
        })
    }
}

/// Key/value leaf of one store: the store name and the hash of its root,
/// each length prefixed.
pub fn store_leaf(name: &str, root: &[u8]) -> Vec<u8> {
    let mut leaf = Vec::with_capacity(name.len() + 34);
    encode_length_prefixed(&mut leaf, name.as_bytes());
    encode_length_prefixed(&mut leaf, &tmhash(root));
    leaf
}
