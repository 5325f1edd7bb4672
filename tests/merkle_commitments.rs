use std::collections::BTreeMap;

use proptest::prelude::*;

use oracle_bridge_proof::config::COMMITTED_STORES;
use oracle_bridge_proof::hash::{iavl_inner_hash, iavl_leaf_hash, simple_hash_from_byte_slices};
use oracle_bridge_proof::proof::{fold_path, store_leaf, BlockHeader, BlockId};
use oracle_bridge_proof::{
    BlockHeaderMerkleParts, BlockRelayProof, Bytes32, IavlMerklePath, MultiStoreProof,
    ProofError,
};

#[path = "fixtures/mod.rs"]
mod fixtures;

use fixtures::{block_relay, oracle_data};

fn store_roots(seed: u8) -> BTreeMap<String, Bytes32> {
    COMMITTED_STORES
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), Bytes32::new([seed ^ index as u8; 32])))
        .collect()
}

fn header(app_hash: Bytes32) -> BlockHeader {
    BlockHeader {
        version_block: 10,
        version_app: 0,
        chain_id: "band-guanyu-poa".to_string(),
        height: 3_021_518,
        time_second: 1_605_721_435,
        time_nano_second: 123_456_789,
        last_block_id: BlockId {
            hash: Bytes32::new([0x01; 32]),
            part_set_total: 1,
            part_set_hash: Bytes32::new([0x02; 32]),
        },
        last_commit_hash: vec![0x03; 32],
        data_hash: vec![0x04; 32],
        validators_hash: Bytes32::new([0x05; 32]),
        next_validators_hash: Bytes32::new([0x05; 32]),
        consensus_hash: Bytes32::new([0x06; 32]),
        app_hash,
        last_results_hash: vec![0x07; 32],
        evidence_hash: vec![0x08; 32],
        proposer_address: vec![0x09; 20],
    }
}

#[test]
fn app_hash_commits_to_every_store() {
    let roots = store_roots(0x30);
    let proof = MultiStoreProof::from_store_roots(&roots).unwrap();
    let leaves: Vec<Vec<u8>> = roots
        .iter()
        .map(|(name, root)| store_leaf(name, root.as_bytes()))
        .collect();
    assert_eq!(proof.app_hash(), Bytes32::new(simple_hash_from_byte_slices(&leaves)));
    assert_eq!(proof.oracle_iavl_state_hash, roots["oracle"]);
}

#[test]
fn store_roots_must_be_complete() {
    let mut roots = store_roots(0x30);
    roots.remove("mint");
    assert_eq!(
        MultiStoreProof::from_store_roots(&roots),
        Err(ProofError::UnexpectedStoreCount {
            expected: 12,
            got: 11
        })
    );
    roots.insert("ibc".to_string(), Bytes32::ZERO);
    assert_eq!(
        MultiStoreProof::from_store_roots(&roots),
        Err(ProofError::MissingStore { name: "mint" })
    );
}

#[test]
fn relay_block_hash_matches_full_header() {
    let multi_store_proof = MultiStoreProof::from_store_roots(&store_roots(0x51)).unwrap();
    let header = header(multi_store_proof.app_hash());
    let relay = BlockRelayProof {
        multi_store_proof,
        block_header_merkle_parts: BlockHeaderMerkleParts::from_header(&header),
        signatures: block_relay().signatures,
    };
    assert_eq!(relay.block_hash(), header.hash());
    assert_eq!(relay.block_header_merkle_parts.height, header.height);
    assert_eq!(
        relay.block_header_merkle_parts.time_nano_second,
        header.time_nano_second
    );
}

#[test]
fn fixture_commitments_match_known_hashes() {
    let relay = block_relay();
    assert_eq!(
        relay.multi_store_proof.app_hash().to_hex(),
        "bea926d88ae43174bb1b6f3940a0b78bee81dc6c8059353e2009490eea476028"
    );
    assert_eq!(
        relay.block_hash().to_hex(),
        "1f74f5500276314c0bbdadc1f4afcaa48c8911e631dbf9e0397c5fe935033420"
    );
}

#[test]
fn header_without_txs_or_evidence() {
    let mut value = serde_json::to_value(header(Bytes32::new([0xab; 32]))).unwrap();
    for field in ["data_hash", "evidence_hash", "last_results_hash"] {
        value[field] = serde_json::Value::from("");
    }
    let empty: BlockHeader = serde_json::from_value(value).unwrap();
    assert!(empty.data_hash.is_empty());

    let parts = BlockHeaderMerkleParts::from_header(&empty);
    assert_eq!(parts.block_hash(&empty.app_hash), empty.hash());
    assert_ne!(empty.hash(), header(Bytes32::new([0xab; 32])).hash());

    let zeroed = BlockHeader {
        data_hash: vec![0; 32],
        evidence_hash: vec![0; 32],
        last_results_hash: vec![0; 32],
        ..empty.clone()
    };
    assert_ne!(zeroed.hash(), empty.hash());
}

#[test]
fn header_hash_changes_with_any_leaf() {
    let base = header(Bytes32::new([0xaa; 32]));
    let mut later = base.clone();
    later.time_nano_second += 1;
    let mut other_chain = base.clone();
    other_chain.chain_id.push('x');
    let mut other_proposer = base.clone();
    other_proposer.proposer_address[0] ^= 1;

    for changed in [later, other_chain, other_proposer] {
        assert_ne!(changed.hash(), base.hash());
    }
}

#[test]
fn iavl_fold_matches_manual_chain() {
    let leaf = Bytes32::new(iavl_leaf_hash(b"\x01request", b"result", 180));
    let paths = oracle_data().merkle_paths;

    let mut manual = leaf.into_bytes();
    for step in &paths {
        let sibling = step.sibling_hash.into_bytes();
        manual = if step.is_data_on_right {
            iavl_inner_hash(
                step.subtree_height,
                i64::try_from(step.subtree_size).unwrap(),
                i64::try_from(step.subtree_version).unwrap(),
                &sibling,
                &manual,
            )
        } else {
            iavl_inner_hash(
                step.subtree_height,
                i64::try_from(step.subtree_size).unwrap(),
                i64::try_from(step.subtree_version).unwrap(),
                &manual,
                &sibling,
            )
        };
    }
    assert_eq!(fold_path(&leaf, &paths).unwrap(), Bytes32::new(manual));
    assert_eq!(oracle_data().compute_root(&leaf).unwrap(), Bytes32::new(manual));
}

#[test]
fn empty_path_returns_the_leaf() {
    let leaf = Bytes32::new([0x77; 32]);
    assert_eq!(fold_path(&leaf, &[]).unwrap(), leaf);
}

#[test]
fn fixture_paths_grow_monotonically() {
    let paths = oracle_data().merkle_paths;
    for pair in paths.windows(2) {
        assert!(pair[0].subtree_height < pair[1].subtree_height);
        assert!(pair[0].subtree_size < pair[1].subtree_size);
    }
    let version = oracle_data().version;
    assert!(paths.iter().all(|step| step.subtree_version >= version));
}

proptest! {
    #[test]
    fn grouped_roots_match_flat_tree(seed in any::<u8>(), oracle in any::<[u8; 32]>()) {
        let mut roots = store_roots(seed);
        roots.insert("oracle".to_string(), Bytes32::new(oracle));
        let proof = MultiStoreProof::from_store_roots(&roots).unwrap();
        let leaves: Vec<Vec<u8>> = COMMITTED_STORES
            .iter()
            .map(|name| store_leaf(name, roots[*name].as_bytes()))
            .collect();
        prop_assert_eq!(proof.app_hash().into_bytes(), simple_hash_from_byte_slices(&leaves));
    }

    #[test]
    fn sibling_side_matters(
        height in 1u8..32,
        size in 2u64..1 << 20,
        version in any::<u32>(),
        sibling in any::<[u8; 32]>(),
        child in any::<[u8; 32]>(),
    ) {
        prop_assume!(sibling != child);
        let step = |is_data_on_right| IavlMerklePath {
            is_data_on_right,
            subtree_height: height,
            subtree_size: size,
            subtree_version: u64::from(version),
            sibling_hash: Bytes32::new(sibling),
        };
        let child = Bytes32::new(child);
        prop_assert_ne!(step(true).parent_hash(&child)?, step(false).parent_hash(&child)?);
    }
}
