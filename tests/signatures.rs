use k256::ecdsa::SigningKey;
use sha2::{Digest, Sha256};

use oracle_bridge_proof::proof::{evm_address, split_sign_bytes, BlockId, CanonicalVote};
use oracle_bridge_proof::{BlockRelayProof, Bytes32, ProofError, TmSignature};

#[path = "fixtures/mod.rs"]
mod fixtures;

use fixtures::{block_relay, init_tracing};

const PART_SET_HASH: &str = "2DC401225B681224CB8F597D157A5DE78EF4F04FE1C884595F2B18D941EBCA20";

fn fixture_vote(block_hash: Bytes32, nanos: u32) -> CanonicalVote {
    CanonicalVote {
        height: 3_021_518,
        round: 0,
        block_id: BlockId {
            hash: block_hash,
            part_set_total: 1,
            part_set_hash: Bytes32::from_hex("part_set_hash", PART_SET_HASH).unwrap(),
        },
        timestamp_second: 1_605_721_441,
        timestamp_nano_second: nanos,
        chain_id: "band-guanyu-poa".to_string(),
    }
}

fn signing_key(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32].into()).unwrap()
}

fn sign(key: &SigningKey, sign_bytes: &[u8]) -> (Vec<u8>, u8) {
    let digest = Sha256::digest(sign_bytes);
    let (signature, recovery_id) = key.sign_prehash_recoverable(&digest).unwrap();
    (signature.to_bytes().to_vec(), recovery_id.to_byte())
}

#[test]
fn canonical_vote_reproduces_fixture_fragments() {
    let relay = block_relay();
    let vote = fixture_vote(relay.block_hash(), 594_652_250);
    let sign_bytes = vote.sign_bytes();
    assert_eq!(
        hex::encode_upper(&sign_bytes[..16]),
        "74080211CE1A2E000000000022480A20"
    );

    let (prefix, suffix) = split_sign_bytes(&sign_bytes, &relay.block_hash()).unwrap();
    assert_eq!(prefix, relay.signatures[0].signed_data_prefix);
    assert_eq!(suffix, relay.signatures[0].signed_data_suffix);
}

#[test]
fn fixture_signers_recover_over_the_block_hash() {
    let expected = [
        "de1d47b8b9a086bf1ccc8eb727c0d1d0e6eb72f5",
        "b583448c93c2744c6a8581c7dc90480244f5829e",
        "d1d3358c6ba4e8bdded90f9309790bb283e58bca",
        "58e33f9ecdbcfb85e93d3f3143cb11c4215e8025",
        "b3a6a49decf3531126ef4c6db22bb7e667a09575",
        "886f1a48f0abb55f7b6686c97517837e1cb0c874",
        "3e518604e2ed6f2d39c6b3dec218f80769efeedc",
    ];
    let signers: Vec<String> = block_relay()
        .recover_signers()
        .unwrap()
        .iter()
        .map(hex::encode)
        .collect();
    assert_eq!(signers, expected);
}

#[test]
fn fixture_signers_change_with_the_block_hash() {
    let relay = block_relay();
    let signature = &relay.signatures[0];
    let genuine = signature.recover_signer(&relay.block_hash()).unwrap();
    for other in [Bytes32::ZERO, Bytes32::new([0x42; 32])] {
        assert_ne!(signature.recover_signer(&other).ok(), Some(genuine));
    }
}

#[test]
fn from_vote_selects_recovery_id() {
    init_tracing();
    let block_hash = Bytes32::new([0x42; 32]);
    let sign_bytes = fixture_vote(block_hash, 1).sign_bytes();

    for seed in 1..=8u8 {
        let key = signing_key(seed);
        let signer = evm_address(key.verifying_key());
        let (raw, recovery_id) = sign(&key, &sign_bytes);

        let signature = TmSignature::from_vote(&sign_bytes, &block_hash, &raw, &signer).unwrap();
        assert_eq!(signature.v, 27 + recovery_id);
        assert_eq!(signature.signed_message(&block_hash), sign_bytes);
        assert_eq!(signature.recover_signer(&block_hash).unwrap(), signer);
    }
}

#[test]
fn signer_over_relay_block_hash_recovers() {
    let mut relay = block_relay();
    let block_hash = relay.block_hash();
    let sign_bytes = fixture_vote(block_hash, 7).sign_bytes();
    let key = signing_key(9);
    let signer = evm_address(key.verifying_key());
    let (raw, _) = sign(&key, &sign_bytes);

    relay.signatures = vec![TmSignature::from_vote(&sign_bytes, &block_hash, &raw, &signer).unwrap()];
    assert_eq!(relay.recover_signers().unwrap(), vec![signer]);

    let decoded = BlockRelayProof::decode_eth_data(&relay.encode_eth_data().unwrap()).unwrap();
    assert_eq!(decoded.recover_signers().unwrap(), vec![signer]);
}

#[test]
fn wrong_signer_is_not_recovered() {
    let block_hash = Bytes32::new([0x42; 32]);
    let sign_bytes = fixture_vote(block_hash, 1).sign_bytes();
    let (raw, _) = sign(&signing_key(3), &sign_bytes);
    let other = evm_address(signing_key(4).verifying_key());
    assert_eq!(
        TmSignature::from_vote(&sign_bytes, &block_hash, &raw, &other),
        Err(ProofError::SignerNotRecovered)
    );
}

#[test]
fn tampered_fragment_changes_signer() {
    let block_hash = Bytes32::new([0x42; 32]);
    let sign_bytes = fixture_vote(block_hash, 1).sign_bytes();
    let key = signing_key(5);
    let signer = evm_address(key.verifying_key());
    let (raw, _) = sign(&key, &sign_bytes);
    let mut signature = TmSignature::from_vote(&sign_bytes, &block_hash, &raw, &signer).unwrap();

    let last = signature.signed_data_suffix.len() - 1;
    signature.signed_data_suffix[last] ^= 1;
    assert_ne!(signature.recover_signer(&block_hash).ok(), Some(signer));
}

#[test]
fn from_vote_rejects_bad_inputs() {
    let block_hash = Bytes32::new([0x42; 32]);
    let sign_bytes = fixture_vote(block_hash, 1).sign_bytes();
    let signer = [0u8; 20];

    assert_eq!(
        TmSignature::from_vote(&sign_bytes, &block_hash, &[1; 65], &signer),
        Err(ProofError::InvalidLength {
            field: "signature",
            expected: 64,
            got: 65
        })
    );
    assert_eq!(
        TmSignature::from_vote(&sign_bytes, &Bytes32::new([0x43; 32]), &[1; 64], &signer),
        Err(ProofError::BlockHashNotFound)
    );
}
