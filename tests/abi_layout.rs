use insta::assert_snapshot;
use proptest::prelude::*;

use oracle_bridge_proof::abi::{
    decode, encode, encode_single, word_to_u128, word_to_u64, AbiError, ParamType, Token,
    WordReader,
};
use oracle_bridge_proof::{EncoderLimits, TmSignature};

#[path = "fixtures/mod.rs"]
mod fixtures;

use fixtures::{hex_words, oracle_data};

fn signature(r: u8, s: u8, v: u8, prefix: Vec<u8>, suffix: Vec<u8>) -> TmSignature {
    TmSignature::new(&[r; 32], &[s; 32], v, prefix, suffix).expect("valid signature")
}

#[test]
fn nested_signature_list_literal() {
    let signatures = vec![
        signature(0x11, 0x22, 27, vec![1, 2], vec![3, 4, 5]),
        signature(0x33, 0x44, 28, vec![0xaa; 33], vec![6]),
    ];
    let token = Token::Array(signatures.iter().map(TmSignature::encode_token).collect());
    let encoded = encode_single(&token);

    let expected = [
        // offset of the list, element count, element offsets
        "0000000000000000000000000000000000000000000000000000000000000020",
        "0000000000000000000000000000000000000000000000000000000000000002",
        "0000000000000000000000000000000000000000000000000000000000000040",
        "0000000000000000000000000000000000000000000000000000000000000160",
        // first signature: r, s, v, prefix offset, suffix offset, tails
        "1111111111111111111111111111111111111111111111111111111111111111",
        "2222222222222222222222222222222222222222222222222222222222222222",
        "000000000000000000000000000000000000000000000000000000000000001b",
        "00000000000000000000000000000000000000000000000000000000000000a0",
        "00000000000000000000000000000000000000000000000000000000000000e0",
        "0000000000000000000000000000000000000000000000000000000000000002",
        "0102000000000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000003",
        "0304050000000000000000000000000000000000000000000000000000000000",
        // second signature
        "3333333333333333333333333333333333333333333333333333333333333333",
        "4444444444444444444444444444444444444444444444444444444444444444",
        "000000000000000000000000000000000000000000000000000000000000001c",
        "00000000000000000000000000000000000000000000000000000000000000a0",
        "0000000000000000000000000000000000000000000000000000000000000100",
        "0000000000000000000000000000000000000000000000000000000000000021",
        "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
        "aa00000000000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000001",
        "0600000000000000000000000000000000000000000000000000000000000000",
    ]
    .concat();
    assert_eq!(encoded.len(), 23 * 32);
    assert_eq!(hex::encode(&encoded), expected);
}

#[test]
fn offsets_point_at_length_prefixed_data() {
    let payloads: [&[u8]; 3] = [b"first", &[0x42; 70], b""];
    let tokens = vec![
        Token::bytes(payloads[0].to_vec()),
        Token::uint(9u8),
        Token::bytes(payloads[1].to_vec()),
        Token::bool(true),
        Token::bytes(payloads[2].to_vec()),
    ];
    let encoded = encode(&tokens);
    let reader = WordReader::new(&encoded);
    for (slot, payload) in [0usize, 2, 4].into_iter().zip(payloads) {
        let offset = reader.read_usize(slot * 32).unwrap();
        assert_eq!(offset % 32, 0);
        assert_eq!(reader.read_usize(offset).unwrap(), payload.len());
        assert_eq!(reader.read_exact(offset + 32, payload.len()).unwrap(), payload);
    }
}

#[test]
fn request_packet_layout() {
    let encoded = encode_single(&oracle_data().request_packet.encode_token());
    assert_snapshot!("request_packet_words", hex_words(&encoded));
}

#[test]
fn mixed_argument_list_layout() {
    let encoded = encode(&[
        Token::bytes(vec![0x01; 40]),
        Token::uint(7u8),
        Token::Array(vec![Token::uint(1u8), Token::uint(2u8)]),
    ]);
    assert_snapshot!("mixed_argument_list_words", hex_words(&encoded));
}

#[test]
fn decode_follows_nested_offsets() {
    let signatures = vec![
        signature(1, 2, 27, vec![9; 3], vec![8; 40]),
        signature(3, 4, 28, Vec::new(), vec![7]),
    ];
    let token = Token::Array(signatures.iter().map(TmSignature::encode_token).collect());
    let encoded = encode_single(&token);
    let schema = [ParamType::Array(Box::new(TmSignature::param_type()))];
    let decoded = decode(&schema, &encoded, &EncoderLimits::DEFAULT).unwrap();
    assert_eq!(decoded, vec![token]);
}

#[test]
fn dirty_bytes_padding_is_rejected() {
    let mut encoded = encode(&[Token::bytes(vec![0xff; 3])]);
    let last = encoded.len() - 1;
    encoded[last] = 1;
    assert_eq!(
        decode(&[ParamType::Bytes], &encoded, &EncoderLimits::DEFAULT),
        Err(AbiError::DirtyPadding { offset: 64 + 3 })
    );
}

proptest! {
    #[test]
    fn u64_words_round_trip(value in any::<u64>()) {
        let token = Token::uint(value);
        let word = token.as_word().unwrap();
        prop_assert!(word[..24].iter().all(|b| *b == 0));
        prop_assert_eq!(&word[24..], &value.to_be_bytes()[..]);
        prop_assert_eq!(word_to_u64(word).unwrap(), value);
    }

    #[test]
    fn u128_words_round_trip(value in any::<u128>()) {
        let encoded = encode(&[Token::uint(value)]);
        prop_assert_eq!(encoded.len(), 32);
        prop_assert_eq!(&encoded[16..], &value.to_be_bytes()[..]);
        let decoded = decode(&[ParamType::Uint(128)], &encoded, &EncoderLimits::DEFAULT).unwrap();
        prop_assert_eq!(word_to_u128(decoded[0].as_word().unwrap()).unwrap(), value);
    }

    #[test]
    fn narrow_widths_reject_overflow(bits in (1usize..16).prop_map(|n| n * 8), value in any::<u128>()) {
        let fits = value >> bits == 0;
        prop_assert_eq!(Token::uint_sized(value, bits).is_ok(), fits);
    }

    #[test]
    fn bytes_round_trip_with_padding(payload in proptest::collection::vec(any::<u8>(), 0..100)) {
        let encoded = encode(&[Token::bytes(payload.clone())]);
        prop_assert_eq!(encoded.len() % 32, 0);
        let decoded = decode(&[ParamType::Bytes], &encoded, &EncoderLimits::DEFAULT).unwrap();
        prop_assert_eq!(decoded, vec![Token::Bytes(payload)]);
    }
}
