//! End-to-end behaviour of the NEF codec.

use neo_core::{Error, UInt160};
use neo_smart_contract::nef::{CallFlags, MethodToken, NefFile, MAX_SCRIPT_SIZE};
use neo_io::Serializable;
use proptest::prelude::*;

fn sample() -> NefFile {
    NefFile::create("neoc-test", None, vec![0x41, 0x9E]).unwrap()
}

fn gas_hash() -> UInt160 {
    UInt160::parse("0xd2a4cff31913016155e38e474a2c06d08be276cf").unwrap()
}

#[test]
fn minimal_file_is_80_bytes_and_round_trips() {
    let nef = sample();
    let bytes = nef.to_bytes();
    assert_eq!(bytes.len(), 80);

    let parsed = NefFile::from_bytes(&bytes).unwrap();
    assert_eq!(parsed, nef);
    assert_eq!(parsed.magic(), 0x3346_454E);
    assert_eq!(parsed.compiler(), "neoc-test");
    assert_eq!(parsed.source(), None);
    assert!(parsed.tokens().is_empty());
    assert_eq!(parsed.script(), &[0x41, 0x9E]);
    assert!(parsed.verify_checksum());
}

#[test]
fn wrong_magic_is_rejected() {
    let mut bytes = sample().to_bytes();
    bytes[0] ^= 0xFF;
    assert!(matches!(
        NefFile::from_bytes(&bytes),
        Err(Error::InvalidFormat(_))
    ));
}

#[test]
fn script_size_limit() {
    assert!(NefFile::create("c", None, vec![0x40; MAX_SCRIPT_SIZE]).is_ok());
    assert!(matches!(
        NefFile::create("c", None, vec![0x40; MAX_SCRIPT_SIZE + 1]),
        Err(Error::InvalidSize(_))
    ));
}

#[test]
fn oversized_script_prefix_is_rejected_on_decode() {
    let nef = NefFile::create("c", None, vec![0x40; 300]).unwrap();
    let mut bytes = nef.to_bytes();
    // var-int 0xFE + u32 512001 replaces the 0xFD + u16 prefix at offset 73
    let mut patched = bytes[..73].to_vec();
    patched.push(0xFE);
    patched.extend_from_slice(&(MAX_SCRIPT_SIZE as u32 + 1).to_le_bytes());
    patched.extend_from_slice(&bytes.split_off(76));
    assert!(matches!(
        NefFile::from_bytes(&patched),
        Err(Error::InvalidFormat(_))
    ));
}

#[test]
fn token_table_is_capped_at_128() {
    let mut nef = sample();
    for i in 0..128u16 {
        nef.add_method_token(gas_hash(), "transfer", i, true, CallFlags::ALL)
            .unwrap();
    }
    assert_eq!(nef.tokens().len(), 128);

    let err = nef
        .add_method_token(gas_hash(), "transfer", 0, true, CallFlags::ALL)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidSize(_)));
    assert_eq!(nef.tokens().len(), 128);
    assert!(nef.verify_checksum());

    let parsed = NefFile::from_bytes(&nef.to_bytes()).unwrap();
    assert_eq!(parsed.tokens().len(), 128);
    assert_eq!(parsed.tokens()[127].parameters_count(), 127);
}

#[test]
fn undefined_call_flags_leave_the_table_unchanged() {
    let mut nef = sample();
    nef.add_method_token(gas_hash(), "symbol", 0, true, CallFlags::READ_ONLY)
        .unwrap();
    let before = nef.clone();

    let err = nef
        .add_method_token(UInt160::zero(), "m", 0, false, CallFlags::from_bits_retain(0x10))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert_eq!(nef, before);
    assert_eq!(nef.tokens().len(), 1);
    assert!(nef.verify_checksum());

    assert!(MethodToken::new(UInt160::zero(), "m", 0, false, CallFlags::from_bits_retain(0xF0)).is_err());

    let parsed = NefFile::from_bytes(&nef.to_bytes()).unwrap();
    assert_eq!(parsed, nef);
}

#[test]
fn token_order_is_preserved() {
    let mut nef = sample();
    let names = ["balanceOf", "transfer", "symbol"];
    for name in names {
        nef.add_method_token(gas_hash(), name, 1, true, CallFlags::READ_ONLY)
            .unwrap();
    }
    let parsed = NefFile::from_bytes(&nef.to_bytes()).unwrap();
    let parsed_names: Vec<&str> = parsed.tokens().iter().map(MethodToken::method).collect();
    assert_eq!(parsed_names, names);
    assert_eq!(parsed.tokens()[0].contract_hash(), &gas_hash());
    assert_eq!(parsed.tokens()[0].call_flags(), CallFlags::READ_ONLY);
}

#[test]
fn checksum_is_deterministic() {
    let a = NefFile::create("neon", Some("src"), vec![1, 2, 3]).unwrap();
    let b = NefFile::create("neon", Some("src"), vec![1, 2, 3]).unwrap();
    assert_eq!(a.checksum(), b.checksum());
    assert_eq!(a.to_bytes(), b.to_bytes());

    let c = NefFile::create("neon", Some("src"), vec![1, 2, 4]).unwrap();
    assert_ne!(a.checksum(), c.checksum());
}

#[test]
fn flipped_script_byte_fails_checksum_but_parses() {
    let mut bytes = sample().to_bytes();
    bytes[74] ^= 0x01;
    let parsed = NefFile::from_bytes(&bytes).unwrap();
    assert!(!parsed.verify_checksum());
}

#[test]
fn every_truncation_is_rejected() {
    let mut nef = sample();
    nef.add_method_token(gas_hash(), "transfer", 4, true, CallFlags::ALL)
        .unwrap();
    let bytes = nef.to_bytes();
    for len in 0..bytes.len() {
        assert!(
            matches!(NefFile::from_bytes(&bytes[..len]), Err(Error::InvalidFormat(_))),
            "prefix of {len} bytes was accepted"
        );
    }
}

#[test]
fn undefined_call_flag_bits_are_rejected() {
    let mut nef = sample();
    nef.add_method_token(gas_hash(), "a", 0, false, CallFlags::NONE)
        .unwrap();
    let mut bytes = nef.to_bytes();
    // token starts at 72; flags are its last byte
    let flags_offset = 72 + 20 + 1 + 1 + 2 + 1;
    assert_eq!(bytes[flags_offset], 0);
    bytes[flags_offset] = 0x10;
    assert!(matches!(
        NefFile::from_bytes(&bytes),
        Err(Error::InvalidFormat(_))
    ));
}

#[test]
fn save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contract.nef");

    let mut nef = NefFile::create("neon", Some("https://github.com/neo"), vec![0x11, 0x40]).unwrap();
    nef.add_method_token(gas_hash(), "transfer", 4, true, CallFlags::ALL)
        .unwrap();
    nef.save(&path).unwrap();

    let loaded = NefFile::load(&path).unwrap();
    assert_eq!(loaded, nef);
    assert!(loaded.verify_checksum());
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        NefFile::load(dir.path().join("missing.nef")),
        Err(Error::Io(_))
    ));
}

fn arb_flags() -> impl Strategy<Value = CallFlags> {
    (0u8..=0x0F).prop_map(|bits| CallFlags::from_bits(bits).unwrap())
}

fn arb_token() -> impl Strategy<Value = MethodToken> {
    (
        any::<[u8; 20]>(),
        "[a-zA-Z_]{0,31}",
        any::<u16>(),
        any::<bool>(),
        arb_flags(),
    )
        .prop_map(|(hash, method, params, ret, flags)| {
            MethodToken::new(UInt160::new(hash), method, params, ret, flags).unwrap()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn round_trip(
        compiler in "[a-z0-9.\\-]{0,63}",
        source in "[ -~]{0,255}",
        tokens in prop::collection::vec(arb_token(), 0..8),
        script in prop::collection::vec(any::<u8>(), 1..2048),
    ) {
        let source = if source.is_empty() { None } else { Some(source.as_str()) };
        let mut nef = NefFile::create(compiler, source, script).unwrap();
        for token in tokens {
            nef.add_token(token).unwrap();
        }
        let bytes = nef.to_bytes();
        prop_assert_eq!(bytes.len(), nef.size());
        let parsed = NefFile::from_bytes(&bytes).unwrap();
        prop_assert!(parsed.verify_checksum());
        prop_assert_eq!(parsed, nef);
    }

    #[test]
    fn arbitrary_bytes_never_panic(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = NefFile::from_bytes(&data);
    }
}
