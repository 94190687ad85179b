#![allow(dead_code)]

use std::path::PathBuf;

use certinspect::cert::Certificate;

pub const LEAF_HASH: &str = "0cb55d2e";
pub const LEAF_FINGERPRINT: &str =
    "SHA1 Fingerprint=40:17:6C:4A:A3:ED:A1:CC:FE:85:46:E6:20:FB:45:CC:3C:DF:60:60";
pub const CA_HASH: &str = "488ddb50";
pub const CA_FINGERPRINT: &str =
    "SHA1 Fingerprint=E6:EB:82:89:3A:83:13:7D:F4:6F:9D:8F:7E:CA:BC:45:44:84:B0:E8";

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn fixture(name: &str) -> Vec<u8> {
    std::fs::read(fixture_path(name))
        .unwrap_or_else(|err| panic!("failed to read fixture {name}: {err}"))
}

pub fn load(name: &str) -> Certificate {
    Certificate::from_bytes(&fixture(name))
        .unwrap_or_else(|err| panic!("failed to decode fixture {name}: {err}"))
}
