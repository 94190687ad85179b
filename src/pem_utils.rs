/// Label of an X.509 certificate PEM block.
pub const CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// Labels OpenSSL accepts for a single certificate.
pub const CERTIFICATE_LABELS: &[&str] = &[CERTIFICATE_LABEL, "X509 CERTIFICATE"];

/// Convert DER‑encoded data into a PEM‑encoded string with the provided label.
pub fn der_to_pem(der: &[u8], label: &str) -> String {
    let pem = pem::Pem::new(label, der);
    pem::encode_config(&pem, pem::EncodeConfig::new())
}

/// Returns the first PEM block in `source` whose label is one of `labels`.
///
/// Text before, between and after the blocks is ignored, so annotated output such
/// as `openssl pkcs7 -print_certs` is accepted.
pub fn find_block(source: &[u8], labels: &[&str]) -> Option<pem::Pem> {
    pem::parse_many(source)
        .ok()?
        .into_iter()
        .find(|block| labels.contains(&block.tag()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_matching_block() {
        let text = format!(
            "subject=CN = first\n{}\n{}",
            der_to_pem(&[1, 2, 3], "PRIVATE KEY"),
            der_to_pem(&[4, 5, 6], CERTIFICATE_LABEL)
        );

        let block = find_block(text.as_bytes(), CERTIFICATE_LABELS).unwrap();
        assert_eq!(block.tag(), CERTIFICATE_LABEL);
        assert_eq!(block.contents(), &[4, 5, 6]);
    }

    #[test]
    fn no_block_in_binary_input() {
        assert!(find_block(&[0x30, 0x82, 0x01, 0x00], CERTIFICATE_LABELS).is_none());
        assert!(find_block(b"", CERTIFICATE_LABELS).is_none());
    }
}
