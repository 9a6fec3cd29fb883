use rand::Rng;

/// Fabricate a transaction hash: `0x` followed by 64 lowercase hex digits.
pub fn fabricate_tx_hash<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}

/// True for strings shaped like [`fabricate_tx_hash`] output.
pub fn is_tx_hash(s: &str) -> bool {
    s.strip_prefix("0x")
        .map(|digits| digits.len() == 64 && digits.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}
