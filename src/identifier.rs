pub const FALLBACK_CONTRACT_NAME: &str = "Contract";

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '$' || c == '_'
}

fn is_identifier_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '$' || c == '_'
}

/// Matches `^[A-Za-z$_][A-Za-z0-9$_]*$`.
pub fn is_valid_solidity_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => is_identifier_start(first) && chars.all(is_identifier_part),
        None => false,
    }
}

/// Turns a display name such as `"My Cool Token #1"` into `MyCoolToken1`.
pub fn get_valid_contract_name(name: &str) -> String {
    let sanitized: String = name.chars().filter(|c| is_identifier_part(*c)).collect();
    let trimmed = sanitized.trim_start_matches(|c: char| !is_identifier_start(c));

    if is_valid_solidity_identifier(trimmed) {
        trimmed.to_string()
    } else {
        FALLBACK_CONTRACT_NAME.to_string()
    }
}
