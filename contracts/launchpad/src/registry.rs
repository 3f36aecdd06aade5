use casper_types::Key;

use crate::error::LaunchpadError;

const MAX_NAME_LEN: usize = 50;
const MAX_SYMBOL_LEN: usize = 10;

// Distinguishes derived token keys from real contract hashes
const TOKEN_KEY_TAG: &[u8; 8] = b"vp:token";

pub fn validate_name(name: &str) -> Result<(), LaunchpadError> {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(LaunchpadError::InvalidName);
    }
    Ok(())
}

pub fn validate_symbol(symbol: &str) -> Result<(), LaunchpadError> {
    if symbol.is_empty() || symbol.len() > MAX_SYMBOL_LEN {
        return Err(LaunchpadError::InvalidSymbol);
    }
    Ok(())
}

/// Derive the opaque token identifier for a launch id
///
/// Launch ids are allocated from an append-only counter, so distinct
/// launches always map to distinct keys.
pub fn token_key_from_id(launch_id: u64) -> Key {
    let mut bytes = [0u8; 32];
    bytes[..TOKEN_KEY_TAG.len()].copy_from_slice(TOKEN_KEY_TAG);
    bytes[24..].copy_from_slice(&launch_id.to_le_bytes());
    Key::Hash(bytes)
}

/// Whether a wallet's one-time free launch is still available
pub fn free_launch_available(has_minted: bool, already_used: bool) -> bool {
    has_minted && !already_used
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_bounds() {
        assert!(validate_name("Doge Classic").is_ok());
        assert_eq!(validate_name(""), Err(LaunchpadError::InvalidName));

        let too_long = "x".repeat(51);
        assert_eq!(validate_name(&too_long), Err(LaunchpadError::InvalidName));
        assert!(validate_name(&"x".repeat(50)).is_ok());
    }

    #[test]
    fn test_symbol_bounds() {
        assert!(validate_symbol("DOGE").is_ok());
        assert_eq!(validate_symbol(""), Err(LaunchpadError::InvalidSymbol));
        assert_eq!(
            validate_symbol("TOOLONGSYMBOL"),
            Err(LaunchpadError::InvalidSymbol)
        );
    }

    #[test]
    fn test_token_keys_are_distinct() {
        let a = token_key_from_id(0);
        let b = token_key_from_id(1);
        let c = token_key_from_id(u64::MAX);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
        assert_eq!(token_key_from_id(1), b);
    }

    #[test]
    fn test_free_launch_consumption() {
        // Never minted: always pays the fee
        assert!(!free_launch_available(false, false));
        // Minted, unused: one free launch
        assert!(free_launch_available(true, false));
        // Minted, used: back to paying
        assert!(!free_launch_available(true, true));
    }
}
