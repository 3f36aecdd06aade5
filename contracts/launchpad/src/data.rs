extern crate alloc;

use alloc::string::{String, ToString};
use casper_contract::{
    contract_api::{runtime, storage},
    unwrap_or_revert::UnwrapOrRevert,
};
use casper_types::{
    bytesrepr::{FromBytes, ToBytes},
    CLTyped, Key, URef,
};

// Named keys
pub const LAUNCH_CONFIG: &str = "launch_config";
pub const SMART_VAULT: &str = "smart_vault";
pub const TOKEN_COUNT: &str = "token_count";
pub const LOCKED: &str = "locked";
pub const INITIALIZED: &str = "initialized";

// Dictionaries
pub const SALES: &str = "sales";
pub const SALE_PARAMS: &str = "sale_params";
pub const TOKEN_META: &str = "token_meta";
pub const TOKEN_LINKS: &str = "token_links";
pub const TOKENS: &str = "tokens";
pub const CREATOR_TOKEN_COUNT: &str = "creator_token_count";
pub const CREATOR_TOKENS: &str = "creator_tokens";
pub const CREATOR_SYMBOLS: &str = "creator_symbols";
pub const FREE_USED: &str = "free_used";
pub const BALANCES: &str = "balances";

/// Read a value from a named key
pub fn read_named_key<T: CLTyped + FromBytes>(name: &str) -> T {
    let key = runtime::get_key(name).unwrap_or_revert();
    let uref = key.into_uref().unwrap_or_revert();
    storage::read(uref).unwrap_or_revert().unwrap_or_revert()
}

/// Write a value to a named key
pub fn write_named_key<T: CLTyped + ToBytes>(name: &str, value: T) {
    let key = runtime::get_key(name).unwrap_or_revert();
    let uref = key.into_uref().unwrap_or_revert();
    storage::write(uref, value);
}

/// Get the URef for a dictionary
pub fn get_dictionary_uref(name: &str) -> URef {
    runtime::get_key(name)
        .unwrap_or_revert()
        .into_uref()
        .unwrap_or_revert()
}

/// Convert a Key to a string for dictionary lookups
pub fn key_to_str(key: &Key) -> String {
    match key {
        Key::Account(account_hash) => hex_encode(account_hash.as_bytes()),
        Key::Hash(hash) => hex_encode(hash),
        _ => hex_encode(&key.to_bytes().unwrap_or_revert()),
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        result.push(hex_char(byte >> 4));
        result.push(hex_char(byte & 0x0f));
    }
    result
}

fn hex_char(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        10..=15 => (b'a' + nibble - 10) as char,
        _ => '0',
    }
}

/// Combined key for per-token holder balances (token + owner)
pub fn ledger_key(token: &Key, owner: &Key) -> String {
    let mut key = key_to_str(token);
    key.push('_');
    key.push_str(&key_to_str(owner));
    key
}

/// Combined key for the per-creator creation-order index (creator + position)
pub fn creator_index_key(creator: &Key, index: u64) -> String {
    let mut key = key_to_str(creator);
    key.push('_');
    key.push_str(&index.to_string());
    key
}

/// Combined key for the per-creator symbol uniqueness check
pub fn creator_symbol_key(creator: &Key, symbol: &str) -> String {
    let mut key = key_to_str(creator);
    key.push('_');
    key.push_str(symbol);
    key
}
