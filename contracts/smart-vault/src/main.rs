#![no_std]
#![no_main]

extern crate alloc;

mod error;

use alloc::string::{String, ToString};
use alloc::vec;
use casper_contract::{
    contract_api::{runtime, storage},
    unwrap_or_revert::UnwrapOrRevert,
};
use casper_types::{
    addressable_entity::{EntityEntryPoint as EntryPoint, EntryPoints},
    bytesrepr::{FromBytes, ToBytes},
    contracts::NamedKeys,
    runtime_args, CLType, CLTyped, CLValue, EntryPointAccess, EntryPointPayment,
    EntryPointType, Key, Parameter,
};

use error::SmartVaultError;

// ============ Storage Keys ============

const NFT_NAME: &str = "nft_name";
const NFT_SYMBOL: &str = "nft_symbol";
const TOKEN_URI: &str = "token_uri";
const MINTED_COUNT: &str = "minted_count";
const MINTED: &str = "minted";
const INITIALIZED: &str = "initialized";

const DEFAULT_NFT_NAME: &str = "Vaultpad Smart Vault";
const DEFAULT_NFT_SYMBOL: &str = "SVAULT";

// ============ Helper Functions ============

fn read_from_uref<T: CLTyped + FromBytes>(name: &str) -> T {
    let key = runtime::get_key(name).unwrap_or_revert();
    let uref = key.into_uref().unwrap_or_revert();
    storage::read(uref).unwrap_or_revert().unwrap_or_revert()
}

fn write_to_uref<T: CLTyped + ToBytes>(name: &str, value: T) {
    let key = runtime::get_key(name).unwrap_or_revert();
    let uref = key.into_uref().unwrap_or_revert();
    storage::write(uref, value);
}

fn key_to_str(key: &Key) -> String {
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

fn read_minted(wallet: &Key) -> bool {
    let dict_uref = runtime::get_key(MINTED)
        .unwrap_or_revert()
        .into_uref()
        .unwrap_or_revert();
    storage::dictionary_get(dict_uref, &key_to_str(wallet))
        .unwrap_or_default()
        .unwrap_or_default()
}

// ============ Entry Points ============

/// Initialize the credential (creates the minted dictionary)
#[no_mangle]
pub extern "C" fn init() {
    let initialized: bool = read_from_uref(INITIALIZED);
    if initialized {
        runtime::revert(SmartVaultError::AlreadyInitialized);
    }

    storage::new_dictionary(MINTED)
        .unwrap_or_revert_with(SmartVaultError::FailedToCreateDictionary);

    write_to_uref(INITIALIZED, true);
}

/// Get the credential collection name
#[no_mangle]
pub extern "C" fn name() {
    let name: String = read_from_uref(NFT_NAME);
    runtime::ret(CLValue::from_t(name).unwrap_or_revert());
}

/// Get the credential collection symbol
#[no_mangle]
pub extern "C" fn symbol() {
    let symbol: String = read_from_uref(NFT_SYMBOL);
    runtime::ret(CLValue::from_t(symbol).unwrap_or_revert());
}

/// Get the shared metadata URI
#[no_mangle]
pub extern "C" fn token_uri() {
    let uri: Option<String> = read_from_uref(TOKEN_URI);
    runtime::ret(CLValue::from_t(uri).unwrap_or_revert());
}

/// Get the number of wallets that have minted
#[no_mangle]
pub extern "C" fn minted_count() {
    let count: u64 = read_from_uref(MINTED_COUNT);
    runtime::ret(CLValue::from_t(count).unwrap_or_revert());
}

/// Mint the caller's Smart Vault credential
///
/// One per wallet, forever: there is no transfer or burn surface, so the
/// credential is soulbound by construction.
#[no_mangle]
pub extern "C" fn mint() {
    let caller = Key::Account(runtime::get_caller());

    if read_minted(&caller) {
        runtime::revert(SmartVaultError::AlreadyMinted);
    }

    let dict_uref = runtime::get_key(MINTED)
        .unwrap_or_revert()
        .into_uref()
        .unwrap_or_revert();
    storage::dictionary_put(dict_uref, &key_to_str(&caller), true);

    let count: u64 = read_from_uref(MINTED_COUNT);
    write_to_uref(MINTED_COUNT, count + 1);
}

/// Whether a wallet holds the credential
#[no_mangle]
pub extern "C" fn has_minted() {
    let wallet: Key = runtime::get_named_arg("wallet");
    runtime::ret(CLValue::from_t(read_minted(&wallet)).unwrap_or_revert());
}

// ============ Contract Installation ============

fn get_entry_points() -> EntryPoints {
    let mut entry_points = EntryPoints::new();

    // Init
    entry_points.add_entry_point(EntryPoint::new(
        "init",
        vec![],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    // Read-only entry points
    entry_points.add_entry_point(EntryPoint::new(
        "name",
        vec![],
        CLType::String,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "symbol",
        vec![],
        CLType::String,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "token_uri",
        vec![],
        CLType::Option(alloc::boxed::Box::new(CLType::String)),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "minted_count",
        vec![],
        CLType::U64,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "has_minted",
        vec![Parameter::new("wallet", CLType::Key)],
        CLType::Bool,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    // State-changing entry points
    entry_points.add_entry_point(EntryPoint::new(
        "mint",
        vec![],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points
}

#[no_mangle]
pub extern "C" fn call() {
    let nft_name: String = runtime::get_named_arg::<Option<String>>("nft_name")
        .unwrap_or_else(|| DEFAULT_NFT_NAME.to_string());
    let nft_symbol: String = runtime::get_named_arg::<Option<String>>("nft_symbol")
        .unwrap_or_else(|| DEFAULT_NFT_SYMBOL.to_string());
    let token_uri: Option<String> = runtime::get_named_arg("token_uri");

    let mut named_keys = NamedKeys::new();

    named_keys.insert(NFT_NAME.to_string(), storage::new_uref(nft_name).into());
    named_keys.insert(NFT_SYMBOL.to_string(), storage::new_uref(nft_symbol).into());
    named_keys.insert(TOKEN_URI.to_string(), storage::new_uref(token_uri).into());
    named_keys.insert(MINTED_COUNT.to_string(), storage::new_uref(0u64).into());
    named_keys.insert(INITIALIZED.to_string(), storage::new_uref(false).into());

    let (contract_hash, _) = storage::new_contract(
        get_entry_points(),
        Some(named_keys),
        Some("vaultpad_smart_vault_package".to_string()),
        Some("vaultpad_smart_vault_access".to_string()),
        None,
    );

    runtime::put_key("vaultpad_smart_vault", contract_hash.into());

    // Initialize (creates the minted dictionary)
    runtime::call_contract::<()>(contract_hash, "init", runtime_args! {});
}
