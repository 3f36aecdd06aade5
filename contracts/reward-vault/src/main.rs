#![no_std]
#![no_main]

extern crate alloc;

mod claims;
mod error;

use alloc::string::{String, ToString};
use alloc::vec;
use casper_contract::{
    contract_api::{runtime, storage},
    unwrap_or_revert::UnwrapOrRevert,
};
use casper_types::{
    addressable_entity::{AddressableEntityHash, EntityEntryPoint as EntryPoint, EntryPoints},
    bytesrepr::{FromBytes, ToBytes},
    contracts::NamedKeys,
    runtime_args, CLType, CLTyped, CLValue, EntryPointAccess, EntryPointPayment,
    EntryPointType, Key, Parameter, URef, U256, U512,
};

use error::RewardVaultError;

// ============ Storage Keys ============

const LAUNCH_CONFIG: &str = "launch_config";
const FEE_FEED: &str = "fee_feed";
const SUPERADMIN: &str = "superadmin";
const SELF_KEY: &str = "self_key";
const VAULT_COUNT: &str = "vault_count";
const LOCKED: &str = "locked";
const INITIALIZED: &str = "initialized";

// Dictionaries
const VAULT_IDS: &str = "vault_ids";
const VAULT_INFO: &str = "vault_info";
const VAULT_LOCKED: &str = "vault_locked";
const ACCRUED: &str = "accrued";
const CLAIMED: &str = "claimed";

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

fn get_dictionary_uref(name: &str) -> URef {
    runtime::get_key(name)
        .unwrap_or_revert()
        .into_uref()
        .unwrap_or_revert()
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

/// Combined key for the (owner, LP token) vault lookup
fn owner_lp_key(owner: &Key, lp_token: &Key) -> String {
    let mut key = key_to_str(owner);
    key.push('_');
    key.push_str(&key_to_str(lp_token));
    key
}

/// Combined key for per-vault reward-token balances
fn reward_key(vault_id: u64, reward_token: &Key) -> String {
    let mut key = vault_id.to_string();
    key.push('_');
    key.push_str(&key_to_str(reward_token));
    key
}

fn require_unlocked() {
    let locked: bool = read_from_uref(LOCKED);
    if locked {
        runtime::revert(RewardVaultError::LockedReentrancy);
    }
}

fn lock() {
    write_to_uref(LOCKED, true);
}

fn unlock() {
    write_to_uref(LOCKED, false);
}

fn get_current_time() -> u64 {
    runtime::get_blocktime().into()
}

fn get_entity_hash(contract: &Key) -> AddressableEntityHash {
    match contract {
        Key::AddressableEntity(entity_addr) => AddressableEntityHash::new(entity_addr.value()),
        _ => runtime::revert(RewardVaultError::InvalidContractTarget),
    }
}

fn read_vault_info(vault_id: u64) -> Option<(Key, Key, u64)> {
    let info_uref = get_dictionary_uref(VAULT_INFO);
    storage::dictionary_get(info_uref, &vault_id.to_string()).unwrap_or_default()
}

fn read_accrued(vault_id: u64, reward_token: &Key) -> U256 {
    let accrued_uref = get_dictionary_uref(ACCRUED);
    storage::dictionary_get(accrued_uref, &reward_key(vault_id, reward_token))
        .unwrap_or_default()
        .unwrap_or_default()
}

fn read_claimed(vault_id: u64, reward_token: &Key) -> U256 {
    let claimed_uref = get_dictionary_uref(CLAIMED);
    storage::dictionary_get(claimed_uref, &reward_key(vault_id, reward_token))
        .unwrap_or_default()
        .unwrap_or_default()
}

// ============ External Contract Calls ============

fn call_config_claim_economics() -> ((u64, U512), (Option<Key>, Option<Key>)) {
    let config: Key = read_from_uref(LAUNCH_CONFIG);
    runtime::call_contract(
        get_entity_hash(&config).into(),
        "get_claim_economics",
        runtime_args! {},
    )
}

fn call_token_transfer(token: &Key, recipient: Key, amount: U256) {
    runtime::call_contract::<()>(
        get_entity_hash(token).into(),
        "transfer",
        runtime_args! {
            "recipient" => recipient,
            "amount" => amount
        },
    );
}

fn call_oracle_usd_value(oracle: &Key, token: Key, amount: U256) -> U512 {
    runtime::call_contract(
        get_entity_hash(oracle).into(),
        "usd_value",
        runtime_args! {
            "token" => token,
            "amount" => amount
        },
    )
}

// ============ Claim Core ============

/// Shared manual/auto claim path. The caller has already been verified as
/// the vault owner and (for auto) passed the oracle gate.
fn execute_claim(
    vault_id: u64,
    reward_token: &Key,
    amount: U256,
    owner: Key,
    fee_bps: u64,
    treasury: Option<Key>,
) -> (U256, U256) {
    let accrued = read_accrued(vault_id, reward_token);
    let claimed = read_claimed(vault_id, reward_token);

    let outcome = match claims::apply_claim(accrued, claimed, amount, fee_bps) {
        Ok(outcome) => outcome,
        Err(error) => {
            unlock();
            runtime::revert(error);
        }
    };

    let accrued_uref = get_dictionary_uref(ACCRUED);
    storage::dictionary_put(
        accrued_uref,
        &reward_key(vault_id, reward_token),
        outcome.accrued_after,
    );
    let claimed_uref = get_dictionary_uref(CLAIMED);
    storage::dictionary_put(
        claimed_uref,
        &reward_key(vault_id, reward_token),
        outcome.claimed_after,
    );

    call_token_transfer(reward_token, owner, outcome.net);

    if !outcome.fee.is_zero() {
        let treasury = match treasury {
            Some(treasury) => treasury,
            None => {
                unlock();
                runtime::revert(RewardVaultError::TreasuryNotSet);
            }
        };
        call_token_transfer(reward_token, treasury, outcome.fee);
    }

    (outcome.net, outcome.fee)
}

fn load_owned_vault(vault_id: u64) -> (Key, Key) {
    let (owner, lp_token, _) = match read_vault_info(vault_id) {
        Some(info) => info,
        None => {
            unlock();
            runtime::revert(RewardVaultError::VaultNotFound);
        }
    };
    let caller = Key::Account(runtime::get_caller());
    if caller != owner {
        unlock();
        runtime::revert(RewardVaultError::NotVaultOwner);
    }
    (owner, lp_token)
}

// ============ Entry Points ============

/// Initialize the vault registry (creates dictionaries, records own key)
#[no_mangle]
pub extern "C" fn init() {
    let initialized: bool = read_from_uref(INITIALIZED);
    if initialized {
        runtime::revert(RewardVaultError::AlreadyInitialized);
    }

    let contract_key: Key = runtime::get_named_arg("contract_key");
    write_to_uref(SELF_KEY, contract_key);

    for dictionary in [VAULT_IDS, VAULT_INFO, VAULT_LOCKED, ACCRUED, CLAIMED] {
        storage::new_dictionary(dictionary)
            .unwrap_or_revert_with(RewardVaultError::FailedToCreateDictionary);
    }

    write_to_uref(INITIALIZED, true);
}

/// Get the total number of vaults
#[no_mangle]
pub extern "C" fn vault_count() {
    let count: u64 = read_from_uref(VAULT_COUNT);
    runtime::ret(CLValue::from_t(count).unwrap_or_revert());
}

/// Look up a vault id by (owner, LP token)
#[no_mangle]
pub extern "C" fn get_vault() {
    let owner: Key = runtime::get_named_arg("owner");
    let lp_token: Key = runtime::get_named_arg("lp_token");

    let ids_uref = get_dictionary_uref(VAULT_IDS);
    let vault_id: Option<u64> =
        storage::dictionary_get(ids_uref, &owner_lp_key(&owner, &lp_token)).unwrap_or_default();

    runtime::ret(CLValue::from_t(vault_id).unwrap_or_revert());
}

/// Get a vault's (owner, lp_token, created_at)
#[no_mangle]
pub extern "C" fn get_vault_info() {
    let vault_id: u64 = runtime::get_named_arg("vault_id");
    runtime::ret(CLValue::from_t(read_vault_info(vault_id)).unwrap_or_revert());
}

/// Get the cumulative LP amount locked in a vault
#[no_mangle]
pub extern "C" fn total_locked() {
    let vault_id: u64 = runtime::get_named_arg("vault_id");

    let locked_uref = get_dictionary_uref(VAULT_LOCKED);
    let locked: U256 = storage::dictionary_get(locked_uref, &vault_id.to_string())
        .unwrap_or_default()
        .unwrap_or_default();

    runtime::ret(CLValue::from_t(locked).unwrap_or_revert());
}

/// Get the claimable balance of a reward token
#[no_mangle]
pub extern "C" fn accrued_rewards() {
    let vault_id: u64 = runtime::get_named_arg("vault_id");
    let reward_token: Key = runtime::get_named_arg("reward_token");

    runtime::ret(CLValue::from_t(read_accrued(vault_id, &reward_token)).unwrap_or_revert());
}

/// Get the cumulative claimed amount of a reward token
#[no_mangle]
pub extern "C" fn total_claimed() {
    let vault_id: u64 = runtime::get_named_arg("vault_id");
    let reward_token: Key = runtime::get_named_arg("reward_token");

    runtime::ret(CLValue::from_t(read_claimed(vault_id, &reward_token)).unwrap_or_revert());
}

/// Create the caller's vault for an LP token
///
/// One vault per (owner, LP token) pair; a second creation attempt is
/// rejected rather than aliased onto the existing vault.
#[no_mangle]
pub extern "C" fn create_vault() {
    let lp_token: Key = runtime::get_named_arg("lp_token");
    let owner = Key::Account(runtime::get_caller());

    let ids_uref = get_dictionary_uref(VAULT_IDS);
    let pair_key = owner_lp_key(&owner, &lp_token);
    let existing: Option<u64> = storage::dictionary_get(ids_uref, &pair_key).unwrap_or_default();
    if existing.is_some() {
        runtime::revert(RewardVaultError::VaultExists);
    }

    let vault_id: u64 = read_from_uref(VAULT_COUNT);
    let created_at = get_current_time();

    storage::dictionary_put(ids_uref, &pair_key, vault_id);

    let info_uref = get_dictionary_uref(VAULT_INFO);
    storage::dictionary_put(info_uref, &vault_id.to_string(), (owner, lp_token, created_at));

    let locked_uref = get_dictionary_uref(VAULT_LOCKED);
    storage::dictionary_put(locked_uref, &vault_id.to_string(), U256::zero());

    write_to_uref(VAULT_COUNT, vault_id + 1);

    runtime::ret(CLValue::from_t(vault_id).unwrap_or_revert());
}

/// Renounce LP into a vault
///
/// Deposits are permanent: no withdrawal entry point exists and
/// `total_locked` only ever grows.
#[no_mangle]
pub extern "C" fn deposit_lp() {
    require_unlocked();
    lock();

    let vault_id: u64 = runtime::get_named_arg("vault_id");
    let amount: U256 = runtime::get_named_arg("amount");

    let (owner, lp_token) = load_owned_vault(vault_id);

    if amount.is_zero() {
        unlock();
        runtime::revert(RewardVaultError::ZeroAmount);
    }

    // Pull the LP into the vault's own custody
    let self_key: Key = read_from_uref(SELF_KEY);
    runtime::call_contract::<()>(
        get_entity_hash(&lp_token).into(),
        "transfer_from",
        runtime_args! {
            "owner" => owner,
            "recipient" => self_key,
            "amount" => amount
        },
    );

    let locked_uref = get_dictionary_uref(VAULT_LOCKED);
    let locked: U256 = storage::dictionary_get(locked_uref, &vault_id.to_string())
        .unwrap_or_default()
        .unwrap_or_default();
    storage::dictionary_put(locked_uref, &vault_id.to_string(), locked + amount);

    unlock();
}

/// Credit trading-fee rewards to a vault (authorized fee feed only)
#[no_mangle]
pub extern "C" fn accrue_reward() {
    let caller = Key::Account(runtime::get_caller());
    let fee_feed: Key = read_from_uref(FEE_FEED);
    if caller != fee_feed {
        runtime::revert(RewardVaultError::Unauthorized);
    }

    let vault_id: u64 = runtime::get_named_arg("vault_id");
    let reward_token: Key = runtime::get_named_arg("reward_token");
    let amount: U256 = runtime::get_named_arg("amount");

    if read_vault_info(vault_id).is_none() {
        runtime::revert(RewardVaultError::VaultNotFound);
    }
    if amount.is_zero() {
        runtime::revert(RewardVaultError::ZeroAmount);
    }

    let accrued_uref = get_dictionary_uref(ACCRUED);
    let key = reward_key(vault_id, &reward_token);
    let accrued: U256 = storage::dictionary_get(accrued_uref, &key)
        .unwrap_or_default()
        .unwrap_or_default();
    storage::dictionary_put(accrued_uref, &key, accrued + amount);
}

/// Claim accrued rewards, any amount up to the balance
/// Returns (net_amount, fee)
#[no_mangle]
pub extern "C" fn manual_claim() {
    require_unlocked();
    lock();

    let vault_id: u64 = runtime::get_named_arg("vault_id");
    let reward_token: Key = runtime::get_named_arg("reward_token");
    let amount: U256 = runtime::get_named_arg("amount");

    let (owner, _) = load_owned_vault(vault_id);

    let ((fee_bps, _), (treasury, _)) = call_config_claim_economics();
    let (net, fee) = execute_claim(vault_id, &reward_token, amount, owner, fee_bps, treasury);

    unlock();
    runtime::ret(CLValue::from_t((net, fee)).unwrap_or_revert());
}

/// Claim accrued rewards through the auto-claim path
///
/// The claim must be worth at least the configured USD threshold, valued
/// through the configured price oracle. An oracle failure aborts the claim.
/// Returns (net_amount, fee)
#[no_mangle]
pub extern "C" fn auto_claim() {
    require_unlocked();
    lock();

    let vault_id: u64 = runtime::get_named_arg("vault_id");
    let reward_token: Key = runtime::get_named_arg("reward_token");
    let amount: U256 = runtime::get_named_arg("amount");

    let (owner, _) = load_owned_vault(vault_id);

    let ((fee_bps, threshold), (treasury, oracle)) = call_config_claim_economics();
    let oracle = match oracle {
        Some(oracle) => oracle,
        None => {
            unlock();
            runtime::revert(RewardVaultError::OracleNotSet);
        }
    };

    let usd_value = call_oracle_usd_value(&oracle, reward_token, amount);
    if !claims::meets_auto_claim_threshold(usd_value, threshold) {
        unlock();
        runtime::revert(RewardVaultError::BelowAutoClaimThreshold);
    }

    let (net, fee) = execute_claim(vault_id, &reward_token, amount, owner, fee_bps, treasury);

    unlock();
    runtime::ret(CLValue::from_t((net, fee)).unwrap_or_revert());
}

/// Set the authorized fee feed account (superadmin only)
#[no_mangle]
pub extern "C" fn set_fee_feed() {
    let caller = Key::Account(runtime::get_caller());
    let superadmin: Key = read_from_uref(SUPERADMIN);
    if caller != superadmin {
        runtime::revert(RewardVaultError::Unauthorized);
    }

    let feed: Key = runtime::get_named_arg("feed");
    write_to_uref(FEE_FEED, feed);
}

// ============ Contract Installation ============

fn get_entry_points() -> EntryPoints {
    let mut entry_points = EntryPoints::new();

    // Init
    entry_points.add_entry_point(EntryPoint::new(
        "init",
        vec![Parameter::new("contract_key", CLType::Key)],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    // Read-only entry points
    entry_points.add_entry_point(EntryPoint::new(
        "vault_count",
        vec![],
        CLType::U64,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "get_vault",
        vec![
            Parameter::new("owner", CLType::Key),
            Parameter::new("lp_token", CLType::Key),
        ],
        CLType::Option(alloc::boxed::Box::new(CLType::U64)),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "get_vault_info",
        vec![Parameter::new("vault_id", CLType::U64)],
        CLType::Option(alloc::boxed::Box::new(CLType::Tuple3([
            alloc::boxed::Box::new(CLType::Key),
            alloc::boxed::Box::new(CLType::Key),
            alloc::boxed::Box::new(CLType::U64),
        ]))),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "total_locked",
        vec![Parameter::new("vault_id", CLType::U64)],
        CLType::U256,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "accrued_rewards",
        vec![
            Parameter::new("vault_id", CLType::U64),
            Parameter::new("reward_token", CLType::Key),
        ],
        CLType::U256,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "total_claimed",
        vec![
            Parameter::new("vault_id", CLType::U64),
            Parameter::new("reward_token", CLType::Key),
        ],
        CLType::U256,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    // State-changing entry points
    entry_points.add_entry_point(EntryPoint::new(
        "create_vault",
        vec![Parameter::new("lp_token", CLType::Key)],
        CLType::U64,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "deposit_lp",
        vec![
            Parameter::new("vault_id", CLType::U64),
            Parameter::new("amount", CLType::U256),
        ],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "accrue_reward",
        vec![
            Parameter::new("vault_id", CLType::U64),
            Parameter::new("reward_token", CLType::Key),
            Parameter::new("amount", CLType::U256),
        ],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "manual_claim",
        vec![
            Parameter::new("vault_id", CLType::U64),
            Parameter::new("reward_token", CLType::Key),
            Parameter::new("amount", CLType::U256),
        ],
        CLType::Tuple2([
            alloc::boxed::Box::new(CLType::U256),
            alloc::boxed::Box::new(CLType::U256),
        ]),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "auto_claim",
        vec![
            Parameter::new("vault_id", CLType::U64),
            Parameter::new("reward_token", CLType::Key),
            Parameter::new("amount", CLType::U256),
        ],
        CLType::Tuple2([
            alloc::boxed::Box::new(CLType::U256),
            alloc::boxed::Box::new(CLType::U256),
        ]),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "set_fee_feed",
        vec![Parameter::new("feed", CLType::Key)],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points
}

#[no_mangle]
pub extern "C" fn call() {
    let launch_config: Key = runtime::get_named_arg("launch_config");
    let fee_feed: Key = runtime::get_named_arg("fee_feed");

    let deployer = Key::Account(runtime::get_caller());
    let mut named_keys = NamedKeys::new();

    named_keys.insert(
        LAUNCH_CONFIG.to_string(),
        storage::new_uref(launch_config).into(),
    );
    named_keys.insert(FEE_FEED.to_string(), storage::new_uref(fee_feed).into());
    named_keys.insert(SUPERADMIN.to_string(), storage::new_uref(deployer).into());
    // Placeholder until init records the installed contract's key
    named_keys.insert(SELF_KEY.to_string(), storage::new_uref(deployer).into());
    named_keys.insert(VAULT_COUNT.to_string(), storage::new_uref(0u64).into());
    named_keys.insert(LOCKED.to_string(), storage::new_uref(false).into());
    named_keys.insert(INITIALIZED.to_string(), storage::new_uref(false).into());

    let (contract_hash, _) = storage::new_contract(
        get_entry_points(),
        Some(named_keys),
        Some("vaultpad_reward_vault_package".to_string()),
        Some("vaultpad_reward_vault_access".to_string()),
        None,
    );

    runtime::put_key("vaultpad_reward_vault", contract_hash.into());

    // Initialize (creates dictionaries, records the vault's own key for
    // LP custody transfers)
    let self_key: Key = contract_hash.into();
    runtime::call_contract::<()>(
        contract_hash,
        "init",
        runtime_args! {
            "contract_key" => self_key
        },
    );
}
