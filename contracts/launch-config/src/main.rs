#![no_std]
#![no_main]

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::ToString;
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
    EntryPointType, Key, Parameter, U512,
};

// ============ Storage Keys ============

const SUPERADMIN: &str = "superadmin";
const GRADUATION_TARGET: &str = "graduation_target";
const CREATOR_REWARD: &str = "creator_reward";
const PROTOCOL_REWARD: &str = "protocol_reward";
const DEPLOYMENT_FEE: &str = "deployment_fee";
const PROTOCOL_FEE_BPS: &str = "protocol_fee_bps";
const AUTO_CLAIM_THRESHOLD_USD: &str = "auto_claim_threshold_usd";
const TOKENS_FOR_SALE_PCT: &str = "tokens_for_sale_pct";
const TREASURY: &str = "treasury";
const DEX_ROUTER: &str = "dex_router";
const PRICE_ORACLE: &str = "price_oracle";
const INITIALIZED: &str = "initialized";

// ============ Error Codes ============

const ERROR_UNAUTHORIZED: u16 = 1;
const ERROR_ALREADY_INITIALIZED: u16 = 2;
const ERROR_INVALID_FEE: u16 = 3;
const ERROR_INVALID_TARGET: u16 = 4;
const ERROR_INVALID_PERCENTAGE: u16 = 5;

// Maximum claim fee: 10% (1000 basis points)
const MAX_PROTOCOL_FEE_BPS: u64 = 1000;

// Defaults, denominated in motes (1 CSPR = 10^9 motes)
const DEFAULT_GRADUATION_TARGET: u64 = 69_420_000_000_000; // 69,420 CSPR
const DEFAULT_CREATOR_REWARD: u64 = 250_000_000_000; // 250 CSPR
const DEFAULT_PROTOCOL_REWARD: u64 = 100_000_000_000; // 100 CSPR
const DEFAULT_DEPLOYMENT_FEE: u64 = 100_000_000_000; // 100 CSPR
const DEFAULT_PROTOCOL_FEE_BPS: u64 = 30; // 0.3%
const DEFAULT_AUTO_CLAIM_THRESHOLD_USD: u64 = 25_000; // $250.00 in cents
const DEFAULT_TOKENS_FOR_SALE_PCT: u8 = 80; // remainder seeds DEX liquidity

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

fn require_superadmin() {
    let caller = Key::Account(runtime::get_caller());
    let superadmin: Key = read_from_uref(SUPERADMIN);
    if caller != superadmin {
        runtime::revert(casper_types::ApiError::User(ERROR_UNAUTHORIZED));
    }
}

// ============ Entry Points ============

/// Initialize the config contract (called automatically after deployment)
#[no_mangle]
pub extern "C" fn init() {
    let initialized: bool = read_from_uref(INITIALIZED);
    if initialized {
        runtime::revert(casper_types::ApiError::User(ERROR_ALREADY_INITIALIZED));
    }
    write_to_uref(INITIALIZED, true);
}

/// Get the superadmin address
#[no_mangle]
pub extern "C" fn superadmin() {
    let admin: Key = read_from_uref(SUPERADMIN);
    runtime::ret(CLValue::from_t(admin).unwrap_or_revert());
}

/// Get the graduation target (in motes)
#[no_mangle]
pub extern "C" fn graduation_target() {
    let target: U512 = read_from_uref(GRADUATION_TARGET);
    runtime::ret(CLValue::from_t(target).unwrap_or_revert());
}

/// Get the creator reward paid after graduation (in motes)
#[no_mangle]
pub extern "C" fn creator_reward() {
    let reward: U512 = read_from_uref(CREATOR_REWARD);
    runtime::ret(CLValue::from_t(reward).unwrap_or_revert());
}

/// Get the protocol reward paid when the creator reward is forfeited (in motes)
#[no_mangle]
pub extern "C" fn protocol_reward() {
    let reward: U512 = read_from_uref(PROTOCOL_REWARD);
    runtime::ret(CLValue::from_t(reward).unwrap_or_revert());
}

/// Get the token deployment fee (in motes)
#[no_mangle]
pub extern "C" fn deployment_fee() {
    let fee: U512 = read_from_uref(DEPLOYMENT_FEE);
    runtime::ret(CLValue::from_t(fee).unwrap_or_revert());
}

/// Get the reward claim fee in basis points
#[no_mangle]
pub extern "C" fn protocol_fee_bps() {
    let fee: u64 = read_from_uref(PROTOCOL_FEE_BPS);
    runtime::ret(CLValue::from_t(fee).unwrap_or_revert());
}

/// Get the auto-claim threshold (in USD cents)
#[no_mangle]
pub extern "C" fn auto_claim_threshold_usd() {
    let threshold: U512 = read_from_uref(AUTO_CLAIM_THRESHOLD_USD);
    runtime::ret(CLValue::from_t(threshold).unwrap_or_revert());
}

/// Get the percentage of supply sold on the curve
#[no_mangle]
pub extern "C" fn tokens_for_sale_pct() {
    let pct: u8 = read_from_uref(TOKENS_FOR_SALE_PCT);
    runtime::ret(CLValue::from_t(pct).unwrap_or_revert());
}

/// Get the protocol treasury address
#[no_mangle]
pub extern "C" fn treasury() {
    let treasury: Option<Key> = read_from_uref(TREASURY);
    runtime::ret(CLValue::from_t(treasury).unwrap_or_revert());
}

/// Get the DEX router address used for graduation liquidity
#[no_mangle]
pub extern "C" fn dex_router() {
    let router: Option<Key> = read_from_uref(DEX_ROUTER);
    runtime::ret(CLValue::from_t(router).unwrap_or_revert());
}

/// Get the price oracle address used for auto-claim valuation
#[no_mangle]
pub extern "C" fn price_oracle() {
    let oracle: Option<Key> = read_from_uref(PRICE_ORACLE);
    runtime::ret(CLValue::from_t(oracle).unwrap_or_revert());
}

/// Get the values consumed at sale registration
/// Returns (deployment_fee, graduation_target, tokens_for_sale_pct)
#[no_mangle]
pub extern "C" fn get_launch_economics() {
    let fee: U512 = read_from_uref(DEPLOYMENT_FEE);
    let target: U512 = read_from_uref(GRADUATION_TARGET);
    let pct: u8 = read_from_uref(TOKENS_FOR_SALE_PCT);

    runtime::ret(CLValue::from_t((fee, target, pct)).unwrap_or_revert());
}

/// Get the values consumed at creator reward claim
/// Returns (creator_reward, protocol_reward, treasury)
#[no_mangle]
pub extern "C" fn get_reward_economics() {
    let creator_reward: U512 = read_from_uref(CREATOR_REWARD);
    let protocol_reward: U512 = read_from_uref(PROTOCOL_REWARD);
    let treasury: Option<Key> = read_from_uref(TREASURY);

    runtime::ret(CLValue::from_t((creator_reward, protocol_reward, treasury)).unwrap_or_revert());
}

/// Get the values consumed at vault reward claim
/// Returns ((protocol_fee_bps, auto_claim_threshold_usd), (treasury, price_oracle))
#[no_mangle]
pub extern "C" fn get_claim_economics() {
    let fee_bps: u64 = read_from_uref(PROTOCOL_FEE_BPS);
    let threshold: U512 = read_from_uref(AUTO_CLAIM_THRESHOLD_USD);
    let treasury: Option<Key> = read_from_uref(TREASURY);
    let oracle: Option<Key> = read_from_uref(PRICE_ORACLE);

    runtime::ret(CLValue::from_t(((fee_bps, threshold), (treasury, oracle))).unwrap_or_revert());
}

/// Set the graduation target (superadmin only)
#[no_mangle]
pub extern "C" fn set_graduation_target() {
    require_superadmin();

    let target: U512 = runtime::get_named_arg("target");
    if target.is_zero() {
        runtime::revert(casper_types::ApiError::User(ERROR_INVALID_TARGET));
    }

    write_to_uref(GRADUATION_TARGET, target);
}

/// Set the creator reward (superadmin only)
#[no_mangle]
pub extern "C" fn set_creator_reward() {
    require_superadmin();

    let reward: U512 = runtime::get_named_arg("reward");
    write_to_uref(CREATOR_REWARD, reward);
}

/// Set the protocol reward (superadmin only)
#[no_mangle]
pub extern "C" fn set_protocol_reward() {
    require_superadmin();

    let reward: U512 = runtime::get_named_arg("reward");
    write_to_uref(PROTOCOL_REWARD, reward);
}

/// Set the deployment fee (superadmin only)
#[no_mangle]
pub extern "C" fn set_deployment_fee() {
    require_superadmin();

    let fee: U512 = runtime::get_named_arg("fee");
    write_to_uref(DEPLOYMENT_FEE, fee);
}

/// Set the claim fee in basis points (superadmin only)
#[no_mangle]
pub extern "C" fn set_protocol_fee() {
    require_superadmin();

    let fee_bps: u64 = runtime::get_named_arg("fee_bps");
    if fee_bps > MAX_PROTOCOL_FEE_BPS {
        runtime::revert(casper_types::ApiError::User(ERROR_INVALID_FEE));
    }

    write_to_uref(PROTOCOL_FEE_BPS, fee_bps);
}

/// Set the auto-claim threshold in USD cents (superadmin only)
#[no_mangle]
pub extern "C" fn set_auto_claim_threshold() {
    require_superadmin();

    let threshold: U512 = runtime::get_named_arg("threshold");
    write_to_uref(AUTO_CLAIM_THRESHOLD_USD, threshold);
}

/// Set the percentage of supply sold on the curve (superadmin only)
/// Applies to sales registered after the change; live sales keep their snapshot
#[no_mangle]
pub extern "C" fn set_tokens_for_sale_pct() {
    require_superadmin();

    let pct: u8 = runtime::get_named_arg("pct");
    if pct == 0 || pct > 99 {
        runtime::revert(casper_types::ApiError::User(ERROR_INVALID_PERCENTAGE));
    }

    write_to_uref(TOKENS_FOR_SALE_PCT, pct);
}

/// Set the protocol treasury address (superadmin only)
#[no_mangle]
pub extern "C" fn set_treasury() {
    require_superadmin();

    let treasury: Key = runtime::get_named_arg("treasury");
    write_to_uref(TREASURY, Some(treasury));
}

/// Set the DEX router address (superadmin only)
#[no_mangle]
pub extern "C" fn set_dex_router() {
    require_superadmin();

    let router: Key = runtime::get_named_arg("router");
    write_to_uref(DEX_ROUTER, Some(router));
}

/// Set the price oracle address (superadmin only)
#[no_mangle]
pub extern "C" fn set_price_oracle() {
    require_superadmin();

    let oracle: Key = runtime::get_named_arg("oracle");
    write_to_uref(PRICE_ORACLE, Some(oracle));
}

/// Transfer superadmin role to a new account (superadmin only)
#[no_mangle]
pub extern "C" fn transfer_superadmin() {
    require_superadmin();

    let new_admin: Key = runtime::get_named_arg("new_admin");
    write_to_uref(SUPERADMIN, new_admin);
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
        "superadmin",
        vec![],
        CLType::Key,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "graduation_target",
        vec![],
        CLType::U512,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "creator_reward",
        vec![],
        CLType::U512,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "protocol_reward",
        vec![],
        CLType::U512,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "deployment_fee",
        vec![],
        CLType::U512,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "protocol_fee_bps",
        vec![],
        CLType::U64,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "auto_claim_threshold_usd",
        vec![],
        CLType::U512,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "tokens_for_sale_pct",
        vec![],
        CLType::U8,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "treasury",
        vec![],
        CLType::Option(Box::new(CLType::Key)),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "dex_router",
        vec![],
        CLType::Option(Box::new(CLType::Key)),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "price_oracle",
        vec![],
        CLType::Option(Box::new(CLType::Key)),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "get_launch_economics",
        vec![],
        CLType::Tuple3([
            Box::new(CLType::U512),
            Box::new(CLType::U512),
            Box::new(CLType::U8),
        ]),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "get_reward_economics",
        vec![],
        CLType::Tuple3([
            Box::new(CLType::U512),
            Box::new(CLType::U512),
            Box::new(CLType::Option(Box::new(CLType::Key))),
        ]),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "get_claim_economics",
        vec![],
        CLType::Tuple2([
            Box::new(CLType::Tuple2([
                Box::new(CLType::U64),
                Box::new(CLType::U512),
            ])),
            Box::new(CLType::Tuple2([
                Box::new(CLType::Option(Box::new(CLType::Key))),
                Box::new(CLType::Option(Box::new(CLType::Key))),
            ])),
        ]),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    // Admin entry points
    entry_points.add_entry_point(EntryPoint::new(
        "set_graduation_target",
        vec![Parameter::new("target", CLType::U512)],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "set_creator_reward",
        vec![Parameter::new("reward", CLType::U512)],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "set_protocol_reward",
        vec![Parameter::new("reward", CLType::U512)],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "set_deployment_fee",
        vec![Parameter::new("fee", CLType::U512)],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "set_protocol_fee",
        vec![Parameter::new("fee_bps", CLType::U64)],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "set_auto_claim_threshold",
        vec![Parameter::new("threshold", CLType::U512)],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "set_tokens_for_sale_pct",
        vec![Parameter::new("pct", CLType::U8)],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "set_treasury",
        vec![Parameter::new("treasury", CLType::Key)],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "set_dex_router",
        vec![Parameter::new("router", CLType::Key)],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "set_price_oracle",
        vec![Parameter::new("oracle", CLType::Key)],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "transfer_superadmin",
        vec![Parameter::new("new_admin", CLType::Key)],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points
}

#[no_mangle]
pub extern "C" fn call() {
    // Get optional deployment arguments with defaults
    let graduation_target: U512 = runtime::get_named_arg::<Option<U512>>("graduation_target")
        .unwrap_or_else(|| U512::from(DEFAULT_GRADUATION_TARGET));

    let creator_reward: U512 = runtime::get_named_arg::<Option<U512>>("creator_reward")
        .unwrap_or_else(|| U512::from(DEFAULT_CREATOR_REWARD));

    let protocol_reward: U512 = runtime::get_named_arg::<Option<U512>>("protocol_reward")
        .unwrap_or_else(|| U512::from(DEFAULT_PROTOCOL_REWARD));

    let deployment_fee: U512 = runtime::get_named_arg::<Option<U512>>("deployment_fee")
        .unwrap_or_else(|| U512::from(DEFAULT_DEPLOYMENT_FEE));

    let protocol_fee_bps: u64 =
        runtime::get_named_arg::<Option<u64>>("protocol_fee_bps").unwrap_or(DEFAULT_PROTOCOL_FEE_BPS);

    let auto_claim_threshold: U512 = runtime::get_named_arg::<Option<U512>>("auto_claim_threshold_usd")
        .unwrap_or_else(|| U512::from(DEFAULT_AUTO_CLAIM_THRESHOLD_USD));

    let tokens_for_sale_pct: u8 = runtime::get_named_arg::<Option<u8>>("tokens_for_sale_pct")
        .unwrap_or(DEFAULT_TOKENS_FOR_SALE_PCT);

    if protocol_fee_bps > MAX_PROTOCOL_FEE_BPS {
        runtime::revert(casper_types::ApiError::User(ERROR_INVALID_FEE));
    }
    if tokens_for_sale_pct == 0 || tokens_for_sale_pct > 99 {
        runtime::revert(casper_types::ApiError::User(ERROR_INVALID_PERCENTAGE));
    }

    let mut named_keys = NamedKeys::new();
    let deployer = Key::Account(runtime::get_caller());

    named_keys.insert(SUPERADMIN.to_string(), storage::new_uref(deployer).into());
    named_keys.insert(
        GRADUATION_TARGET.to_string(),
        storage::new_uref(graduation_target).into(),
    );
    named_keys.insert(
        CREATOR_REWARD.to_string(),
        storage::new_uref(creator_reward).into(),
    );
    named_keys.insert(
        PROTOCOL_REWARD.to_string(),
        storage::new_uref(protocol_reward).into(),
    );
    named_keys.insert(
        DEPLOYMENT_FEE.to_string(),
        storage::new_uref(deployment_fee).into(),
    );
    named_keys.insert(
        PROTOCOL_FEE_BPS.to_string(),
        storage::new_uref(protocol_fee_bps).into(),
    );
    named_keys.insert(
        AUTO_CLAIM_THRESHOLD_USD.to_string(),
        storage::new_uref(auto_claim_threshold).into(),
    );
    named_keys.insert(
        TOKENS_FOR_SALE_PCT.to_string(),
        storage::new_uref(tokens_for_sale_pct).into(),
    );
    named_keys.insert(
        TREASURY.to_string(),
        storage::new_uref(Option::<Key>::None).into(),
    );
    named_keys.insert(
        DEX_ROUTER.to_string(),
        storage::new_uref(Option::<Key>::None).into(),
    );
    named_keys.insert(
        PRICE_ORACLE.to_string(),
        storage::new_uref(Option::<Key>::None).into(),
    );
    named_keys.insert(INITIALIZED.to_string(), storage::new_uref(false).into());

    let (contract_hash, _) = storage::new_contract(
        get_entry_points(),
        Some(named_keys),
        Some("vaultpad_launch_config_package".to_string()),
        Some("vaultpad_launch_config_access".to_string()),
        None,
    );

    runtime::put_key("vaultpad_launch_config", contract_hash.into());

    // Call init to mark as initialized
    runtime::call_contract::<()>(contract_hash, "init", runtime_args! {});
}
