#![no_std]
#![no_main]

extern crate alloc;

mod curves;
mod data;
mod error;
mod ledger;
mod registry;
mod sale;

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use casper_contract::{
    contract_api::{runtime, storage, system},
    unwrap_or_revert::UnwrapOrRevert,
};
use casper_types::{
    addressable_entity::{AddressableEntityHash, EntityEntryPoint as EntryPoint, EntryPoints},
    contracts::NamedKeys,
    runtime_args, CLType, CLValue, EntryPointAccess, EntryPointPayment, EntryPointType, Key,
    Parameter, U256, U512,
};

use data::{
    creator_index_key, creator_symbol_key, get_dictionary_uref, key_to_str, read_named_key,
    write_named_key, BALANCES, CREATOR_SYMBOLS, CREATOR_TOKENS, CREATOR_TOKEN_COUNT, FREE_USED,
    INITIALIZED, LAUNCH_CONFIG, LOCKED, SALES, SALE_PARAMS, SMART_VAULT, TOKENS, TOKEN_COUNT,
    TOKEN_LINKS, TOKEN_META,
};
use error::LaunchpadError;
use sale::{CurveParams, RewardRoute, SaleState};

// Default launch economics; per-launch price overrides are accepted at
// creation and validated against the graduation target
const DEFAULT_TOTAL_SUPPLY: u128 = 1_000_000_000_000_000_000_000_000_000; // 1 billion tokens (18 decimals)
const DEFAULT_BASE_PRICE: u64 = 10_000; // motes per token at launch
const DEFAULT_MAX_PRICE: u64 = 200_000; // motes per token at full capacity

// Storage rows for one sale: mutable trade state and fixed parameters
type SaleCoreRow = (U256, U512, (bool, bool));
type SaleParamsRow = ((Key, u64), (U256, U256, U256), (U512, U512, U512));

// ============ Helper Functions ============

fn require_unlocked() {
    let locked: bool = read_named_key(LOCKED);
    if locked {
        runtime::revert(LaunchpadError::LockedReentrancy);
    }
}

fn lock() {
    write_named_key(LOCKED, true);
}

fn unlock() {
    write_named_key(LOCKED, false);
}

fn get_current_time() -> u64 {
    runtime::get_blocktime().into()
}

fn get_entity_hash(contract: &Key) -> AddressableEntityHash {
    match contract {
        Key::AddressableEntity(entity_addr) => AddressableEntityHash::new(entity_addr.value()),
        _ => runtime::revert(LaunchpadError::InvalidContractTarget),
    }
}

// ============ External Contract Calls ============

fn call_smart_vault_has_minted(wallet: Key) -> bool {
    let smart_vault: Key = read_named_key(SMART_VAULT);
    runtime::call_contract(
        get_entity_hash(&smart_vault).into(),
        "has_minted",
        runtime_args! {
            "wallet" => wallet
        },
    )
}

fn call_config_launch_economics() -> (U512, U512, u8) {
    let config: Key = read_named_key(LAUNCH_CONFIG);
    runtime::call_contract(
        get_entity_hash(&config).into(),
        "get_launch_economics",
        runtime_args! {},
    )
}

fn call_config_reward_economics() -> (U512, U512, Option<Key>) {
    let config: Key = read_named_key(LAUNCH_CONFIG);
    runtime::call_contract(
        get_entity_hash(&config).into(),
        "get_reward_economics",
        runtime_args! {},
    )
}

fn call_config_treasury() -> Option<Key> {
    let config: Key = read_named_key(LAUNCH_CONFIG);
    runtime::call_contract(get_entity_hash(&config).into(), "treasury", runtime_args! {})
}

fn call_config_dex_router() -> Option<Key> {
    let config: Key = read_named_key(LAUNCH_CONFIG);
    runtime::call_contract(get_entity_hash(&config).into(), "dex_router", runtime_args! {})
}

// ============ Sale Storage ============

fn read_sale(token: &Key) -> Option<(SaleState, CurveParams, Key, u64)> {
    let key = key_to_str(token);

    let sales_uref = get_dictionary_uref(SALES);
    let core: Option<SaleCoreRow> = storage::dictionary_get(sales_uref, &key).unwrap_or_default();
    let (sold_amount, collected_funds, (graduated, reward_claimed)) = core?;

    let params_uref = get_dictionary_uref(SALE_PARAMS);
    let row: Option<SaleParamsRow> = storage::dictionary_get(params_uref, &key).unwrap_or_default();
    let ((creator, created_at), (total_supply, sale_capacity, liquidity_reserve), prices) = row?;
    let (base_price, max_price, graduation_target) = prices;

    let state = SaleState {
        sold_amount,
        collected_funds,
        graduated,
        reward_claimed,
    };
    let params = CurveParams {
        total_supply,
        sale_capacity,
        liquidity_reserve,
        base_price,
        max_price,
        graduation_target,
    };

    Some((state, params, creator, created_at))
}

fn write_sale_state(token: &Key, state: &SaleState) {
    let sales_uref = get_dictionary_uref(SALES);
    let row: SaleCoreRow = (
        state.sold_amount,
        state.collected_funds,
        (state.graduated, state.reward_claimed),
    );
    storage::dictionary_put(sales_uref, &key_to_str(token), row);
}

fn load_sale_or_revert(token: &Key) -> (SaleState, CurveParams, Key, u64) {
    match read_sale(token) {
        Some(loaded) => loaded,
        None => runtime::revert(LaunchpadError::SaleNotFound),
    }
}

// ============ Graduation ============

/// Move the reserved liquidity allocation and the raise to the DEX router.
/// Called exactly once, inside the buy that crosses the target; any revert
/// here aborts that buy wholesale.
fn migrate_liquidity(token: &Key, params: &CurveParams, state: &SaleState) {
    let router = match call_config_dex_router() {
        Some(router) => router,
        None => {
            unlock();
            runtime::revert(LaunchpadError::RouterNotSet);
        }
    };

    let balance = ledger::read_balance(token, &router);
    ledger::write_balance(token, &router, balance + params.liquidity_reserve);

    runtime::call_contract::<()>(
        get_entity_hash(&router).into(),
        "migrate_liquidity",
        runtime_args! {
            "token" => *token,
            "token_amount" => params.liquidity_reserve,
            "funds" => state.collected_funds
        },
    );
}

// ============ Entry Points: Registry ============

/// Initialize the launchpad (creates dictionaries)
#[no_mangle]
pub extern "C" fn init() {
    let initialized: bool = read_named_key(INITIALIZED);
    if initialized {
        runtime::revert(LaunchpadError::AlreadyInitialized);
    }

    for dictionary in [
        SALES,
        SALE_PARAMS,
        TOKEN_META,
        TOKEN_LINKS,
        TOKENS,
        CREATOR_TOKEN_COUNT,
        CREATOR_TOKENS,
        CREATOR_SYMBOLS,
        FREE_USED,
        BALANCES,
    ] {
        storage::new_dictionary(dictionary)
            .unwrap_or_revert_with(LaunchpadError::FailedToCreateDictionary);
    }

    write_named_key(INITIALIZED, true);
}

/// Launch a new meme token on the bonding curve
/// Returns (launch_id, token_key)
#[no_mangle]
pub extern "C" fn create_meme_token() {
    let name: String = runtime::get_named_arg("name");
    let symbol: String = runtime::get_named_arg("symbol");
    let description: Option<String> = runtime::get_named_arg("description");
    let logo_uri: Option<String> = runtime::get_named_arg("logo_uri");
    let website: Option<String> = runtime::get_named_arg("website");
    let twitter: Option<String> = runtime::get_named_arg("twitter");
    let telegram: Option<String> = runtime::get_named_arg("telegram");
    let discord: Option<String> = runtime::get_named_arg("discord");
    let base_price: Option<U512> = runtime::get_named_arg("base_price");
    let max_price: Option<U512> = runtime::get_named_arg("max_price");
    let amount: U512 = runtime::get_named_arg("amount");

    if let Err(error) = registry::validate_name(&name) {
        runtime::revert(error);
    }
    if let Err(error) = registry::validate_symbol(&symbol) {
        runtime::revert(error);
    }

    let creator = Key::Account(runtime::get_caller());

    // One symbol per creator
    let symbols_uref = get_dictionary_uref(CREATOR_SYMBOLS);
    let symbol_key = creator_symbol_key(&creator, &symbol);
    let existing: Option<Key> =
        storage::dictionary_get(symbols_uref, &symbol_key).unwrap_or_default();
    if existing.is_some() {
        runtime::revert(LaunchpadError::DuplicateToken);
    }

    let (deployment_fee, graduation_target, sale_pct) = call_config_launch_economics();

    // A minted Smart Vault grants one fee-free launch; afterwards the
    // standard deployment fee applies
    let minted = call_smart_vault_has_minted(creator);
    let free_uref = get_dictionary_uref(FREE_USED);
    let creator_str = key_to_str(&creator);
    let already_used: bool = storage::dictionary_get(free_uref, &creator_str)
        .unwrap_or_default()
        .unwrap_or_default();

    if registry::free_launch_available(minted, already_used) {
        storage::dictionary_put(free_uref, &creator_str, true);
    } else {
        if amount < deployment_fee {
            runtime::revert(LaunchpadError::InsufficientFee);
        }
        if !deployment_fee.is_zero() {
            if let Some(Key::Account(account)) = call_config_treasury() {
                system::transfer_to_account(account, deployment_fee, None).unwrap_or_revert();
            }
        }
    }

    let total_supply = U256::from(DEFAULT_TOTAL_SUPPLY);
    let sale_capacity = (total_supply * U256::from(sale_pct)) / U256::from(100u64);
    let liquidity_reserve = total_supply - sale_capacity;

    let params = CurveParams {
        total_supply,
        sale_capacity,
        liquidity_reserve,
        base_price: base_price.unwrap_or_else(|| U512::from(DEFAULT_BASE_PRICE)),
        max_price: max_price.unwrap_or_else(|| U512::from(DEFAULT_MAX_PRICE)),
        graduation_target,
    };
    if let Err(error) = params.validate() {
        runtime::revert(error);
    }

    let launch_id: u64 = read_named_key(TOKEN_COUNT);
    let token = registry::token_key_from_id(launch_id);
    let token_str = key_to_str(&token);
    let created_at = get_current_time();

    // Trade state starts empty
    write_sale_state(&token, &SaleState::new());

    let params_uref = get_dictionary_uref(SALE_PARAMS);
    let row: SaleParamsRow = (
        (creator, created_at),
        (total_supply, sale_capacity, liquidity_reserve),
        (params.base_price, params.max_price, params.graduation_target),
    );
    storage::dictionary_put(params_uref, &token_str, row);

    let meta_uref = get_dictionary_uref(TOKEN_META);
    storage::dictionary_put(meta_uref, &token_str, (name, symbol, (creator, created_at)));

    let links_uref = get_dictionary_uref(TOKEN_LINKS);
    storage::dictionary_put(
        links_uref,
        &token_str,
        ((description, logo_uri), (website, twitter), (telegram, discord)),
    );

    // Creation-order indexes: global and per creator
    let tokens_uref = get_dictionary_uref(TOKENS);
    storage::dictionary_put(tokens_uref, &launch_id.to_string(), token);

    let creator_count_uref = get_dictionary_uref(CREATOR_TOKEN_COUNT);
    let creator_count: u64 = storage::dictionary_get(creator_count_uref, &creator_str)
        .unwrap_or_default()
        .unwrap_or_default();
    let creator_tokens_uref = get_dictionary_uref(CREATOR_TOKENS);
    storage::dictionary_put(
        creator_tokens_uref,
        &creator_index_key(&creator, creator_count),
        token,
    );
    storage::dictionary_put(creator_count_uref, &creator_str, creator_count + 1);

    storage::dictionary_put(symbols_uref, &symbol_key, token);

    write_named_key(TOKEN_COUNT, launch_id + 1);

    runtime::ret(CLValue::from_t((launch_id, token)).unwrap_or_revert());
}

/// Get the total number of launched tokens
#[no_mangle]
pub extern "C" fn token_count() {
    let count: u64 = read_named_key(TOKEN_COUNT);
    runtime::ret(CLValue::from_t(count).unwrap_or_revert());
}

/// Get launched token keys in creation order (paginated)
#[no_mangle]
pub extern "C" fn get_all_tokens() {
    let offset: u64 = runtime::get_named_arg("offset");
    let limit: u64 = runtime::get_named_arg("limit");

    let count: u64 = read_named_key(TOKEN_COUNT);
    let tokens_uref = get_dictionary_uref(TOKENS);

    let mut result: Vec<Key> = Vec::new();
    let mut index = offset;
    while index < count && (result.len() as u64) < limit {
        let token: Option<Key> = storage::dictionary_get(tokens_uref, &index.to_string())
            .unwrap_or_default();
        if let Some(token) = token {
            result.push(token);
        }
        index += 1;
    }

    runtime::ret(CLValue::from_t(result).unwrap_or_revert());
}

/// Get the number of tokens launched by a creator
#[no_mangle]
pub extern "C" fn creator_token_count() {
    let creator: Key = runtime::get_named_arg("creator");

    let creator_count_uref = get_dictionary_uref(CREATOR_TOKEN_COUNT);
    let count: u64 = storage::dictionary_get(creator_count_uref, &key_to_str(&creator))
        .unwrap_or_default()
        .unwrap_or_default();

    runtime::ret(CLValue::from_t(count).unwrap_or_revert());
}

/// Get a creator's token keys in creation order (paginated)
#[no_mangle]
pub extern "C" fn get_creator_tokens() {
    let creator: Key = runtime::get_named_arg("creator");
    let offset: u64 = runtime::get_named_arg("offset");
    let limit: u64 = runtime::get_named_arg("limit");

    let creator_count_uref = get_dictionary_uref(CREATOR_TOKEN_COUNT);
    let count: u64 = storage::dictionary_get(creator_count_uref, &key_to_str(&creator))
        .unwrap_or_default()
        .unwrap_or_default();

    let creator_tokens_uref = get_dictionary_uref(CREATOR_TOKENS);
    let mut result: Vec<Key> = Vec::new();
    let mut index = offset;
    while index < count && (result.len() as u64) < limit {
        let token: Option<Key> =
            storage::dictionary_get(creator_tokens_uref, &creator_index_key(&creator, index))
                .unwrap_or_default();
        if let Some(token) = token {
            result.push(token);
        }
        index += 1;
    }

    runtime::ret(CLValue::from_t(result).unwrap_or_revert());
}

/// Get token metadata: (name, symbol, (creator, created_at))
#[no_mangle]
pub extern "C" fn get_token_meta() {
    let token: Key = runtime::get_named_arg("token");

    let meta_uref = get_dictionary_uref(TOKEN_META);
    let meta: Option<(String, String, (Key, u64))> =
        storage::dictionary_get(meta_uref, &key_to_str(&token)).unwrap_or_default();

    runtime::ret(CLValue::from_t(meta).unwrap_or_revert());
}

/// Get token social links:
/// ((description, logo_uri), (website, twitter), (telegram, discord))
#[no_mangle]
pub extern "C" fn get_token_links() {
    let token: Key = runtime::get_named_arg("token");

    let links_uref = get_dictionary_uref(TOKEN_LINKS);
    let links: Option<(
        (Option<String>, Option<String>),
        (Option<String>, Option<String>),
        (Option<String>, Option<String>),
    )> = storage::dictionary_get(links_uref, &key_to_str(&token)).unwrap_or_default();

    runtime::ret(CLValue::from_t(links).unwrap_or_revert());
}

/// Look up a creator's token by symbol
#[no_mangle]
pub extern "C" fn get_token_by_symbol() {
    let creator: Key = runtime::get_named_arg("creator");
    let symbol: String = runtime::get_named_arg("symbol");

    let symbols_uref = get_dictionary_uref(CREATOR_SYMBOLS);
    let token: Option<Key> =
        storage::dictionary_get(symbols_uref, &creator_symbol_key(&creator, &symbol))
            .unwrap_or_default();

    runtime::ret(CLValue::from_t(token).unwrap_or_revert());
}

/// Whether a wallet has consumed its free deployment
#[no_mangle]
pub extern "C" fn used_free_deployment() {
    let wallet: Key = runtime::get_named_arg("wallet");

    let free_uref = get_dictionary_uref(FREE_USED);
    let used: bool = storage::dictionary_get(free_uref, &key_to_str(&wallet))
        .unwrap_or_default()
        .unwrap_or_default();

    runtime::ret(CLValue::from_t(used).unwrap_or_revert());
}

// ============ Entry Points: Market ============

/// Get the current spot price for a token
#[no_mangle]
pub extern "C" fn get_current_price() {
    let token: Key = runtime::get_named_arg("token");
    let (state, params, _, _) = load_sale_or_revert(&token);

    let price = curves::spot_price(
        state.sold_amount,
        params.sale_capacity,
        params.base_price,
        params.max_price,
    );
    runtime::ret(CLValue::from_t(price).unwrap_or_revert());
}

/// Quote how many tokens a given amount of motes buys
#[no_mangle]
pub extern "C" fn get_quote_buy() {
    let token: Key = runtime::get_named_arg("token");
    let amount: U512 = runtime::get_named_arg("amount");
    let (state, params, _, _) = load_sale_or_revert(&token);

    let tokens = curves::tokens_for_funds(
        state.sold_amount,
        amount,
        params.sale_capacity,
        params.base_price,
        params.max_price,
    );
    if state.sold_amount + tokens > params.sale_capacity {
        runtime::revert(LaunchpadError::ExceedsSaleCapacity);
    }
    runtime::ret(CLValue::from_t(tokens).unwrap_or_revert());
}

/// Quote the motes returned for selling a token amount
#[no_mangle]
pub extern "C" fn get_quote_sell() {
    let token: Key = runtime::get_named_arg("token");
    let amount: U256 = runtime::get_named_arg("amount");
    let (state, params, _, _) = load_sale_or_revert(&token);

    let funds = if amount > state.sold_amount {
        U512::zero()
    } else {
        curves::sell_return(
            state.sold_amount - amount,
            state.sold_amount,
            params.sale_capacity,
            params.base_price,
            params.max_price,
        )
    };
    runtime::ret(CLValue::from_t(funds).unwrap_or_revert());
}

/// Buy tokens from the curve with motes
#[no_mangle]
pub extern "C" fn buy() {
    require_unlocked();
    lock();

    let token: Key = runtime::get_named_arg("token");
    let amount: U512 = runtime::get_named_arg("amount");

    let (mut state, params, _, _) = match read_sale(&token) {
        Some(loaded) => loaded,
        None => {
            unlock();
            runtime::revert(LaunchpadError::SaleNotFound);
        }
    };

    let outcome = match state.apply_buy(&params, amount) {
        Ok(outcome) => outcome,
        Err(error) => {
            unlock();
            runtime::revert(error);
        }
    };

    let buyer = Key::Account(runtime::get_caller());
    let balance = ledger::read_balance(&token, &buyer);
    ledger::write_balance(&token, &buyer, balance + outcome.tokens);

    write_sale_state(&token, &state);

    // Graduation is a direct consequence of this buy crossing the target;
    // a failed migration reverts the whole buy
    if outcome.graduated_now {
        migrate_liquidity(&token, &params, &state);
    }

    unlock();
    runtime::ret(CLValue::from_t(outcome.tokens).unwrap_or_revert());
}

/// Sell tokens back into the curve
#[no_mangle]
pub extern "C" fn sell() {
    require_unlocked();
    lock();

    let token: Key = runtime::get_named_arg("token");
    let amount: U256 = runtime::get_named_arg("amount");

    let (mut state, params, _, _) = match read_sale(&token) {
        Some(loaded) => loaded,
        None => {
            unlock();
            runtime::revert(LaunchpadError::SaleNotFound);
        }
    };

    let seller_account = runtime::get_caller();
    let seller = Key::Account(seller_account);
    let balance = ledger::read_balance(&token, &seller);
    if balance < amount {
        unlock();
        runtime::revert(LaunchpadError::InsufficientBalance);
    }

    let funds_out = match state.apply_sell(&params, amount) {
        Ok(funds_out) => funds_out,
        Err(error) => {
            unlock();
            runtime::revert(error);
        }
    };

    ledger::write_balance(&token, &seller, balance - amount);
    write_sale_state(&token, &state);

    system::transfer_to_account(seller_account, funds_out, None).unwrap_or_revert();

    unlock();
    runtime::ret(CLValue::from_t(funds_out).unwrap_or_revert());
}

/// Whether a token sale has graduated
#[no_mangle]
pub extern "C" fn is_graduated() {
    let token: Key = runtime::get_named_arg("token");
    let (state, _, _, _) = load_sale_or_revert(&token);
    runtime::ret(CLValue::from_t(state.graduated).unwrap_or_revert());
}

/// Get raise progress as (collected_funds, graduation_target, progress_bps)
#[no_mangle]
pub extern "C" fn get_progress() {
    let token: Key = runtime::get_named_arg("token");
    let (state, params, _, _) = load_sale_or_revert(&token);

    let progress_bps = state.progress_bps(params.graduation_target);
    runtime::ret(
        CLValue::from_t((state.collected_funds, params.graduation_target, progress_bps))
            .unwrap_or_revert(),
    );
}

/// Get a sale's trade state: (sold_amount, collected_funds, (graduated, reward_claimed))
#[no_mangle]
pub extern "C" fn get_sale() {
    let token: Key = runtime::get_named_arg("token");

    let sales_uref = get_dictionary_uref(SALES);
    let core: Option<SaleCoreRow> =
        storage::dictionary_get(sales_uref, &key_to_str(&token)).unwrap_or_default();

    runtime::ret(CLValue::from_t(core).unwrap_or_revert());
}

/// Get a holder's balance of a launched token
#[no_mangle]
pub extern "C" fn balance_of() {
    let token: Key = runtime::get_named_arg("token");
    let owner: Key = runtime::get_named_arg("owner");

    let balance = ledger::read_balance(&token, &owner);
    runtime::ret(CLValue::from_t(balance).unwrap_or_revert());
}

/// Claim the one-shot creator reward on a graduated sale
#[no_mangle]
pub extern "C" fn claim_creator_reward() {
    require_unlocked();
    lock();

    let token: Key = runtime::get_named_arg("token");

    let (mut state, _, creator, _) = match read_sale(&token) {
        Some(loaded) => loaded,
        None => {
            unlock();
            runtime::revert(LaunchpadError::SaleNotFound);
        }
    };

    let caller_account = runtime::get_caller();
    let caller = Key::Account(caller_account);
    let is_creator = caller == creator;
    let holds_smart_vault = call_smart_vault_has_minted(caller);

    let (creator_reward, protocol_reward, treasury) = call_config_reward_economics();

    let route = match state.claim_reward(is_creator, holds_smart_vault, creator_reward, protocol_reward)
    {
        Ok(route) => route,
        Err(error) => {
            unlock();
            runtime::revert(error);
        }
    };

    write_sale_state(&token, &state);

    match route {
        RewardRoute::Creator(amount) => {
            system::transfer_to_account(caller_account, amount, None).unwrap_or_revert();
        }
        RewardRoute::Protocol(amount) => {
            let treasury = match treasury {
                Some(treasury) => treasury,
                None => {
                    unlock();
                    runtime::revert(LaunchpadError::TreasuryNotSet);
                }
            };
            if let Key::Account(account) = treasury {
                system::transfer_to_account(account, amount, None).unwrap_or_revert();
            }
        }
    }

    unlock();
}

/// Whether a claimant could claim the creator reward right now
#[no_mangle]
pub extern "C" fn can_claim_reward() {
    let token: Key = runtime::get_named_arg("token");
    let claimant: Key = runtime::get_named_arg("creator");

    let can_claim = match read_sale(&token) {
        Some((state, _, creator, _)) => state.can_claim_reward(claimant == creator),
        None => false,
    };

    runtime::ret(CLValue::from_t(can_claim).unwrap_or_revert());
}

// ============ Contract Installation ============

fn get_entry_points() -> EntryPoints {
    let mut entry_points = EntryPoints::new();

    let option_string = || CLType::Option(Box::new(CLType::String));

    // Init
    entry_points.add_entry_point(EntryPoint::new(
        "init",
        vec![],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    // Registry entry points
    entry_points.add_entry_point(EntryPoint::new(
        "create_meme_token",
        vec![
            Parameter::new("name", CLType::String),
            Parameter::new("symbol", CLType::String),
            Parameter::new("description", option_string()),
            Parameter::new("logo_uri", option_string()),
            Parameter::new("website", option_string()),
            Parameter::new("twitter", option_string()),
            Parameter::new("telegram", option_string()),
            Parameter::new("discord", option_string()),
            Parameter::new("base_price", CLType::Option(Box::new(CLType::U512))),
            Parameter::new("max_price", CLType::Option(Box::new(CLType::U512))),
            Parameter::new("amount", CLType::U512),
        ],
        CLType::Tuple2([Box::new(CLType::U64), Box::new(CLType::Key)]),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "token_count",
        vec![],
        CLType::U64,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "get_all_tokens",
        vec![
            Parameter::new("offset", CLType::U64),
            Parameter::new("limit", CLType::U64),
        ],
        CLType::List(Box::new(CLType::Key)),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "creator_token_count",
        vec![Parameter::new("creator", CLType::Key)],
        CLType::U64,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "get_creator_tokens",
        vec![
            Parameter::new("creator", CLType::Key),
            Parameter::new("offset", CLType::U64),
            Parameter::new("limit", CLType::U64),
        ],
        CLType::List(Box::new(CLType::Key)),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "get_token_meta",
        vec![Parameter::new("token", CLType::Key)],
        CLType::Option(Box::new(CLType::Tuple3([
            Box::new(CLType::String),
            Box::new(CLType::String),
            Box::new(CLType::Tuple2([
                Box::new(CLType::Key),
                Box::new(CLType::U64),
            ])),
        ]))),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "get_token_links",
        vec![Parameter::new("token", CLType::Key)],
        CLType::Option(Box::new(CLType::Tuple3([
            Box::new(CLType::Tuple2([
                Box::new(option_string()),
                Box::new(option_string()),
            ])),
            Box::new(CLType::Tuple2([
                Box::new(option_string()),
                Box::new(option_string()),
            ])),
            Box::new(CLType::Tuple2([
                Box::new(option_string()),
                Box::new(option_string()),
            ])),
        ]))),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "get_token_by_symbol",
        vec![
            Parameter::new("creator", CLType::Key),
            Parameter::new("symbol", CLType::String),
        ],
        CLType::Option(Box::new(CLType::Key)),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "used_free_deployment",
        vec![Parameter::new("wallet", CLType::Key)],
        CLType::Bool,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    // Market entry points
    entry_points.add_entry_point(EntryPoint::new(
        "get_current_price",
        vec![Parameter::new("token", CLType::Key)],
        CLType::U512,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "get_quote_buy",
        vec![
            Parameter::new("token", CLType::Key),
            Parameter::new("amount", CLType::U512),
        ],
        CLType::U256,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "get_quote_sell",
        vec![
            Parameter::new("token", CLType::Key),
            Parameter::new("amount", CLType::U256),
        ],
        CLType::U512,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "buy",
        vec![
            Parameter::new("token", CLType::Key),
            Parameter::new("amount", CLType::U512),
        ],
        CLType::U256,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "sell",
        vec![
            Parameter::new("token", CLType::Key),
            Parameter::new("amount", CLType::U256),
        ],
        CLType::U512,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "is_graduated",
        vec![Parameter::new("token", CLType::Key)],
        CLType::Bool,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "get_progress",
        vec![Parameter::new("token", CLType::Key)],
        CLType::Tuple3([
            Box::new(CLType::U512),
            Box::new(CLType::U512),
            Box::new(CLType::U64),
        ]),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "get_sale",
        vec![Parameter::new("token", CLType::Key)],
        CLType::Option(Box::new(CLType::Tuple3([
            Box::new(CLType::U256),
            Box::new(CLType::U512),
            Box::new(CLType::Tuple2([
                Box::new(CLType::Bool),
                Box::new(CLType::Bool),
            ])),
        ]))),
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "balance_of",
        vec![
            Parameter::new("token", CLType::Key),
            Parameter::new("owner", CLType::Key),
        ],
        CLType::U256,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "claim_creator_reward",
        vec![Parameter::new("token", CLType::Key)],
        CLType::Unit,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points.add_entry_point(EntryPoint::new(
        "can_claim_reward",
        vec![
            Parameter::new("token", CLType::Key),
            Parameter::new("creator", CLType::Key),
        ],
        CLType::Bool,
        EntryPointAccess::Public,
        EntryPointType::Called,
        EntryPointPayment::Caller,
    ));

    entry_points
}

#[no_mangle]
pub extern "C" fn call() {
    let launch_config: Key = runtime::get_named_arg("launch_config");
    let smart_vault: Key = runtime::get_named_arg("smart_vault");

    let mut named_keys = NamedKeys::new();

    named_keys.insert(
        LAUNCH_CONFIG.to_string(),
        storage::new_uref(launch_config).into(),
    );
    named_keys.insert(SMART_VAULT.to_string(), storage::new_uref(smart_vault).into());
    named_keys.insert(TOKEN_COUNT.to_string(), storage::new_uref(0u64).into());
    named_keys.insert(LOCKED.to_string(), storage::new_uref(false).into());
    named_keys.insert(INITIALIZED.to_string(), storage::new_uref(false).into());

    let (contract_hash, _) = storage::new_contract(
        get_entry_points(),
        Some(named_keys),
        Some("vaultpad_launchpad_package".to_string()),
        Some("vaultpad_launchpad_access".to_string()),
        None,
    );

    runtime::put_key("vaultpad_launchpad", contract_hash.into());

    // Initialize (creates dictionaries)
    runtime::call_contract::<()>(contract_hash, "init", runtime_args! {});
}
