use casper_contract::contract_api::storage;
use casper_types::{Key, U256};

use crate::data::{get_dictionary_uref, ledger_key, BALANCES};

/// Read a holder's balance of a launched token
pub fn read_balance(token: &Key, owner: &Key) -> U256 {
    let dict_uref = get_dictionary_uref(BALANCES);
    let key = ledger_key(token, owner);
    storage::dictionary_get(dict_uref, &key)
        .unwrap_or_default()
        .unwrap_or_default()
}

/// Write a holder's balance of a launched token
pub fn write_balance(token: &Key, owner: &Key, amount: U256) {
    let dict_uref = get_dictionary_uref(BALANCES);
    let key = ledger_key(token, owner);
    storage::dictionary_put(dict_uref, &key, amount);
}
