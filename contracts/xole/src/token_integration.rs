//! Token custody helpers.
//! Centralizes balance reads and transfers in and out of the contract.

use soroban_sdk::token::TokenClient;
use soroban_sdk::{Address, Env};
use xole_errors::XoleError;

/// Balance of `token` held by this contract.
pub fn held_balance(e: &Env, token: &Address) -> i128 {
    TokenClient::new(e, token).balance(&e.current_contract_address())
}

/// Pulls `amount` of `token` from `owner` into the contract. Requires a
/// prior approval naming the contract as spender.
pub fn transfer_into_contract(
    e: &Env,
    token: &Address,
    owner: &Address,
    amount: i128,
) -> Result<(), XoleError> {
    if amount <= 0 {
        return Err(XoleError::InvalidAmount);
    }
    let contract = e.current_contract_address();
    let client = TokenClient::new(e, token);
    if client.allowance(owner, &contract) < amount {
        return Err(XoleError::InvalidAmount);
    }
    client.transfer_from(&contract, owner, &contract, &amount);
    Ok(())
}

/// Sends `amount` of `token` from the contract to `recipient`.
pub fn transfer_from_contract(e: &Env, token: &Address, recipient: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    let contract = e.current_contract_address();
    TokenClient::new(e, token).transfer(&contract, recipient, &amount);
}
