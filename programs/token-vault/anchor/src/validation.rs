//! Request checks shared by the vault instructions. Each check runs before the
//! ledger is asked to move anything, so a failure leaves every balance as it was.

use anchor_lang::prelude::*;

use crate::error::VaultError;
use crate::ledger::TokenAccountState;
use crate::pda;

pub fn check_amount(amount: u64) -> Result<()> {
    require!(amount > 0, VaultError::InvalidAmount);
    Ok(())
}

/// The vault must be its own authority and sit at the derived address for its mint
pub fn check_vault_identity(vault: &TokenAccountState, program_id: &Pubkey) -> Result<()> {
    require_keys_eq!(vault.owner, vault.address, VaultError::InvalidVault);

    let (expected, _) = pda::derive_vault_address(&vault.mint, program_id)?;
    require_keys_eq!(vault.address, expected, VaultError::InvalidVault);

    Ok(())
}

pub fn check_same_mint(vault: &TokenAccountState, account: &TokenAccountState) -> Result<()> {
    require_keys_eq!(account.mint, vault.mint, VaultError::MintMismatch);
    Ok(())
}

/// `signer` must be the token account's owner
pub fn check_owner(account: &TokenAccountState, signer: &Pubkey) -> Result<()> {
    require_keys_eq!(account.owner, *signer, VaultError::Unauthorized);
    Ok(())
}

/// `account` must hold at least `amount`, otherwise fail with `shortfall`
pub fn check_covers(account: &TokenAccountState, amount: u64, shortfall: VaultError) -> Result<()> {
    require_gte!(account.amount, amount, shortfall);
    Ok(())
}
