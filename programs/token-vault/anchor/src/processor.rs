//! Instruction flows, independent of how the token ledger is reached.
//!
//! Every flow validates the whole request first and then issues at most one
//! ledger mutation, so a rejected request changes nothing.

use anchor_lang::prelude::*;

use crate::error::VaultError;
use crate::ledger::{TokenLedger, TransferAuthority};
use crate::pda;
use crate::validation;

pub fn initialize_vault<L: TokenLedger>(
    ledger: &mut L,
    program_id: &Pubkey,
    vault: &Pubkey,
    mint: &Pubkey,
    bump: u8,
) -> Result<()> {
    pda::verify_canonical_vault(vault, mint, bump, program_id)?;

    if ledger.load(vault)?.is_some() {
        msg!("Vault {} already exists", vault);
        return err!(VaultError::AlreadyInitialized);
    }

    let bump_bytes = [bump];
    let seeds = pda::vault_signer_seeds(mint, &bump_bytes);
    ledger.create_vault(vault, mint, &seeds)?;

    msg!("Vault {} initialized for mint {} (bump {})", vault, mint, bump);
    Ok(())
}

/// Returns the vault balance after the deposit
pub fn deposit<L: TokenLedger>(
    ledger: &mut L,
    program_id: &Pubkey,
    vault: &Pubkey,
    depositor: &Pubkey,
    source: &Pubkey,
    amount: u64,
) -> Result<u64> {
    validation::check_amount(amount)?;

    let vault_state = ledger
        .load(vault)?
        .ok_or_else(|| error!(VaultError::VaultNotInitialized))?;
    validation::check_vault_identity(&vault_state, program_id)?;

    let source_state = ledger
        .load(source)?
        .ok_or_else(|| error!(VaultError::UnknownAccount))?;
    validation::check_same_mint(&vault_state, &source_state)?;
    validation::check_owner(&source_state, depositor)?;
    // The token program enforces this too; checked here for a distinct error
    validation::check_covers(&source_state, amount, VaultError::InsufficientDepositorFunds)?;

    ledger.transfer(source, vault, TransferAuthority::Owner(*depositor), amount)?;

    let balance = vault_balance(ledger, vault)?;
    msg!("Deposited {} into vault {}, balance {}", amount, vault, balance);
    Ok(balance)
}

/// Returns the vault balance after the withdrawal
pub fn withdraw<L: TokenLedger>(
    ledger: &mut L,
    program_id: &Pubkey,
    vault: &Pubkey,
    recipient: &Pubkey,
    requester: &Pubkey,
    amount: u64,
    bump: u8,
) -> Result<u64> {
    validation::check_amount(amount)?;

    let vault_state = ledger
        .load(vault)?
        .ok_or_else(|| error!(VaultError::VaultNotInitialized))?;

    // Only the vault's own derived address may sign for it
    let derived = pda::vault_address_with_bump(&vault_state.mint, bump, program_id)?;
    require_keys_eq!(derived, vault_state.owner, VaultError::InvalidBump);
    require_keys_eq!(derived, *vault, VaultError::InvalidBump);

    let recipient_state = ledger
        .load(recipient)?
        .ok_or_else(|| error!(VaultError::UnknownAccount))?;
    validation::check_same_mint(&vault_state, &recipient_state)?;
    validation::check_owner(&recipient_state, requester)?;

    if let Err(err) = validation::check_covers(&vault_state, amount, VaultError::InsufficientFunds) {
        msg!(
            "Withdraw of {} rejected, vault {} holds {}",
            amount,
            vault,
            vault_state.amount
        );
        return Err(err);
    }

    let bump_bytes = [bump];
    let seeds = pda::vault_signer_seeds(&vault_state.mint, &bump_bytes);
    ledger.transfer(
        vault,
        recipient,
        TransferAuthority::Program {
            address: derived,
            seeds: &seeds,
        },
        amount,
    )?;

    let balance = vault_balance(ledger, vault)?;
    msg!("Withdrew {} from vault {}, balance {}", amount, vault, balance);
    Ok(balance)
}

fn vault_balance<L: TokenLedger>(ledger: &L, vault: &Pubkey) -> Result<u64> {
    ledger
        .load(vault)?
        .map(|state| state.amount)
        .ok_or_else(|| error!(VaultError::VaultNotInitialized))
}
