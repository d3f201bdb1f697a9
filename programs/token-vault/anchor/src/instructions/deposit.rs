use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::error::VaultError;
use crate::events::Deposited;
use crate::ledger::CpiLedger;
use crate::processor;

/// Move tokens from the depositor into the pooled vault.
/// The depositor signs the transfer; the program adds no authority of its own.
pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let accounts = &ctx.accounts;
    let vault = accounts.vault_account.key();
    let depositor = accounts.depositor.key();

    msg!("Deposit of {} by {}", amount, depositor);

    let mut ledger = CpiLedger::new(
        accounts.token_program.to_account_info(),
        vec![
            accounts.vault_account.to_account_info(),
            accounts.depositor_token_account.to_account_info(),
            accounts.depositor.to_account_info(),
        ],
    );

    let vault_balance = processor::deposit(
        &mut ledger,
        ctx.program_id,
        &vault,
        &depositor,
        &accounts.depositor_token_account.key(),
        amount,
    )?;

    emit!(Deposited {
        vault,
        depositor,
        amount,
        vault_balance,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Deposit<'info> {
    pub depositor: Signer<'info>,

    /// Pooled vault; its own authority
    #[account(
        mut,
        constraint = vault_account.owner == vault_account.key() @ VaultError::InvalidVault
    )]
    pub vault_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = depositor_token_account.mint == vault_account.mint @ VaultError::MintMismatch,
        constraint = depositor_token_account.owner == depositor.key() @ VaultError::Unauthorized
    )]
    pub depositor_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}
