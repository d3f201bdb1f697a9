use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::error::VaultError;
use crate::events::Withdrawn;
use crate::ledger::CpiLedger;
use crate::processor;

/// Move tokens out of the vault into the signer's own token account.
///
/// Any signer may draw on the pooled balance; there is no per-depositor
/// accounting. The transfer is signed with the vault seeds, which is only
/// possible because `bump` rebuilds the vault's own address.
pub fn withdraw(ctx: Context<Withdraw>, amount: u64, bump: u8) -> Result<()> {
    let accounts = &ctx.accounts;
    let vault = accounts.vault_account.key();
    let recipient = accounts.recipient_token_account.key();
    let authority = accounts.authority.key();

    msg!("Withdraw of {} requested by {}", amount, authority);

    let mut ledger = CpiLedger::new(
        accounts.token_program.to_account_info(),
        vec![
            accounts.vault_account.to_account_info(),
            accounts.recipient_token_account.to_account_info(),
        ],
    );

    let vault_balance = processor::withdraw(
        &mut ledger,
        ctx.program_id,
        &vault,
        &recipient,
        &authority,
        amount,
        bump,
    )?;

    emit!(Withdrawn {
        vault,
        recipient,
        authority,
        amount,
        vault_balance,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    pub authority: Signer<'info>,

    /// Pooled vault; the bump argument must rebuild this address
    #[account(
        mut,
        constraint = vault_account.owner == vault_account.key() @ VaultError::InvalidVault
    )]
    pub vault_account: Account<'info, TokenAccount>,

    /// Must belong to the signer; withdrawals only go to the requester
    #[account(
        mut,
        constraint = recipient_token_account.mint == vault_account.mint @ VaultError::MintMismatch,
        constraint = recipient_token_account.owner == authority.key() @ VaultError::Unauthorized
    )]
    pub recipient_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}
