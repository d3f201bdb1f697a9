use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token};

use crate::constants::TOKEN_ACCOUNT_LEN;
use crate::events::VaultInitialized;
use crate::ledger::{CpiLedger, Funding};
use crate::processor;

/// Create the vault token account for `mint`.
///
/// The account is created here rather than through an `init` constraint so
/// that a second call fails with `AlreadyInitialized` before anything is
/// written, and a stale or non-canonical bump fails with `InvalidBump`.
pub fn initialize_vault(ctx: Context<InitializeVault>, bump: u8) -> Result<()> {
    let accounts = &ctx.accounts;
    let vault = accounts.vault_account.key();
    let mint = accounts.mint.key();

    let mut ledger = CpiLedger::new(
        accounts.token_program.to_account_info(),
        vec![
            accounts.vault_account.to_account_info(),
            accounts.mint.to_account_info(),
        ],
    )
    .with_funding(Funding {
        payer: accounts.payer.to_account_info(),
        system_program: accounts.system_program.to_account_info(),
        lamports: accounts.rent.minimum_balance(TOKEN_ACCOUNT_LEN),
    });

    processor::initialize_vault(&mut ledger, ctx.program_id, &vault, &mint, bump)?;

    emit!(VaultInitialized {
        vault,
        mint,
        bump,
        payer: accounts.payer.key(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeVault<'info> {
    /// CHECK: created by the handler at `["vault", mint]`; address and bump are verified there
    #[account(mut)]
    pub vault_account: UncheckedAccount<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub mint: Account<'info, Mint>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}
