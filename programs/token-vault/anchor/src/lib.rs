use anchor_lang::prelude::*;

declare_id!("6PXA5EtWqQ7r9agVNYm5sPPXCao2DxRwuE5HkTQ4d6uZ");

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod pda;
pub mod processor;
pub mod validation;

pub use constants::*;
pub use error::*;
pub use events::*;
pub use instructions::*;

#[program]
pub mod token_vault {
    use super::*;

    /// Create the pooled token account for `mint` at its program derived address.
    /// The account is its own authority, so only this program can move tokens out.
    pub fn initialize_vault(ctx: Context<InitializeVault>, bump: u8) -> Result<()> {
        instructions::initialize_vault(ctx, bump)
    }

    /// Move `amount` tokens from the depositor's token account into the vault
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit(ctx, amount)
    }

    /// Move `amount` tokens out of the vault, signed by the vault PDA
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64, bump: u8) -> Result<()> {
        instructions::withdraw(ctx, amount, bump)
    }
}
