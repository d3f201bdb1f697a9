use anchor_lang::prelude::*;

#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub mint: Pubkey,
    pub bump: u8,
    pub payer: Pubkey,
}

#[event]
pub struct Deposited {
    pub vault: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    pub vault_balance: u64,
    pub timestamp: i64,
}

#[event]
pub struct Withdrawn {
    pub vault: Pubkey,
    pub recipient: Pubkey,
    pub authority: Pubkey,
    pub amount: u64,
    pub vault_balance: u64,
    pub timestamp: i64,
}
