use anchor_lang::prelude::*;

#[error_code]
pub enum VaultError {
    #[msg("Invalid amount: must be greater than zero")]
    InvalidAmount,

    #[msg("Bump does not reproduce the vault address")]
    InvalidBump,

    #[msg("Signer is not the authority for this transfer")]
    Unauthorized,

    #[msg("Vault already initialized for this mint")]
    AlreadyInitialized,

    #[msg("Error: Insufficient funds in vault")]
    InsufficientFunds,

    #[msg("Depositor token account has insufficient funds")]
    InsufficientDepositorFunds,

    // Configuration level: no off-curve address exists for these seeds
    #[msg("No valid bump found for the vault seeds")]
    BumpSearchExhausted,

    #[msg("Vault has not been initialized")]
    VaultNotInitialized,

    #[msg("Vault account is not the derived vault for its mint")]
    InvalidVault,

    #[msg("Token account mint does not match the vault mint")]
    MintMismatch,

    #[msg("Account was not supplied to the instruction")]
    UnknownAccount,
}

/// Whether `err` is the given vault error, ignoring where it was raised
#[cfg(test)]
pub(crate) fn is_vault_error(err: &anchor_lang::error::Error, expected: VaultError) -> bool {
    matches!(err, anchor_lang::error::Error::AnchorError(e) if e.error_code_number == u32::from(expected))
}
