//! Vault address derivation.
//!
//! A vault lives at `find_program_address(["vault", mint], program_id)`. The
//! canonical bump is the first one, searching down from 255, whose address is
//! off the ed25519 curve, so no private key can ever sign for the vault.

use anchor_lang::prelude::*;

use crate::constants::VAULT_SEED;
use crate::error::VaultError;

/// Derive the vault address and canonical bump for `mint`.
///
/// Running out of bumps is a configuration fault for the seeds themselves and
/// is reported as `BumpSearchExhausted`, never as a retryable request error.
pub fn derive_vault_address(mint: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(&[VAULT_SEED, mint.as_ref()], program_id)
        .ok_or_else(|| error!(VaultError::BumpSearchExhausted))
}

/// Rebuild the vault address from a caller supplied bump.
pub fn vault_address_with_bump(mint: &Pubkey, bump: u8, program_id: &Pubkey) -> Result<Pubkey> {
    Pubkey::create_program_address(&[VAULT_SEED, mint.as_ref(), &[bump]], program_id)
        .map_err(|_| error!(VaultError::InvalidBump))
}

/// Check that `bump` is the canonical bump for `mint` and that it lands on `vault`.
pub fn verify_canonical_vault(
    vault: &Pubkey,
    mint: &Pubkey,
    bump: u8,
    program_id: &Pubkey,
) -> Result<()> {
    let (expected, canonical_bump) = derive_vault_address(mint, program_id)?;

    require_eq!(bump, canonical_bump, VaultError::InvalidBump);
    require_keys_eq!(*vault, expected, VaultError::InvalidBump);

    Ok(())
}

/// Seeds presented to the token program in place of a signature.
pub fn vault_signer_seeds<'a>(mint: &'a Pubkey, bump: &'a [u8; 1]) -> [&'a [u8]; 3] {
    [VAULT_SEED, mint.as_ref(), bump]
}
