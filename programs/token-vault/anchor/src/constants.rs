use anchor_lang::prelude::*;

/// Namespace tag for every vault address: `["vault", mint]`
#[constant]
pub const VAULT_SEED: &[u8] = b"vault";

/// Size of an SPL token account, allocated when a vault is created
pub const TOKEN_ACCOUNT_LEN: usize = 165;
