//! The token ledger seam.
//!
//! Balances live in SPL Token, not in this program. Every instruction reads
//! token accounts and requests transfers through [`TokenLedger`], which the
//! program implements with CPIs ([`CpiLedger`]) and host tests implement in
//! memory.
//!
//! Implementations must apply one instruction at a time per account and must
//! make each call all-or-nothing. On chain the runtime provides both: it
//! serializes writes to an account and reverts every effect of a failed
//! instruction. The processor holds no locks of its own and relies on this.

use anchor_lang::prelude::*;

mod cpi;

pub use cpi::*;

/// Snapshot of an SPL token account as seen by the processor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenAccountState {
    pub address: Pubkey,
    pub mint: Pubkey,
    /// The account's spending authority
    pub owner: Pubkey,
    pub amount: u64,
}

/// Who authorizes a transfer out of the source account
#[derive(Clone, Copy, Debug)]
pub enum TransferAuthority<'a> {
    /// A key that signed the transaction
    Owner(Pubkey),
    /// A program derived address, proven by its seeds instead of a signature
    Program {
        address: Pubkey,
        seeds: &'a [&'a [u8]],
    },
}

impl TransferAuthority<'_> {
    pub fn key(&self) -> Pubkey {
        match self {
            TransferAuthority::Owner(key) => *key,
            TransferAuthority::Program { address, .. } => *address,
        }
    }
}

/// How the vault account comes into existence, given the lamports already at
/// its address. Anyone can send lamports to a PDA before it is created, and
/// `create_account` refuses any address that holds some.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VaultCreation {
    /// Empty address: fund, allocate and assign in one `create_account`
    Create { lamports: u64 },
    /// Pre-funded address: top up to rent exemption, then allocate and assign
    Adopt { top_up: u64 },
}

impl VaultCreation {
    pub fn plan(current_lamports: u64, rent_exempt: u64) -> Self {
        if current_lamports == 0 {
            VaultCreation::Create {
                lamports: rent_exempt,
            }
        } else {
            VaultCreation::Adopt {
                top_up: rent_exempt.saturating_sub(current_lamports),
            }
        }
    }
}

pub trait TokenLedger {
    /// Load a token account, or `None` if nothing is initialized at `address`
    fn load(&self, address: &Pubkey) -> Result<Option<TokenAccountState>>;

    /// Create an empty token account for `mint` at the program derived
    /// `address`, with that same address as its authority. Lamports already
    /// sent to `address` must not block creation.
    fn create_vault(&mut self, address: &Pubkey, mint: &Pubkey, seeds: &[&[u8]]) -> Result<()>;

    /// Move `amount` from `from` to `to`. The ledger enforces the authority
    /// and the source balance itself.
    fn transfer(
        &mut self,
        from: &Pubkey,
        to: &Pubkey,
        authority: TransferAuthority<'_>,
        amount: u64,
    ) -> Result<()>;
}
