#![allow(dead_code)]

use std::collections::HashMap;

use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use token_vault::ledger::{TokenAccountState, TokenLedger, TransferAuthority, VaultCreation};
use token_vault::pda;
use token_vault::VaultError;

/// In-memory stand-in for SPL Token.
///
/// Mirrors the checks the token program makes on a transfer: matching mints,
/// the authority owning the source (for a PDA, proven by re-deriving it from
/// the seeds), and a sufficient source balance. Each call is all-or-nothing.
/// Lamports are tracked per address so pre-funded PDAs can be modelled.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryLedger {
    program_id: Pubkey,
    accounts: HashMap<Pubkey, TokenAccountState>,
    lamports: HashMap<Pubkey, u64>,
}

/// Rent exemption for a 165 byte token account
pub const TOKEN_ACCOUNT_RENT: u64 = 2_039_280;

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            program_id: token_vault::ID,
            accounts: HashMap::new(),
            lamports: HashMap::new(),
        }
    }

    /// Send lamports to an address, as any wallet can, with no account data
    pub fn fund(&mut self, address: &Pubkey, lamports: u64) {
        *self.lamports.entry(*address).or_default() += lamports;
    }

    pub fn lamports(&self, address: &Pubkey) -> u64 {
        self.lamports.get(address).copied().unwrap_or_default()
    }

    /// Put an arbitrary token account in place
    pub fn insert(&mut self, state: TokenAccountState) {
        self.accounts.insert(state.address, state);
    }

    /// Open a user token account holding `amount` freshly minted tokens
    pub fn open_account(&mut self, mint: &Pubkey, owner: &Pubkey, amount: u64) -> Pubkey {
        let address = Pubkey::new_unique();
        self.accounts.insert(
            address,
            TokenAccountState {
                address,
                mint: *mint,
                owner: *owner,
                amount,
            },
        );
        address
    }

    pub fn balance(&self, address: &Pubkey) -> u64 {
        self.accounts.get(address).map_or(0, |a| a.amount)
    }

    pub fn account(&self, address: &Pubkey) -> Option<&TokenAccountState> {
        self.accounts.get(address)
    }

    pub fn supply(&self, mint: &Pubkey) -> u64 {
        self.accounts
            .values()
            .filter(|a| a.mint == *mint)
            .map(|a| a.amount)
            .sum()
    }
}

impl TokenLedger for MemoryLedger {
    fn load(&self, address: &Pubkey) -> Result<Option<TokenAccountState>> {
        Ok(self.accounts.get(address).cloned())
    }

    fn create_vault(&mut self, address: &Pubkey, mint: &Pubkey, seeds: &[&[u8]]) -> Result<()> {
        if self.accounts.contains_key(address) {
            return Err(ProgramError::AccountAlreadyInitialized.into());
        }
        let derived = Pubkey::create_program_address(seeds, &self.program_id)
            .map_err(|_| ProgramError::InvalidSeeds)?;
        if derived != *address {
            return Err(ProgramError::InvalidSeeds.into());
        }

        let current = self.lamports(address);
        let funded = match VaultCreation::plan(current, TOKEN_ACCOUNT_RENT) {
            VaultCreation::Create { lamports } => lamports,
            VaultCreation::Adopt { top_up } => current + top_up,
        };

        self.lamports.insert(*address, funded);
        self.accounts.insert(
            *address,
            TokenAccountState {
                address: *address,
                mint: *mint,
                owner: *address,
                amount: 0,
            },
        );
        Ok(())
    }

    fn transfer(
        &mut self,
        from: &Pubkey,
        to: &Pubkey,
        authority: TransferAuthority<'_>,
        amount: u64,
    ) -> Result<()> {
        let source = self
            .accounts
            .get(from)
            .cloned()
            .ok_or(ProgramError::UninitializedAccount)?;
        let destination = self
            .accounts
            .get(to)
            .cloned()
            .ok_or(ProgramError::UninitializedAccount)?;

        if source.mint != destination.mint {
            return Err(ProgramError::InvalidAccountData.into());
        }

        let signer = match authority {
            TransferAuthority::Owner(key) => key,
            TransferAuthority::Program { address, seeds } => {
                let derived = Pubkey::create_program_address(seeds, &self.program_id)
                    .map_err(|_| ProgramError::InvalidSeeds)?;
                if derived != address {
                    return Err(ProgramError::InvalidSeeds.into());
                }
                address
            }
        };
        if source.owner != signer {
            return Err(ProgramError::MissingRequiredSignature.into());
        }

        let debited = source
            .amount
            .checked_sub(amount)
            .ok_or(ProgramError::InsufficientFunds)?;
        if from == to {
            return Ok(());
        }
        let credited = destination
            .amount
            .checked_add(amount)
            .ok_or(ProgramError::ArithmeticOverflow)?;

        if let Some(account) = self.accounts.get_mut(from) {
            account.amount = debited;
        }
        if let Some(account) = self.accounts.get_mut(to) {
            account.amount = credited;
        }
        Ok(())
    }
}

/// A mint with a program vault and helpers to drive the vault instructions
pub struct Harness {
    pub ledger: MemoryLedger,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub bump: u8,
}

impl Harness {
    /// New mint whose vault address is derived but not yet initialized
    pub fn new() -> Self {
        let mint = Pubkey::new_unique();
        let (vault, bump) = pda::derive_vault_address(&mint, &token_vault::ID).unwrap();
        Self {
            ledger: MemoryLedger::new(),
            mint,
            vault,
            bump,
        }
    }

    pub fn initialized() -> Self {
        let mut harness = Self::new();
        harness.initialize().unwrap();
        harness
    }

    pub fn initialize(&mut self) -> Result<()> {
        token_vault::processor::initialize_vault(
            &mut self.ledger,
            &token_vault::ID,
            &self.vault,
            &self.mint,
            self.bump,
        )
    }

    /// A user wallet with a token account holding `amount`
    pub fn user(&mut self, amount: u64) -> User {
        let key = Pubkey::new_unique();
        let token_account = self.ledger.open_account(&self.mint, &key, amount);
        User { key, token_account }
    }

    pub fn deposit(&mut self, user: &User, amount: u64) -> Result<u64> {
        token_vault::processor::deposit(
            &mut self.ledger,
            &token_vault::ID,
            &self.vault,
            &user.key,
            &user.token_account,
            amount,
        )
    }

    pub fn withdraw(&mut self, user: &User, amount: u64) -> Result<u64> {
        token_vault::processor::withdraw(
            &mut self.ledger,
            &token_vault::ID,
            &self.vault,
            &user.token_account,
            &user.key,
            amount,
            self.bump,
        )
    }

    pub fn vault_balance(&self) -> u64 {
        self.ledger.balance(&self.vault)
    }

    pub fn balance_of(&self, user: &User) -> u64 {
        self.ledger.balance(&user.token_account)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct User {
    pub key: Pubkey,
    pub token_account: Pubkey,
}

/// Assert that `result` failed with the given vault error
#[track_caller]
pub fn assert_vault_error<T: std::fmt::Debug>(result: Result<T>, expected: VaultError) {
    match result {
        Err(Error::AnchorError(e)) => assert_eq!(
            e.error_code_number,
            u32::from(expected),
            "expected {:?}, got {}",
            expected,
            e.error_name
        ),
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}
