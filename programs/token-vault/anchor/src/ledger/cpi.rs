use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount};
use anchor_spl::token::{self, InitializeAccount3, TokenAccount, Transfer};

use super::{TokenAccountState, TokenLedger, TransferAuthority, VaultCreation};
use crate::constants::TOKEN_ACCOUNT_LEN;
use crate::error::VaultError;

/// Pays rent for accounts the ledger creates
pub struct Funding<'info> {
    pub payer: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
    pub lamports: u64,
}

/// [`TokenLedger`] backed by the SPL Token program.
///
/// Only sees the accounts handed to the current instruction; asking for any
/// other address fails with `UnknownAccount`.
pub struct CpiLedger<'info> {
    token_program: AccountInfo<'info>,
    accounts: Vec<AccountInfo<'info>>,
    funding: Option<Funding<'info>>,
}

impl<'info> CpiLedger<'info> {
    pub fn new(token_program: AccountInfo<'info>, accounts: Vec<AccountInfo<'info>>) -> Self {
        Self {
            token_program,
            accounts,
            funding: None,
        }
    }

    pub fn with_funding(mut self, funding: Funding<'info>) -> Self {
        self.funding = Some(funding);
        self
    }

    fn account(&self, address: &Pubkey) -> Result<AccountInfo<'info>> {
        self.accounts
            .iter()
            .find(|info| info.key == address)
            .cloned()
            .ok_or_else(|| error!(VaultError::UnknownAccount))
    }
}

impl<'info> TokenLedger for CpiLedger<'info> {
    fn load(&self, address: &Pubkey) -> Result<Option<TokenAccountState>> {
        let info = self.account(address)?;
        if info.data_is_empty() {
            return Ok(None);
        }
        if info.owner != &token::ID {
            return Err(anchor_lang::error::ErrorCode::AccountOwnedByWrongProgram.into());
        }

        let data = info.try_borrow_data()?;
        let mut slice: &[u8] = &data;
        let account = TokenAccount::try_deserialize(&mut slice)?;

        Ok(Some(TokenAccountState {
            address: *address,
            mint: account.mint,
            owner: account.owner,
            amount: account.amount,
        }))
    }

    fn create_vault(&mut self, address: &Pubkey, mint: &Pubkey, seeds: &[&[u8]]) -> Result<()> {
        let funding = self
            .funding
            .as_ref()
            .ok_or_else(|| error!(VaultError::UnknownAccount))?;
        let vault = self.account(address)?;
        let mint = self.account(mint)?;
        let signer = [seeds];

        // The PDA signs its own creation; nobody holds its key
        match VaultCreation::plan(vault.lamports(), funding.lamports) {
            VaultCreation::Create { lamports } => system_program::create_account(
                CpiContext::new_with_signer(
                    funding.system_program.clone(),
                    CreateAccount {
                        from: funding.payer.clone(),
                        to: vault.clone(),
                    },
                    &signer,
                ),
                lamports,
                TOKEN_ACCOUNT_LEN as u64,
                &token::ID,
            )?,
            VaultCreation::Adopt { top_up } => {
                msg!("Vault {} was pre-funded, topping up {}", address, top_up);
                if top_up > 0 {
                    system_program::transfer(
                        CpiContext::new(
                            funding.system_program.clone(),
                            system_program::Transfer {
                                from: funding.payer.clone(),
                                to: vault.clone(),
                            },
                        ),
                        top_up,
                    )?;
                }
                system_program::allocate(
                    CpiContext::new_with_signer(
                        funding.system_program.clone(),
                        Allocate {
                            account_to_allocate: vault.clone(),
                        },
                        &signer,
                    ),
                    TOKEN_ACCOUNT_LEN as u64,
                )?;
                system_program::assign(
                    CpiContext::new_with_signer(
                        funding.system_program.clone(),
                        Assign {
                            account_to_assign: vault.clone(),
                        },
                        &signer,
                    ),
                    &token::ID,
                )?;
            }
        }

        token::initialize_account3(CpiContext::new(
            self.token_program.clone(),
            InitializeAccount3 {
                account: vault.clone(),
                mint,
                authority: vault,
            },
        ))
    }

    fn transfer(
        &mut self,
        from: &Pubkey,
        to: &Pubkey,
        authority: TransferAuthority<'_>,
        amount: u64,
    ) -> Result<()> {
        let accounts = Transfer {
            from: self.account(from)?,
            to: self.account(to)?,
            authority: self.account(&authority.key())?,
        };

        match authority {
            TransferAuthority::Owner(_) => token::transfer(
                CpiContext::new(self.token_program.clone(), accounts),
                amount,
            ),
            TransferAuthority::Program { seeds, .. } => {
                let signer = [seeds];
                token::transfer(
                    CpiContext::new_with_signer(self.token_program.clone(), accounts, &signer),
                    amount,
                )
            }
        }
    }
}
