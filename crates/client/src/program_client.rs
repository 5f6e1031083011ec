//! Instruction builders for the `nft` program.
//!
//! Mirrors what Anchor generates for a client crate: instruction argument structs carrying
//! their discriminators, account structs that know their metas, and `*_ix` helpers.

use anchor_client::anchor_lang::{
    solana_program::{instruction::AccountMeta, system_program},
    Discriminator,
};

use crate::{
    constants::TOKEN_METADATA_PROGRAM_ID,
    edition::{
        associated_token_address, edition_address, master_edition_address, metadata_address,
        mint_authority_address,
    },
    Instruction, InstructionData, Pubkey, ToAccountMetas,
};

/// `ADidMwkBx687QFpAFmYVJs3fqVLQz1BHNfb1dH4o5UgK`
pub static PROGRAM_ID: Pubkey = Pubkey::new_from_array([
    136u8, 251u8, 56u8, 65u8, 129u8, 67u8, 181u8, 2u8, 131u8, 170u8, 147u8, 114u8, 110u8, 210u8,
    60u8, 143u8, 107u8, 70u8, 139u8, 190u8, 24u8, 152u8, 222u8, 250u8, 185u8, 74u8, 151u8,
    203u8, 219u8, 150u8, 0u8, 20u8,
]);

pub mod instruction {
    use super::*;
    use borsh::BorshSerialize;

    #[derive(BorshSerialize, Debug, Clone, PartialEq, Eq)]
    pub struct CreateCollection {
        pub name: String,
        pub symbol: String,
    }

    impl Discriminator for CreateCollection {
        const DISCRIMINATOR: [u8; 8] = [156, 251, 92, 54, 233, 2, 16, 82];
    }

    impl InstructionData for CreateCollection {}

    #[derive(BorshSerialize, Debug, Clone, PartialEq, Eq)]
    pub struct CreateNft {
        pub name: String,
        pub symbol: String,
        pub metadata_uri: String,
        pub supply: u64,
    }

    impl Discriminator for CreateNft {
        const DISCRIMINATOR: [u8; 8] = [231, 119, 61, 97, 217, 46, 142, 109];
    }

    impl InstructionData for CreateNft {}

    #[derive(BorshSerialize, Debug, Clone, PartialEq, Eq)]
    pub struct BuyNft;

    impl Discriminator for BuyNft {
        const DISCRIMINATOR: [u8; 8] = [96, 0, 28, 190, 49, 107, 83, 222];
    }

    impl InstructionData for BuyNft {}
}

pub mod accounts {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CreateCollection {
        pub creator: Pubkey,
        pub mint: Pubkey,
        pub mint_authority: Pubkey,
        pub metadata: Pubkey,
        pub master_edition: Pubkey,
        pub destination: Pubkey,
    }

    impl CreateCollection {
        pub fn new(program_id: &Pubkey, creator: Pubkey, mint: Pubkey) -> Self {
            Self {
                creator,
                mint,
                mint_authority: mint_authority_address(program_id),
                metadata: metadata_address(&mint),
                master_edition: master_edition_address(&mint),
                destination: associated_token_address(&creator, &mint),
            }
        }
    }

    impl ToAccountMetas for CreateCollection {
        fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
            let mut metas = vec![
                AccountMeta::new(self.creator, true),
                AccountMeta::new(self.mint, true),
                AccountMeta::new_readonly(self.mint_authority, false),
                AccountMeta::new(self.metadata, false),
                AccountMeta::new(self.master_edition, false),
                AccountMeta::new(self.destination, false),
            ];
            metas.extend(program_metas());
            metas
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CreateNft {
        pub creator: Pubkey,
        pub mint: Pubkey,
        pub mint_authority: Pubkey,
        pub vault: Pubkey,
        pub metadata: Pubkey,
        pub master_edition: Pubkey,
        pub collection_mint: Pubkey,
    }

    impl CreateNft {
        pub fn new(
            program_id: &Pubkey,
            creator: Pubkey,
            mint: Pubkey,
            collection_mint: Pubkey,
        ) -> Self {
            let mint_authority = mint_authority_address(program_id);
            Self {
                creator,
                mint,
                mint_authority,
                vault: associated_token_address(&mint_authority, &mint),
                metadata: metadata_address(&mint),
                master_edition: master_edition_address(&mint),
                collection_mint,
            }
        }
    }

    impl ToAccountMetas for CreateNft {
        fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
            let mut metas = vec![
                AccountMeta::new(self.creator, true),
                AccountMeta::new(self.mint, true),
                AccountMeta::new_readonly(self.mint_authority, false),
                AccountMeta::new(self.vault, false),
                AccountMeta::new(self.metadata, false),
                AccountMeta::new(self.master_edition, false),
                AccountMeta::new(self.collection_mint, false),
            ];
            metas.extend(program_metas());
            metas
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Buy {
        pub buyer: Pubkey,
        pub master_mint: Pubkey,
        pub mint_authority: Pubkey,
        pub vault: Pubkey,
        pub metadata: Pubkey,
        pub master_edition: Pubkey,
        pub new_mint: Pubkey,
        pub edition_token_account: Pubkey,
        pub new_metadata: Pubkey,
        pub new_edition: Pubkey,
        pub edition_marker: Pubkey,
    }

    impl Buy {
        pub fn new(
            program_id: &Pubkey,
            buyer: Pubkey,
            master_mint: Pubkey,
            new_mint: Pubkey,
            edition_marker: Pubkey,
        ) -> Self {
            let mint_authority = mint_authority_address(program_id);
            Self {
                buyer,
                master_mint,
                mint_authority,
                vault: associated_token_address(&mint_authority, &master_mint),
                metadata: metadata_address(&master_mint),
                master_edition: master_edition_address(&master_mint),
                new_mint,
                edition_token_account: associated_token_address(&buyer, &new_mint),
                new_metadata: metadata_address(&new_mint),
                new_edition: edition_address(&new_mint),
                edition_marker,
            }
        }
    }

    impl ToAccountMetas for Buy {
        fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
            let mut metas = vec![
                AccountMeta::new(self.buyer, true),
                AccountMeta::new_readonly(self.master_mint, false),
                AccountMeta::new_readonly(self.mint_authority, false),
                AccountMeta::new(self.vault, false),
                AccountMeta::new(self.metadata, false),
                AccountMeta::new(self.master_edition, false),
                AccountMeta::new(self.new_mint, true),
                AccountMeta::new(self.edition_token_account, false),
                AccountMeta::new(self.new_metadata, false),
                AccountMeta::new(self.new_edition, false),
                AccountMeta::new(self.edition_marker, false),
            ];
            metas.extend(program_metas());
            metas
        }
    }

    fn program_metas() -> [AccountMeta; 4] {
        [
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(spl_associated_token_account::ID, false),
            AccountMeta::new_readonly(TOKEN_METADATA_PROGRAM_ID, false),
        ]
    }
}

pub fn create_collection_ix(
    program_id: Pubkey,
    args: instruction::CreateCollection,
    accounts: accounts::CreateCollection,
) -> Instruction {
    Instruction {
        program_id,
        data: args.data(),
        accounts: accounts.to_account_metas(None),
    }
}

pub fn create_nft_ix(
    program_id: Pubkey,
    args: instruction::CreateNft,
    accounts: accounts::CreateNft,
) -> Instruction {
    Instruction {
        program_id,
        data: args.data(),
        accounts: accounts.to_account_metas(None),
    }
}

pub fn buy_nft_ix(program_id: Pubkey, accounts: accounts::Buy) -> Instruction {
    Instruction {
        program_id,
        data: instruction::BuyNft.data(),
        accounts: accounts.to_account_metas(None),
    }
}
