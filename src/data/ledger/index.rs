// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

//! Ledger entry indexes: the SHA-512-half of a ledger space prefix followed by
//! the key material of the entry.

use crate::codec::BytesSink;
use crate::crypto::{HalfSha512, Hash256};
use crate::data::basics::{AccountId, Currency};
use crate::protocol::LedgerSpace;

fn index(space: LedgerSpace, parts: &[&[u8]]) -> Hash256 {
    let mut h = HalfSha512::new();
    h.add_bytes(&space.bytes());
    for part in parts {
        h.add_bytes(part);
    }
    h.finish()
}

pub fn account_root(account: &AccountId) -> Hash256 {
    index(LedgerSpace::Account, &[&account.0])
}

/// Root page of the directory listing everything an account owns.
pub fn owner_directory(account: &AccountId) -> Hash256 {
    index(LedgerSpace::OwnerDirectory, &[&account.0])
}

/// Page `page` of the directory rooted at `root`; page zero is the root itself.
pub fn directory_page(root: &Hash256, page: u64) -> Hash256 {
    if page == 0 {
        return *root;
    }
    index(LedgerSpace::DirectoryNode, &[&root.0, &page.to_be_bytes()])
}

pub fn offer(account: &AccountId, sequence: u32) -> Hash256 {
    index(LedgerSpace::Offer, &[&account.0, &sequence.to_be_bytes()])
}

/// The trust line between two accounts; the accounts are ordered so both sides get the same index.
pub fn ripple_state(a: &AccountId, b: &AccountId, currency: &Currency) -> Hash256 {
    let (low, high) = if a < b { (a, b) } else { (b, a) };
    index(
        LedgerSpace::RippleState,
        &[&low.0, &high.0, &currency.0],
    )
}

pub fn signer_list(account: &AccountId) -> Hash256 {
    // only signer list id 0 is in use
    index(LedgerSpace::SignerList, &[&account.0, &0u32.to_be_bytes()])
}

pub fn ticket(account: &AccountId, sequence: u32) -> Hash256 {
    index(LedgerSpace::Ticket, &[&account.0, &sequence.to_be_bytes()])
}

pub fn escrow(account: &AccountId, sequence: u32) -> Hash256 {
    index(LedgerSpace::Escrow, &[&account.0, &sequence.to_be_bytes()])
}

pub fn check(account: &AccountId, sequence: u32) -> Hash256 {
    index(LedgerSpace::Check, &[&account.0, &sequence.to_be_bytes()])
}

pub fn pay_channel(source: &AccountId, destination: &AccountId, sequence: u32) -> Hash256 {
    index(
        LedgerSpace::PayChannel,
        &[&source.0, &destination.0, &sequence.to_be_bytes()],
    )
}

pub fn deposit_preauth(owner: &AccountId, authorized: &AccountId) -> Hash256 {
    index(LedgerSpace::DepositPreauth, &[&owner.0, &authorized.0])
}

/// The list of recent ledger hashes.
pub fn skip_list() -> Hash256 {
    index(LedgerSpace::SkipList, &[])
}

pub fn amendments() -> Hash256 {
    index(LedgerSpace::Amendments, &[])
}

pub fn fee_settings() -> Hash256 {
    index(LedgerSpace::FeeSettings, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::sha512_half;

    #[test]
    fn account_root_layout() {
        let account = AccountId([0x42; 20]);
        let mut bytes = vec![0, b'a'];
        bytes.extend_from_slice(&account.0);
        assert_eq!(account_root(&account), sha512_half(&bytes));
        assert_ne!(account_root(&account), owner_directory(&account));
    }

    #[test]
    fn known_singletons() {
        assert_eq!(
            fee_settings().to_string(),
            "4BC50C9B0D8515D3EAAE1E74B29A95804346C491EE1A95BF25E4AAB854A6A651"
        );
        assert_eq!(
            amendments().to_string(),
            "7DB0788C020F02780A673DC74757F23823FA3014C1866E72CC4CD8B226CD6EF4"
        );
        assert_eq!(
            skip_list().to_string(),
            "B4979A36CDC7F3D3D5C31A4EAE2AC7D7209DDA877588B9AFC66799692AB0D66B"
        );
    }

    #[test]
    fn ripple_state_is_symmetric() {
        let a = AccountId([1; 20]);
        let b = AccountId([2; 20]);
        let usd: Currency = "USD".parse().unwrap();
        assert_eq!(ripple_state(&a, &b, &usd), ripple_state(&b, &a, &usd));
        assert_ne!(
            ripple_state(&a, &b, &usd),
            ripple_state(&a, &b, &"EUR".parse().unwrap())
        );
    }

    #[test]
    fn sequence_keyed() {
        let a = AccountId([1; 20]);
        assert_ne!(offer(&a, 1), offer(&a, 2));
        assert_ne!(offer(&a, 1), check(&a, 1));
        assert_ne!(escrow(&a, 1), ticket(&a, 1));
    }

    #[test]
    fn directory_pages() {
        let root = owner_directory(&AccountId([1; 20]));
        assert_eq!(directory_page(&root, 0), root);
        assert_ne!(directory_page(&root, 1), root);
        assert_ne!(directory_page(&root, 1), directory_page(&root, 2));
    }
}
