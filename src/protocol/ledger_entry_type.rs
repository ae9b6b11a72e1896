// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

closed_enum! {
    /// Identifies the kind of a ledger entry, carried in its `LedgerEntryType` field.
    /// Codes are the ASCII letters of the matching ledger space.
    pub enum LedgerEntryType: u16 {
        AccountRoot = 0x61,
        DirectoryNode = 0x64,
        GeneratorMap = 0x67,
        RippleState = 0x72,
        Ticket = 0x54,
        SignerList = 0x53,
        Offer = 0x6f,
        Contract = 0x63,
        LedgerHashes = 0x68,
        Amendments = 0x66,
        FeeSettings = 0x73,
        Escrow = 0x75,
        PayChannel = 0x78,
        Check = 0x43,
        DepositPreauth = 0x70,
        NegativeUNL = 0x4e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        assert_eq!(
            LedgerEntryType::from_code(b'a' as u16),
            Some(LedgerEntryType::AccountRoot)
        );
        assert_eq!(
            LedgerEntryType::from_name("RippleState"),
            Some(LedgerEntryType::RippleState)
        );
        assert_eq!(LedgerEntryType::from_code(0), None);
        assert_eq!(LedgerEntryType::Offer.to_json(), serde_json::json!("Offer"));
    }
}
