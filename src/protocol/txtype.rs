// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

closed_enum! {
    /// Identifies the kind of a transaction, carried in its `TransactionType` field.
    pub enum TransactionType: u16 {
        Payment = 0,
        EscrowCreate = 1,
        EscrowFinish = 2,
        AccountSet = 3,
        EscrowCancel = 4,
        SetRegularKey = 5,
        NickNameSet = 6,
        OfferCreate = 7,
        OfferCancel = 8,
        Contract = 9,
        TicketCreate = 10,
        TicketCancel = 11,
        SignerListSet = 12,
        PaymentChannelCreate = 13,
        PaymentChannelFund = 14,
        PaymentChannelClaim = 15,
        CheckCreate = 16,
        CheckCash = 17,
        CheckCancel = 18,
        DepositPreauth = 19,
        TrustSet = 20,
        AccountDelete = 21,
        /// Pseudo-transaction injected by validators.
        EnableAmendment = 100,
        /// Pseudo-transaction injected by validators.
        SetFee = 101,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        assert_eq!(TransactionType::from_code(0), Some(TransactionType::Payment));
        assert_eq!(TransactionType::from_code(20), Some(TransactionType::TrustSet));
        assert_eq!(
            TransactionType::from_name("OfferCreate"),
            Some(TransactionType::OfferCreate)
        );
        assert_eq!(TransactionType::SetFee.code(), 101);
    }

    #[test]
    fn unknown_code_is_not_found() {
        assert_eq!(TransactionType::from_code(22), None);
        assert_eq!(TransactionType::from_code(u16::MAX), None);
        assert_eq!(TransactionType::from_name("Teleport"), None);
    }

    #[test]
    fn codes_unique() {
        for t in TransactionType::ALL {
            assert_eq!(TransactionType::from_code(t.code()), Some(*t));
            assert_eq!(TransactionType::from_name(t.name()), Some(*t));
        }
    }
}
