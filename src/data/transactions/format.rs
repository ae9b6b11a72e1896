// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::FormatError;
use crate::codec::Field;
use crate::data::STObject;
use crate::protocol::TransactionType;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Requirement {
    Required,
    Optional,
}

use Requirement::*;

/// Fields every transaction may carry.
const COMMON_FIELDS: &[(Field, Requirement)] = &[
    (Field::TransactionType, Required),
    (Field::Flags, Optional),
    (Field::SourceTag, Optional),
    (Field::Account, Required),
    (Field::Sequence, Required),
    (Field::PreviousTxnID, Optional),
    (Field::LastLedgerSequence, Optional),
    (Field::AccountTxnID, Optional),
    (Field::Fee, Required),
    (Field::OperationLimit, Optional),
    (Field::Memos, Optional),
    (Field::SigningPubKey, Required),
    (Field::TxnSignature, Optional),
    (Field::Signers, Optional),
];

fn specific_fields(tx_type: TransactionType) -> &'static [(Field, Requirement)] {
    match tx_type {
        TransactionType::Payment => &[
            (Field::Destination, Required),
            (Field::Amount, Required),
            (Field::SendMax, Optional),
            (Field::Paths, Optional),
            (Field::InvoiceID, Optional),
            (Field::DestinationTag, Optional),
            (Field::DeliverMin, Optional),
        ],
        TransactionType::EscrowCreate => &[
            (Field::Destination, Required),
            (Field::Amount, Required),
            (Field::Condition, Optional),
            (Field::CancelAfter, Optional),
            (Field::FinishAfter, Optional),
            (Field::DestinationTag, Optional),
        ],
        TransactionType::EscrowFinish => &[
            (Field::Owner, Required),
            (Field::OfferSequence, Required),
            (Field::Fulfillment, Optional),
            (Field::Condition, Optional),
        ],
        TransactionType::AccountSet => &[
            (Field::EmailHash, Optional),
            (Field::WalletLocator, Optional),
            (Field::WalletSize, Optional),
            (Field::MessageKey, Optional),
            (Field::Domain, Optional),
            (Field::TransferRate, Optional),
            (Field::SetFlag, Optional),
            (Field::ClearFlag, Optional),
            (Field::TickSize, Optional),
        ],
        TransactionType::EscrowCancel => &[
            (Field::Owner, Required),
            (Field::OfferSequence, Required),
        ],
        TransactionType::SetRegularKey => &[(Field::RegularKey, Optional)],
        TransactionType::NickNameSet => &[
            (Field::MinimumOffer, Optional),
            (Field::Signature, Optional),
        ],
        TransactionType::OfferCreate => &[
            (Field::TakerPays, Required),
            (Field::TakerGets, Required),
            (Field::Expiration, Optional),
            (Field::OfferSequence, Optional),
        ],
        TransactionType::OfferCancel => &[(Field::OfferSequence, Required)],
        TransactionType::Contract => &[
            (Field::Expiration, Required),
            (Field::BondAmount, Required),
            (Field::StampEscrow, Required),
            (Field::RippleEscrow, Required),
            (Field::CreateCode, Optional),
            (Field::FundCode, Optional),
            (Field::RemoveCode, Optional),
            (Field::ExpireCode, Optional),
        ],
        TransactionType::TicketCreate => &[(Field::TicketCount, Required)],
        TransactionType::TicketCancel => &[(Field::TicketID, Required)],
        TransactionType::SignerListSet => &[
            (Field::SignerQuorum, Required),
            (Field::SignerEntries, Optional),
        ],
        TransactionType::PaymentChannelCreate => &[
            (Field::Destination, Required),
            (Field::Amount, Required),
            (Field::SettleDelay, Required),
            (Field::PublicKey, Required),
            (Field::CancelAfter, Optional),
            (Field::DestinationTag, Optional),
        ],
        TransactionType::PaymentChannelFund => &[
            (Field::Channel, Required),
            (Field::Amount, Required),
            (Field::Expiration, Optional),
        ],
        TransactionType::PaymentChannelClaim => &[
            (Field::Channel, Required),
            (Field::Amount, Optional),
            (Field::Balance, Optional),
            (Field::Signature, Optional),
            (Field::PublicKey, Optional),
        ],
        TransactionType::CheckCreate => &[
            (Field::Destination, Required),
            (Field::SendMax, Required),
            (Field::Expiration, Optional),
            (Field::DestinationTag, Optional),
            (Field::InvoiceID, Optional),
        ],
        TransactionType::CheckCash => &[
            (Field::CheckID, Required),
            (Field::Amount, Optional),
            (Field::DeliverMin, Optional),
        ],
        TransactionType::CheckCancel => &[(Field::CheckID, Required)],
        TransactionType::DepositPreauth => &[
            (Field::Authorize, Optional),
            (Field::Unauthorize, Optional),
        ],
        TransactionType::TrustSet => &[
            (Field::LimitAmount, Optional),
            (Field::QualityIn, Optional),
            (Field::QualityOut, Optional),
        ],
        TransactionType::AccountDelete => &[
            (Field::Destination, Required),
            (Field::DestinationTag, Optional),
        ],
        TransactionType::EnableAmendment => &[
            (Field::LedgerSequence, Required),
            (Field::Amendment, Required),
        ],
        TransactionType::SetFee => &[
            (Field::LedgerSequence, Optional),
            (Field::BaseFee, Required),
            (Field::ReferenceFeeUnits, Required),
            (Field::ReserveBase, Required),
            (Field::ReserveIncrement, Required),
        ],
    }
}

/// The set of fields a transaction of some type must or may carry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxFormat {
    pub tx_type: TransactionType,
    fields: HashMap<Field, Requirement>,
}

lazy_static! {
    static ref FORMATS: HashMap<TransactionType, TxFormat> = TransactionType::ALL
        .iter()
        .map(|t| (*t, TxFormat::build(*t)))
        .collect();
}

impl TxFormat {
    fn build(tx_type: TransactionType) -> Self {
        let fields = COMMON_FIELDS
            .iter()
            .chain(specific_fields(tx_type))
            .copied()
            .collect();
        TxFormat { tx_type, fields }
    }

    pub fn for_type(tx_type: TransactionType) -> &'static TxFormat {
        &FORMATS[&tx_type]
    }

    /// How the format treats a field, or `None` if the field is not allowed.
    pub fn requirement(&self, field: Field) -> Option<Requirement> {
        self.fields.get(&field).copied()
    }

    /// Required fields in canonical order.
    pub fn required_fields(&self) -> Vec<Field> {
        let mut out: Vec<Field> = self
            .fields
            .iter()
            .filter(|(_, r)| **r == Required)
            .map(|(f, _)| *f)
            .collect();
        out.sort();
        out
    }

    /// Reports the first missing required field, then the first field the format does not allow.
    /// Fields that are never serialized (e.g. `Hash`) are ignored.
    pub fn check(&self, obj: &STObject) -> Result<(), FormatError> {
        if let Some(missing) = self.required_fields().into_iter().find(|f| !obj.has(*f)) {
            return Err(FormatError::MissingField(self.tx_type, missing));
        }
        match obj
            .fields()
            .find(|f| f.is_serialized() && self.requirement(*f).is_none())
        {
            Some(unexpected) => Err(FormatError::UnexpectedField(self.tx_type, unexpected)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_a_format() {
        for t in TransactionType::ALL {
            let format = TxFormat::for_type(*t);
            assert_eq!(format.tx_type, *t);
            assert_eq!(format.requirement(Field::Fee), Some(Required));
            assert_eq!(format.requirement(Field::TxnSignature), Some(Optional));
        }
    }

    #[test]
    fn payment_format() {
        let format = TxFormat::for_type(TransactionType::Payment);
        assert_eq!(format.requirement(Field::Destination), Some(Required));
        assert_eq!(format.requirement(Field::Paths), Some(Optional));
        assert_eq!(format.requirement(Field::TakerPays), None);
        assert_eq!(
            format.required_fields(),
            vec![
                Field::TransactionType,
                Field::Sequence,
                Field::Amount,
                Field::Fee,
                Field::SigningPubKey,
                Field::Account,
                Field::Destination,
            ]
        );
    }
}
