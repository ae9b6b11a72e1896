// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

closed_enum! {
    /// Fine-grained outcome reported for a submitted transaction.
    #[allow(non_camel_case_types)]
    pub enum EngineResult: i32 {
        telLOCAL_ERROR = -399 => "Local failure.",
        telBAD_DOMAIN = -398 => "Domain too long.",
        telBAD_PATH_COUNT = -397 => "Malformed: Too many paths.",
        telBAD_PUBLIC_KEY = -396 => "Public key too long.",
        telFAILED_PROCESSING = -395 => "Failed to correctly process transaction.",
        telINSUF_FEE_P = -394 => "Fee insufficient.",
        telNO_DST_PARTIAL = -393 => "Partial payment to create account not allowed.",
        telCAN_NOT_QUEUE = -392 => "Can not queue at this time.",

        temMALFORMED = -299 => "Malformed transaction.",
        temBAD_AMOUNT = -298 => "Can only send positive amounts.",
        temBAD_CURRENCY = -297 => "Malformed: Bad currency.",
        temBAD_EXPIRATION = -296 => "Malformed: Bad expiration.",
        temBAD_FEE = -295 => "Invalid fee, negative or not XRP.",
        temBAD_ISSUER = -294 => "Malformed: Bad issuer.",
        temBAD_LIMIT = -293 => "Limits must be non-negative.",
        temBAD_OFFER = -292 => "Malformed: Bad offer.",
        temBAD_PATH = -291 => "Malformed: Bad path.",
        temBAD_PATH_LOOP = -290 => "Malformed: Loop in path.",
        temBAD_REGKEY = -289 => "Malformed: Regular key cannot be same as master key.",
        temBAD_SEND_XRP_LIMIT = -288 => "Malformed: Limit quality is not allowed for XRP to XRP.",
        temBAD_SEND_XRP_MAX = -287 => "Malformed: Send max is not allowed for XRP to XRP.",
        temBAD_SEND_XRP_NO_DIRECT = -286 => "Malformed: No Ripple direct is not allowed for XRP to XRP.",
        temBAD_SEND_XRP_PARTIAL = -285 => "Malformed: Partial payment is not allowed for XRP to XRP.",
        temBAD_SEND_XRP_PATHS = -284 => "Malformed: Paths are not allowed for XRP to XRP.",
        temBAD_SEQUENCE = -283 => "Malformed: Sequence is not in the past.",
        temBAD_SIGNATURE = -282 => "Malformed: Bad signature.",
        temBAD_SRC_ACCOUNT = -281 => "Malformed: Bad source account.",
        temBAD_TRANSFER_RATE = -280 => "Malformed: Transfer rate must be >= 1.0",
        temDST_IS_SRC = -279 => "Destination may not be source.",
        temDST_NEEDED = -278 => "Destination not specified.",
        temINVALID = -277 => "The transaction is ill-formed.",
        temINVALID_FLAG = -276 => "The transaction has an invalid flag.",
        temREDUNDANT = -275 => "Sends same currency to self.",
        temRIPPLE_EMPTY = -274 => "PathSet with no paths.",
        temDISABLED = -273 => "The transaction requires logic that is currently disabled.",
        temBAD_SIGNER = -272 => "Malformed: No signer may duplicate account or other signers.",
        temBAD_QUORUM = -271 => "Malformed: Quorum is unreachable.",
        temBAD_WEIGHT = -270 => "Malformed: Weight must be a positive value.",
        temBAD_TICK_SIZE = -269 => "Malformed: Tick size out of range.",

        tefFAILURE = -199 => "Failed to apply.",
        tefALREADY = -198 => "The exact transaction was already in this ledger.",
        tefBAD_ADD_AUTH = -197 => "Not authorized to add account.",
        tefBAD_AUTH = -196 => "Transaction's public key is not authorized.",
        tefBAD_LEDGER = -195 => "Ledger in unexpected state.",
        tefCREATED = -194 => "Can't add an already created account.",
        tefEXCEPTION = -193 => "Unexpected program state.",
        tefINTERNAL = -192 => "Internal error.",
        tefNO_AUTH_REQUIRED = -191 => "Auth is not required.",
        tefPAST_SEQ = -190 => "This sequence number has already past.",
        tefWRONG_PRIOR = -189 => "This previous transaction does not match.",
        tefMASTER_DISABLED = -188 => "Master key is disabled.",
        tefMAX_LEDGER = -187 => "Ledger sequence too high.",
        tefBAD_SIGNATURE = -186 => "A signature is provided for a non-signer.",
        tefBAD_QUORUM = -185 => "Signatures provided do not meet the quorum.",
        tefNOT_MULTI_SIGNING = -184 => "Account has no appropriate list of multi-signers.",
        tefBAD_AUTH_MASTER = -183 => "Auth for unclaimed account needs correct master key.",

        terRETRY = -99 => "Retry transaction.",
        terFUNDS_SPENT = -98 => "Can't set password, password set funds already spent.",
        terINSUF_FEE_B = -97 => "Account balance can't pay fee.",
        terNO_ACCOUNT = -96 => "The source account does not exist.",
        terNO_AUTH = -95 => "Not authorized to hold IOUs.",
        terNO_LINE = -94 => "No such line.",
        terOWNERS = -93 => "Non-zero owner count.",
        terPRE_SEQ = -92 => "Missing/inapplicable prior transaction.",
        terLAST = -91 => "Process last.",
        terNO_RIPPLE = -90 => "Path does not permit rippling.",
        terQUEUED = -89 => "Held until escalated fee drops.",

        tesSUCCESS = 0 => "The transaction was applied. Only final in a validated ledger.",

        tecCLAIM = 100 => "Fee claimed. Sequence used. No action.",
        tecPATH_PARTIAL = 101 => "Path could not send full amount.",
        tecUNFUNDED_ADD = 102 => "Insufficient XRP balance for WalletAdd.",
        tecUNFUNDED_OFFER = 103 => "Insufficient balance to fund created offer.",
        tecUNFUNDED_PAYMENT = 104 => "Insufficient XRP balance to send.",
        tecFAILED_PROCESSING = 105 => "Failed to correctly process transaction.",
        tecDIR_FULL = 121 => "Can not add entry to full directory.",
        tecINSUF_RESERVE_LINE = 122 => "Insufficient reserve to add trust line.",
        tecINSUF_RESERVE_OFFER = 123 => "Insufficient reserve to create offer.",
        tecNO_DST = 124 => "Destination does not exist. Send XRP to create it.",
        tecNO_DST_INSUF_XRP = 125 => "Destination does not exist. Too little XRP sent to create it.",
        tecNO_LINE_INSUF_RESERVE = 126 => "No such line. Too little reserve to create it.",
        tecNO_LINE_REDUNDANT = 127 => "Can't set non-existent line to default.",
        tecPATH_DRY = 128 => "Path could not send partial amount.",
        tecUNFUNDED = 129 => "One of _ADD, _OFFER, or _SEND. Deprecated.",
        tecNO_ALTERNATIVE_KEY = 130 => "The operation would remove the ability to sign transactions with the account.",
        tecNO_REGULAR_KEY = 131 => "Regular key is not set.",
        tecOWNERS = 132 => "Non-zero owner count.",
        tecNO_ISSUER = 133 => "Issuer account does not exist.",
        tecNO_AUTH = 134 => "Not authorized to hold asset.",
        tecNO_LINE = 135 => "No such line.",
        tecINSUFF_FEE = 136 => "Insufficient balance to pay fee.",
        tecFROZEN = 137 => "Asset is frozen.",
        tecNO_TARGET = 138 => "Target account does not exist.",
        tecNO_PERMISSION = 139 => "No permission to perform requested operation.",
        tecNO_ENTRY = 140 => "No matching entry found.",
        tecINSUFFICIENT_RESERVE = 141 => "Insufficient reserve to complete requested operation.",
        tecNEED_MASTER_KEY = 142 => "The operation requires the use of the Master Key.",
        tecDST_TAG_NEEDED = 143 => "A destination tag is required.",
        tecINTERNAL = 144 => "An internal error has occurred during processing.",
        tecOVERSIZE = 145 => "Object exceeded serialization limits.",
    }
}

/// Coarse outcome bucket of an engine result, ordered from most to least severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EngineResultClass {
    /// `tel`: the local server rejected the transaction; it was not relayed.
    LocalFailure,
    /// `tem`: the transaction is malformed and can never succeed.
    Malformed,
    /// `tef`: the transaction failed to apply and will not be retried.
    FailedToApply,
    /// `ter`: the transaction could not be applied yet but may succeed later.
    Retry,
    /// `tes`: the transaction was applied.
    Success,
    /// `tec`: the fee was claimed but the transaction had no other effect.
    Claimed,
}

impl EngineResultClass {
    /// Classifies a raw result code by numeric range.
    /// Each bucket is the half-open interval up to the next bucket's lower bound.
    /// Codes below the local-failure range have no class.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -399..=-301 => Some(EngineResultClass::LocalFailure),
            -300..=-201 => Some(EngineResultClass::Malformed),
            -200..=-101 => Some(EngineResultClass::FailedToApply),
            -100..=-1 => Some(EngineResultClass::Retry),
            0..=99 => Some(EngineResultClass::Success),
            c if c >= 100 => Some(EngineResultClass::Claimed),
            _ => None,
        }
    }

    /// The three-letter prefix of the result names in this bucket.
    pub fn prefix(&self) -> &'static str {
        match self {
            EngineResultClass::LocalFailure => "tel",
            EngineResultClass::Malformed => "tem",
            EngineResultClass::FailedToApply => "tef",
            EngineResultClass::Retry => "ter",
            EngineResultClass::Success => "tes",
            EngineResultClass::Claimed => "tec",
        }
    }
}

impl EngineResult {
    pub fn class(&self) -> EngineResultClass {
        // Every declared code lies inside a bucket.
        EngineResultClass::from_code(self.code()).unwrap_or(EngineResultClass::LocalFailure)
    }

    pub fn is_success(&self) -> bool {
        *self == EngineResult::tesSUCCESS
    }

    /// Whether the transaction made it into a ledger (and consumed its fee).
    pub fn is_included(&self) -> bool {
        matches!(
            self.class(),
            EngineResultClass::Success | EngineResultClass::Claimed
        )
    }

    /// Decodes the one-byte `TransactionResult` form used inside metadata,
    /// where only `tes` and `tec` results can appear.
    pub fn from_meta_byte(b: u8) -> Option<Self> {
        Self::from_code(b as i32)
    }

    pub fn to_meta_byte(&self) -> Option<u8> {
        match self.code() {
            c @ 0..=255 => Some(c as u8),
            _ => None,
        }
    }
}
