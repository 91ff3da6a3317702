use {
    crate::ledger::Bytes32,
    serde::{Deserialize, Serialize},
};

/// Receipt kinds this tool asks HyperFuel for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiptKind {
    Transfer,
    TransferOut,
    Mint,
    Burn,
}

impl ReceiptKind {
    pub const ALL: [ReceiptKind; 4] = [
        ReceiptKind::Transfer,
        ReceiptKind::TransferOut,
        ReceiptKind::Mint,
        ReceiptKind::Burn,
    ];

    /// Fuel receipt type tag
    pub const fn tag(self) -> u8 {
        match self {
            ReceiptKind::Transfer => 7,
            ReceiptKind::TransferOut => 8,
            ReceiptKind::Mint => 11,
            ReceiptKind::Burn => 12,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    pub const fn name(self) -> &'static str {
        match self {
            ReceiptKind::Transfer => "transfer",
            ReceiptKind::TransferOut => "transfer_out",
            ReceiptKind::Mint => "mint",
            ReceiptKind::Burn => "burn",
        }
    }
}

/// One receipt as returned by HyperFuel
///
/// Every field besides `receipt_type` is optional on the wire; which ones
/// are present depends on the receipt type and the field selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub receipt_type: u8,
    #[serde(default)]
    pub receipt_index: Option<u64>,
    #[serde(default)]
    pub root_contract_id: Option<Bytes32>,
    #[serde(default)]
    pub tx_id: Option<Bytes32>,
    #[serde(default)]
    pub tx_status: Option<u8>,
    /// Destination contract of a Transfer
    #[serde(default)]
    pub to: Option<Bytes32>,
    /// Destination address of a TransferOut
    #[serde(default)]
    pub to_address: Option<Bytes32>,
    #[serde(default)]
    pub amount: Option<u64>,
    #[serde(default)]
    pub asset_id: Option<Bytes32>,
    #[serde(default)]
    pub val: Option<u64>,
    #[serde(default)]
    pub sub_id: Option<Bytes32>,
    #[serde(default)]
    pub sender: Option<Bytes32>,
    #[serde(default)]
    pub recipient: Option<Bytes32>,
}

impl Receipt {
    pub fn kind(&self) -> Option<ReceiptKind> {
        ReceiptKind::from_tag(self.receipt_type)
    }
}
