use {
    serde::{Deserialize, Deserializer, Serialize, Serializer},
    std::{collections::HashMap, fmt, str::FromStr},
};

/// 32-byte Fuel identifier (contract id, sub id, asset id, address)
///
/// Printed and parsed as `0x`-prefixed lowercase hex, which is also how
/// HyperFuel encodes these fields on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Bytes32(pub [u8; 32]);

pub type ContractId = Bytes32;
pub type SubId = Bytes32;
pub type AssetId = Bytes32;
/// Holder of a flow record; contracts and addresses share the same space
pub type HolderId = Bytes32;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBytes32Error {
    #[error("invalid hex: {0}")]
    Hex(String),
    #[error("expected 32 bytes, got {0}")]
    Length(usize),
}

impl Bytes32 {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Shortened form for log lines: `0x1234abcd…`
    pub fn short(&self) -> String {
        format!("0x{}…", hex::encode(&self.0[..4]))
    }
}

impl FromStr for Bytes32 {
    type Err = ParseBytes32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let raw = hex::decode(digits).map_err(|e| ParseBytes32Error::Hex(e.to_string()))?;
        let bytes: [u8; 32] = raw
            .as_slice()
            .try_into()
            .map_err(|_| ParseBytes32Error::Length(raw.len()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for Bytes32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bytes32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Cumulative flow for one holder of one asset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowRecord {
    pub value_in: u128,
    pub value_out: u128,
    pub count_in: u64,
    pub count_out: u64,
}

impl FlowRecord {
    /// Record one inbound event. `None` on overflow.
    pub fn credited(self, amount: u64) -> Option<Self> {
        Some(Self {
            value_in: self.value_in.checked_add(u128::from(amount))?,
            count_in: self.count_in.checked_add(1)?,
            ..self
        })
    }

    /// Record one outbound event. `None` on overflow.
    pub fn debited(self, amount: u64) -> Option<Self> {
        Some(Self {
            value_out: self.value_out.checked_add(u128::from(amount))?,
            count_out: self.count_out.checked_add(1)?,
            ..self
        })
    }
}

/// A token class tracked by the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub sub_id: SubId,
    pub minting_contract: ContractId,
    /// Minted minus burned. Negative values are kept as-is (no floor check).
    pub supply: i128,
    pub owners: HashMap<HolderId, FlowRecord>,
}

impl Asset {
    pub fn new(minting_contract: ContractId, sub_id: SubId) -> Self {
        Self {
            sub_id,
            minting_contract,
            supply: 0,
            owners: HashMap::new(),
        }
    }

    pub fn owner(&self, holder: &HolderId) -> Option<&FlowRecord> {
        self.owners.get(holder)
    }
}
