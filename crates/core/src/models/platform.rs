use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of an investment platform.
/// Purely descriptive — it does not change any calculation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Equity/real-estate crowdfunding portals
    Crowdfunding,
    /// Peer-to-peer lending marketplaces
    P2pLending,
    /// Direct real-estate deals
    RealEstate,
    /// Managed funds
    Fund,
    /// Anything else (private loans, one-off deals)
    Other,
}

impl std::fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformKind::Crowdfunding => write!(f, "Crowdfunding"),
            PlatformKind::P2pLending => write!(f, "P2P Lending"),
            PlatformKind::RealEstate => write!(f, "Real Estate"),
            PlatformKind::Fund => write!(f, "Fund"),
            PlatformKind::Other => write!(f, "Other"),
        }
    }
}

/// A platform that groups investments (e.g., a crowdfunding portal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Unique identifier
    pub id: Uuid,

    /// Display name (e.g., "EstateGuru", "Mintos")
    pub name: String,

    /// Platform category
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(name: impl Into<String>, kind: PlatformKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
        }
    }
}
