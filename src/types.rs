//! Data type definitions for the Dataset Access Marketplace

use odra::prelude::*;
use odra::casper_types::U512;

/// Kind of a minted token
#[odra::odra_type]
#[derive(Default, Copy)]
pub enum TokenKind {
    /// Permanent, transferable record asserting control of a dataset
    Ownership = 0,
    /// Temporary, non-transferable-by-default record granting time-boxed access
    #[default]
    Access = 1,
}

impl TokenKind {
    /// Convert from u8 to TokenKind
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(TokenKind::Ownership),
            1 => Some(TokenKind::Access),
            _ => None,
        }
    }

    /// Convert TokenKind to u8
    pub fn to_u8(&self) -> u8 {
        match self {
            TokenKind::Ownership => 0,
            TokenKind::Access => 1,
        }
    }
}

/// Access durations offered by the price table
#[odra::odra_type]
#[derive(Default, Copy)]
pub enum AccessDuration {
    /// 1 hour
    #[default]
    Hour = 0,
    /// 24 hours
    Day = 1,
    /// 7 days
    Week = 2,
    /// 30 days
    Month = 3,
    /// 90 days
    Quarter = 4,
    /// 365 days
    Year = 5,
}

impl AccessDuration {
    /// All durations, in price-table order
    pub const ALL: [AccessDuration; 6] = [
        AccessDuration::Hour,
        AccessDuration::Day,
        AccessDuration::Week,
        AccessDuration::Month,
        AccessDuration::Quarter,
        AccessDuration::Year,
    ];

    /// Convert from u8 to AccessDuration
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(AccessDuration::Hour),
            1 => Some(AccessDuration::Day),
            2 => Some(AccessDuration::Week),
            3 => Some(AccessDuration::Month),
            4 => Some(AccessDuration::Quarter),
            5 => Some(AccessDuration::Year),
            _ => None,
        }
    }

    /// Convert AccessDuration to u8
    pub fn to_u8(&self) -> u8 {
        match self {
            AccessDuration::Hour => 0,
            AccessDuration::Day => 1,
            AccessDuration::Week => 2,
            AccessDuration::Month => 3,
            AccessDuration::Quarter => 4,
            AccessDuration::Year => 5,
        }
    }

    /// Duration span in milliseconds (the block-time unit)
    pub fn millis(&self) -> u64 {
        match self {
            AccessDuration::Hour => constants::HOUR_MS,
            AccessDuration::Day => constants::DAY_MS,
            AccessDuration::Week => constants::WEEK_MS,
            AccessDuration::Month => constants::MONTH_MS,
            AccessDuration::Quarter => constants::QUARTER_MS,
            AccessDuration::Year => constants::YEAR_MS,
        }
    }
}

/// Price tiers for a dataset, one per access duration.
/// A zero price means the tier is disabled.
#[odra::odra_type]
#[derive(Default)]
pub struct PriceTable {
    /// Price for 1 hour of access, in motes
    pub hourly: U512,
    /// Price for 24 hours of access
    pub daily: U512,
    /// Price for 7 days of access
    pub weekly: U512,
    /// Price for 30 days of access
    pub monthly: U512,
    /// Price for 90 days of access
    pub quarterly: U512,
    /// Price for 365 days of access
    pub yearly: U512,
}

impl PriceTable {
    /// Price for a given duration
    pub fn price(&self, duration: AccessDuration) -> U512 {
        match duration {
            AccessDuration::Hour => self.hourly,
            AccessDuration::Day => self.daily,
            AccessDuration::Week => self.weekly,
            AccessDuration::Month => self.monthly,
            AccessDuration::Quarter => self.quarterly,
            AccessDuration::Year => self.yearly,
        }
    }
}

/// A single royalty split entry configured by the dataset owner
#[odra::odra_type]
pub struct RoyaltyEntry {
    /// Address receiving this royalty share
    pub recipient: Address,
    /// Share of each purchase, in basis points (10000 = 100%)
    pub basis_points: u64,
}

/// A token record held by the Access Token Registry
#[odra::odra_type]
pub struct TokenRecord {
    /// Unique identifier, monotonically assigned, never reused
    pub token_id: u64,
    /// Back-reference to the dataset this token relates to
    pub dataset_id: u64,
    /// Ownership or Access
    pub kind: TokenKind,
    /// Expiry timestamp in milliseconds; 0 means no expiry (Ownership)
    pub expires_at: u64,
    /// Whether the token can currently be transferred
    pub transferable: bool,
    /// Address that authorized the grant (dataset owner for Access tokens)
    pub granted_by: Address,
    /// Current controlling address
    pub holder: Address,
    /// Timestamp when the token was minted
    pub minted_at: u64,
}

/// A dataset listed on the marketplace
#[odra::odra_type]
pub struct Dataset {
    /// Unique identifier for this dataset
    pub dataset_id: u64,
    /// Address of the dataset owner
    pub owner: Address,
    /// Opaque metadata reference (e.g. a content-addressed link); never parsed
    pub metadata_ref: String,
    /// Price per access duration tier
    pub prices: PriceTable,
    /// Royalty splits applied to each purchase; shares sum to <= 1000 bps
    pub royalties: Vec<RoyaltyEntry>,
    /// Whether the dataset is available for purchase
    pub is_active: bool,
    /// Timestamp when the dataset was created
    pub created_at: u64,
    /// Total number of access purchases
    pub total_sales: u64,
    /// Total revenue accumulated across purchases, in motes
    pub total_revenue: U512,
    /// ID of the canonical Ownership token minted at creation
    pub ownership_token_id: u64,
}

/// Record of an access purchase, immutable once written
#[odra::odra_type]
pub struct PurchaseRecord {
    /// Globally unique purchase identifier
    pub purchase_id: u64,
    /// ID of the purchased dataset
    pub dataset_id: u64,
    /// Address of the buyer
    pub buyer: Address,
    /// Duration tier that was purchased
    pub duration: AccessDuration,
    /// Tier price charged (excess payment is refunded, not recorded)
    pub price_paid: U512,
    /// Timestamp of the purchase
    pub purchased_at: u64,
    /// Timestamp when the granted access expires
    pub expires_at: u64,
    /// ID of the Access token minted for this purchase
    pub token_id: u64,
}

/// Result of an access-details query
#[odra::odra_type]
#[derive(Default)]
pub struct AccessDetails {
    /// Whether the user currently has valid access
    pub has_access: bool,
    /// Expiry of the selected token; 0 for owner access
    pub expires_at: u64,
    /// ID of the selected token; 0 for owner access
    pub token_id: u64,
}

/// Marketplace statistics
#[odra::odra_type]
#[derive(Default)]
pub struct MarketplaceStats {
    /// Total number of datasets created
    pub dataset_count: u64,
    /// Total number of access purchases
    pub purchase_count: u64,
    /// Total trading volume in motes
    pub total_volume: U512,
    /// Total platform fees collected
    pub platform_fee_collected: U512,
}

/// Constants for validation and fee math
pub mod constants {
    /// Maximum length for metadata references
    pub const MAX_METADATA_REF_LENGTH: usize = 256;
    /// Basis-point denominator (10000 bps = 100%)
    pub const BPS_DENOMINATOR: u64 = 10_000;
    /// Maximum platform fee (10%)
    pub const MAX_PLATFORM_FEE_BPS: u64 = 1_000;
    /// Maximum combined royalty share per dataset (10%)
    pub const MAX_ROYALTY_BPS: u64 = 1_000;
    /// Maximum number of royalty entries per dataset
    pub const MAX_ROYALTY_ENTRIES: usize = 10;

    /// 1 hour in milliseconds
    pub const HOUR_MS: u64 = 3_600_000;
    /// 24 hours in milliseconds
    pub const DAY_MS: u64 = 86_400_000;
    /// 7 days in milliseconds
    pub const WEEK_MS: u64 = 604_800_000;
    /// 30 days in milliseconds
    pub const MONTH_MS: u64 = 2_592_000_000;
    /// 90 days in milliseconds
    pub const QUARTER_MS: u64 = 7_776_000_000;
    /// 365 days in milliseconds
    pub const YEAR_MS: u64 = 31_536_000_000;
}
