//! Event definitions for the Dataset Access Marketplace
//!
//! Every successful mutating operation emits exactly one primary event
//! carrying enough data for an off-chain indexer to reconstruct state
//! without re-querying.

use odra::prelude::*;
use odra::casper_types::U512;

// ============================================
// Access Token Registry Events
// ============================================

/// Emitted when a token is minted
#[odra::event]
pub struct TokenMinted {
    /// Unique identifier of the token
    pub token_id: u64,
    /// Dataset the token refers to
    pub dataset_id: u64,
    /// Address holding the token
    pub holder: Address,
    /// Token kind (0=Ownership, 1=Access)
    pub kind: u8,
    /// Address that authorized the grant
    pub granted_by: Address,
    /// Expiry timestamp in milliseconds; 0 for Ownership tokens
    pub expires_at: u64,
    /// Opaque metadata reference handed through unchanged
    pub metadata_ref: String,
    /// Timestamp of the mint
    pub timestamp: u64,
}

/// Emitted when a token is burned
#[odra::event]
pub struct TokenBurned {
    /// Unique identifier of the burned token
    pub token_id: u64,
    /// Dataset the token referred to
    pub dataset_id: u64,
    /// Holder at the time of the burn
    pub holder: Address,
    /// Whether this was an administrative force-burn
    pub forced: bool,
    /// Timestamp of the burn
    pub timestamp: u64,
}

/// Emitted when a token changes holder
#[odra::event]
pub struct TokenTransferred {
    /// Unique identifier of the token
    pub token_id: u64,
    /// Previous holder
    pub from: Address,
    /// New holder
    pub to: Address,
    /// Timestamp of the transfer
    pub timestamp: u64,
}

/// Emitted when a token's transferable flag is changed by an administrator
#[odra::event]
pub struct TransferabilityChanged {
    /// Unique identifier of the token
    pub token_id: u64,
    /// New transferable flag
    pub transferable: bool,
    /// Timestamp of the update
    pub timestamp: u64,
}

// ============================================
// Authorization & Pause Events
// ============================================

/// Emitted when a capability is granted to an account
#[odra::event]
pub struct CapabilityGranted {
    /// Capability identifier (0=Mint, 1=Burn, 2=Admin)
    pub capability: u8,
    /// Account receiving the capability
    pub account: Address,
    /// Timestamp of the grant
    pub timestamp: u64,
}

/// Emitted when a capability is revoked from an account
#[odra::event]
pub struct CapabilityRevoked {
    /// Capability identifier (0=Mint, 1=Burn, 2=Admin)
    pub capability: u8,
    /// Account losing the capability
    pub account: Address,
    /// Timestamp of the revocation
    pub timestamp: u64,
}

/// Emitted when a contract is paused
#[odra::event]
pub struct ContractPaused {
    /// Account that triggered the pause
    pub account: Address,
    /// Timestamp of the pause
    pub timestamp: u64,
}

/// Emitted when a contract is unpaused
#[odra::event]
pub struct ContractUnpaused {
    /// Account that lifted the pause
    pub account: Address,
    /// Timestamp of the unpause
    pub timestamp: u64,
}

// ============================================
// Marketplace Ledger Events
// ============================================

/// Emitted when a new dataset is created
#[odra::event]
pub struct DatasetCreated {
    /// Unique identifier of the dataset
    pub dataset_id: u64,
    /// Address of the dataset owner
    pub owner: Address,
    /// Opaque metadata reference
    pub metadata_ref: String,
    /// ID of the Ownership token minted for the owner
    pub ownership_token_id: u64,
    /// Timestamp of the creation
    pub timestamp: u64,
}

/// Emitted when a dataset's metadata or pricing is updated
#[odra::event]
pub struct DatasetUpdated {
    /// Unique identifier of the dataset
    pub dataset_id: u64,
    /// New metadata reference
    pub metadata_ref: String,
    /// Timestamp of the update
    pub timestamp: u64,
}

/// Emitted for each price tier whose value changed in an update
#[odra::event]
pub struct PriceChanged {
    /// Unique identifier of the dataset
    pub dataset_id: u64,
    /// Duration tier (0=1h .. 5=365d)
    pub duration: u8,
    /// Old price in motes
    pub old_price: U512,
    /// New price in motes
    pub new_price: U512,
    /// Timestamp of the update
    pub timestamp: u64,
}

/// Emitted when access to a dataset is purchased
#[odra::event]
pub struct AccessPurchased {
    /// Globally unique purchase identifier
    pub purchase_id: u64,
    /// Purchased dataset
    pub dataset_id: u64,
    /// Address of the buyer
    pub buyer: Address,
    /// Duration tier (0=1h .. 5=365d)
    pub duration: u8,
    /// Tier price charged
    pub price: U512,
    /// Expiry of the granted access
    pub expires_at: u64,
    /// ID of the Access token minted for the buyer
    pub token_id: u64,
    /// Timestamp of the purchase
    pub timestamp: u64,
}

/// Emitted once per purchase with the full payment split
#[odra::event]
pub struct PaymentDistributed {
    /// Purchase this distribution belongs to
    pub purchase_id: u64,
    /// Purchased dataset
    pub dataset_id: u64,
    /// Total amount distributed (the tier price)
    pub total: U512,
    /// Amount paid to the platform wallet
    pub platform_amount: U512,
    /// Sum of all royalty payouts
    pub royalty_amount: U512,
    /// Remainder paid to the dataset owner
    pub owner_amount: U512,
    /// Timestamp of the distribution
    pub timestamp: u64,
}

/// Emitted for each nonzero royalty payout during a purchase
#[odra::event]
pub struct RoyaltyPaid {
    /// Dataset the royalty was configured on
    pub dataset_id: u64,
    /// Address receiving the royalty
    pub recipient: Address,
    /// Amount paid
    pub amount: U512,
    /// Timestamp of the payment
    pub timestamp: u64,
}

/// Emitted when a dataset's royalty table is replaced
#[odra::event]
pub struct RoyaltiesUpdated {
    /// Unique identifier of the dataset
    pub dataset_id: u64,
    /// Number of royalty entries after the update
    pub entry_count: u64,
    /// Combined royalty share in basis points
    pub total_bps: u64,
    /// Timestamp of the update
    pub timestamp: u64,
}

/// Emitted for each Access token force-burned during a revocation
#[odra::event]
pub struct AccessRevoked {
    /// Dataset the access was revoked for
    pub dataset_id: u64,
    /// Address whose access was revoked
    pub holder: Address,
    /// ID of the burned token
    pub token_id: u64,
    /// Timestamp of the revocation
    pub timestamp: u64,
}

/// Emitted when an administrator toggles a dataset's active flag
#[odra::event]
pub struct DatasetActiveChanged {
    /// Unique identifier of the dataset
    pub dataset_id: u64,
    /// New active flag
    pub is_active: bool,
    /// Timestamp of the change
    pub timestamp: u64,
}

/// Emitted when the global platform fee is updated
#[odra::event]
pub struct PlatformFeeUpdated {
    /// Old fee in basis points
    pub old_fee_bps: u64,
    /// New fee in basis points
    pub new_fee_bps: u64,
    /// Timestamp of the update
    pub timestamp: u64,
}

/// Emitted when the platform wallet address is updated
#[odra::event]
pub struct PlatformWalletUpdated {
    /// Old platform wallet
    pub old_wallet: Address,
    /// New platform wallet
    pub new_wallet: Address,
    /// Timestamp of the update
    pub timestamp: u64,
}

/// Emitted when residual contract balance is swept by an administrator
#[odra::event]
pub struct BalanceSwept {
    /// Address receiving the residual balance
    pub to: Address,
    /// Amount swept
    pub amount: U512,
    /// Timestamp of the sweep
    pub timestamp: u64,
}
