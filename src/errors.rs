//! Error definitions for the Dataset Access Marketplace
//!
//! Codes are grouped by failure class so off-chain clients can
//! distinguish "retry with different input" from "never retry":
//! 1-9 not-found, 10-19 authorization, 20-29 invalid state,
//! 30-49 invalid input, 50+ payment.

use odra::prelude::*;

/// Custom errors for the registry and marketplace contracts
#[odra::odra_error]
pub enum Error {
    // ============================================
    // Not Found (1-9)
    // ============================================

    /// Dataset with given ID was not found
    DatasetNotFound = 1,
    /// Token with given ID was not found (never minted, or burned)
    TokenNotFound = 2,

    // ============================================
    // Authorization (10-19)
    // ============================================

    /// Caller lacks the required role or ownership for this operation
    Unauthorized = 10,
    /// Caller does not hold the Mint capability
    MissingMintCapability = 11,
    /// Caller does not hold the Burn capability
    MissingBurnCapability = 12,
    /// Caller does not hold the Admin capability
    MissingAdminCapability = 13,
    /// Capability identifier is not one of Mint, Burn, Admin
    UnknownCapability = 14,

    // ============================================
    // Invalid State (20-29)
    // ============================================

    /// Contract is paused; mutating operations are disabled
    ContractPaused = 20,
    /// Contract is not paused; unpause is a no-op
    ContractNotPaused = 21,
    /// Dataset is not active (deactivated)
    DatasetInactive = 22,
    /// Token is not transferable
    TokenNotTransferable = 23,
    /// Access token has not expired yet
    TokenNotExpired = 24,
    /// Token kind does not match the operation (e.g. burn-expired on Ownership)
    WrongTokenKind = 25,
    /// Configured fee and royalties exceed the purchase price
    DistributionExceedsPrice = 26,
    /// No residual balance available to sweep
    NothingToSweep = 27,

    // ============================================
    // Invalid Input (30-49)
    // ============================================

    /// Metadata reference must not be empty
    EmptyMetadataRef = 30,
    /// Metadata reference exceeds maximum length
    MetadataRefTooLong = 31,
    /// Token kind identifier is not Ownership or Access
    InvalidTokenKind = 32,
    /// Duration identifier is not one of the six price tiers
    InvalidDuration = 33,
    /// Selected price tier is disabled (zero price)
    TierDisabled = 34,
    /// Access token expiry must be strictly in the future
    ExpiryNotInFuture = 35,
    /// An access grant cannot be minted to its own grantor
    SelfGrant = 36,
    /// A dataset owner cannot purchase access to their own dataset
    OwnerCannotPurchase = 37,
    /// Royalty recipient and percentage arrays differ in length
    RoyaltyLengthMismatch = 38,
    /// Too many royalty entries (maximum 10)
    TooManyRoyaltyEntries = 39,
    /// Royalty percentages must be greater than zero
    ZeroRoyaltyPercentage = 40,
    /// Royalty percentages sum to more than 1000 basis points
    RoyaltySumTooHigh = 41,
    /// Platform fee exceeds 1000 basis points
    PlatformFeeTooHigh = 42,
    /// Ownership tokens must record their holder as grantor
    GrantorMismatch = 43,

    // ============================================
    // Payment (50+)
    // ============================================

    /// Attached payment is below the tier price
    InsufficientPayment = 50,
}
