//! Marketplace Ledger for the Dataset Access Marketplace
//!
//! This contract owns dataset records (pricing tiers, royalty tables,
//! revenue counters) and orchestrates purchases: it validates the
//! request, computes the payment split, mints the access record through
//! the Access Token Registry, and updates dataset statistics.

use odra::prelude::*;
use odra::casper_types::U512;
use odra::ContractRef;

use crate::access_registry::AccessTokenRegistryContractRef;
use crate::capabilities::{capability, Capabilities};
use crate::errors::Error;
use crate::events::{
    AccessPurchased, AccessRevoked, BalanceSwept, DatasetActiveChanged,
    DatasetCreated, DatasetUpdated, PaymentDistributed, PlatformFeeUpdated,
    PlatformWalletUpdated, PriceChanged, RoyaltiesUpdated, RoyaltyPaid,
};
use crate::pause::Pauseable;
use crate::types::{
    constants::*, AccessDetails, AccessDuration, Dataset, MarketplaceStats,
    PriceTable, PurchaseRecord, RoyaltyEntry, TokenKind,
};

/// Marketplace Ledger contract module
#[odra::module(
    events = [
        DatasetCreated, DatasetUpdated, PriceChanged, AccessPurchased,
        PaymentDistributed, RoyaltyPaid, RoyaltiesUpdated, AccessRevoked,
        DatasetActiveChanged, PlatformFeeUpdated, PlatformWalletUpdated,
        BalanceSwept
    ],
    errors = Error
)]
pub struct DataMarketplace {
    // ============================================
    // Authorization & Pause State
    // ============================================

    /// Capability grants (Admin) and the super admin
    caps: SubModule<Capabilities>,
    /// Halt gate for all mutating operations
    pause: SubModule<Pauseable>,

    // ============================================
    // Collaborators & Global Configuration
    // ============================================

    /// Address of the Access Token Registry contract
    registry: Var<Address>,
    /// Global platform fee in basis points (<= 1000)
    platform_fee_bps: Var<u64>,
    /// Wallet receiving platform fees
    platform_wallet: Var<Address>,

    // ============================================
    // Dataset Storage
    // ============================================

    /// Mapping of dataset ID to dataset record
    datasets: Mapping<u64, Dataset>,
    /// Last assigned dataset ID (monotonic, ids start at 1)
    dataset_count: Var<u64>,
    /// List of dataset IDs created by each owner
    owner_datasets: Mapping<Address, List<u64>>,

    // ============================================
    // Purchase Storage
    // ============================================

    /// Append-only purchase log
    purchases: Mapping<u64, PurchaseRecord>,
    /// Last assigned purchase ID (global, monotonic)
    purchase_count: Var<u64>,
    /// List of purchase IDs made by each buyer
    buyer_purchases: Mapping<Address, List<u64>>,
    /// (user, dataset_id) -> has purchased access at some point
    user_access: Mapping<(Address, u64), bool>,

    // ============================================
    // Statistics
    // ============================================

    /// Total trading volume in motes
    total_volume: Var<U512>,
    /// Total platform fees collected
    platform_fee_collected: Var<U512>,
}

#[odra::module]
impl DataMarketplace {
    // ============================================
    // Initialization
    // ============================================

    /// Initialize the marketplace contract
    pub fn init(
        &mut self,
        admin: Address,
        platform_wallet: Address,
        platform_fee_bps: u64,
        registry: Address,
    ) {
        if platform_fee_bps > MAX_PLATFORM_FEE_BPS {
            self.env().revert(Error::PlatformFeeTooHigh);
        }
        self.caps.bootstrap(admin);
        self.registry.set(registry);
        self.platform_wallet.set(platform_wallet);
        self.platform_fee_bps.set(platform_fee_bps);
        self.dataset_count.set(0);
        self.purchase_count.set(0);
        self.total_volume.set(U512::zero());
        self.platform_fee_collected.set(U512::zero());
    }

    // ============================================
    // Dataset Management
    // ============================================

    /// Create a new dataset and mint its Ownership token for the caller.
    /// Zero entries in the price table mean disabled tiers.
    pub fn create_dataset(&mut self, metadata_ref: String, prices: PriceTable) -> u64 {
        self.pause.ensure_not_paused();
        let owner = self.env().caller();
        self.validate_metadata_ref(&metadata_ref);

        let dataset_id = self.dataset_count.get_or_default() + 1;
        self.dataset_count.set(dataset_id);

        let timestamp = self.env().get_block_time();

        let ownership_token_id = self.registry_ref().mint(
            owner,
            dataset_id,
            TokenKind::Ownership.to_u8(),
            0,
            owner,
            metadata_ref.clone(),
        );

        let dataset = Dataset {
            dataset_id,
            owner,
            metadata_ref: metadata_ref.clone(),
            prices,
            royalties: Vec::new(),
            is_active: true,
            created_at: timestamp,
            total_sales: 0,
            total_revenue: U512::zero(),
            ownership_token_id,
        };
        self.datasets.set(&dataset_id, dataset);

        let mut owned = self.owner_datasets.module(&owner);
        owned.push(dataset_id);

        self.env().emit_event(DatasetCreated {
            dataset_id,
            owner,
            metadata_ref,
            ownership_token_id,
            timestamp,
        });

        dataset_id
    }

    /// Update a dataset's metadata and price table (owner only).
    /// Emits a price-change event per tier whose value changed; already
    /// purchased access records are unaffected.
    pub fn update_dataset(
        &mut self,
        dataset_id: u64,
        metadata_ref: String,
        prices: PriceTable,
    ) {
        self.pause.ensure_not_paused();
        let caller = self.env().caller();
        self.validate_metadata_ref(&metadata_ref);

        let mut dataset = self.dataset(dataset_id);
        if dataset.owner != caller {
            self.env().revert(Error::Unauthorized);
        }

        let timestamp = self.env().get_block_time();
        for duration in AccessDuration::ALL {
            let old_price = dataset.prices.price(duration);
            let new_price = prices.price(duration);
            if old_price != new_price {
                self.env().emit_event(PriceChanged {
                    dataset_id,
                    duration: duration.to_u8(),
                    old_price,
                    new_price,
                    timestamp,
                });
            }
        }

        dataset.metadata_ref = metadata_ref.clone();
        dataset.prices = prices;
        self.datasets.set(&dataset_id, dataset);

        self.env().emit_event(DatasetUpdated {
            dataset_id,
            metadata_ref,
            timestamp,
        });
    }

    /// Replace a dataset's royalty table atomically (owner only).
    /// At most 10 entries, each share positive, combined <= 1000 bps.
    pub fn set_royalties(
        &mut self,
        dataset_id: u64,
        recipients: Vec<Address>,
        basis_points: Vec<u64>,
    ) {
        self.pause.ensure_not_paused();
        let caller = self.env().caller();

        let mut dataset = self.dataset(dataset_id);
        if dataset.owner != caller {
            self.env().revert(Error::Unauthorized);
        }

        if recipients.len() != basis_points.len() {
            self.env().revert(Error::RoyaltyLengthMismatch);
        }
        if recipients.len() > MAX_ROYALTY_ENTRIES {
            self.env().revert(Error::TooManyRoyaltyEntries);
        }

        let mut total_bps: u64 = 0;
        let mut royalties = Vec::with_capacity(recipients.len());
        for (recipient, bps) in recipients.into_iter().zip(basis_points) {
            if bps == 0 {
                self.env().revert(Error::ZeroRoyaltyPercentage);
            }
            // Checked sum: wrap-around on attacker-sized shares must not
            // slip past the 1000 bps cap in release builds
            total_bps = total_bps
                .checked_add(bps)
                .unwrap_or_else(|| self.env().revert(Error::RoyaltySumTooHigh));
            royalties.push(RoyaltyEntry { recipient, basis_points: bps });
        }
        if total_bps > MAX_ROYALTY_BPS {
            self.env().revert(Error::RoyaltySumTooHigh);
        }

        let entry_count = royalties.len() as u64;
        dataset.royalties = royalties;
        self.datasets.set(&dataset_id, dataset);

        self.env().emit_event(RoyaltiesUpdated {
            dataset_id,
            entry_count,
            total_bps,
            timestamp: self.env().get_block_time(),
        });
    }

    // ============================================
    // Purchasing
    // ============================================

    /// Purchase time-boxed access to a dataset.
    ///
    /// Charges the tier price, splits it among platform, royalty
    /// recipients and owner, mints an Access token through the registry
    /// and refunds any excess attached value to the buyer.
    #[odra(payable)]
    pub fn purchase_access(&mut self, dataset_id: u64, duration: u8) -> u64 {
        self.pause.ensure_not_paused();
        let buyer = self.env().caller();
        let attached_value = self.env().attached_value();

        let mut dataset = self.dataset(dataset_id);
        if !dataset.is_active {
            self.env().revert(Error::DatasetInactive);
        }
        if dataset.owner == buyer {
            self.env().revert(Error::OwnerCannotPurchase);
        }

        let duration = AccessDuration::from_u8(duration)
            .unwrap_or_else(|| self.env().revert(Error::InvalidDuration));
        let price = dataset.prices.price(duration);
        if price == U512::zero() {
            self.env().revert(Error::TierDisabled);
        }
        if attached_value < price {
            self.env().revert(Error::InsufficientPayment);
        }

        let timestamp = self.env().get_block_time();
        let expires_at = timestamp + duration.millis();

        // Global counter: purchase ids are unique across buyers
        let purchase_id = self.purchase_count.get_or_default() + 1;
        self.purchase_count.set(purchase_id);

        let token_id = self.registry_ref().mint(
            buyer,
            dataset_id,
            TokenKind::Access.to_u8(),
            expires_at,
            dataset.owner,
            dataset.metadata_ref.clone(),
        );

        let record = PurchaseRecord {
            purchase_id,
            dataset_id,
            buyer,
            duration,
            price_paid: price,
            purchased_at: timestamp,
            expires_at,
            token_id,
        };
        self.purchases.set(&purchase_id, record);

        let mut bought = self.buyer_purchases.module(&buyer);
        bought.push(purchase_id);
        self.user_access.set(&(buyer, dataset_id), true);

        dataset.total_sales += 1;
        dataset.total_revenue += price;
        let owner = dataset.owner;
        let royalties = dataset.royalties.clone();
        self.datasets.set(&dataset_id, dataset);

        let total_volume = self.total_volume.get_or_default() + price;
        self.total_volume.set(total_volume);

        self.distribute_payment(purchase_id, dataset_id, price, owner, &royalties);

        // Excess is refunded, never recorded as revenue
        if attached_value > price {
            let refund = attached_value - price;
            self.env().transfer_tokens(&buyer, &refund);
        }

        self.env().emit_event(AccessPurchased {
            purchase_id,
            dataset_id,
            buyer,
            duration: duration.to_u8(),
            price,
            expires_at,
            token_id,
            timestamp,
        });

        purchase_id
    }

    // ============================================
    // Access Queries
    // ============================================

    /// Check whether a user currently has access to a dataset.
    /// True for the owner, else true if any held token matches the
    /// dataset and is valid per the registry.
    pub fn check_access(&self, user: Address, dataset_id: u64) -> bool {
        let dataset = match self.datasets.get(&dataset_id) {
            Some(dataset) => dataset,
            None => return false,
        };
        if dataset.owner == user {
            return true;
        }

        let mut registry = self.registry_ref();
        for token_id in registry.holder_tokens(user) {
            if let Some(record) = registry.get_token(token_id) {
                if record.dataset_id == dataset_id && registry.has_valid_access(token_id) {
                    return true;
                }
            }
        }
        false
    }

    /// Like `check_access`, but also returns the matching valid token
    /// with the latest expiry (first encountered wins ties). The owner
    /// gets `(true, 0, 0)`.
    pub fn get_access_details(&self, user: Address, dataset_id: u64) -> AccessDetails {
        let dataset = match self.datasets.get(&dataset_id) {
            Some(dataset) => dataset,
            None => return AccessDetails::default(),
        };
        if dataset.owner == user {
            return AccessDetails { has_access: true, expires_at: 0, token_id: 0 };
        }

        let mut details = AccessDetails::default();
        let mut registry = self.registry_ref();
        for token_id in registry.holder_tokens(user) {
            let record = match registry.get_token(token_id) {
                Some(record) => record,
                None => continue,
            };
            if record.dataset_id != dataset_id || !registry.has_valid_access(token_id) {
                continue;
            }
            if !details.has_access || record.expires_at > details.expires_at {
                details = AccessDetails {
                    has_access: true,
                    expires_at: record.expires_at,
                    token_id,
                };
            }
        }
        details
    }

    // ============================================
    // Revocation
    // ============================================

    /// Force-burn every Access token a user holds for a dataset.
    /// Callable by the dataset owner or an Admin capability holder.
    pub fn revoke_access(&mut self, dataset_id: u64, target: Address) {
        self.pause.ensure_not_paused();
        let caller = self.env().caller();

        let dataset = self.dataset(dataset_id);
        if dataset.owner != caller && !self.caps.has(capability::ADMIN, &caller) {
            self.env().revert(Error::Unauthorized);
        }

        let timestamp = self.env().get_block_time();
        let mut registry = self.registry_ref();
        for token_id in registry.holder_tokens(target) {
            let record = match registry.get_token(token_id) {
                Some(record) => record,
                None => continue,
            };
            if record.dataset_id != dataset_id || !matches!(record.kind, TokenKind::Access) {
                continue;
            }
            registry.force_burn(token_id);
            self.env().emit_event(AccessRevoked {
                dataset_id,
                holder: target,
                token_id,
                timestamp,
            });
        }

        self.user_access.set(&(target, dataset_id), false);
    }

    // ============================================
    // Administrative Operations
    // ============================================

    /// Toggle a dataset's active flag (Admin capability). Reversible.
    pub fn set_dataset_active(&mut self, dataset_id: u64, is_active: bool) {
        self.pause.ensure_not_paused();
        let caller = self.env().caller();
        self.caps.ensure(capability::ADMIN, &caller);

        let mut dataset = self.dataset(dataset_id);
        dataset.is_active = is_active;
        self.datasets.set(&dataset_id, dataset);

        self.env().emit_event(DatasetActiveChanged {
            dataset_id,
            is_active,
            timestamp: self.env().get_block_time(),
        });
    }

    /// Update the global platform fee (Admin capability, <= 1000 bps)
    pub fn set_platform_fee(&mut self, new_fee_bps: u64) {
        self.pause.ensure_not_paused();
        let caller = self.env().caller();
        self.caps.ensure(capability::ADMIN, &caller);

        if new_fee_bps > MAX_PLATFORM_FEE_BPS {
            self.env().revert(Error::PlatformFeeTooHigh);
        }

        let old_fee_bps = self.platform_fee_bps.get_or_default();
        self.platform_fee_bps.set(new_fee_bps);

        self.env().emit_event(PlatformFeeUpdated {
            old_fee_bps,
            new_fee_bps,
            timestamp: self.env().get_block_time(),
        });
    }

    /// Update the platform wallet address (Admin capability)
    pub fn set_platform_wallet(&mut self, new_wallet: Address) {
        self.pause.ensure_not_paused();
        let caller = self.env().caller();
        self.caps.ensure(capability::ADMIN, &caller);

        let old_wallet = self.platform_wallet.get().unwrap();
        self.platform_wallet.set(new_wallet);

        self.env().emit_event(PlatformWalletUpdated {
            old_wallet,
            new_wallet,
            timestamp: self.env().get_block_time(),
        });
    }

    /// Sweep residual contract balance (Admin capability)
    pub fn sweep(&mut self, to: Address) {
        self.pause.ensure_not_paused();
        let caller = self.env().caller();
        self.caps.ensure(capability::ADMIN, &caller);

        let amount = self.env().self_balance();
        if amount == U512::zero() {
            self.env().revert(Error::NothingToSweep);
        }
        self.env().transfer_tokens(&to, &amount);

        self.env().emit_event(BalanceSwept {
            to,
            amount,
            timestamp: self.env().get_block_time(),
        });
    }

    /// Halt all mutating operations (Admin capability)
    pub fn pause(&mut self) {
        let caller = self.env().caller();
        self.caps.ensure(capability::ADMIN, &caller);
        self.pause.pause(caller);
    }

    /// Lift the halt (Admin capability)
    pub fn unpause(&mut self) {
        let caller = self.env().caller();
        self.caps.ensure(capability::ADMIN, &caller);
        self.pause.unpause(caller);
    }

    /// Whether the marketplace is currently paused
    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    /// Grant a capability to an account (super admin only)
    pub fn grant_capability(&mut self, cap: u8, account: Address) {
        let caller = self.env().caller();
        self.caps.grant(cap, account, &caller);
    }

    /// Revoke a capability from an account (super admin only)
    pub fn revoke_capability(&mut self, cap: u8, account: Address) {
        let caller = self.env().caller();
        self.caps.revoke(cap, account, &caller);
    }

    /// Check whether an account holds a capability
    pub fn has_capability(&self, cap: u8, account: Address) -> bool {
        self.caps.has(cap, &account)
    }

    // ============================================
    // View Functions
    // ============================================

    /// Get a dataset by ID
    pub fn get_dataset(&self, dataset_id: u64) -> Option<Dataset> {
        self.datasets.get(&dataset_id)
    }

    /// Get all active datasets
    pub fn get_active_datasets(&self) -> Vec<Dataset> {
        let count = self.dataset_count.get_or_default();
        let mut result = Vec::new();
        for id in 1..=count {
            if let Some(dataset) = self.datasets.get(&id) {
                if dataset.is_active {
                    result.push(dataset);
                }
            }
        }
        result
    }

    /// Get dataset IDs created by an owner
    pub fn get_owner_datasets(&self, owner: Address) -> Vec<u64> {
        self.owner_datasets.module(&owner).iter().collect()
    }

    /// Get a purchase record by ID
    pub fn get_purchase(&self, purchase_id: u64) -> Option<PurchaseRecord> {
        self.purchases.get(&purchase_id)
    }

    /// Get purchase IDs made by a buyer
    pub fn get_buyer_purchases(&self, buyer: Address) -> Vec<u64> {
        self.buyer_purchases.module(&buyer).iter().collect()
    }

    /// Get full purchase records for a buyer
    pub fn get_buyer_purchase_records(&self, buyer: Address) -> Vec<PurchaseRecord> {
        let ids = self.buyer_purchases.module(&buyer);
        let mut result = Vec::new();
        for id in ids.iter() {
            if let Some(record) = self.purchases.get(&id) {
                result.push(record);
            }
        }
        result
    }

    /// Whether a user has ever purchased (unrevoked) access to a dataset
    pub fn has_recorded_access(&self, user: Address, dataset_id: u64) -> bool {
        self.user_access.get_or_default(&(user, dataset_id))
    }

    /// Get marketplace statistics
    pub fn get_marketplace_stats(&self) -> MarketplaceStats {
        MarketplaceStats {
            dataset_count: self.dataset_count.get_or_default(),
            purchase_count: self.purchase_count.get_or_default(),
            total_volume: self.total_volume.get_or_default(),
            platform_fee_collected: self.platform_fee_collected.get_or_default(),
        }
    }

    /// Get the global platform fee in basis points
    pub fn get_platform_fee_bps(&self) -> u64 {
        self.platform_fee_bps.get_or_default()
    }

    /// Get the platform wallet address
    pub fn get_platform_wallet(&self) -> Option<Address> {
        self.platform_wallet.get()
    }

    /// Get the Access Token Registry address
    pub fn get_registry(&self) -> Option<Address> {
        self.registry.get()
    }

    /// Get the super admin address
    pub fn super_admin(&self) -> Option<Address> {
        self.caps.super_admin()
    }

    // ============================================
    // Internal Functions
    // ============================================

    /// Load a dataset or revert with NotFound
    fn dataset(&self, dataset_id: u64) -> Dataset {
        self.datasets.get(&dataset_id)
            .unwrap_or_else(|| self.env().revert(Error::DatasetNotFound))
    }

    /// Contract reference to the Access Token Registry
    fn registry_ref(&self) -> AccessTokenRegistryContractRef {
        // Set once at init
        let address = self.registry.get().unwrap();
        AccessTokenRegistryContractRef::new(self.env(), address)
    }

    /// Deterministically partition `total` among platform, royalty
    /// recipients and owner.
    ///
    /// Platform and royalty shares are floor divisions; the owner
    /// absorbs the integer remainder, so the three parts always sum to
    /// `total` exactly. All amounts are computed before any transfer.
    fn distribute_payment(
        &mut self,
        purchase_id: u64,
        dataset_id: u64,
        total: U512,
        owner: Address,
        royalties: &[RoyaltyEntry],
    ) {
        let fee_bps = self.platform_fee_bps.get_or_default();
        let platform_amount = total * fee_bps / BPS_DENOMINATOR;

        let mut royalty_amount = U512::zero();
        let mut payouts = Vec::with_capacity(royalties.len());
        for entry in royalties {
            let amount = total * entry.basis_points / BPS_DENOMINATOR;
            royalty_amount += amount;
            payouts.push((entry.recipient, amount));
        }

        // Config-time invariants cap fee and royalties at 1000 bps each;
        // guard anyway so a violated invariant cannot drain the contract
        if platform_amount + royalty_amount > total {
            self.env().revert(Error::DistributionExceedsPrice);
        }
        let owner_amount = total - platform_amount - royalty_amount;

        let timestamp = self.env().get_block_time();
        for (recipient, amount) in payouts {
            if amount > U512::zero() {
                self.env().transfer_tokens(&recipient, &amount);
                self.env().emit_event(RoyaltyPaid {
                    dataset_id,
                    recipient,
                    amount,
                    timestamp,
                });
            }
        }

        if platform_amount > U512::zero() {
            let wallet = self.platform_wallet.get().unwrap();
            self.env().transfer_tokens(&wallet, &platform_amount);
            let collected = self.platform_fee_collected.get_or_default() + platform_amount;
            self.platform_fee_collected.set(collected);
        }
        if owner_amount > U512::zero() {
            self.env().transfer_tokens(&owner, &owner_amount);
        }

        self.env().emit_event(PaymentDistributed {
            purchase_id,
            dataset_id,
            total,
            platform_amount,
            royalty_amount,
            owner_amount,
            timestamp,
        });
    }

    /// Reject empty or oversized metadata references; content is
    /// otherwise opaque and handed through unchanged
    fn validate_metadata_ref(&self, metadata_ref: &str) {
        if metadata_ref.is_empty() {
            self.env().revert(Error::EmptyMetadataRef);
        }
        if metadata_ref.len() > MAX_METADATA_REF_LENGTH {
            self.env().revert(Error::MetadataRefTooLong);
        }
    }
}

// ============================================
// Tests
// ============================================
