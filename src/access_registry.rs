//! Access Token Registry for the Dataset Access Marketplace
//!
//! This contract owns the canonical record of every minted token:
//! - Ownership tokens: permanent, transferable, minted at dataset creation
//! - Access tokens: time-boxed, non-transferable by default, minted on purchase
//!
//! The marketplace contract is granted the Mint and Burn capabilities at
//! deployment and drives minting through cross-contract calls.

use odra::prelude::*;

use crate::capabilities::{capability, Capabilities};
use crate::errors::Error;
use crate::events::{
    TokenBurned, TokenMinted, TokenTransferred, TransferabilityChanged,
};
use crate::pause::Pauseable;
use crate::types::{TokenKind, TokenRecord};

/// Access Token Registry contract module
#[odra::module(
    events = [TokenMinted, TokenBurned, TokenTransferred, TransferabilityChanged],
    errors = Error
)]
pub struct AccessTokenRegistry {
    // ============================================
    // Authorization & Pause State
    // ============================================

    /// Capability grants (Mint, Burn, Admin) and the super admin
    caps: SubModule<Capabilities>,
    /// Halt gate for all mutating operations
    pause: SubModule<Pauseable>,

    // ============================================
    // Token Storage
    // ============================================

    /// Token records; burned ids map to None and are never reassigned
    tokens: Mapping<u64, Option<TokenRecord>>,
    /// Last assigned token ID (monotonic, ids start at 1)
    token_count: Var<u64>,

    // ============================================
    // Token Indexing by Holder
    // ============================================

    /// Count of tokens per holder
    holder_token_count: Mapping<Address, u64>,
    /// Indexed tokens: (holder, index) -> token_id
    holder_token_at: Mapping<(Address, u64), u64>,

    // ============================================
    // Token Indexing by Dataset
    // ============================================

    /// Count of tokens per dataset
    dataset_token_count: Mapping<u64, u64>,
    /// Indexed tokens: (dataset_id, index) -> token_id
    dataset_token_at: Mapping<(u64, u64), u64>,
}

#[odra::module]
impl AccessTokenRegistry {
    // ============================================
    // Initialization
    // ============================================

    /// Initialize the registry with its super admin
    pub fn init(&mut self, admin: Address) {
        self.caps.bootstrap(admin);
        self.token_count.set(0);
    }

    // ============================================
    // Capability Administration
    // ============================================

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

    /// Get the super admin address
    pub fn super_admin(&self) -> Option<Address> {
        self.caps.super_admin()
    }

    // ============================================
    // Pause Administration
    // ============================================

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

    /// Whether the registry is currently paused
    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    // ============================================
    // Minting
    // ============================================

    /// Mint a new token (Mint capability)
    ///
    /// Ownership tokens carry no expiry and are transferable. Access
    /// tokens require a strictly future expiry, must not be granted to
    /// their own grantor, and are non-transferable until an administrator
    /// flips the per-token flag.
    pub fn mint(
        &mut self,
        holder: Address,
        dataset_id: u64,
        kind: u8,
        expires_at: u64,
        granted_by: Address,
        metadata_ref: String,
    ) -> u64 {
        self.pause.ensure_not_paused();
        let caller = self.env().caller();
        self.caps.ensure(capability::MINT, &caller);

        let kind = TokenKind::from_u8(kind)
            .unwrap_or_else(|| self.env().revert(Error::InvalidTokenKind));

        let now = self.env().get_block_time();
        let expires_at = match kind {
            TokenKind::Ownership => {
                // Ownership grants itself: grantor and holder coincide at mint
                if holder != granted_by {
                    self.env().revert(Error::GrantorMismatch);
                }
                0
            }
            TokenKind::Access => {
                if expires_at <= now {
                    self.env().revert(Error::ExpiryNotInFuture);
                }
                if holder == granted_by {
                    self.env().revert(Error::SelfGrant);
                }
                expires_at
            }
        };

        // Atomic allocation; ids are never reused, even after burns
        let token_id = self.token_count.get_or_default() + 1;
        self.token_count.set(token_id);

        let transferable = matches!(kind, TokenKind::Ownership);
        let record = TokenRecord {
            token_id,
            dataset_id,
            kind,
            expires_at,
            transferable,
            granted_by,
            holder,
            minted_at: now,
        };
        self.tokens.set(&token_id, Some(record));

        self.append_to_holder_index(&holder, token_id);
        self.append_to_dataset_index(dataset_id, token_id);

        self.env().emit_event(TokenMinted {
            token_id,
            dataset_id,
            holder,
            kind: kind.to_u8(),
            granted_by,
            expires_at,
            metadata_ref,
            timestamp: now,
        });

        token_id
    }

    // ============================================
    // Validity
    // ============================================

    /// Single source of truth for access validity.
    ///
    /// False for unknown or burned tokens, true unconditionally for
    /// Ownership tokens, and true for Access tokens strictly before
    /// their expiry.
    pub fn has_valid_access(&self, token_id: u64) -> bool {
        match self.token(token_id) {
            None => false,
            Some(record) => match record.kind {
                TokenKind::Ownership => true,
                TokenKind::Access => record.expires_at > self.env().get_block_time(),
            },
        }
    }

    // ============================================
    // Burning
    // ============================================

    /// Burn an expired Access token.
    ///
    /// Callable by the token's holder, its grantor, or a Burn capability
    /// holder. Fails on Ownership tokens and on tokens that have not
    /// expired yet.
    pub fn burn_expired(&mut self, token_id: u64) {
        self.pause.ensure_not_paused();
        let caller = self.env().caller();

        let record = self.token(token_id)
            .unwrap_or_else(|| self.env().revert(Error::TokenNotFound));

        if !matches!(record.kind, TokenKind::Access) {
            self.env().revert(Error::WrongTokenKind);
        }
        if record.expires_at > self.env().get_block_time() {
            self.env().revert(Error::TokenNotExpired);
        }
        let authorized = caller == record.holder
            || caller == record.granted_by
            || self.caps.has(capability::BURN, &caller);
        if !authorized {
            self.env().revert(Error::Unauthorized);
        }

        self.remove_token(&record, false);
    }

    /// Burn any token regardless of kind or expiry (Burn capability)
    pub fn force_burn(&mut self, token_id: u64) {
        self.pause.ensure_not_paused();
        let caller = self.env().caller();
        self.caps.ensure(capability::BURN, &caller);

        let record = self.token(token_id)
            .unwrap_or_else(|| self.env().revert(Error::TokenNotFound));

        self.remove_token(&record, true);
    }

    // ============================================
    // Transfer
    // ============================================

    /// Transfer a token to another holder.
    ///
    /// The caller must be the current holder and the token must be
    /// transferable. Access tokens stay non-transferable unless an
    /// administrator has flipped their flag.
    pub fn transfer(&mut self, token_id: u64, to: Address) {
        self.pause.ensure_not_paused();
        let caller = self.env().caller();

        let mut record = self.token(token_id)
            .unwrap_or_else(|| self.env().revert(Error::TokenNotFound));

        if record.holder != caller {
            self.env().revert(Error::Unauthorized);
        }
        if !record.transferable {
            self.env().revert(Error::TokenNotTransferable);
        }

        let from = record.holder;
        record.holder = to;
        self.tokens.set(&token_id, Some(record));

        self.remove_from_holder_index(&from, token_id);
        self.append_to_holder_index(&to, token_id);

        self.env().emit_event(TokenTransferred {
            token_id,
            from,
            to,
            timestamp: self.env().get_block_time(),
        });
    }

    /// Flip a token's transferable flag (Admin capability).
    /// Escape hatch, not part of the normal purchase flow.
    pub fn set_transferability(&mut self, token_id: u64, transferable: bool) {
        self.pause.ensure_not_paused();
        let caller = self.env().caller();
        self.caps.ensure(capability::ADMIN, &caller);

        let mut record = self.token(token_id)
            .unwrap_or_else(|| self.env().revert(Error::TokenNotFound));
        record.transferable = transferable;
        self.tokens.set(&token_id, Some(record));

        self.env().emit_event(TransferabilityChanged {
            token_id,
            transferable,
            timestamp: self.env().get_block_time(),
        });
    }

    // ============================================
    // View Functions
    // ============================================

    /// Get a token record by ID
    pub fn get_token(&self, token_id: u64) -> Option<TokenRecord> {
        self.token(token_id)
    }

    /// Total number of tokens ever minted (the last assigned ID)
    pub fn token_count(&self) -> u64 {
        self.token_count.get_or_default()
    }

    /// All token IDs currently held by an address, in insertion order
    pub fn holder_tokens(&self, holder: Address) -> Vec<u64> {
        let count = self.holder_token_count.get_or_default(&holder);
        let mut result = Vec::new();
        for i in 0..count {
            if let Some(id) = self.holder_token_at.get(&(holder, i)) {
                result.push(id);
            }
        }
        result
    }

    /// All token IDs referencing a dataset, in insertion order
    pub fn dataset_tokens(&self, dataset_id: u64) -> Vec<u64> {
        let count = self.dataset_token_count.get_or_default(&dataset_id);
        let mut result = Vec::new();
        for i in 0..count {
            if let Some(id) = self.dataset_token_at.get(&(dataset_id, i)) {
                result.push(id);
            }
        }
        result
    }

    // ============================================
    // Internal Functions
    // ============================================

    /// Read a live token record
    fn token(&self, token_id: u64) -> Option<TokenRecord> {
        self.tokens.get(&token_id).flatten()
    }

    /// Delete a token record and both index entries, then emit the burn event
    fn remove_token(&mut self, record: &TokenRecord, forced: bool) {
        self.remove_from_holder_index(&record.holder, record.token_id);
        self.remove_from_dataset_index(record.dataset_id, record.token_id);
        self.tokens.set(&record.token_id, None);

        self.env().emit_event(TokenBurned {
            token_id: record.token_id,
            dataset_id: record.dataset_id,
            holder: record.holder,
            forced,
            timestamp: self.env().get_block_time(),
        });
    }

    fn append_to_holder_index(&mut self, holder: &Address, token_id: u64) {
        let count = self.holder_token_count.get_or_default(holder);
        self.holder_token_at.set(&(*holder, count), token_id);
        self.holder_token_count.set(holder, count + 1);
    }

    /// Swap-with-last removal; exact single-element removal, no gaps
    fn remove_from_holder_index(&mut self, holder: &Address, token_id: u64) {
        let count = self.holder_token_count.get_or_default(holder);
        for i in 0..count {
            if self.holder_token_at.get(&(*holder, i)) == Some(token_id) {
                let last = self.holder_token_at
                    .get(&(*holder, count - 1))
                    .unwrap_or_default();
                self.holder_token_at.set(&(*holder, i), last);
                self.holder_token_count.set(holder, count - 1);
                return;
            }
        }
    }

    fn append_to_dataset_index(&mut self, dataset_id: u64, token_id: u64) {
        let count = self.dataset_token_count.get_or_default(&dataset_id);
        self.dataset_token_at.set(&(dataset_id, count), token_id);
        self.dataset_token_count.set(&dataset_id, count + 1);
    }

    fn remove_from_dataset_index(&mut self, dataset_id: u64, token_id: u64) {
        let count = self.dataset_token_count.get_or_default(&dataset_id);
        for i in 0..count {
            if self.dataset_token_at.get(&(dataset_id, i)) == Some(token_id) {
                let last = self.dataset_token_at
                    .get(&(dataset_id, count - 1))
                    .unwrap_or_default();
                self.dataset_token_at.set(&(dataset_id, i), last);
                self.dataset_token_count.set(&dataset_id, count - 1);
                return;
            }
        }
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::constants::*;
    use odra::host::{Deployer, HostEnv};

    const OWNERSHIP: u8 = 0;
    const ACCESS: u8 = 1;

    fn setup() -> (AccessTokenRegistryHostRef, HostEnv, Address) {
        let env = odra_test::env();
        let admin = env.get_account(0);
        env.set_caller(admin);
        let contract = AccessTokenRegistryHostRef::deploy(
            &env,
            AccessTokenRegistryInitArgs { admin },
        );
        (contract, env, admin)
    }

    /// Setup with a minter that holds Mint and Burn
    fn setup_with_minter() -> (AccessTokenRegistryHostRef, HostEnv, Address, Address) {
        let (mut contract, env, admin) = setup();
        let minter = env.get_account(1);
        env.set_caller(admin);
        contract.grant_capability(capability::MINT, minter);
        contract.grant_capability(capability::BURN, minter);
        (contract, env, admin, minter)
    }

    #[test]
    fn mint_assigns_sequential_ids_and_indexes() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder_a = env.get_account(2);
        let holder_b = env.get_account(3);
        let grantor = env.get_account(4);

        env.set_caller(minter);
        let first = contract.mint(holder_a, 1, OWNERSHIP, 0, holder_a, "ref-a".to_string());
        let second = contract.mint(holder_b, 1, ACCESS, DAY_MS, grantor, "ref-b".to_string());

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(contract.token_count(), 2);
        assert_eq!(contract.holder_tokens(holder_a), vec![1]);
        assert_eq!(contract.holder_tokens(holder_b), vec![2]);
        assert_eq!(contract.dataset_tokens(1), vec![1, 2]);
    }

    #[test]
    fn ownership_tokens_are_transferable_and_never_expire() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder = env.get_account(2);

        env.set_caller(minter);
        // Expiry argument is ignored for Ownership mints
        let id = contract.mint(holder, 7, OWNERSHIP, 12345, holder, "ref".to_string());

        let record = contract.get_token(id).expect("token should exist");
        assert_eq!(record.expires_at, 0);
        assert!(record.transferable);
        assert_eq!(record.kind.to_u8(), OWNERSHIP);
        assert!(contract.has_valid_access(id));
    }

    #[test]
    fn ownership_mint_requires_holder_as_grantor() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder = env.get_account(2);
        let other = env.get_account(3);

        env.set_caller(minter);
        let result = contract.try_mint(holder, 1, OWNERSHIP, 0, other, "ref".to_string());
        assert_eq!(result, Err(Error::GrantorMismatch.into()));
        assert_eq!(contract.token_count(), 0);
    }

    #[test]
    fn mint_requires_capability() {
        let (mut contract, env, _admin) = setup();
        let outsider = env.get_account(2);

        env.set_caller(outsider);
        let result = contract.try_mint(outsider, 1, OWNERSHIP, 0, outsider, "ref".to_string());
        assert_eq!(result, Err(Error::MissingMintCapability.into()));
    }

    #[test]
    fn access_mint_rejects_past_expiry() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder = env.get_account(2);
        let grantor = env.get_account(3);

        env.advance_block_time(HOUR_MS);
        env.set_caller(minter);
        let result = contract.try_mint(holder, 1, ACCESS, HOUR_MS, grantor, "ref".to_string());
        assert_eq!(result, Err(Error::ExpiryNotInFuture.into()));
    }

    #[test]
    fn access_mint_rejects_self_grant() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let grantor = env.get_account(3);

        env.set_caller(minter);
        let result = contract.try_mint(grantor, 1, ACCESS, DAY_MS, grantor, "ref".to_string());
        assert_eq!(result, Err(Error::SelfGrant.into()));
    }

    #[test]
    fn access_validity_follows_expiry() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder = env.get_account(2);
        let grantor = env.get_account(3);

        env.set_caller(minter);
        let id = contract.mint(holder, 1, ACCESS, DAY_MS, grantor, "ref".to_string());
        assert!(contract.has_valid_access(id));

        env.advance_block_time(DAY_MS - 1);
        assert!(contract.has_valid_access(id));

        // Invalid at the expiry instant, not just after it
        env.advance_block_time(1);
        assert!(!contract.has_valid_access(id));
        // Not auto-deleted
        assert!(contract.get_token(id).is_some());
    }

    #[test]
    fn burn_expired_rejects_unexpired_token() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder = env.get_account(2);
        let grantor = env.get_account(3);

        env.set_caller(minter);
        let id = contract.mint(holder, 1, ACCESS, DAY_MS, grantor, "ref".to_string());

        env.set_caller(holder);
        assert_eq!(contract.try_burn_expired(id), Err(Error::TokenNotExpired.into()));
    }

    #[test]
    fn burn_expired_rejects_ownership_token() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder = env.get_account(2);

        env.set_caller(minter);
        let id = contract.mint(holder, 1, OWNERSHIP, 0, holder, "ref".to_string());

        env.set_caller(holder);
        assert_eq!(contract.try_burn_expired(id), Err(Error::WrongTokenKind.into()));
    }

    #[test]
    fn burn_expired_rejects_unrelated_caller() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder = env.get_account(2);
        let grantor = env.get_account(3);
        let outsider = env.get_account(4);

        env.set_caller(minter);
        let id = contract.mint(holder, 1, ACCESS, DAY_MS, grantor, "ref".to_string());
        env.advance_block_time(DAY_MS);

        env.set_caller(outsider);
        assert_eq!(contract.try_burn_expired(id), Err(Error::Unauthorized.into()));
    }

    #[test]
    fn burn_expired_removes_token_and_indexes() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder = env.get_account(2);
        let grantor = env.get_account(3);

        env.set_caller(minter);
        let id = contract.mint(holder, 1, ACCESS, DAY_MS, grantor, "ref".to_string());
        env.advance_block_time(DAY_MS);

        env.set_caller(holder);
        contract.burn_expired(id);

        assert!(contract.get_token(id).is_none());
        assert!(!contract.has_valid_access(id));
        assert!(contract.holder_tokens(holder).is_empty());
        assert!(contract.dataset_tokens(1).is_empty());
    }

    #[test]
    fn grantor_may_burn_expired_token() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder = env.get_account(2);
        let grantor = env.get_account(3);

        env.set_caller(minter);
        let id = contract.mint(holder, 1, ACCESS, DAY_MS, grantor, "ref".to_string());
        env.advance_block_time(DAY_MS);

        env.set_caller(grantor);
        contract.burn_expired(id);
        assert!(contract.get_token(id).is_none());
    }

    #[test]
    fn force_burn_bypasses_expiry_and_kind_checks() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder = env.get_account(2);

        env.set_caller(minter);
        let id = contract.mint(holder, 1, OWNERSHIP, 0, holder, "ref".to_string());

        // Minter also holds Burn in this fixture
        contract.force_burn(id);
        assert!(contract.get_token(id).is_none());
        assert!(contract.holder_tokens(holder).is_empty());
    }

    #[test]
    fn force_burn_requires_capability() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder = env.get_account(2);

        env.set_caller(minter);
        let id = contract.mint(holder, 1, OWNERSHIP, 0, holder, "ref".to_string());

        env.set_caller(holder);
        assert_eq!(contract.try_force_burn(id), Err(Error::MissingBurnCapability.into()));
    }

    #[test]
    fn burning_missing_token_fails_with_not_found() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        env.set_caller(minter);
        assert_eq!(contract.try_force_burn(99), Err(Error::TokenNotFound.into()));
        assert_eq!(contract.try_burn_expired(99), Err(Error::TokenNotFound.into()));
    }

    #[test]
    fn ids_are_never_reused_after_burn() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder = env.get_account(2);

        env.set_caller(minter);
        let first = contract.mint(holder, 1, OWNERSHIP, 0, holder, "ref".to_string());
        contract.force_burn(first);
        let second = contract.mint(holder, 1, OWNERSHIP, 0, holder, "ref".to_string());

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn transfer_moves_token_between_holder_indexes() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let from = env.get_account(2);
        let to = env.get_account(3);

        env.set_caller(minter);
        let id = contract.mint(from, 1, OWNERSHIP, 0, from, "ref".to_string());

        env.set_caller(from);
        contract.transfer(id, to);

        let record = contract.get_token(id).expect("token should exist");
        assert_eq!(record.holder, to);
        assert!(contract.holder_tokens(from).is_empty());
        assert_eq!(contract.holder_tokens(to), vec![id]);
    }

    #[test]
    fn transfer_rejects_non_transferable_token() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder = env.get_account(2);
        let grantor = env.get_account(3);
        let to = env.get_account(4);

        env.set_caller(minter);
        let id = contract.mint(holder, 1, ACCESS, DAY_MS, grantor, "ref".to_string());

        env.set_caller(holder);
        assert_eq!(contract.try_transfer(id, to), Err(Error::TokenNotTransferable.into()));
        // Holder unchanged
        assert_eq!(contract.get_token(id).unwrap().holder, holder);
    }

    #[test]
    fn transfer_rejects_non_holder() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder = env.get_account(2);
        let outsider = env.get_account(3);

        env.set_caller(minter);
        let id = contract.mint(holder, 1, OWNERSHIP, 0, holder, "ref".to_string());

        env.set_caller(outsider);
        assert_eq!(contract.try_transfer(id, outsider), Err(Error::Unauthorized.into()));
    }

    #[test]
    fn admin_can_make_access_token_transferable() {
        let (mut contract, env, admin, minter) = setup_with_minter();
        let holder = env.get_account(2);
        let grantor = env.get_account(3);
        let to = env.get_account(4);

        env.set_caller(minter);
        let id = contract.mint(holder, 1, ACCESS, DAY_MS, grantor, "ref".to_string());

        env.set_caller(admin);
        contract.set_transferability(id, true);

        env.set_caller(holder);
        contract.transfer(id, to);
        assert_eq!(contract.get_token(id).unwrap().holder, to);
    }

    #[test]
    fn set_transferability_requires_admin() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder = env.get_account(2);
        let grantor = env.get_account(3);

        env.set_caller(minter);
        let id = contract.mint(holder, 1, ACCESS, DAY_MS, grantor, "ref".to_string());

        env.set_caller(holder);
        assert_eq!(
            contract.try_set_transferability(id, true),
            Err(Error::MissingAdminCapability.into())
        );
    }

    #[test]
    fn pause_blocks_mutations_but_not_queries() {
        let (mut contract, env, admin, minter) = setup_with_minter();
        let holder = env.get_account(2);

        env.set_caller(minter);
        let id = contract.mint(holder, 1, OWNERSHIP, 0, holder, "ref".to_string());

        env.set_caller(admin);
        contract.pause();
        assert!(contract.is_paused());

        env.set_caller(minter);
        let result = contract.try_mint(holder, 1, OWNERSHIP, 0, holder, "ref".to_string());
        assert_eq!(result, Err(Error::ContractPaused.into()));

        env.set_caller(holder);
        assert_eq!(contract.try_transfer(id, minter), Err(Error::ContractPaused.into()));

        // Queries still served
        assert!(contract.has_valid_access(id));
        assert_eq!(contract.holder_tokens(holder), vec![id]);

        env.set_caller(admin);
        contract.unpause();
        env.set_caller(holder);
        contract.transfer(id, minter);
    }

    #[test]
    fn capability_grants_are_super_admin_only() {
        let (mut contract, env, _admin) = setup();
        let outsider = env.get_account(2);

        env.set_caller(outsider);
        let result = contract.try_grant_capability(capability::MINT, outsider);
        assert_eq!(result, Err(Error::Unauthorized.into()));
    }

    #[test]
    fn revoked_capability_stops_working() {
        let (mut contract, env, admin, minter) = setup_with_minter();
        let holder = env.get_account(2);

        env.set_caller(admin);
        contract.revoke_capability(capability::MINT, minter);

        env.set_caller(minter);
        let result = contract.try_mint(holder, 1, OWNERSHIP, 0, holder, "ref".to_string());
        assert_eq!(result, Err(Error::MissingMintCapability.into()));
    }

    #[test]
    fn holder_index_mirrors_records_across_operations() {
        let (mut contract, env, _admin, minter) = setup_with_minter();
        let holder = env.get_account(2);
        let grantor = env.get_account(3);

        env.set_caller(minter);
        let a = contract.mint(holder, 1, ACCESS, DAY_MS, grantor, "a".to_string());
        let b = contract.mint(holder, 2, ACCESS, WEEK_MS, grantor, "b".to_string());
        let c = contract.mint(holder, 3, ACCESS, MONTH_MS, grantor, "c".to_string());

        // Remove from the middle of the index
        contract.force_burn(b);

        let held = contract.holder_tokens(holder);
        assert_eq!(held.len(), 2);
        assert!(held.contains(&a));
        assert!(held.contains(&c));
        for id in held {
            assert_eq!(contract.get_token(id).unwrap().holder, holder);
        }
    }
}
