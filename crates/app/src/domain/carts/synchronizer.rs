//! Cart synchronizer
//!
//! Owns the in-memory cart of one client and keeps it aligned with whichever
//! store is authoritative: device storage for guests, the account's remote
//! cart document once signed in. Every mutation is computed on a copy,
//! persisted, and only then committed in memory, so the returned cart always
//! equals what was written.
//!
//! Writes are last-write-wins. Two clients mutating the same account cart
//! concurrently can overwrite each other; there is no version check.

use std::sync::Arc;

use serde::Serialize;
use storefront::{
    cart::{Cart, CartError, CartNotice},
    products::{Product, ProductId},
};
use tracing::{debug, info, warn};

use crate::{
    documents::{DocumentStore, DocumentSubscription},
    domain::carts::{
        errors::CartsServiceError,
        store::{CartStore, LocalCartStore, RemoteCartStore, cart_from_snapshot},
    },
    identity::UserId,
    local_storage::{LocalStorage, MemoryLocalStorage},
};

/// Who the cart belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartScope {
    Guest,
    Account(UserId),
}

/// Cart state after a successful mutation, with the notice to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartChange {
    pub cart: Cart,
    pub notice: CartNotice,
}

pub struct CartSynchronizer {
    local: Arc<dyn LocalStorage>,
    documents: Arc<dyn DocumentStore>,
    scope: CartScope,
    store: Box<dyn CartStore>,
    subscription: Option<DocumentSubscription>,
    cart: Cart,
    last_notice: Option<CartNotice>,
}

impl std::fmt::Debug for CartSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSynchronizer")
            .field("scope", &self.scope)
            .field("cart", &self.cart)
            .field("last_notice", &self.last_notice)
            .finish_non_exhaustive()
    }
}

impl CartSynchronizer {
    /// Hydrate the cart for the current identity. Guests read device
    /// storage; accounts subscribe to their remote cart and adopt it.
    ///
    /// # Errors
    ///
    /// Returns an error when the authoritative store cannot be read.
    pub async fn mount(
        identity: Option<&UserId>,
        local: Arc<dyn LocalStorage>,
        documents: Arc<dyn DocumentStore>,
    ) -> Result<Self, CartsServiceError> {
        match identity {
            None => {
                let store = LocalCartStore::new(local.clone());
                let cart = store.load().await?;

                debug!(lines = cart.len(), "mounted guest cart");

                Ok(Self {
                    local,
                    documents,
                    scope: CartScope::Guest,
                    store: Box::new(store),
                    subscription: None,
                    cart,
                    last_notice: None,
                })
            }
            Some(user) => {
                let store = RemoteCartStore::new(documents.clone(), user)?;
                let mut subscription = store.subscribe().await?;
                let cart = cart_from_snapshot(subscription.borrow_and_update().as_ref());

                debug!(%user, lines = cart.len(), "mounted account cart");

                Ok(Self {
                    local,
                    documents,
                    scope: CartScope::Account(user.clone()),
                    store: Box::new(store),
                    subscription: Some(subscription),
                    cart,
                    last_notice: None,
                })
            }
        }
    }

    /// Load an account cart for a single request, without a live subscription.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote cart cannot be read.
    pub async fn detached(
        user: &UserId,
        documents: Arc<dyn DocumentStore>,
    ) -> Result<Self, CartsServiceError> {
        let store = RemoteCartStore::new(documents.clone(), user)?;
        let cart = store.load().await?;

        Ok(Self {
            local: Arc::new(MemoryLocalStorage::new()),
            documents,
            scope: CartScope::Account(user.clone()),
            store: Box::new(store),
            subscription: None,
            cart,
            last_notice: None,
        })
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn scope(&self) -> &CartScope {
        &self.scope
    }

    /// Notice from the most recent mutation attempt, including rejections.
    #[must_use]
    pub fn last_notice(&self) -> Option<&CartNotice> {
        self.last_notice.as_ref()
    }

    /// Adopt a pending remote snapshot, if any. Returns whether the cart changed.
    pub fn sync_remote(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };

        if !subscription.has_changed().unwrap_or(false) {
            return false;
        }

        let remote = cart_from_snapshot(subscription.borrow_and_update().as_ref());

        if remote == self.cart {
            return false;
        }

        self.cart = remote;

        true
    }

    /// Wait for the next remote snapshot and adopt it.
    ///
    /// # Errors
    ///
    /// - [`CartsServiceError::NotSubscribed`]: the cart is not following a remote document.
    /// - [`CartsServiceError::SubscriptionClosed`]: the listener stopped.
    pub async fn next_remote_change(&mut self) -> Result<&Cart, CartsServiceError> {
        let subscription = self
            .subscription
            .as_mut()
            .ok_or(CartsServiceError::NotSubscribed)?;

        subscription
            .changed()
            .await
            .map_err(|_closed| CartsServiceError::SubscriptionClosed)?;

        self.cart = cart_from_snapshot(subscription.borrow_and_update().as_ref());

        Ok(&self.cart)
    }

    /// Add `quantity` units of `product`, checking its current stock.
    ///
    /// # Errors
    ///
    /// Returns [`CartsServiceError::Cart`] for rejected mutations, or a store
    /// error when persisting fails. Nothing is persisted on rejection.
    pub async fn add(
        &mut self,
        product: &Product,
        quantity: u32,
    ) -> Result<CartChange, CartsServiceError> {
        self.apply(|cart| cart.add(product, quantity)).await
    }

    /// Increase a line by one unit.
    ///
    /// # Errors
    ///
    /// See [`CartSynchronizer::add`].
    pub async fn increase(&mut self, product: &ProductId) -> Result<CartChange, CartsServiceError> {
        self.apply(|cart| cart.increase(product)).await
    }

    /// Decrease a line by one unit, removing it at quantity one.
    ///
    /// # Errors
    ///
    /// See [`CartSynchronizer::add`].
    pub async fn decrease(&mut self, product: &ProductId) -> Result<CartChange, CartsServiceError> {
        self.apply(|cart| cart.decrease(product)).await
    }

    /// Remove a line entirely.
    ///
    /// # Errors
    ///
    /// See [`CartSynchronizer::add`].
    pub async fn remove(&mut self, product: &ProductId) -> Result<CartChange, CartsServiceError> {
        self.apply(|cart| cart.remove(product)).await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns a store error when persisting fails.
    pub async fn clear(&mut self) -> Result<CartChange, CartsServiceError> {
        self.apply(|cart| Ok(cart.clear())).await
    }

    async fn apply<F>(&mut self, mutate: F) -> Result<CartChange, CartsServiceError>
    where
        F: FnOnce(&mut Cart) -> Result<CartNotice, CartError>,
    {
        self.sync_remote();

        let mut next = self.cart.clone();

        let notice = match mutate(&mut next) {
            Ok(notice) => notice,
            Err(error) => {
                warn!(%error, "cart mutation rejected");

                if let Some(notice) = error.notice() {
                    self.last_notice = Some(notice);
                }

                return Err(error.into());
            }
        };

        self.store.save(&next).await?;
        self.mark_remote_seen();

        self.cart = next;
        self.last_notice = Some(notice.clone());

        Ok(CartChange {
            cart: self.cart.clone(),
            notice,
        })
    }

    /// Our own write echoes back through the subscription; skip it.
    fn mark_remote_seen(&mut self) {
        if let Some(subscription) = self.subscription.as_mut() {
            subscription.mark_unchanged();
        }
    }

    /// Switch to `user`'s account cart, folding the guest cart into it.
    ///
    /// Lines missing from the account cart are appended; lines on both sides
    /// keep the larger quantity and the account's snapshot. The device cart is
    /// cleared afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error when reading or writing either store fails.
    pub async fn sign_in(&mut self, user: &UserId) -> Result<&Cart, CartsServiceError> {
        let guest_store = LocalCartStore::new(self.local.clone());

        let guest = match self.scope {
            CartScope::Guest => self.cart.clone(),
            CartScope::Account(_) => guest_store.load().await?,
        };

        let remote_store = RemoteCartStore::new(self.documents.clone(), user)?;
        let mut subscription = remote_store.subscribe().await?;

        let mut merged = cart_from_snapshot(subscription.borrow_and_update().as_ref());
        let guest_lines = guest.len();

        merged.merge(guest);

        remote_store.save(&merged).await?;
        subscription.mark_unchanged();
        guest_store.clear().await?;

        info!(%user, guest_lines, lines = merged.len(), "merged guest cart into account cart");

        self.scope = CartScope::Account(user.clone());
        self.store = Box::new(remote_store);
        self.subscription = Some(subscription);
        self.cart = merged;

        Ok(&self.cart)
    }

    /// Drop the account subscription and fall back to the device cart.
    ///
    /// # Errors
    ///
    /// Returns an error when device storage cannot be read.
    pub async fn sign_out(&mut self) -> Result<&Cart, CartsServiceError> {
        let store = LocalCartStore::new(self.local.clone());

        self.cart = store.load().await?;
        self.scope = CartScope::Guest;
        self.store = Box::new(store);
        self.subscription = None;
        self.last_notice = None;

        Ok(&self.cart)
    }
}
