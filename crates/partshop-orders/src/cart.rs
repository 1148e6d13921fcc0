//! Cart sidebar: quantity changes are applied by the backend and the cart it
//! answers with replaces the local copy.

use partshop_core::commerce::Cart;
use partshop_core::traits::CartApi;

use crate::error::{Result, WorkflowError};

pub struct CartSession<A: CartApi> {
    api: A,
    cart: Cart,
}

impl<A: CartApi> CartSession<A> {
    pub async fn load(api: A) -> Result<Self> {
        let cart = api.cart().await?;
        Ok(Self { api, cart })
    }

    pub fn cart(&self) -> &Cart { &self.cart }

    pub fn subtotal(&self) -> f64 { self.cart.subtotal() }

    pub async fn increment(&mut self, product_id: &str) -> Result<&Cart> {
        let quantity = self.quantity_of(product_id)?;
        self.set_quantity(product_id, quantity + 1).await
    }

    /// Dropping below one removes the line.
    pub async fn decrement(&mut self, product_id: &str) -> Result<&Cart> {
        let quantity = self.quantity_of(product_id)?;
        self.set_quantity(product_id, quantity.saturating_sub(1)).await
    }

    pub async fn set_quantity(&mut self, product_id: &str, quantity: u32) -> Result<&Cart> {
        if quantity == 0 {
            return self.remove(product_id).await;
        }
        self.cart = self.api.set_quantity(product_id, quantity).await?;
        tracing::debug!(product_id, quantity, "cart quantity updated");
        Ok(&self.cart)
    }

    pub async fn remove(&mut self, product_id: &str) -> Result<&Cart> {
        self.cart = self.api.remove_item(product_id).await?;
        tracing::debug!(product_id, "cart line removed");
        Ok(&self.cart)
    }

    fn quantity_of(&self, product_id: &str) -> Result<u32> {
        self.cart
            .line(product_id)
            .map(|l| l.quantity)
            .ok_or_else(|| WorkflowError::NotInCart(product_id.to_string()))
    }
}
