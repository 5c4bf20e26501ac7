//! Quote cart use-case service.
//!
//! # Invariants
//! - Adding a product already in the cart increments its quantity.
//! - Setting a quantity of zero or less removes the line.
//! - Quantities never exceed [`MAX_QUANTITY_PER_ITEM`].

use crate::model::cart::{validate_quantity, Cart, CartItem, MAX_QUANTITY_PER_ITEM};
use crate::model::now_epoch_ms;
use crate::model::product::{Product, ProductId};
use crate::model::validation::ValidationError;
use crate::repo::cart_repo::CartRepository;
use crate::repo::RepoError;
use crate::service::quote::{build_quote_link, QuoteChannel, QuoteLink, QuoteSettings, QuoteStyle};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CartError {
    /// A quote was requested for a cart with no lines.
    EmptyCart,
    /// The product has no line in the cart.
    ItemNotInCart(ProductId),
    Validation(ValidationError),
    Repo(RepoError),
}

impl Display for CartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCart => write!(f, "cart is empty"),
            Self::ItemNotInCart(id) => write!(f, "product {id} is not in the cart"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CartError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CartError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for CartError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type CartResult<T> = Result<T, CartError>;

pub struct CartService<R: CartRepository> {
    repo: R,
}

impl<R: CartRepository> CartService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn cart(&self) -> CartResult<Cart> {
        Ok(Cart::new(self.repo.list_items()?))
    }

    /// Adds one unit of `product`.
    pub fn add_product(&self, product: &Product) -> CartResult<CartItem> {
        let item = match self.repo.get_item(product.id)? {
            Some(existing) => {
                let quantity = existing.quantity.saturating_add(1);
                if quantity > MAX_QUANTITY_PER_ITEM {
                    return Err(ValidationError::QuantityOutOfRange(quantity).into());
                }
                // Refresh the snapshot so renamed products show their new name.
                CartItem {
                    quantity,
                    ..CartItem::from_product(product, existing.added_at)
                }
            }
            None => CartItem::from_product(product, now_epoch_ms()),
        };
        self.repo.upsert_item(&item)?;
        info!(
            "event=cart_change module=cart status=ok action=add product_id={} quantity={}",
            item.product_id, item.quantity
        );
        Ok(item)
    }

    /// Sets a line's quantity. Returns `None` when the line was removed.
    pub fn update_quantity(
        &self,
        product_id: ProductId,
        quantity: i64,
    ) -> CartResult<Option<CartItem>> {
        if quantity <= 0 {
            self.remove(product_id)?;
            return Ok(None);
        }
        let quantity = validate_quantity(quantity)?;
        let mut item = self
            .repo
            .get_item(product_id)?
            .ok_or(CartError::ItemNotInCart(product_id))?;
        item.quantity = quantity;
        self.repo.upsert_item(&item)?;
        info!(
            "event=cart_change module=cart status=ok action=set product_id={product_id} quantity={quantity}"
        );
        Ok(Some(item))
    }

    pub fn remove(&self, product_id: ProductId) -> CartResult<bool> {
        let removed = self.repo.remove_item(product_id)?;
        info!(
            "event=cart_change module=cart status=ok action=remove product_id={product_id} removed={removed}"
        );
        Ok(removed)
    }

    pub fn clear(&self) -> CartResult<usize> {
        let removed = self.repo.clear()?;
        info!("event=cart_change module=cart status=ok action=clear removed={removed}");
        Ok(removed)
    }

    /// Builds the outbound quote link for the current cart.
    pub fn quote_link(
        &self,
        settings: &QuoteSettings,
        channel: QuoteChannel,
        style: QuoteStyle,
    ) -> CartResult<QuoteLink> {
        let cart = self.cart()?;
        let link =
            build_quote_link(&cart.items, settings, channel, style).ok_or(CartError::EmptyCart)?;
        info!(
            "event=quote_link module=cart status=ok channel={} unique_items={} total_items={}",
            channel,
            cart.unique_items(),
            cart.total_items()
        );
        Ok(link)
    }
}
