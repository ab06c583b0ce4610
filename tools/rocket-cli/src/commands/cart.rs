//! Cart commands.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use indicatif::ProgressBar;
use rocket_cart::{CartManager, ManagerError, UpdateProductAmount};
use rocket_core::LineItem;
use serde_json::json;

use super::{AddArgs, RemoveArgs, UpdateArgs};
use crate::context::Context;
use crate::output::ConsoleNotifier;

/// A manager wired to the console, with a spinner shown while it works.
struct Session {
    manager: CartManager,
    spinner: ProgressBar,
}

impl Session {
    fn open(ctx: &Context, msg: &str) -> Result<Self> {
        let spinner = ctx.output.spinner(msg);
        let notifier = Arc::new(ConsoleNotifier::new(ctx.output.clone(), spinner.clone()));

        match ctx.config.build_manager(notifier) {
            Ok(manager) => Ok(Self { manager, spinner }),
            Err(e) => {
                spinner.finish_and_clear();
                Err(e).context("Failed to open cart")
            }
        }
    }

    async fn finish(
        self,
        ctx: &Context,
        action: &str,
        result: Result<LineItem, ManagerError>,
    ) -> Result<()> {
        self.spinner.finish_and_clear();
        let item = result?;
        let cart = self.manager.cart().await;

        if ctx.output.is_json() {
            ctx.output.json(&json!({ "item": item, "cart": cart }));
            return Ok(());
        }

        ctx.output.success(&format!(
            "{} {} (amount {})",
            action, item.product.title, item.amount
        ));
        ctx.output.cart_table(&cart);
        Ok(())
    }
}

/// Print the stored cart.
pub async fn show(ctx: &Context) -> Result<()> {
    let session = Session::open(ctx, "Loading cart")?;
    session.spinner.finish_and_clear();
    let cart = session.manager.cart().await;

    if ctx.output.is_json() {
        ctx.output.json(&cart);
        return Ok(());
    }

    ctx.output.header("Cart");
    ctx.output.cart_table(&cart);
    Ok(())
}

/// Add one unit of a product.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    ctx.output.debug(&format!("catalog: {}", ctx.config.catalog.base_url));
    let session = Session::open(ctx, &format!("Adding product {}", args.id))?;
    let result = session.manager.add_product(args.id).await;
    session.finish(ctx, "Added", result).await
}

/// Remove a product from the cart.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let session = Session::open(ctx, &format!("Removing product {}", args.id))?;
    let result = session.manager.remove_product(args.id).await;
    session.finish(ctx, "Removed", result).await
}

/// Set a product's amount.
pub async fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    ctx.output.debug(&format!("catalog: {}", ctx.config.catalog.base_url));
    let session = Session::open(ctx, &format!("Updating product {}", args.id))?;
    let result = session
        .manager
        .update_product_amount(UpdateProductAmount::new(args.id, args.amount))
        .await;
    session.finish(ctx, "Updated", result).await
}
