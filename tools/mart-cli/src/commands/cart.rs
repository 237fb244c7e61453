//! Cart commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use mart_commerce::prelude::*;

use super::{AddArgs, CartArgs, CartCommand};
use crate::context::Context;
use crate::output::{format_price, truncate};

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CartCommand::Show => show_cart(ctx),
        CartCommand::Add(add) => add_to_cart(add, ctx),
        CartCommand::Clear { yes } => clear_cart(yes, ctx),
    }
}

fn show_cart(ctx: &Context) -> Result<()> {
    let cart = ctx.cart_store()?.load_cart();

    if ctx.output.is_json() {
        ctx.output.json(&cart);
        return Ok(());
    }

    if cart.is_empty() {
        ctx.output.info("Cart is empty");
        return Ok(());
    }

    print_cart(&cart, ctx);
    Ok(())
}

fn print_cart(cart: &Cart, ctx: &Context) {
    ctx.output.header("Cart");

    let widths = [16, 28, 6, 10, 10];
    ctx.output
        .table_row(&["PRODUCT", "NAME", "QTY", "PRICE", "TOTAL"], &widths);
    for item in cart {
        let id = truncate(item.product_id.as_str(), widths[0]);
        let name = truncate(&item.name, widths[1]);
        let qty = item.quantity.to_string();
        let price = format_price(item.unit_money());
        let total = format_price(item.line_total());
        ctx.output
            .table_row(&[id.as_str(), name.as_str(), qty.as_str(), price.as_str(), total.as_str()], &widths);

        if !item.selected_attributes.is_empty() {
            let attrs: Vec<String> = item
                .selected_attributes
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            ctx.output.kv("options", &attrs.join(", "));
        }
    }

    ctx.output.info("");
    ctx.output.kv("Items", &cart.item_count().to_string());
    ctx.output.kv("Subtotal", &format_price(cart.subtotal()));
}

fn add_to_cart(args: AddArgs, ctx: &Context) -> Result<()> {
    let candidate = build_candidate(args, ctx)?;

    let identity = ctx.identity()?;
    let store = ctx.cart_store()?;

    match AddToCart::new(&identity, &store).execute(candidate)? {
        AddOutcome::Added { cart, merged } => {
            if ctx.output.is_json() {
                ctx.output.json(&cart);
                return Ok(());
            }
            ctx.output.success(if merged {
                "Updated quantity in cart"
            } else {
                "Added to cart"
            });
            print_cart(&cart, ctx);
        }
        AddOutcome::RedirectToSignIn => {
            if ctx.output.is_json() {
                ctx.output
                    .json(&serde_json::json!({ "redirect": "sign_in" }));
                return Ok(());
            }
            ctx.output
                .warn("You need to sign in before adding to the cart: mart login --id <user-id>");
        }
    }

    Ok(())
}

fn build_candidate(args: AddArgs, ctx: &Context) -> Result<CartLineItem> {
    if let Some(path) = &args.from_product {
        let path = ctx.cwd.join(path);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read product file: {}", path.display()))?;
        let product: ProductRecord = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse product record: {}", path.display()))?;

        let attrs = product.select_attributes(args.attrs)?;

        let mut picker = QuantitySelector::for_product(&product);
        let quantity = picker.set(args.quantity);
        if quantity != args.quantity {
            ctx.output
                .warn(&format!("Quantity adjusted from {} to {}", args.quantity, quantity));
        }

        return Ok(product.to_line_item(quantity, attrs));
    }

    let Some(product_id) = args.product_id else {
        bail!("Either --product-id or --from-product is required");
    };
    let Some(name) = args.name else {
        bail!("--name is required with --product-id");
    };
    let Some(price) = args.price else {
        bail!("--price is required with --product-id");
    };

    let mut item = CartLineItem::new(product_id, name, price, args.quantity);
    if let Some(image) = args.image {
        item = item.with_image(image);
    }
    if let Some(category) = args.category {
        item = item.with_category(category);
    }
    if let Some(supplier) = args.supplier {
        item = item.with_supplier(supplier);
    }
    for (name, value) in args.attrs {
        item = item.with_attribute(name, value);
    }
    Ok(item)
}

fn clear_cart(yes: bool, ctx: &Context) -> Result<()> {
    if !yes && ctx.output.is_json() {
        bail!("Refusing to clear the cart without confirmation; pass --yes with --json");
    }

    let store = ctx.cart_store()?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Remove every item from the cart?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(());
        }
    }

    store.clear()?;
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "cleared": true }));
    } else {
        ctx.output.success("Cart cleared");
    }
    Ok(())
}
