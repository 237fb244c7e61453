use std::collections::HashSet;

use mart_cache::{Cache, FileBackend};
use mart_commerce::prelude::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn line(id: &str, name: &str, price: f64, qty: u32) -> CartLineItem {
    CartLineItem::new(id, name, price, qty)
}

struct NobodySignedIn;

impl IdentityProvider for NobodySignedIn {
    fn authorize(&self) -> Authorization {
        Authorization::Unauthorized
    }
}

struct SignedIn;

impl IdentityProvider for SignedIn {
    fn authorize(&self) -> Authorization {
        Authorization::Authorized(Identity::new("buyer-1").with_name("Ada", "Lovelace"))
    }
}

#[test]
fn test_widget_scenario() {
    let cart = Cart::new();

    let cart = add_or_increment(&cart, line("p1", "Widget", 9.99, 2));
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].quantity, 2);

    let cart = add_or_increment(&cart, line("p2", "Gizmo", 4.25, 1));
    let cart = add_or_increment(&cart, line("p1", "Widget (renamed)", 11.0, 3));

    let summary: Vec<(&str, u32)> = cart
        .iter()
        .map(|i| (i.product_id.as_str(), i.quantity))
        .collect();
    assert_eq!(summary, vec![("p1", 5), ("p2", 1)]);

    let p1 = cart.get(&ProductId::new("p1")).unwrap();
    assert_eq!(p1.name, "Widget");
    assert_eq!(p1.unit_price, 9.99);
}

#[test]
fn test_unauthenticated_add_leaves_file_bytes_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let store = CartStore::new(Cache::new(FileBackend::open(dir.path()).unwrap()));

    store.save_cart(&Cart::new().add_or_increment(line("p1", "Widget", 9.99, 2))).unwrap();
    let before = std::fs::read(dir.path().join("cart")).unwrap();

    let outcome = AddToCart::new(&NobodySignedIn, &store)
        .execute(line("p2", "Gizmo", 1.0, 1))
        .unwrap();

    assert_eq!(outcome, AddOutcome::RedirectToSignIn);
    assert_eq!(std::fs::read(dir.path().join("cart")).unwrap(), before);
}

#[test]
fn test_unauthenticated_add_does_not_create_cart() {
    let dir = tempfile::tempdir().unwrap();
    let cache = Cache::new(FileBackend::open(dir.path()).unwrap());
    let store = CartStore::new(cache.clone());

    AddToCart::new(&NobodySignedIn, &store)
        .execute(line("p1", "Widget", 1.0, 1))
        .unwrap();

    assert!(cache.keys().unwrap().is_empty());
}

#[test]
fn test_cart_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = CartStore::new(Cache::new(FileBackend::open(dir.path()).unwrap()));
        let add = AddToCart::new(&SignedIn, &store);
        add.execute(line("p1", "Widget", 9.99, 2)).unwrap();
        add.execute(line("p2", "Gizmo", 4.25, 1)).unwrap();
    }

    let store = CartStore::new(Cache::new(FileBackend::open(dir.path()).unwrap()));
    let cart = store.load_cart();
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.item_count(), 3);
}

#[test]
fn test_product_page_to_cart() {
    let mut product = ProductRecord::new("p-jack", "Pallet Jack", 399.0);
    product.supplier = Supplier::new("Linus", "Torvalds");
    product
        .attributes
        .insert("capacity".into(), vec!["2t".into(), "3t".into()]);

    let mut quantity = QuantitySelector::for_product(&product);
    quantity.increment();

    let attrs = product.select_attributes([("capacity", "3t")]).unwrap();
    let store = CartStore::new(Cache::in_memory());
    let outcome = AddToCart::new(&SignedIn, &store)
        .execute(product.to_line_item(quantity.value(), attrs))
        .unwrap();

    let AddOutcome::Added { cart, merged } = outcome else {
        panic!("expected the add to go through");
    };
    assert!(!merged);
    let line = &cart.items()[0];
    assert_eq!(line.quantity, 2);
    assert_eq!(line.supplier_display_name, "Linus Torvalds");
    assert_eq!(line.selected_attributes["capacity"], "3t");
}

#[test]
fn test_derived_prices_reload_exactly() {
    let store = CartStore::new(Cache::in_memory());
    let prices = [212.918_907_267_134_59, 14.99 * 0.9, 0.1 + 0.2, 1e-7, 123_456_789.123_456_78];
    let cart = prices.iter().enumerate().fold(Cart::new(), |cart, (n, price)| {
        cart.add_or_increment(line(&format!("p{}", n), "Priced", *price, 1))
    });

    store.save_cart(&cart).unwrap();
    assert_eq!(store.load_cart(), cart);
}

fn candidate() -> impl Strategy<Value = CartLineItem> {
    ("p[0-5]", "[a-z]{1,8}", 0u32..100_000, 1u32..50).prop_map(|(id, name, cents, qty)| {
        CartLineItem::new(id, name, f64::from(cents) / 100.0, qty)
    })
}

fn first_seen_order(adds: &[CartLineItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    adds.iter()
        .filter(|c| seen.insert(c.product_id.clone()))
        .map(|c| c.product_id.to_string())
        .collect()
}

proptest! {
    #[test]
    fn prop_new_product_appends(
        adds in proptest::collection::vec(candidate(), 0..20),
        qty in 1u32..100,
    ) {
        let cart = adds.iter().cloned().fold(Cart::new(), |c, x| c.add_or_increment(x));
        let fresh = CartLineItem::new("fresh", "New thing", 3.0, qty);

        let next = add_or_increment(&cart, fresh.clone());

        prop_assert_eq!(next.len(), cart.len() + 1);
        prop_assert_eq!(&next.items()[..cart.len()], cart.items());
        prop_assert_eq!(next.items().last().unwrap(), &fresh);
    }

    #[test]
    fn prop_existing_product_increments(
        adds in proptest::collection::vec(candidate(), 1..20),
        pick in any::<prop::sample::Index>(),
        name in "[A-Z]{1,8}",
        qty in 1u32..100,
    ) {
        let cart = adds.iter().cloned().fold(Cart::new(), |c, x| c.add_or_increment(x));
        let existing = pick.get(cart.items()).clone();
        let repeat = CartLineItem::new(existing.product_id.clone(), name, 1.0, qty)
            .with_image("other.jpg");

        let next = cart.add_or_increment(repeat);

        prop_assert_eq!(next.len(), cart.len());
        let merged = next.get(&existing.product_id).unwrap();
        prop_assert_eq!(merged.quantity, existing.quantity + qty);
        prop_assert_eq!(
            CartLineItem { quantity: existing.quantity, ..merged.clone() },
            existing.clone()
        );
    }

    #[test]
    fn prop_unique_and_ordered(adds in proptest::collection::vec(candidate(), 0..40)) {
        let cart = adds.iter().cloned().fold(Cart::new(), |c, x| c.add_or_increment(x));

        let ids: Vec<String> = cart.iter().map(|i| i.product_id.to_string()).collect();
        let distinct: HashSet<&String> = ids.iter().collect();
        prop_assert_eq!(distinct.len(), ids.len());
        prop_assert_eq!(ids, first_seen_order(&adds));

        let total: u64 = adds.iter().map(|a| u64::from(a.quantity)).sum();
        prop_assert_eq!(cart.item_count(), total);
        prop_assert!(cart.iter().all(|i| i.quantity >= 1));
    }

    #[test]
    fn prop_store_roundtrip(adds in proptest::collection::vec(candidate(), 0..20)) {
        let store = CartStore::new(Cache::in_memory());
        for add in &adds {
            store.add(add.clone()).unwrap();
        }
        let expected = adds.iter().cloned().fold(Cart::new(), |c, x| c.add_or_increment(x));
        prop_assert_eq!(store.load_cart(), expected);
    }

    #[test]
    fn prop_saved_prices_reload_exactly(
        prices in proptest::collection::vec(
            any::<f64>().prop_filter("finite price", |p| p.is_finite()),
            1..10,
        ),
    ) {
        let store = CartStore::new(Cache::in_memory());
        let cart = prices.iter().enumerate().fold(Cart::new(), |cart, (n, price)| {
            cart.add_or_increment(CartLineItem::new(format!("p{}", n), "Priced", *price, 1))
        });

        store.save_cart(&cart).unwrap();
        let loaded = store.load_cart();

        prop_assert_eq!(loaded.len(), cart.len());
        for (saved, reloaded) in cart.iter().zip(loaded.iter()) {
            prop_assert_eq!(saved.unit_price, reloaded.unit_price);
        }
    }
}
