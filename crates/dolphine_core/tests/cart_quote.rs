use dolphine_core::{
    CartError, NewCategory, NewProduct, Product, ProductPatch, QuoteChannel, QuoteSettings,
    QuoteStyle, Storefront, StorefrontSettings, ValidationError, MAX_QUANTITY_PER_ITEM,
};

fn store_with_products() -> (Storefront, Product, Product) {
    let store = Storefront::open_in_memory(StorefrontSettings {
        quote: QuoteSettings {
            business_name: "Dolphine Wood Machineries".to_string(),
            whatsapp_number: "15550001111".to_string(),
            messenger_page: "dolphine.machines".to_string(),
        },
        ..StorefrontSettings::default()
    })
    .unwrap();
    let (drum, planer) = {
        let catalog = store.catalog().unwrap();
        catalog.add_category(&NewCategory::new("Sanders")).unwrap();
        let drum = catalog
            .add_product(&NewProduct {
                price: "$3,200".to_string(),
                images: vec!["drum.jpg".to_string()],
                ..NewProduct::new("Drum Sander", "sanders")
            })
            .unwrap();
        let planer = catalog
            .add_product(&NewProduct::new("Thickness Planer", "sanders"))
            .unwrap();
        (drum, planer)
    };
    (store, drum, planer)
}

#[test]
fn adding_twice_increments_quantity_and_keeps_order() {
    let (store, drum, planer) = store_with_products();
    let cart = store.cart().unwrap();

    let first = cart.add_product(&drum).unwrap();
    assert_eq!(first.quantity, 1);
    assert_eq!(first.image.as_deref(), Some("drum.jpg"));
    cart.add_product(&planer).unwrap();
    let again = cart.add_product(&drum).unwrap();
    assert_eq!(again.quantity, 2);
    assert_eq!(again.added_at, first.added_at);

    let contents = cart.cart().unwrap();
    assert_eq!(contents.unique_items(), 2);
    assert_eq!(contents.total_items(), 3);
    assert_eq!(contents.items[0].product_id, drum.id);
    assert_eq!(contents.items[1].product_id, planer.id);
}

#[test]
fn re_adding_refreshes_product_snapshot() {
    let (store, drum, _) = store_with_products();
    let cart = store.cart().unwrap();
    cart.add_product(&drum).unwrap();

    let renamed = store
        .catalog()
        .unwrap()
        .update_product(
            drum.id,
            &ProductPatch {
                name: Some("Drum Sander 37\"".to_string()),
                ..ProductPatch::default()
            },
        )
        .unwrap();
    let line = cart.add_product(&renamed).unwrap();
    assert_eq!(line.name, "Drum Sander 37\"");
    assert_eq!(line.quantity, 2);
}

#[test]
fn set_quantity_updates_removes_and_validates() {
    let (store, drum, planer) = store_with_products();
    let cart = store.cart().unwrap();
    cart.add_product(&drum).unwrap();

    let line = cart.update_quantity(drum.id, 12).unwrap().unwrap();
    assert_eq!(line.quantity, 12);
    assert_eq!(cart.cart().unwrap().total_items(), 12);

    assert!(matches!(
        cart.update_quantity(drum.id, MAX_QUANTITY_PER_ITEM + 1),
        Err(CartError::Validation(ValidationError::QuantityOutOfRange(_)))
    ));
    assert!(matches!(
        cart.update_quantity(planer.id, 3),
        Err(CartError::ItemNotInCart(id)) if id == planer.id
    ));

    assert!(cart.update_quantity(drum.id, 0).unwrap().is_none());
    assert!(cart.cart().unwrap().is_empty());
    assert!(cart.update_quantity(drum.id, -4).unwrap().is_none());
}

#[test]
fn adding_beyond_limit_is_rejected() {
    let (store, drum, _) = store_with_products();
    let cart = store.cart().unwrap();
    cart.add_product(&drum).unwrap();
    cart.update_quantity(drum.id, MAX_QUANTITY_PER_ITEM).unwrap();

    assert!(matches!(
        cart.add_product(&drum),
        Err(CartError::Validation(ValidationError::QuantityOutOfRange(q))) if q == MAX_QUANTITY_PER_ITEM + 1
    ));
    assert_eq!(cart.cart().unwrap().total_items(), MAX_QUANTITY_PER_ITEM);
}

#[test]
fn remove_and_clear() {
    let (store, drum, planer) = store_with_products();
    let cart = store.cart().unwrap();
    cart.add_product(&drum).unwrap();
    cart.add_product(&planer).unwrap();

    assert!(cart.remove(drum.id).unwrap());
    assert!(!cart.remove(drum.id).unwrap());
    assert_eq!(cart.clear().unwrap(), 1);
    assert_eq!(cart.clear().unwrap(), 0);
}

#[test]
fn deleting_a_product_drops_its_cart_line() {
    let (store, drum, planer) = store_with_products();
    let cart = store.cart().unwrap();
    cart.add_product(&drum).unwrap();
    cart.add_product(&planer).unwrap();

    store.catalog().unwrap().delete_product(drum.id).unwrap();

    let contents = cart.cart().unwrap();
    assert_eq!(contents.unique_items(), 1);
    assert!(contents.find(drum.id).is_none());
}

#[test]
fn empty_cart_has_no_quote() {
    let (store, _, _) = store_with_products();
    assert!(matches!(
        store.quote_link(QuoteChannel::WhatsApp, QuoteStyle::Detailed),
        Err(CartError::EmptyCart)
    ));
}

#[test]
fn whatsapp_quote_lists_lines_and_encodes_message() {
    let (store, drum, planer) = store_with_products();
    let cart = store.cart().unwrap();
    cart.add_product(&drum).unwrap();
    cart.add_product(&drum).unwrap();
    cart.add_product(&planer).unwrap();

    let link = store
        .quote_link(QuoteChannel::WhatsApp, QuoteStyle::Detailed)
        .unwrap();
    assert!(link.message.starts_with(
        "Hello! I'm interested in the following machinery from Dolphine Wood Machineries:\n\n\
         • Drum Sander (Qty: 2)\n• Thickness Planer (Qty: 1)\n\n"
    ));
    assert!(link.message.contains("- Bulk discount pricing (if applicable)"));
    assert!(link.message.ends_with("Thank you!"));
    assert!(link
        .url
        .starts_with("https://wa.me/15550001111?text=Hello!%20I'm%20interested"));
    assert!(link.url.contains("%E2%80%A2%20Drum%20Sander%20(Qty%3A%202)%0A"));

    let brief = store
        .quote_link(QuoteChannel::WhatsApp, QuoteStyle::Brief)
        .unwrap();
    assert!(brief
        .message
        .ends_with("\n\nPlease provide me with a detailed quote. Thank you!"));
}

#[test]
fn messenger_quote_joins_lines_on_one_row() {
    let (store, drum, planer) = store_with_products();
    let cart = store.cart().unwrap();
    cart.add_product(&drum).unwrap();
    cart.add_product(&planer).unwrap();

    let detailed = store
        .quote_link(QuoteChannel::Messenger, QuoteStyle::Detailed)
        .unwrap();
    assert_eq!(
        detailed.message,
        "Interested in quote for: Drum Sander (Qty: 1), Thickness Planer (Qty: 1). \
         Please provide detailed pricing and delivery information."
    );

    cart.remove(planer.id).unwrap();
    let brief = store
        .quote_link(QuoteChannel::Messenger, QuoteStyle::Brief)
        .unwrap();
    assert_eq!(brief.channel, QuoteChannel::Messenger);
    assert_eq!(
        brief.url,
        "https://m.me/dolphine.machines?text=Interested%20in%3A%20Drum%20Sander%20(Qty%3A%201).%20Please%20provide%20quote."
    );
}
