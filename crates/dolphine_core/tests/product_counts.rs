use dolphine_core::{NewCategory, NewProduct, ProductPatch, Storefront, StorefrontSettings};

fn count_of(store: &Storefront, slug: &str) -> i64 {
    store
        .catalog()
        .unwrap()
        .require_category(slug)
        .unwrap()
        .product_count
}

#[test]
fn counts_follow_product_writes() {
    let store = Storefront::open_in_memory(StorefrontSettings::default()).unwrap();
    let catalog = store.catalog().unwrap();
    catalog.add_category(&NewCategory::new("Sanders")).unwrap();
    catalog.add_category(&NewCategory::new("Edge Banders")).unwrap();

    let drum = catalog
        .add_product(&NewProduct::new("Drum Sander", "sanders"))
        .unwrap();
    catalog
        .add_product(&NewProduct::new("Wide Belt Sander", "sanders"))
        .unwrap();
    assert_eq!(count_of(&store, "sanders"), 2);
    assert_eq!(count_of(&store, "edge-banders"), 0);

    catalog
        .update_product(
            drum.id,
            &ProductPatch {
                category: Some("edge-banders".to_string()),
                ..ProductPatch::default()
            },
        )
        .unwrap();
    assert_eq!(count_of(&store, "sanders"), 1);
    assert_eq!(count_of(&store, "edge-banders"), 1);

    catalog.delete_product(drum.id).unwrap();
    assert_eq!(count_of(&store, "edge-banders"), 0);
}

#[test]
fn new_category_picks_up_dangling_products() {
    let store = Storefront::open_in_memory(StorefrontSettings::default()).unwrap();
    let catalog = store.catalog().unwrap();
    let dryers = catalog.add_category(&NewCategory::new("Wood Dryers")).unwrap();
    catalog
        .add_product(&NewProduct::new("Vacuum Kiln", "wood-dryers"))
        .unwrap();
    catalog.delete_category(dryers.id).unwrap();

    let recreated = catalog.add_category(&NewCategory::new("Wood Dryers")).unwrap();
    assert_eq!(recreated.slug, "wood-dryers");
    assert_eq!(recreated.product_count, 1);
}

#[test]
fn refresh_repairs_counts_after_external_edits() {
    let store = Storefront::open_in_memory(StorefrontSettings::default()).unwrap();
    let catalog = store.catalog().unwrap();
    catalog.add_category(&NewCategory::new("Planers")).unwrap();
    catalog
        .add_product(&NewProduct::new("Jointer Planer", "planers"))
        .unwrap();

    store
        .connection()
        .execute(
            "UPDATE categories SET product_count = 42 WHERE slug = 'planers';",
            [],
        )
        .unwrap();
    assert_eq!(count_of(&store, "planers"), 42);

    assert_eq!(catalog.refresh_product_counts().unwrap(), 1);
    assert_eq!(count_of(&store, "planers"), 1);
    assert_eq!(catalog.refresh_product_counts().unwrap(), 0);
}
