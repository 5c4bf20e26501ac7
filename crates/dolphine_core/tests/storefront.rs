use dolphine_core::{
    CatalogServiceError, Department, NewCategory, NewInquiry, NewProduct, QuoteChannel,
    QuoteStyle, Storefront, StorefrontSettings,
};

fn settings(visitor: &str) -> StorefrontSettings {
    StorefrontSettings {
        visitor: visitor.to_string(),
        user_agent: "integration-test".to_string(),
        ..StorefrontSettings::default()
    }
}

fn seed(store: &Storefront) {
    let catalog = store.catalog().unwrap();
    catalog.add_category(&NewCategory::new("CNC Machines")).unwrap();
    catalog.add_category(&NewCategory::new("Planers")).unwrap();
    for (name, category) in [
        ("Desktop CNC Router", "cnc-machines"),
        ("Industrial CNC Router", "cnc-machines"),
        ("Thickness Planer", "planers"),
    ] {
        catalog
            .add_product(&NewProduct::new(name, category))
            .unwrap();
    }
}

#[test]
fn viewing_a_product_counts_and_remembers_it() {
    let store = Storefront::open_in_memory(settings("showroom")).unwrap();
    seed(&store);

    let page = store.view_product("desktop-cnc-router").unwrap();
    assert_eq!(page.product.view_count, 1);
    assert_eq!(
        page.category.as_ref().map(|c| c.slug.as_str()),
        Some("cnc-machines")
    );
    let related: Vec<_> = page.related.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(related, vec!["industrial-cnc-router"]);

    let page = store.view_product("desktop-cnc-router").unwrap();
    assert_eq!(page.product.view_count, 2);
    store.view_product("thickness-planer").unwrap();

    let recent: Vec<_> = store
        .recently_viewed()
        .unwrap()
        .into_iter()
        .map(|view| view.slug)
        .collect();
    assert_eq!(recent, vec!["thickness-planer", "desktop-cnc-router"]);

    let catalog = store.catalog().unwrap();
    let planer = catalog.require_product("thickness-planer").unwrap();
    let views = catalog.product_views(None).unwrap();
    assert_eq!(views.len(), 3);
    assert!(views.iter().all(|view| view.user_agent == "integration-test"));
    assert_eq!(views[0].product_id, planer.id);

    assert_eq!(store.clear_recently_viewed().unwrap(), 2);
    assert!(store.recently_viewed().unwrap().is_empty());
}

#[test]
fn viewing_an_unknown_product_records_nothing() {
    let store = Storefront::open_in_memory(settings("local")).unwrap();
    seed(&store);

    assert!(matches!(
        store.view_product("missing"),
        Err(CatalogServiceError::ProductNotFound(slug)) if slug == "missing"
    ));
    assert!(store.recently_viewed().unwrap().is_empty());
    assert_eq!(store.catalog().unwrap().product_stats().unwrap().total_views, 0);
}

#[test]
fn stats_and_dashboard_summarize_the_store() {
    let store = Storefront::open_in_memory(settings("local")).unwrap();
    seed(&store);
    store.view_product("thickness-planer").unwrap();
    store.view_product("thickness-planer").unwrap();
    store.view_product("industrial-cnc-router").unwrap();

    let inquiries = store.inquiries().unwrap();
    for name in ["Lisa", "Mark"] {
        inquiries
            .submit(&NewInquiry {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                message: "Quote please".to_string(),
                department: Department::Sales,
                ..NewInquiry::default()
            })
            .unwrap();
    }
    let first = inquiries.recent(1).unwrap().remove(0);
    inquiries.mark_replied(first.id).unwrap();

    let stats = store.catalog().unwrap().product_stats().unwrap();
    assert_eq!(stats.total_products, 3);
    assert_eq!(stats.total_views, 3);
    let top: Vec<_> = stats.top_products.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(
        top,
        vec!["thickness-planer", "industrial-cnc-router", "desktop-cnc-router"]
    );
    assert_eq!(stats.recent_views.len(), 3);

    let dashboard = store.dashboard().unwrap();
    assert_eq!(dashboard.total_products, 3);
    assert_eq!(dashboard.total_categories, 2);
    assert_eq!(dashboard.total_inquiries, 2);
    assert_eq!(dashboard.new_inquiries, 1);
    assert_eq!(dashboard.total_views, 3);
    assert_eq!(dashboard.top_products[0].slug, "thickness-planer");
    assert_eq!(dashboard.recent_inquiries.len(), 2);
}

#[test]
fn state_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dolphine.sqlite3");

    {
        let store = Storefront::open(&path, settings("local")).unwrap();
        seed(&store);
        let product = store
            .catalog()
            .unwrap()
            .require_product("thickness-planer")
            .unwrap();
        store.cart().unwrap().add_product(&product).unwrap();
        store.view_product("thickness-planer").unwrap();
    }

    let store = Storefront::open(&path, settings("local")).unwrap();
    let cart = store.cart().unwrap().cart().unwrap();
    assert_eq!(cart.total_items(), 1);
    assert_eq!(store.recently_viewed().unwrap().len(), 1);
    let link = store
        .quote_link(QuoteChannel::WhatsApp, QuoteStyle::Brief)
        .unwrap();
    assert!(link.url.starts_with("https://wa.me/1234567890?text="));
    assert!(link.message.contains("Thickness Planer (Qty: 1)"));

    let other_visitor = Storefront::open(&path, settings("office")).unwrap();
    assert!(other_visitor.recently_viewed().unwrap().is_empty());
}

#[test]
fn stats_cap_top_products_and_recent_views() {
    let store = Storefront::open_in_memory(settings("local")).unwrap();
    let catalog = store.catalog().unwrap();
    catalog.add_category(&NewCategory::new("Saws")).unwrap();
    for index in 0..7 {
        catalog
            .add_product(&NewProduct::new(format!("Saw {index}"), "saws"))
            .unwrap();
    }
    for (slug, times) in [("saw-6", 6), ("saw-4", 4), ("saw-5", 1), ("saw-2", 1)] {
        for _ in 0..times {
            store.view_product(slug).unwrap();
        }
    }

    let stats = catalog.product_stats().unwrap();
    assert_eq!(stats.total_products, 7);
    assert_eq!(stats.total_views, 12);
    let top: Vec<_> = stats.top_products.iter().map(|p| p.slug.as_str()).collect();
    // Equal view counts fall back to creation order.
    assert_eq!(top, vec!["saw-6", "saw-4", "saw-2", "saw-5", "saw-0"]);

    assert_eq!(stats.recent_views.len(), 10);
    let saw_2 = catalog.require_product("saw-2").unwrap();
    let saw_5 = catalog.require_product("saw-5").unwrap();
    assert_eq!(stats.recent_views[0].product_id, saw_2.id);
    assert_eq!(stats.recent_views[1].product_id, saw_5.id);
}

#[test]
fn dashboard_keeps_five_newest_inquiries() {
    let store = Storefront::open_in_memory(settings("local")).unwrap();
    seed(&store);
    let inquiries = store.inquiries().unwrap();
    for index in 0..7 {
        inquiries
            .submit(&NewInquiry {
                name: format!("Buyer {index}"),
                email: format!("buyer{index}@example.com"),
                message: "Need a quote".to_string(),
                ..NewInquiry::default()
            })
            .unwrap();
    }

    let dashboard = store.dashboard().unwrap();
    assert_eq!(dashboard.total_inquiries, 7);
    assert_eq!(dashboard.new_inquiries, 7);
    let names: Vec<_> = dashboard
        .recent_inquiries
        .iter()
        .map(|inquiry| inquiry.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Buyer 6", "Buyer 5", "Buyer 4", "Buyer 3", "Buyer 2"]
    );
}
