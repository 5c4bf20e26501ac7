use dolphine_core::search::filter::{ProductFilter, Scope, TextQuery};
use dolphine_core::{
    CatalogQuery, CatalogServiceError, CategoryPatch, NewCategory, NewProduct, ProductPatch,
    RepoError, Storefront, StorefrontSettings, ValidationError,
};
use std::collections::BTreeMap;
use uuid::Uuid;

fn store() -> Storefront {
    Storefront::open_in_memory(StorefrontSettings::default()).unwrap()
}

fn seed(store: &Storefront) {
    let catalog = store.catalog().unwrap();
    catalog
        .add_category(&NewCategory {
            name: "CNC Machines".to_string(),
            description: "Computer-controlled routers".to_string(),
            image: String::new(),
        })
        .unwrap();
    catalog.add_category(&NewCategory::new("Planers")).unwrap();

    for (name, category, featured) in [
        ("Desktop CNC Router", "cnc-machines", true),
        ("Industrial CNC Router", "cnc-machines", false),
        ("5-Axis CNC Center", "cnc-machines", true),
        ("Nesting CNC Cell", "cnc-machines", false),
        ("Thickness Planer", "planers", false),
    ] {
        catalog
            .add_product(&NewProduct {
                description: format!("{name} for production shops"),
                featured,
                ..NewProduct::new(name, category)
            })
            .unwrap();
    }
}

#[test]
fn category_create_allocates_slug_and_suffixes_duplicates() {
    let store = store();
    let catalog = store.catalog().unwrap();

    let first = catalog.add_category(&NewCategory::new("Saw Mills")).unwrap();
    let second = catalog.add_category(&NewCategory::new("Saw  Mills!")).unwrap();
    let third = catalog.add_category(&NewCategory::new("saw mills")).unwrap();

    assert_eq!(first.slug, "saw-mills");
    assert_eq!(second.slug, "saw-mills-2");
    assert_eq!(third.slug, "saw-mills-3");
    assert_eq!(first.product_count, 0);
}

#[test]
fn category_create_rejects_blank_name() {
    let store = store();
    let err = store
        .catalog()
        .unwrap()
        .add_category(&NewCategory::new("   "))
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogServiceError::Repo(RepoError::Validation(ValidationError::BlankField("name")))
    ));
}

#[test]
fn product_create_stores_all_fields() {
    let store = store();
    seed(&store);
    let catalog = store.catalog().unwrap();

    let mut specifications = BTreeMap::new();
    specifications.insert("Working Area".to_string(), "1300x2500mm".to_string());
    specifications.insert("Spindle".to_string(), "9kW".to_string());
    let created = catalog
        .add_product(&NewProduct {
            description: "Heavy duty".to_string(),
            full_description: "Heavy duty router for panel processing.".to_string(),
            specifications: specifications.clone(),
            warranty: "2 years".to_string(),
            price: "$18,500".to_string(),
            images: vec!["front.jpg".to_string(), "side.jpg".to_string()],
            featured: true,
            tags: vec!["cnc".to_string(), "panel".to_string()],
            ..NewProduct::new("  Panel Router 1325 ", "cnc-machines")
        })
        .unwrap();

    assert_eq!(created.name, "Panel Router 1325");
    assert_eq!(created.slug, "panel-router-1325");
    assert_eq!(created.view_count, 0);

    let loaded = catalog.product(created.id).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.specifications, specifications);
    assert_eq!(loaded.primary_image(), Some("front.jpg"));
    assert_eq!(
        catalog.require_product("panel-router-1325").unwrap().id,
        created.id
    );
}

#[test]
fn product_requires_existing_category() {
    let store = store();
    seed(&store);
    let catalog = store.catalog().unwrap();

    let err = catalog
        .add_product(&NewProduct::new("Edge Bander", "edge-banders"))
        .unwrap_err();
    assert!(matches!(err, CatalogServiceError::CategoryNotFound(slug) if slug == "edge-banders"));

    let planer = catalog.require_product("thickness-planer").unwrap();
    let err = catalog
        .update_product(
            planer.id,
            &ProductPatch {
                category: Some("missing".to_string()),
                ..ProductPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, CatalogServiceError::CategoryNotFound(_)));
}

#[test]
fn product_update_applies_patch_and_guards_slugs() {
    let store = store();
    seed(&store);
    let catalog = store.catalog().unwrap();
    let router = catalog.require_product("desktop-cnc-router").unwrap();

    let renamed = catalog
        .update_product(
            router.id,
            &ProductPatch {
                name: Some("Desktop Router Pro".to_string()),
                price: Some("$4,900".to_string()),
                ..ProductPatch::default()
            },
        )
        .unwrap();
    assert_eq!(renamed.name, "Desktop Router Pro");
    assert_eq!(renamed.price, "$4,900");
    // Renaming keeps the slug stable.
    assert_eq!(renamed.slug, "desktop-cnc-router");

    let err = catalog
        .update_product(
            router.id,
            &ProductPatch {
                slug: Some("Thickness Planer".to_string()),
                ..ProductPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogServiceError::Repo(RepoError::SlugTaken { entity: "product", ref slug })
            if slug == "thickness-planer"
    ));

    let reslugged = catalog
        .update_product(
            router.id,
            &ProductPatch {
                slug: Some("Desktop Router".to_string()),
                ..ProductPatch::default()
            },
        )
        .unwrap();
    assert_eq!(reslugged.slug, "desktop-router");
    assert!(catalog.product_by_slug("desktop-cnc-router").unwrap().is_none());
}

#[test]
fn update_of_unknown_product_is_not_found() {
    let store = store();
    let missing = Uuid::new_v4();
    let err = store
        .catalog()
        .unwrap()
        .update_product(
            missing,
            &ProductPatch {
                price: Some("$1".to_string()),
                ..ProductPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, CatalogServiceError::ProductNotFound(id) if id == missing.to_string()));
}

#[test]
fn delete_is_idempotent() {
    let store = store();
    seed(&store);
    let catalog = store.catalog().unwrap();
    let planer = catalog.require_product("thickness-planer").unwrap();

    assert!(catalog.delete_product(planer.id).unwrap());
    assert!(!catalog.delete_product(planer.id).unwrap());
    assert!(catalog.product_by_slug("thickness-planer").unwrap().is_none());

    let planers = catalog.require_category("planers").unwrap();
    assert!(catalog.delete_category(planers.id).unwrap());
    assert!(!catalog.delete_category(planers.id).unwrap());
}

#[test]
fn deleting_category_keeps_its_products() {
    let store = store();
    seed(&store);
    let catalog = store.catalog().unwrap();
    let planers = catalog.require_category("planers").unwrap();

    catalog.delete_category(planers.id).unwrap();

    let planer = catalog.require_product("thickness-planer").unwrap();
    assert_eq!(planer.category, "planers");
    assert!(matches!(
        catalog.browse(&CatalogQuery::new(Some("planers"), None)),
        Err(CatalogServiceError::CategoryNotFound(_))
    ));
}

#[test]
fn category_slug_change_moves_products() {
    let store = store();
    seed(&store);
    let catalog = store.catalog().unwrap();
    let cnc = catalog.require_category("cnc-machines").unwrap();

    let renamed = catalog
        .update_category(
            cnc.id,
            &CategoryPatch {
                name: Some("CNC Routers".to_string()),
                ..CategoryPatch::default()
            },
        )
        .unwrap();
    assert_eq!(renamed.slug, "cnc-machines");

    let moved = catalog
        .update_category(
            cnc.id,
            &CategoryPatch {
                slug: Some("cnc-routers".to_string()),
                ..CategoryPatch::default()
            },
        )
        .unwrap();
    assert_eq!(moved.slug, "cnc-routers");
    assert_eq!(moved.product_count, 4);
    assert!(catalog.products_in_category("cnc-machines").unwrap().is_empty());
    assert_eq!(catalog.products_in_category("cnc-routers").unwrap().len(), 4);

    let err = catalog
        .update_category(
            cnc.id,
            &CategoryPatch {
                slug: Some("planers".to_string()),
                ..CategoryPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogServiceError::Repo(RepoError::SlugTaken { entity: "category", .. })
    ));
}

#[test]
fn browse_all_and_single_category() {
    let store = store();
    seed(&store);
    let catalog = store.catalog().unwrap();

    let all = catalog.browse(&CatalogQuery::new(Some("all"), None)).unwrap();
    assert_eq!(all.title, "All Categories");
    assert!(all.category.is_none());
    assert_eq!(all.products.len(), 5);
    assert_eq!(all.products[0].slug, "desktop-cnc-router");

    let cnc = catalog
        .browse(&CatalogQuery::new(Some("cnc-machines"), None))
        .unwrap();
    assert_eq!(cnc.title, "CNC Machines");
    assert_eq!(cnc.description, "Computer-controlled routers");
    assert_eq!(cnc.products.len(), 4);
    assert!(cnc.products.iter().all(|p| p.category == "cnc-machines"));

    let searched = catalog
        .browse(&CatalogQuery::new(None, Some("  INDUSTRIAL ")))
        .unwrap();
    let slugs: Vec<_> = searched.products.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["industrial-cnc-router"]);

    let by_description = catalog
        .browse(&CatalogQuery::new(Some("planers"), Some("production shops")))
        .unwrap();
    assert_eq!(by_description.products.len(), 1);
}

#[test]
fn featured_and_related_products() {
    let store = store();
    seed(&store);
    let catalog = store.catalog().unwrap();

    let featured: Vec<_> = catalog
        .featured_products()
        .unwrap()
        .into_iter()
        .map(|p| p.slug)
        .collect();
    assert_eq!(featured, vec!["desktop-cnc-router", "5-axis-cnc-center"]);

    let desktop = catalog.require_product("desktop-cnc-router").unwrap();
    let related: Vec<_> = catalog
        .related_products(&desktop.category, desktop.id, 3)
        .unwrap()
        .into_iter()
        .map(|p| p.slug)
        .collect();
    assert_eq!(
        related,
        vec!["industrial-cnc-router", "5-axis-cnc-center", "nesting-cnc-cell"]
    );

    let planer = catalog.require_product("thickness-planer").unwrap();
    assert!(catalog
        .related_products(&planer.category, planer.id, 3)
        .unwrap()
        .is_empty());
}

#[test]
fn admin_search_filters_text_and_category() {
    let store = store();
    seed(&store);
    let catalog = store.catalog().unwrap();

    let filter = ProductFilter {
        text: TextQuery::new("router"),
        category: Scope::parse("cnc-machines"),
    };
    assert_eq!(catalog.search_products(&filter).unwrap().len(), 2);

    let categories = catalog.search_categories(&TextQuery::new("plan")).unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].slug, "planers");
    assert_eq!(
        catalog.search_categories(&TextQuery::new("")).unwrap().len(),
        2
    );
}
