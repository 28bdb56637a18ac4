//! Integration tests for the catalog: slug derivation and delete protection.

use uuid::Uuid;

use orchard_integration_tests::{
    create_address, create_category, create_product, create_user, test_pool,
};
use orchard_server::db::{CartRepository, CatalogRepository, OrderRepository, RepositoryError};
use orchard_server::models::NewProduct;

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_colliding_titles_get_suffixed_slugs() {
    let pool = test_pool().await;
    let category = create_category(&pool).await;
    let repo = CatalogRepository::new(&pool);

    let title = format!("Same Title {}", Uuid::new_v4());
    let input = NewProduct {
        category_id: category,
        title: title.clone(),
        price: "10.00".parse().expect("decimal"),
        old_price: None,
        description: String::new(),
        stock: 1,
    };

    let first = repo.create_product(&input).await.expect("first");
    let second = repo.create_product(&input).await.expect("second");
    let third = repo.create_product(&input).await.expect("third");

    assert_ne!(first.slug, second.slug);
    assert_eq!(second.slug, format!("{}-1", first.slug));
    assert_eq!(third.slug, format!("{}-2", first.slug));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_product_lookup_by_slug() {
    let pool = test_pool().await;
    let category = create_category(&pool).await;
    let repo = CatalogRepository::new(&pool);

    let product = create_product(&pool, category, "10.00", 1).await;
    repo.add_image(product.id, "https://img.example.com/x.jpg")
        .await
        .expect("image");

    let detail = repo.get_by_slug(&product.slug).await.expect("lookup");
    assert_eq!(detail.id, product.id);
    assert_eq!(detail.images.len(), 1);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_ordered_product_cannot_be_deleted() {
    let pool = test_pool().await;
    let user = create_user(&pool).await;
    let address = create_address(&pool, user, true).await;
    let category = create_category(&pool).await;
    let product = create_product(&pool, category, "10.00", 5).await;

    CartRepository::new(&pool)
        .add_item(user, product.id, 1)
        .await
        .expect("add");
    OrderRepository::new(&pool)
        .checkout(user, address.id)
        .await
        .expect("checkout");

    let err = CatalogRepository::new(&pool)
        .delete_product(product.id)
        .await
        .expect_err("referenced by an order");
    assert!(matches!(err, RepositoryError::Conflict(_)));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_unordered_product_deletes_and_cascades_out_of_carts() {
    let pool = test_pool().await;
    let user = create_user(&pool).await;
    let category = create_category(&pool).await;
    let product = create_product(&pool, category, "10.00", 5).await;

    let carts = CartRepository::new(&pool);
    carts.add_item(user, product.id, 1).await.expect("add");

    CatalogRepository::new(&pool)
        .delete_product(product.id)
        .await
        .expect("delete");

    let cart = carts.contents(user).await.expect("reload cart");
    assert!(cart.lines.is_empty(), "cart line must cascade away");
}
