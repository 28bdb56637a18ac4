//! Seed the database with demo catalog data.
//!
//! Creates a handful of categories and products (with images) through the
//! catalog repository, so slug derivation behaves exactly as it does in
//! production. Also inserts a demo user so the authenticated endpoints can
//! be exercised by hand.

use rust_decimal::Decimal;
use tracing::info;

use orchard_core::UserId;
use orchard_server::db::{self, CatalogRepository};
use orchard_server::models::NewProduct;

struct SeedProduct {
    title: &'static str,
    price: Decimal,
    old_price: Option<Decimal>,
    description: &'static str,
    stock: i32,
    image: &'static str,
}

fn catalog() -> Vec<(&'static str, Vec<SeedProduct>)> {
    vec![
        (
            "Shoes",
            vec![
                SeedProduct {
                    title: "Trail Runner",
                    price: Decimal::new(7999, 2),
                    old_price: Some(Decimal::new(9999, 2)),
                    description: "Lightweight trail running shoe.",
                    stock: 25,
                    image: "https://img.example.com/trail-runner.jpg",
                },
                SeedProduct {
                    title: "Canvas Low-Top",
                    price: Decimal::new(4500, 2),
                    old_price: None,
                    description: "Everyday canvas sneaker.",
                    stock: 40,
                    image: "https://img.example.com/canvas-low-top.jpg",
                },
            ],
        ),
        (
            "Accessories",
            vec![SeedProduct {
                title: "Wool Beanie",
                price: Decimal::new(1800, 2),
                old_price: None,
                description: "Warm merino wool beanie.",
                stock: 60,
                image: "https://img.example.com/wool-beanie.jpg",
            }],
        ),
    ]
}

/// Seed categories, products and a demo user.
///
/// # Errors
///
/// Returns an error if the database URL is unset or any insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = super::migrate::database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let repo = CatalogRepository::new(&pool);

    for (category_name, products) in catalog() {
        let category = repo.create_category(category_name).await?;
        info!(category = %category.name, slug = %category.slug, "Created category");

        for seed in products {
            let product = repo
                .create_product(&NewProduct {
                    category_id: category.id,
                    title: seed.title.to_owned(),
                    price: seed.price,
                    old_price: seed.old_price,
                    description: seed.description.to_owned(),
                    stock: seed.stock,
                })
                .await?;
            repo.add_image(product.id, seed.image).await?;
            info!(product = %product.title, slug = %product.slug, "Created product");
        }
    }

    let demo_user = sqlx::query_scalar::<_, UserId>(
        "INSERT INTO users (email) VALUES ($1)
         ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
         RETURNING id",
    )
    .bind("demo@example.com")
    .fetch_one(&pool)
    .await?;
    info!(user_id = %demo_user, "Demo user ready (send as x-user-id)");

    Ok(())
}
