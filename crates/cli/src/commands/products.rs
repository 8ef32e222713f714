//! Catalog browsing commands.

use super::client_from_env;

/// List one page of the catalog.
#[allow(clippy::print_stdout)]
pub async fn list(
    search: Option<&str>,
    category: Option<&str>,
    page: i64,
    page_size: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, client) = client_from_env()?;

    let products = client.products(search, category, page, page_size).await?;

    println!(
        "{} products (page {} of {})",
        products.total,
        products.page,
        (products.total + products.page_size - 1) / products.page_size.max(1)
    );
    for product in &products.items {
        println!(
            "  #{:<6} {:<40} {:>10}  stock {}",
            product.id, product.name, product.price, product.stock
        );
    }

    Ok(())
}
