//! Sample catalog used to seed an empty store (first launch) and in tests.

use caisse_core::{CategoryId, Money, ProductId};

use crate::category::Category;
use crate::product::Product;

pub fn categories() -> Vec<Category> {
    vec![
        Category::new("cat-1", "Boissons").with_color("#0088FE"),
        Category::new("cat-2", "Plats").with_color("#00C49F"),
        Category::new("cat-3", "Desserts").with_color("#FFBB28"),
        Category::new("cat-4", "Snacks").with_color("#FF8042"),
    ]
}

pub fn products() -> Vec<Product> {
    [
        ("prod-1", "Café", "Expresso ou allongé", 1.50, "cat-1", "photo-1509042239860-f550ce710b93"),
        ("prod-2", "Thé", "Thé noir ou vert", 2.00, "cat-1", "photo-1576092768241-dec231879fc3"),
        ("prod-3", "Sandwich", "Jambon-beurre", 3.50, "cat-2", "photo-1592894869086-f828b161e90a"),
        ("prod-4", "Salade", "Salade fraîche du jour", 4.50, "cat-2", "photo-1546069901-ba9599a7e63c"),
        ("prod-5", "Crêpe", "Sucre ou chocolat", 3.00, "cat-3", "photo-1569627909129-3ee65e2bbd5f"),
        ("prod-6", "Croissant", "Croissant au beurre", 1.20, "cat-4", "photo-1555507036-ab1f4038808a"),
        ("prod-7", "Eau minérale", "50cl", 1.00, "cat-1", "photo-1616118132534-381148898bb4"),
        ("prod-8", "Pizza", "Margherita", 8.00, "cat-2", "photo-1565299624946-b28f40a0ae38"),
    ]
    .into_iter()
    .map(|(id, name, description, price, category, photo)| {
        sample_product(id, name, description, price, category, photo)
    })
    .collect()
}

fn sample_product(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    photo: &str,
) -> Product {
    let draft = crate::product::ProductDraft {
        name: name.to_string(),
        description: description.to_string(),
        price: Money::new(price),
        category_id: CategoryId::new(category),
        image: Some(format!(
            "https://images.unsplash.com/{photo}?w=400&auto=format&fit=crop&q=80"
        )),
    };
    match Product::with_id(ProductId::new(id), draft) {
        Ok(product) => product,
        Err(err) => unreachable!("sample product {id} is valid: {err}"),
    }
}
