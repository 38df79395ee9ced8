//! Built-in catalog used when the product resource cannot be read.

use showcase_core::{Category, Product, ProductId};

/// The fixed fallback catalog.
#[must_use]
pub fn fallback_products() -> Vec<Product> {
    vec![
        product(
            1,
            "Air Runner Shoes",
            "shoes",
            1999,
            "Comfortable running shoes for daily use.",
            "images/air-runner-shoes.svg",
            4.5,
            12,
        ),
        product(
            2,
            "Classic Leather Shoes",
            "shoes",
            2999,
            "Formal shoes with premium leather finish.",
            "images/classic-leather-shoes.svg",
            4.2,
            5,
        ),
        product(
            3,
            "Smart Watch Pro",
            "watches",
            3499,
            "Track steps, heart rate, and notifications.",
            "images/smart-watch-pro.svg",
            4.7,
            10,
        ),
        product(
            4,
            "Minimal Watch",
            "watches",
            1499,
            "Simple design, perfect for everyday style.",
            "images/minimal-watch.svg",
            4.0,
            0,
        ),
        product(
            5,
            "Phone Max 5G",
            "phones",
            15999,
            "Fast performance with 5G support.",
            "images/phone-max-5g.svg",
            4.8,
            6,
        ),
        product(
            6,
            "Phone Lite",
            "phones",
            9999,
            "Budget phone with strong battery backup.",
            "images/phone-lite.svg",
            4.1,
            15,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: i64,
    name: &str,
    category: &str,
    price: u64,
    desc: &str,
    image: &str,
    rating: f64,
    stock: u32,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category: Category::new(category),
        price,
        desc: desc.to_string(),
        image: Some(image.to_string()),
        rating: Some(rating),
        stock: Some(stock),
    }
}
