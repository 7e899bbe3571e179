//! The fixed six-product catalog

use chrono::{DateTime, Utc};

use super::product::{Product, ProductCondition, ProductStatus};

struct Listing {
    id: &'static str,
    title: &'static str,
    brand: &'static str,
    model: &'static str,
    category: &'static str,
    condition: ProductCondition,
    price: u32,
    location: &'static str,
    description: &'static str,
    image: &'static str,
}

const LISTINGS: [Listing; 6] = [
    Listing {
        id: "1",
        title: "iPhone 14 Pro Max",
        brand: "Apple",
        model: "A2894",
        category: "smartphone",
        condition: ProductCondition::Broken,
        price: 350,
        location: "New York, NY",
        description: "Cracked screen but fully functional. Battery health 89%.",
        image: "https://images.unsplash.com/photo-1678685888221-cda773a3dcdb?w=400",
    },
    Listing {
        id: "2",
        title: "MacBook Pro 16\"",
        brand: "Apple",
        model: "M2 Pro",
        category: "laptop",
        condition: ProductCondition::Used,
        price: 1200,
        location: "San Francisco, CA",
        description: "Excellent condition, minor scratches on lid. Includes charger.",
        image: "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?w=400",
    },
    Listing {
        id: "3",
        title: "Samsung Galaxy S23 Ultra",
        brand: "Samsung",
        model: "SM-S918B",
        category: "smartphone",
        condition: ProductCondition::New,
        price: 899,
        location: "Los Angeles, CA",
        description: "Brand new, sealed in box. Full warranty included.",
        image: "https://images.unsplash.com/photo-1610945415295-d9bbf067e59c?w=400",
    },
    Listing {
        id: "4",
        title: "Dell XPS 15",
        brand: "Dell",
        model: "9520",
        category: "laptop",
        condition: ProductCondition::ForParts,
        price: 150,
        location: "Chicago, IL",
        description: "Does not power on. Good for parts harvesting.",
        image: "https://images.unsplash.com/photo-1593642632559-0c6d3fc62b89?w=400",
    },
    Listing {
        id: "5",
        title: "Sony WH-1000XM5",
        brand: "Sony",
        model: "WH-1000XM5",
        category: "headphones",
        condition: ProductCondition::Used,
        price: 220,
        location: "Seattle, WA",
        description: "Like new condition. All accessories included.",
        image: "https://images.unsplash.com/photo-1546435770-a3e426bf472b?w=400",
    },
    Listing {
        id: "6",
        title: "iPad Pro 12.9\"",
        brand: "Apple",
        model: "M2 Chip",
        category: "tablet",
        condition: ProductCondition::Broken,
        price: 400,
        location: "Austin, TX",
        description: "Screen damaged but touch works. Comes with Magic Keyboard.",
        image: "https://images.unsplash.com/photo-1544244015-0df4b3ffc6b0?w=400",
    },
];

/// The catalog, every listing stamped with the current time
pub fn products() -> Vec<Product> {
    products_listed_at(Utc::now())
}

/// The catalog with a fixed listing time
pub fn products_listed_at(created_at: DateTime<Utc>) -> Vec<Product> {
    LISTINGS
        .iter()
        .map(|listing| Product {
            id: listing.id.to_string(),
            title: listing.title.to_string(),
            brand: listing.brand.to_string(),
            model: listing.model.to_string(),
            category: listing.category.to_string(),
            condition: listing.condition,
            price: listing.price,
            location: listing.location.to_string(),
            description: listing.description.to_string(),
            image: listing.image.to_string(),
            status: ProductStatus::Active,
            created_at,
        })
        .collect()
}
