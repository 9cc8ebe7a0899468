//! Menu Item Model

use serde::{Deserialize, Serialize};

fn default_available() -> bool {
    true
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    /// Store key, attached when the record is read; upserts fall back to
    /// the numeric `id` when no key is supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Price in currency unit
    pub price: f64,
    pub category: String,
    /// Image URL or path
    pub image: String,
    /// Items missing the flag in the store count as available
    #[serde(default = "default_available")]
    pub available: bool,
}

impl MenuItem {
    /// The starter catalogue, written item by item by the seeding operation
    pub fn default_catalogue() -> Vec<MenuItem> {
        let entries: [(i64, &str, &str, f64, &str); 8] = [
            (
                1,
                "Margherita Pizza",
                "Tomato sauce, mozzarella, basil and olive oil",
                35.00,
                "Pizzas",
            ),
            (
                2,
                "Calabresa Pizza",
                "Tomato sauce, mozzarella, calabresa sausage and onion",
                38.00,
                "Pizzas",
            ),
            (
                3,
                "House Burger",
                "Brioche bun, 180g blend, cheese, lettuce, tomato and house sauce",
                32.00,
                "Burgers",
            ),
            (
                4,
                "Bacon Burger",
                "Brioche bun, 180g blend, crispy bacon, cheddar and caramelized onion",
                36.00,
                "Burgers",
            ),
            (
                5,
                "Caesar Salad",
                "Romaine lettuce, grilled chicken, croutons, parmesan and caesar dressing",
                28.00,
                "Salads",
            ),
            (
                6,
                "French Fries",
                "Individual portion of crispy fries",
                15.00,
                "Sides",
            ),
            (7, "Soda Can", "Cola, guarana, lemon-lime or orange - 350ml", 6.00, "Drinks"),
            (
                8,
                "Fresh Juice",
                "Orange, lemon or strawberry - 500ml",
                12.00,
                "Drinks",
            ),
        ];

        entries
            .into_iter()
            .map(|(id, name, description, price, category)| MenuItem {
                key: None,
                id,
                name: name.to_string(),
                description: description.to_string(),
                price,
                category: category.to_string(),
                image: String::new(),
                available: true,
            })
            .collect()
    }
}
