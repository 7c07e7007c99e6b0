use crate::model::MenuItem;
use rust_decimal::Decimal;

const PHOTO_BASE: &str = "https://images.pexels.com/photos";

fn dish(
    id: &str,
    name: &str,
    description: &str,
    cents: i64,
    category: &str,
    photo: &str,
    prep_time: u32,
) -> MenuItem {
    MenuItem::new(id, name, Decimal::new(cents, 2), category)
        .with_description(description)
        .with_image(format!("{PHOTO_BASE}/{photo}"))
        .with_prep_time(prep_time)
}

/// The demo restaurant's menu.
pub fn seed_items() -> Vec<MenuItem> {
    vec![
        dish(
            "1",
            "Classic Burger",
            "Juicy beef patty with lettuce, tomato, and special sauce",
            1299,
            "burgers",
            "1639557/pexels-photo-1639557.jpeg",
            15,
        )
        .popular(),
        dish(
            "2",
            "Margherita Pizza",
            "Fresh mozzarella, tomatoes, and basil on a thin crust",
            1499,
            "pizza",
            "2147491/pexels-photo-2147491.jpeg",
            20,
        )
        .popular(),
        dish(
            "3",
            "Caesar Salad",
            "Crisp romaine lettuce with Caesar dressing and croutons",
            999,
            "salads",
            "1211887/pexels-photo-1211887.jpeg",
            10,
        ),
        dish(
            "4",
            "Grilled Salmon",
            "Fresh salmon fillet with lemon butter sauce and vegetables",
            1899,
            "mains",
            "3763847/pexels-photo-3763847.jpeg",
            25,
        )
        .popular(),
        dish(
            "5",
            "Chocolate Lava Cake",
            "Warm chocolate cake with a molten center and vanilla ice cream",
            799,
            "desserts",
            "132694/pexels-photo-132694.jpeg",
            15,
        )
        .popular(),
        dish(
            "6",
            "Veggie Wrap",
            "Grilled vegetables, hummus, and feta cheese in a spinach wrap",
            1099,
            "sandwiches",
            "1352270/pexels-photo-1352270.jpeg",
            12,
        ),
        dish(
            "7",
            "Chicken Alfredo",
            "Fettuccine pasta with creamy Alfredo sauce and grilled chicken",
            1599,
            "pasta",
            "1527603/pexels-photo-1527603.jpeg",
            18,
        ),
        dish(
            "8",
            "Mushroom Risotto",
            "Creamy Arborio rice with wild mushrooms and Parmesan",
            1399,
            "mains",
            "5638527/pexels-photo-5638527.jpeg",
            22,
        ),
        dish(
            "9",
            "BBQ Ribs",
            "Slow-cooked pork ribs with house BBQ sauce and coleslaw",
            1999,
            "mains",
            "533325/pexels-photo-533325.jpeg",
            30,
        ),
        dish(
            "10",
            "Mango Smoothie",
            "Fresh mango blended with yogurt and honey",
            599,
            "drinks",
            "1346063/pexels-photo-1346063.jpeg",
            5,
        ),
        dish(
            "11",
            "Garlic Bread",
            "Toasted baguette with garlic butter and herbs",
            499,
            "sides",
            "1252841/pexels-photo-1252841.jpeg",
            8,
        ),
        dish(
            "12",
            "Tiramisu",
            "Classic Italian dessert with coffee-soaked ladyfingers and mascarpone",
            899,
            "desserts",
            "6133305/pexels-photo-6133305.jpeg",
            10,
        ),
    ]
}
