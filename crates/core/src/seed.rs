//! The built-in product catalog and category list.
//!
//! Used to seed the local fallback cache on first run and pushed to the
//! remote products table by `loop-cli seed`.

use rust_decimal::Decimal;

use crate::product::{Category, ColorOption, Dimensions, Product};

fn color(name: &str, hex: &str) -> ColorOption {
    ColorOption {
        name: name.to_string(),
        hex: hex.to_string(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    price: i64,
    category: &str,
    image: &str,
    is_best_seller: bool,
    stock: u32,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: Decimal::from(price),
        category: category.to_string(),
        image: image.to_string(),
        is_best_seller,
        stock,
        colors: None,
        sizes: None,
        weight: None,
        dimensions: None,
        material: None,
        features: None,
        shape: None,
    }
}

/// The merchandising categories shown on the home page.
#[must_use]
pub fn categories() -> Vec<Category> {
    [
        (
            "earphones",
            "Earphone",
            "https://images.unsplash.com/photo-1590658268037-6bf12165a8df?q=80&w=400",
            "bg-zinc-900",
            "Enjoy With",
        ),
        (
            "wearables",
            "Gadget",
            "https://images.unsplash.com/photo-1523275335684-37898b6baf30?q=80&w=400",
            "bg-yellow-400",
            "New Wearable",
        ),
        (
            "laptops",
            "Laptop",
            "https://images.unsplash.com/photo-1496181133206-80ce9b88a853?q=80&w=400",
            "bg-red-500",
            "Trend Devices",
        ),
        (
            "consoles",
            "Console",
            "https://images.unsplash.com/photo-1485842295075-08819543f490?q=80&w=400",
            "bg-zinc-100",
            "Best Gaming",
        ),
        (
            "oculus",
            "Oculus",
            "https://images.unsplash.com/photo-1622979135225-d2ba269cf1ac?q=80&w=400",
            "bg-green-500",
            "Play Game",
        ),
        (
            "speakers",
            "Speaker",
            "https://images.unsplash.com/photo-1589003077984-894e133dabab?q=80&w=400",
            "bg-blue-500",
            "Now Amazon",
        ),
    ]
    .into_iter()
    .map(|(id, name, image, color, tagline)| Category {
        id: id.to_string(),
        name: name.to_string(),
        image: image.to_string(),
        color: color.to_string(),
        tagline: tagline.to_string(),
    })
    .collect()
}

/// The fixed built-in product list.
#[must_use]
pub fn initial_products() -> Vec<Product> {
    vec![
        Product {
            colors: Some(vec![
                color("Matte Black", "#1a1a1a"),
                color("Rose Gold", "#b76e79"),
                color("Silver", "#c0c0c0"),
                color("Red", "#e74c3c"),
            ]),
            sizes: Some(strings(&["One Size"])),
            weight: Some("215g".to_string()),
            dimensions: Some(Dimensions {
                width: "17.8cm".to_string(),
                height: "18.5cm".to_string(),
                depth: "7.6cm".to_string(),
            }),
            material: Some("Premium plastic and metal frame with soft ear cushions".to_string()),
            features: Some(strings(&[
                "Up to 40 hours of battery life",
                "Apple W1 chip for seamless connectivity",
                "Active Noise Cancelling (ANC)",
                "Spatial audio with dynamic head tracking",
                "Fast Fuel charging - 10 min charge = 3 hours playback",
            ])),
            shape: Some("Over-ear headband design".to_string()),
            ..product(
                "1",
                "Beats Solo Wireless",
                "High-performance wireless noise cancelling headphones with the Apple W1 chip and Class 1 Bluetooth connectivity.",
                199,
                "earphones",
                "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?q=80&w=1000",
                true,
                12,
            )
        },
        product(
            "2",
            "Sony WH-1000XM5",
            "Industry-leading noise cancellation and 30-hour battery life for the ultimate listening experience.",
            349,
            "earphones",
            "https://images.unsplash.com/photo-1618366712010-f4ae9c647dcb?q=80&w=800",
            false,
            8,
        ),
        Product {
            colors: Some(vec![
                color("Space Black", "#2d2d2d"),
                color("Silver", "#e8e8e8"),
            ]),
            sizes: Some(strings(&["14-inch", "16-inch"])),
            weight: Some("2.15kg".to_string()),
            dimensions: Some(Dimensions {
                width: "35.57cm".to_string(),
                height: "1.55cm".to_string(),
                depth: "24.81cm".to_string(),
            }),
            material: Some("Aluminum unibody construction".to_string()),
            features: Some(strings(&[
                "M3 Max chip with 16-core CPU",
                "Up to 128GB unified memory",
                "Liquid Retina XDR display",
                "Up to 22 hours battery life",
                "Three Thunderbolt 4 ports",
                "MagSafe 3 charging",
            ])),
            shape: Some("Ultra-slim laptop".to_string()),
            ..product(
                "3",
                "MacBook Pro M3 Max",
                "The most powerful laptop for pros. Featuring the M3 Max chip and a stunning Liquid Retina XDR display.",
                3499,
                "laptops",
                "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?q=80&w=800",
                true,
                3,
            )
        },
        product(
            "4",
            "Meta Quest 3",
            "Breakthrough mixed reality. Transform your home into a new world of possibilities.",
            499,
            "oculus",
            "https://images.unsplash.com/photo-1622979135225-d2ba269cf1ac?q=80&w=800",
            false,
            15,
        ),
        Product {
            colors: Some(vec![
                color("Charcoal", "#36454f"),
                color("Glacier White", "#f5f5f5"),
            ]),
            sizes: Some(strings(&["One Size"])),
            weight: Some("3.5kg".to_string()),
            dimensions: Some(Dimensions {
                width: "17.5cm".to_string(),
                height: "20.6cm".to_string(),
                depth: "17.5cm".to_string(),
            }),
            material: Some("Premium fabric finish with metal base".to_string()),
            features: Some(strings(&[
                "Five directional speakers",
                "Dolby Atmos and spatial audio",
                "Automatic room adaptation",
                "Built-in Alexa voice assistant",
                "Multi-room music support",
                "Zigbee smart home hub",
            ])),
            shape: Some("Cylindrical speaker".to_string()),
            ..product(
                "5",
                "Echo Studio Pro",
                "Our best-sounding smart speaker yet. Immersive 3D audio with Alexa built-in.",
                249,
                "speakers",
                "https://images.unsplash.com/photo-1589003077984-894e133dabab?q=80&w=800",
                true,
                20,
            )
        },
        Product {
            colors: Some(vec![
                color("Natural Titanium", "#b8b8b8"),
                color("Black Titanium", "#3a3a3a"),
            ]),
            sizes: Some(strings(&["49mm"])),
            weight: Some("61.4g".to_string()),
            dimensions: Some(Dimensions {
                width: "49mm".to_string(),
                height: "14.4mm".to_string(),
                depth: "44mm".to_string(),
            }),
            material: Some("Titanium case with sapphire crystal display".to_string()),
            features: Some(strings(&[
                "Precision dual-frequency GPS",
                "Up to 36 hours battery life",
                "Water resistant to 100m",
                "Action button for quick controls",
                "Brightest Apple display ever",
                "Advanced health and fitness tracking",
            ])),
            shape: Some("Square smartwatch with rounded corners".to_string()),
            ..product(
                "6",
                "Apple Watch Ultra 2",
                "The most rugged and capable Apple Watch ever. Designed for athletes and explorers.",
                799,
                "wearables",
                "https://images.unsplash.com/photo-1523275335684-37898b6baf30?q=80&w=800",
                true,
                5,
            )
        },
        Product {
            colors: Some(vec![color("White", "#ffffff"), color("Black", "#000000")]),
            sizes: Some(strings(&["Standard Edition", "Digital Edition"])),
            weight: Some("3.2kg".to_string()),
            dimensions: Some(Dimensions {
                width: "35.8cm".to_string(),
                height: "9.6cm".to_string(),
                depth: "21.6cm".to_string(),
            }),
            material: Some("High-quality ABS plastic with matte finish".to_string()),
            features: Some(strings(&[
                "Ultra-high speed SSD",
                "4K gaming at 120fps",
                "Ray tracing support",
                "Tempest 3D AudioTech",
                "DualSense wireless controller",
                "825GB storage",
            ])),
            shape: Some("Curved console design".to_string()),
            ..product(
                "7",
                "PlayStation 5 Slim",
                "Experience lightning-fast loading with an ultra-high-speed SSD and deeper immersion.",
                449,
                "consoles",
                "https://images.unsplash.com/photo-1606144042614-b2417e99c4e3?q=80&w=800",
                true,
                10,
            )
        },
        product(
            "8",
            "Samsung Galaxy Watch 6",
            "Advanced sleep coaching and personalized heart rate zones to crush your fitness goals.",
            299,
            "wearables",
            "https://images.unsplash.com/photo-1579586337278-3befd40fd17a?q=80&w=800",
            false,
            14,
        ),
        product(
            "9",
            "Dell XPS 15",
            "A 15.6-inch laptop with a 4-sided InfinityEdge display and 100% Adobe RGB color.",
            1899,
            "laptops",
            "https://images.unsplash.com/photo-1593642632823-8f785ba67e45?q=80&w=800",
            false,
            4,
        ),
        product(
            "10",
            "Logitech G Pro X 2",
            "Wireless gaming headset designed with the world's top pro players to remove obstacles.",
            249,
            "earphones",
            "https://images.unsplash.com/photo-1546435770-a3e426bf472b?q=80&w=800",
            true,
            11,
        ),
        product(
            "11",
            "Xbox Series X",
            "The fastest, most powerful Xbox ever. Play thousands of titles from four generations.",
            499,
            "consoles",
            "https://images.unsplash.com/photo-1621259182978-fbf93132d53d?q=80&w=800",
            false,
            7,
        ),
        product(
            "12",
            "Sonos Move 2",
            "Powerful, portable speaker with stereo sound and up to 24 hours of battery life.",
            449,
            "speakers",
            "https://images.unsplash.com/photo-1612444530582-fc66183b16f7?q=80&w=800",
            false,
            9,
        ),
        product(
            "13",
            "Razer Blade 16",
            "High-performance gaming laptop with an incredible QHD+ 240Hz display.",
            2999,
            "laptops",
            "https://images.unsplash.com/photo-1525547719571-a2d4ac8945e2?q=80&w=800",
            true,
            2,
        ),
        product(
            "14",
            "Bose QC Ultra",
            "World-class noise cancellation, quieter than ever before. Breakthrough spatial audio.",
            429,
            "earphones",
            "https://images.unsplash.com/photo-1545127398-14699f92334b?q=80&w=800",
            false,
            12,
        ),
        product(
            "15",
            "Nintendo Switch OLED",
            "Features a vibrant 7-inch OLED screen, a wide adjustable stand, and a wired LAN port.",
            349,
            "consoles",
            "https://images.unsplash.com/photo-1578303512597-81e6cc155b3e?q=80&w=800",
            true,
            18,
        ),
        product(
            "16",
            "Marshall Emberton II",
            "A compact portable speaker with the loud and vibrant sound only Marshall can deliver.",
            169,
            "speakers",
            "https://images.unsplash.com/photo-1545454675-3531b543be5d?q=80&w=800",
            false,
            25,
        ),
        product(
            "17",
            "Oculus Rift S",
            "High-performance PC VR gaming. Advanced optics for vivid colors and reduced \"screen-door\" effect.",
            399,
            "oculus",
            "https://images.unsplash.com/photo-1593508512255-86ab42a8e620?q=80&w=800",
            false,
            6,
        ),
        product(
            "18",
            "Garmin Epix Pro",
            "Ultimate high-performance smartwatch with an AMOLED display and a built-in flashlight.",
            899,
            "wearables",
            "https://images.unsplash.com/photo-1617043786394-f977fa12eddf?q=80&w=800",
            false,
            5,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let products = initial_products();
        let ids: HashSet<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_seed_categories_are_known() {
        let known: HashSet<String> = categories().into_iter().map(|c| c.id).collect();
        for product in initial_products() {
            assert!(known.contains(&product.category), "{}", product.category);
        }
    }

    #[test]
    fn test_seed_contains_best_sellers() {
        assert!(initial_products().iter().any(|p| p.is_best_seller));
    }

    #[test]
    fn test_seed_carries_full_catalog() {
        let products = initial_products();
        assert_eq!(products.len(), 18);
        assert_eq!(products.last().map(|p| p.id.as_str()), Some("18"));
    }

    #[test]
    fn test_category_images_are_absolute_urls() {
        for category in categories() {
            assert!(
                category.image.starts_with("https://images.unsplash.com/photo-"),
                "{}",
                category.image
            );
        }
    }
}
