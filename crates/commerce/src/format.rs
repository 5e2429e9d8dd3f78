//! Plain-text and Markdown rendering of store data.

use crate::types::Product;

/// Strip HTML tags, decode the common entities and collapse blank lines.
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    let text = text
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a product as a Markdown card for chat.
pub fn format_product_info(product: &Product) -> String {
    let mut info = format!("📦 *{}*\n\n", product.name);

    if !product.sku.is_empty() {
        info.push_str(&format!("🔖 SKU: {}\n", product.sku));
    }

    if !product.price.is_empty() {
        info.push_str(&format!("💰 Precio: Q{}\n", product.price));
    }

    if product.is_in_stock() {
        info.push_str("✅ En stock");
        if let Some(quantity) = product.tracked_quantity().filter(|q| *q > 0) {
            info.push_str(&format!(" ({} unidades)", quantity));
        }
        info.push('\n');
    } else {
        info.push_str("❌ Agotado\n");
    }

    let summary = strip_html(&product.short_description);
    if !summary.is_empty() {
        info.push_str(&format!("\n{}\n", summary));
    }

    if !product.permalink.is_empty() {
        info.push_str(&format!("\n🔗 Ver más: {}", product.permalink));
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Product, StockStatus};

    fn product() -> Product {
        Product {
            id: 42,
            name: "Suavizador 1 pie³".to_string(),
            price: "4500.00".to_string(),
            sku: "SUA-1".to_string(),
            stock_status: StockStatus::InStock,
            stock_quantity: Some(2),
            manage_stock: true,
            description: String::new(),
            short_description: "<p>Elimina <strong>dureza</strong> &amp; sarro</p>".to_string(),
            images: Vec::new(),
            permalink: "https://tienda.example.com/suavizador".to_string(),
            featured: true,
        }
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<p>Hola&nbsp;mundo</p>\n\n<ul><li>uno</li></ul>"),
            "Hola mundo\nuno"
        );
        assert_eq!(strip_html(""), "");
    }

    #[test]
    fn test_format_in_stock_product() {
        let card = format_product_info(&product());
        assert!(card.starts_with("📦 *Suavizador 1 pie³*"));
        assert!(card.contains("🔖 SKU: SUA-1"));
        assert!(card.contains("💰 Precio: Q4500.00"));
        assert!(card.contains("✅ En stock (2 unidades)"));
        assert!(card.contains("Elimina dureza & sarro"));
        assert!(card.ends_with("🔗 Ver más: https://tienda.example.com/suavizador"));
    }

    #[test]
    fn test_format_out_of_stock_without_optional_fields() {
        let mut p = product();
        p.stock_status = StockStatus::OutOfStock;
        p.sku.clear();
        p.price.clear();
        p.short_description.clear();
        p.permalink.clear();

        let card = format_product_info(&p);
        assert!(card.contains("❌ Agotado"));
        assert!(!card.contains("SKU"));
        assert!(!card.contains("Precio"));
        assert!(!card.contains("Ver más"));
    }
}
