//! Fixed replies and human-like pacing.

use std::time::Duration;

use aquabot_database::User;
use commerce::{format_product_info, Category, Product};
use rand::Rng;

/// Shortest typing pause before a reply.
pub const MIN_TYPING_DELAY: Duration = Duration::from_millis(2000);

/// Longest typing pause before a reply.
pub const MAX_TYPING_DELAY: Duration = Duration::from_millis(8000);

pub const PHOTO_REPLY: &str = "📸 Recibí tu imagen. Por ahora no puedo procesarla directamente, \
pero puedes describir lo que necesitas y te ayudaré.";

pub const FEATURED_LOOKUP: &str = "🔍 Déjame revisar los productos destacados...";

pub const FEATURED_EMPTY: &str = "Por ahora no tenemos productos destacados. \
¿Hay algo específico que estés buscando?";

pub const FEATURED_ERROR: &str =
    "Lo siento, hubo un error al buscar productos. Por favor intenta de nuevo.";

pub const OWNER_ONLY: &str = "Este comando solo está disponible para el administrador.";

pub const SEARCH_HINT: &str = "🔍 *Buscar Productos*\n\n\
Para buscar productos, simplemente dime qué estás buscando.\n\n\
*Ejemplos:*\n\
• \"Busco filtros de agua\"\n\
• \"Necesito un purificador\"\n\
• \"¿Tienen suavizadores?\"\n\n\
¿Qué producto te interesa?";

pub const CATALOG_INFO_TAIL: &str = "Tengo acceso a nuestro catálogo completo de productos.\n\n\
Puedo ayudarte con:\n\
• Especificaciones técnicas\n\
• Capacidades y dimensiones\n\
• Aplicaciones y usos\n\
• Comparaciones entre productos\n\
• Recomendaciones personalizadas\n\n\
¿Sobre qué producto necesitas información?";

pub const HELP: &str = "*Comandos disponibles:*\n\n\
/start - Iniciar el bot\n\
/productos - Buscar productos\n\
/destacados - Ver productos destacados\n\
/catalogo - Información del catálogo\n\
/ayuda - Ver esta ayuda\n\n\
*¿Cómo usarme?*\n\
Puedes escribirme directamente lo que necesitas:\n\n\
• \"¿Qué sistemas de filtración tienen?\"\n\
• \"Necesito un purificador para mi casa\"\n\
• \"¿Cuánto cuesta el modelo X?\"\n\
• \"¿Tienen suavizadores de agua?\"\n\n\
También puedo ayudarte con especificaciones técnicas, comparaciones de productos y \
recomendaciones personalizadas. 💧";

/// Greeting for `/start`.
pub fn welcome(first_name: &str, business_name: &str) -> String {
    format!(
        "¡Hola {}! 👋\n\n\
         Bienvenido a *{}*. Te puedo ayudar con información sobre nuestros productos de \
         tratamiento de agua, asesoría técnica, precios y disponibilidad.\n\n\
         ¿En qué te puedo ayudar hoy?",
        first_name, business_name
    )
}

/// Text for `/catalogo`, listing top-level categories that have products.
pub fn catalog_info(business_name: &str, categories: &[Category]) -> String {
    let mut text = format!("📚 *Catálogo {}*\n\n", business_name);

    let listed: Vec<String> = categories
        .iter()
        .filter(|c| c.parent == 0 && c.count > 0)
        .map(|c| format!("• {} ({})", c.name, c.count))
        .collect();
    if !listed.is_empty() {
        text.push_str(&format!("*Categorías:*\n{}\n\n", listed.join("\n")));
    }

    text.push_str(CATALOG_INFO_TAIL);
    text
}

/// Cards for `/destacados`.
pub fn featured_listing(products: &[Product]) -> String {
    if products.is_empty() {
        return FEATURED_EMPTY.to_string();
    }

    let cards: Vec<String> = products.iter().map(format_product_info).collect();
    format!("⭐ *Productos destacados*\n\n{}", cards.join("\n\n"))
}

/// Owner view of flagged leads.
pub fn leads_listing(leads: &[User]) -> String {
    if leads.is_empty() {
        return "Aún no hay leads registrados.".to_string();
    }

    let mut text = format!("👥 *Leads* ({})\n", leads.len());
    for lead in leads {
        text.push_str(&format!("\n• {}", lead.display_name()));
        if let Some(username) = &lead.username {
            text.push_str(&format!(" (@{})", username));
        }
        if let Some(phone) = &lead.phone {
            text.push_str(&format!(" 📞 {}", phone));
        }
        text.push_str(&format!(" - {}", lead.created_at));
    }
    text
}

/// Pause proportional to reply length, about half a second per 50 characters.
pub fn typing_delay(reply_len: usize) -> Duration {
    let millis = (reply_len as u64).saturating_mul(10);
    Duration::from_millis(millis).clamp(MIN_TYPING_DELAY, MAX_TYPING_DELAY)
}

/// Random one to two second pause while "reading" a message.
pub fn reading_delay() -> Duration {
    Duration::from_millis(rand::thread_rng().gen_range(1000..2000))
}
