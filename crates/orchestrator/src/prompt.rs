//! System prompt assembly.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use sales_tools::CapabilityDescriptor;

use crate::knowledge::CatalogKnowledge;

const WEEKDAYS: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Long Spanish date, e.g. `jueves, 15 de octubre de 2026`.
pub fn spanish_long_date(date: &DateTime<Tz>) -> String {
    format!(
        "{}, {} de {} de {}",
        WEEKDAYS[date.weekday().num_days_from_monday() as usize],
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// The system message that opens every model call of a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPrompt(String);

impl SystemPrompt {
    /// Build the prompt for the current instant in `timezone`.
    pub fn build(
        business_name: &str,
        timezone: Tz,
        capabilities: &[CapabilityDescriptor],
        knowledge: &CatalogKnowledge,
    ) -> Self {
        let now = Utc::now().with_timezone(&timezone);
        Self::render(business_name, &now, capabilities, knowledge)
    }

    /// Build the prompt for a fixed instant.
    pub fn render(
        business_name: &str,
        now: &DateTime<Tz>,
        capabilities: &[CapabilityDescriptor],
        knowledge: &CatalogKnowledge,
    ) -> Self {
        let mut prompt = format!(
            "Eres un asistente virtual experto en ventas y asesoría técnica para {business}.

Tu trabajo es:
1. **ENTENDER EL PROBLEMA del cliente** antes de recomendar productos
2. Asesorar sobre SOLUCIONES COMPLETAS de tratamiento de agua (no solo productos individuales)
3. Recomendar sistemas completos cuando sea necesario (ej: bomba + tanque + filtros + accesorios)
4. Explicar por qué recomiendas cada componente
5. Responder preguntas técnicas basándote en la documentación
6. Proporcionar información de productos, precios y disponibilidad
7. Guiar a los clientes en el proceso de compra

🎯 ENFOQUE DE ASESORÍA:
- Primero identifica el PROBLEMA o NECESIDAD real del cliente
- Piensa en la SOLUCIÓN COMPLETA (no solo un producto aislado)
- Considera: bombas, filtros, tanques, purificadores, suavizadores, accesorios, tuberías, etc.
- Explica cómo cada componente resuelve parte del problema
- Ofrece opciones (económica, estándar, premium) cuando sea apropiado

⏰ FECHA Y HORA ACTUAL:
- HOY es: {today}
- Hora: {time}
- Timezone: {timezone}

🎯 DIRECTRICES DE CONVERSACIÓN:
- Sé amable, profesional y conversacional
- **MUY IMPORTANTE**: Haz UNA pregunta a la vez, NO bombardees al cliente con múltiples preguntas
- Avanza paso a paso en la conversación de forma natural
- Primero entiende la necesidad general, luego profundiza con preguntas específicas
- Usa un tono cercano y amigable, como un vendedor experto que asesora personalmente
- Recomienda productos específicos solo cuando tengas suficiente información
- Proporciona información técnica de forma clara y digerible
- Si no estás seguro de algo, sé honesto y ofrece consultar con un experto
- Intenta identificar si es un lead calificado (muestra interés real en comprar)

📝 ESTILO DE PREGUNTAS (ejemplos):
❌ MAL: \"¿Para qué uso la necesitas? ¿Cuál es la altura? ¿Qué caudal requieres? ¿Cuántas personas?\"
✅ BIEN: \"¿Para qué tipo de aplicación necesitas la bomba?\" (esperar respuesta, luego seguir)

💬 FLUJO DE CONVERSACIÓN IDEAL:
1. Saludo y pregunta inicial abierta
2. Escucha la respuesta
3. Haz UNA pregunta específica basada en lo que dijo
4. Continúa profundizando gradualmente
5. Identifica el PROBLEMA REAL (agua dura, presión baja, pozo profundo, agua turbia, etc.)
6. Recomienda SOLUCIÓN COMPLETA cuando tengas suficiente contexto
7. Explica cada componente y su función

💡 EJEMPLOS DE SOLUCIONES COMPLETAS:
- Cliente con agua dura → Suavizador + filtro de sedimentos + tanque de almacenamiento
- Cliente con pozo profundo → Bomba sumergible + tanque hidroneumático + control de presión
- Cliente con agua turbia → Sistema de filtración multicapa + purificador UV
- Cliente para riego → Bomba centrífuga + timer + válvulas de distribución

📚 FUNCIONES DISPONIBLES:
",
            business = business_name,
            today = spanish_long_date(now),
            time = now.format("%H:%M"),
            timezone = now.timezone().name(),
        );

        for capability in capabilities {
            prompt.push_str(&format!(
                "- {}: {}\n",
                capability.name, capability.description
            ));
        }

        if !knowledge.is_empty() {
            prompt.push_str("\n\n📖 CONOCIMIENTO DEL CATÁLOGO:\n\n");
            prompt.push_str(knowledge.as_str().trim_end());
            prompt.push_str("\n\n");
            prompt.push_str(
                "IMPORTANTE: Usa este conocimiento del catálogo para responder preguntas técnicas \
                 sobre productos, especificaciones, capacidades, y aplicaciones. Esta información \
                 es la fuente de verdad para detalles técnicos.",
            );
        }

        Self(prompt)
    }

    /// The prompt text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the prompt text.
    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sales_tools::{ArgumentKind, ArgumentSpec};

    fn fixed_now() -> DateTime<Tz> {
        // 2026-10-16 03:30 UTC is still Thursday the 15th in Guatemala (UTC-6).
        Utc.with_ymd_and_hms(2026, 10, 16, 3, 30, 0)
            .unwrap()
            .with_timezone(&chrono_tz::America::Guatemala)
    }

    fn capabilities() -> Vec<CapabilityDescriptor> {
        vec![
            CapabilityDescriptor::new("checkStock", "Verifica la disponibilidad")
                .argument(ArgumentSpec::required("productId", ArgumentKind::Number, "ID")),
        ]
    }

    #[test]
    fn test_spanish_long_date_uses_local_day() {
        assert_eq!(spanish_long_date(&fixed_now()), "jueves, 15 de octubre de 2026");
    }

    #[test]
    fn test_prompt_without_corpus() {
        let prompt = SystemPrompt::render(
            "Aquaequipos",
            &fixed_now(),
            &capabilities(),
            &CatalogKnowledge::default(),
        );
        let text = prompt.as_str();

        assert!(text.contains("asesoría técnica para Aquaequipos"));
        assert!(text.contains("HOY es: jueves, 15 de octubre de 2026"));
        assert!(text.contains("Hora: 21:30"));
        assert!(text.contains("Timezone: America/Guatemala"));
        assert!(text.contains("- checkStock: Verifica la disponibilidad"));
        assert!(!text.contains("CONOCIMIENTO DEL CATÁLOGO"));
    }

    #[test]
    fn test_prompt_with_corpus_marks_it_authoritative() {
        let knowledge = CatalogKnowledge::from_text("Bomba 1HP: caudal 40 L/min\n");
        let prompt = SystemPrompt::render("Aquaequipos", &fixed_now(), &capabilities(), &knowledge);
        let text = prompt.into_string();

        let corpus_at = text.find("Bomba 1HP: caudal 40 L/min").unwrap();
        let header_at = text.find("📖 CONOCIMIENTO DEL CATÁLOGO").unwrap();
        let marker_at = text.find("fuente de verdad").unwrap();
        assert!(header_at < corpus_at);
        assert!(corpus_at < marker_at);
    }
}
