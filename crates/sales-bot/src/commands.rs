//! Slash commands understood by the bot.

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Comandos disponibles:")]
pub enum Command {
    #[command(description = "Iniciar el bot")]
    Start,
    #[command(description = "Ver la ayuda")]
    Help,
    #[command(description = "Ver la ayuda")]
    Ayuda,
    #[command(description = "Buscar productos")]
    Productos,
    #[command(description = "Ver productos destacados")]
    Destacados,
    #[command(description = "Información del catálogo")]
    Catalogo,
    #[command(description = "Listar leads (solo administrador)", hide)]
    Leads,
}
