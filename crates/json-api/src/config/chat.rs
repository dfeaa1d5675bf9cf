//! Chat Relay Config

use clap::Args;

use tiffin_app::chat::ChatRelayConfig;

/// Assistant relay settings.
#[derive(Debug, Args)]
pub struct ChatConfig {
    /// Chat completions endpoint of the assistant provider
    #[arg(
        long,
        env = "CHAT_API_URL",
        default_value = "https://api.openai.com/v1/chat/completions"
    )]
    pub chat_api_url: String,

    /// API key for the assistant provider
    #[arg(long, env = "CHAT_API_KEY", hide_env_values = true)]
    pub chat_api_key: String,

    /// Model name to request
    #[arg(long, env = "CHAT_MODEL", default_value = "gpt-4o-mini")]
    pub chat_model: String,
}

impl From<ChatConfig> for ChatRelayConfig {
    fn from(config: ChatConfig) -> Self {
        ChatRelayConfig {
            api_url: config.chat_api_url,
            api_key: config.chat_api_key,
            model: config.chat_model,
        }
    }
}
