pub mod gemini {
    pub const API_BASE: &str = "https://generativelanguage.googleapis.com";
    pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";
    pub const API_BASE_ENV_VAR: &str = "GEMINI_API_BASE";
}

pub mod openai {
    pub const API_BASE: &str = "https://api.openai.com";
    pub const CHAT_COMPLETIONS_ENDPOINT: &str = "/v1/chat/completions";
    pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
    pub const API_BASE_ENV_VAR: &str = "OPENAI_API_BASE";
}
