// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System message sent with every Groq request.
pub const GROQ_SYSTEM: &str = "Sen profesyonel bir asistanısın. \
    Cümlelerini her zaman tamamla, gramer olarak doğru yaz ve akıcı Türkçe kullan. \
    Yarım kalan veya bozuk cümleler yazma.";

