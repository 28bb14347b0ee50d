use crate::domain::model::ChatMessage;

pub const SYSTEM_PROMPT: &str = r#"You are a professional translation assistant.
Your task is to translate Chinese text to English and extract key concepts.
Always respond with valid JSON only, no additional text.
JSON format: {"translation": "English text here", "keywords": ["word1", "word2", "word3"]}
Extract 3-5 most important keywords from the Chinese text."#;

/// Build the `[system, user]` message pair for one translation.
///
/// The input text is embedded verbatim.
pub fn build_messages(chinese_text: &str) -> Vec<ChatMessage> {
    let user_prompt = format!(
        "Translate the following Chinese text to English and extract 3-5 keywords.\n\
         Return only valid JSON with keys \"translation\" and \"keywords\".\n\
         \n\
         Chinese text:\n\
         {}",
        chinese_text
    );

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user_prompt)]
}
