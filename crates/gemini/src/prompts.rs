//! Instruction selection per input modality and target format.

use std::borrow::Cow;

// ---------------------------------------------------------------------------
// Text / code
// ---------------------------------------------------------------------------

/// Instruction for transforming decoded text into `target_format`.
///
/// Unknown targets get a generic instruction naming the target.
pub fn text_instruction(target_format: &str) -> Cow<'static, str> {
    let prompt = match target_format {
        "application/json" => {
            "Convert the following text/data into a valid JSON structure. Only output the JSON code block."
        }
        "application/xml" => {
            "Convert the following content into valid XML. Only output the XML code block."
        }
        "text/yaml" => "Convert the following content into valid YAML. Only output the YAML code block.",
        "text/javascript" => {
            "Convert this code to JavaScript/TypeScript. If it is not code, explain why. Only output the code."
        }
        "text/x-python" => {
            "Convert this code to Python. If it is not code, explain why. Only output the code."
        }
        "text/summary" => "Summarize the following text concisely.",
        "text/plain" => {
            "Proofread and improve the following text. Maintain original meaning but fix grammar and style."
        }
        other => {
            return Cow::Owned(format!(
                "Convert or transform the following content to match the format/goal: {other}."
            ))
        }
    };
    Cow::Borrowed(prompt)
}

/// Full request text: instruction followed by the content.
pub fn text_request(target_format: &str, content: &str) -> String {
    format!("{}\n\nContent:\n{content}", text_instruction(target_format))
}

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

pub fn image_instruction(target_format: &str) -> &'static str {
    match target_format {
        "text/html" => {
            "You are an expert frontend engineer. Look at this UI design/screenshot and write the HTML/Tailwind CSS code to replicate it. Return only the code."
        }
        "application/json" => {
            "Extract all visible text and data fields from this image and structure them into a clean JSON object. If it is a receipt or document, organize by fields."
        }
        "text/description" => {
            "Provide a detailed textual description of this image for accessibility purposes (Alt Text)."
        }
        _ => "Describe this image.",
    }
}

// ---------------------------------------------------------------------------
// Audio
// ---------------------------------------------------------------------------

pub fn audio_instruction(target_format: &str) -> &'static str {
    match target_format {
        "text/summary" => {
            "Listen to this audio and provide a concise summary of the key points discussed."
        }
        "application/json" => {
            "Analyze the sentiment and tone of this audio. Return a JSON object with keys: sentiment, tone, key_topics (array)."
        }
        _ => "Transcribe this audio file accurately.",
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

pub fn document_instruction(target_format: &str) -> &'static str {
    match target_format {
        "text/plain" => {
            "Extract all the text from this PDF document. Do not use markdown formatting, just plain text."
        }
        "text/markdown" => {
            "Convert the content of this PDF into well-structured Markdown. Preserve headers, lists, and tables."
        }
        "text/summary" => {
            "Read this PDF document and provide a comprehensive summary of its contents."
        }
        "application/json" => {
            "Extract the structured data from this PDF (like forms, tables, or key-value pairs) and output it as a JSON object."
        }
        "text/html" => "Convert this PDF document into semantic HTML5 code.",
        _ => "Analyze this PDF document.",
    }
}

#[cfg(test)]
mod tests {
    use omniconvert_core::catalog;
    use omniconvert_core::category::Category;

    use super::*;

    #[test]
    fn every_text_catalog_target_has_a_specific_prompt() {
        for opt in catalog::options(Category::TextCode) {
            assert!(
                matches!(text_instruction(opt.value), Cow::Borrowed(_)),
                "{} fell through to the generic prompt",
                opt.value
            );
        }
    }

    #[test]
    fn generic_text_prompt_names_target() {
        let prompt = text_instruction("text/x-rust");
        assert_eq!(
            prompt,
            "Convert or transform the following content to match the format/goal: text/x-rust."
        );
    }

    #[test]
    fn text_request_layout() {
        let req = text_request("text/summary", "abc");
        assert_eq!(req, "Summarize the following text concisely.\n\nContent:\nabc");
    }

    #[test]
    fn image_prompts() {
        assert!(image_instruction("text/html").contains("HTML/Tailwind"));
        assert!(image_instruction("application/json").contains("JSON"));
        assert!(image_instruction("text/description").contains("Alt Text"));
        assert_eq!(image_instruction("image/png"), "Describe this image.");
    }

    #[test]
    fn audio_prompts() {
        assert!(audio_instruction("text/summary").contains("summary"));
        assert!(audio_instruction("application/json").contains("sentiment"));
        assert_eq!(
            audio_instruction("text/transcription"),
            "Transcribe this audio file accurately."
        );
    }

    #[test]
    fn document_prompts() {
        for opt in catalog::options(Category::Pdf) {
            assert_ne!(document_instruction(opt.value), "Analyze this PDF document.");
        }
        assert_eq!(document_instruction("text/yaml"), "Analyze this PDF document.");
    }
}
