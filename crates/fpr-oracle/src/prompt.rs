//! Prompt text sent to the model for each capability.

use fpr_core::NO_RELATED_CONTENT;

/// System prompt for judging one rule.
pub(crate) fn judge_system(rule_description: &str) -> String {
    format!(
        "You are a compliance reviewer for financial promotions published as short-form \
         social media videos. You check a video transcript against one regulatory rule.\n\n\
         Rule under review:\n{rule_description}\n\n\
         Answer with a single JSON object and nothing else:\n\
         {{\n\
         \x20 \"rule_name\": \"<the rule name>\",\n\
         \x20 \"label\": <true if the transcript respects the rule, false otherwise>,\n\
         \x20 \"part\": [\"<verbatim transcript excerpt that breaches the rule>\", ...],\n\
         \x20 \"suggestion\": [\"<how to fix the excerpt at the same position in part>\", ...]\n\
         }}\n\n\
         If the transcript respects the rule, leave \"part\" and \"suggestion\" empty. \
         If the transcript is missing content the rule requires (for example no risk \
         warning at all), the rule is violated: set \"label\" to false, \"part\" to \
         [\"{NO_RELATED_CONTENT}\"] and \"suggestion\" to one change that adds the missing \
         content. Give exactly one suggestion per excerpt."
    )
}

/// User message carrying the transcript, shared by judgment and product cards.
pub(crate) fn transcript_user(document: &str) -> String {
    format!("Transcript:\n{document}")
}

/// The vision model answers with this exact text when a frame has no text.
pub const NO_TEXT_SENTINEL: &str = "No text presented in the image";

pub(crate) fn frame_instruction() -> String {
    format!(
        "Extract every piece of text visible in this video frame, exactly as written. \
         Answer with a JSON object {{\"image_content\": \"<the text>\"}}. \
         If the frame shows no text, set image_content to \"{NO_TEXT_SENTINEL}\"."
    )
}

pub(crate) const DISCLAIMER_SYSTEM: &str =
    "You review on-screen text captured from a financial promotion video. Decide whether \
     any of it is a risk disclaimer or risk warning (for example \"Capital at risk\", \
     \"The value of investments can go down as well as up\"). Answer with a JSON object: \
     {\"disclaimer_is_exist\": <true or false>, \"disclaimer_text\": \"<the disclaimer \
     verbatim, or an empty string>\"}.";

pub(crate) fn disclaimer_user(frame_texts: &[String]) -> String {
    let mut out = String::from("On-screen text, one frame per line:\n");
    for (i, text) in frame_texts.iter().enumerate() {
        out.push_str(&format!("[frame {}] {}\n", i + 1, text.replace('\n', " ")));
    }
    out
}

pub(crate) const PRODUCT_CARD_SYSTEM: &str =
    "You summarise financial promotion videos for a compliance analyst. From the transcript, \
     write a short markdown product card with these sections:\n\
     **Company name**: the promoting company, or \"Not stated\".\n\
     **Industry**: the industry or product category.\n\
     **Product summary**: two or three sentences describing the product, its claimed \
     benefits, and any stated costs or risks.";
