//! System message built from the page the user is browsing.

use crate::core::{PageContext, PrivacyLevel};

const NO_CONTEXT_PROMPT: &str =
    "You are Iris, an AI web assistant. Help the user with their questions.";
const MINIMAL_PRIVACY_NOTICE: &str = "The user has enabled minimal privacy mode, so you only have access to the page URL and title.";
const CLOSING_INSTRUCTION: &str =
    "Provide helpful, accurate, and concise responses based on this context.";

/// Build the system prompt for a page.
///
/// With `PrivacyLevel::Minimal` the page body never makes it into the prompt.
pub fn system_message(page_context: Option<&PageContext>, privacy_level: PrivacyLevel) -> String {
    let Some(page) = page_context else {
        return NO_CONTEXT_PROMPT.to_string();
    };

    let title = non_empty(page.title.as_deref()).unwrap_or("Untitled page");
    let url = non_empty(page.url.as_deref()).unwrap_or("unknown");

    let mut sections = vec![format!(
        "You are Iris, an AI web assistant. You are currently helping the user with the webpage titled \"{title}\" at URL \"{url}\"."
    )];

    if let Some(metadata) = &page.metadata {
        let labelled = [
            ("Page description", metadata.description.as_deref()),
            ("Keywords", metadata.keywords.as_deref()),
            ("Author", metadata.author.as_deref()),
            ("Published date", metadata.published_date.as_deref()),
        ];
        for (label, value) in labelled {
            if let Some(value) = non_empty(value) {
                sections.push(format!("{label}: {value}"));
            }
        }
    }

    match privacy_level {
        PrivacyLevel::Minimal => sections.push(MINIMAL_PRIVACY_NOTICE.to_string()),
        PrivacyLevel::Standard => {
            if let Some(content) = non_empty(page.content.as_deref()) {
                sections.push(format!("Here is the content of the page:\n\n{content}"));
            }
        }
    }

    sections.push(CLOSING_INSTRUCTION.to_string());
    sections.join("\n\n")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
