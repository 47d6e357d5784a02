//! FastGPT answer rendering

use crate::kagi::FastGptAnswer;

/// Render the answer text followed by a numbered Markdown reference list
///
/// Reference numbering always starts at 1 and matches the `[n]` markers
/// FastGPT places in its output.
pub fn format_fastgpt_response(answer: &FastGptAnswer) -> String {
    if answer.references.is_empty() {
        return answer.output.clone();
    }

    let lines: Vec<String> = answer
        .references
        .iter()
        .enumerate()
        .map(|(i, reference)| format!("{}. [{}]({})", i + 1, reference.title, reference.url))
        .collect();

    format!("{}\n\n## References\n\n{}", answer.output, lines.join("\n"))
}
