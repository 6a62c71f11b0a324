//! Model Guideline Table
//!
//! Static optimization heuristics per target model family.

use crate::domain::TargetModel;

const OPENAI_GUIDELINES: &str = "\
- Put the instruction first and separate it from context with clear headings or delimiters
- Be specific about the desired outcome, length, format and style
- Assign a role or persona when it sharpens the expected expertise
- Show the expected output format with a short example when structure matters
- Break complex tasks into numbered steps and ask for step-by-step reasoning when needed
- Say what to do instead of only what not to do";

const ANTHROPIC_GUIDELINES: &str = "\
- Wrap distinct inputs (documents, examples, data) in descriptive XML tags such as <context> or <example>
- Be direct and explicit; Claude follows precise instructions closely
- Give the reason behind important constraints so the model can generalize them
- Ask the model to think through the problem inside <thinking> tags before answering when reasoning is involved
- Describe the desired output format explicitly, optionally inside an <output_format> tag
- Place long reference material before the question or task";

const GOOGLE_GUIDELINES: &str = "\
- State the task, context and desired output as distinct, clearly labelled parts
- Use few-shot examples with a consistent format to anchor the response
- Specify constraints (length, tone, audience) as explicit bullet points
- Add a prefix for the expected response (e.g. \"Answer:\" or \"JSON:\") to steer the format
- Keep instructions concise; split multi-part requests into ordered sub-tasks
- Ask for a structured format (table, list, JSON) when the output will be processed";

const IMAGE_GUIDELINES: &str = "\
- Lead with the main subject, then describe action, setting and composition
- Specify the art style, medium and any reference artists or movements
- Describe lighting, color palette, mood and atmosphere explicitly
- Include camera details (angle, lens, depth of field) for photographic results
- Add quality modifiers (highly detailed, 8k, sharp focus) sparingly
- Use comma-separated descriptive phrases rather than full conversational sentences
- Mention aspect ratio and what to avoid (negative prompt) when relevant";

/// Guideline block for a target model
pub fn guidelines_for(target: TargetModel) -> &'static str {
    match target {
        TargetModel::OpenAI => OPENAI_GUIDELINES,
        TargetModel::Anthropic => ANTHROPIC_GUIDELINES,
        TargetModel::Google => GOOGLE_GUIDELINES,
        TargetModel::Image => IMAGE_GUIDELINES,
    }
}
