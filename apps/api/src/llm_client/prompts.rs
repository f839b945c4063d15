// Shared prompt fragments.
// Each service that needs model calls defines its own prompts.rs alongside it.

/// Appended to every prompt that declares a response shape.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with valid JSON only, matching the declared schema exactly. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences.";

/// Persona preamble shared by the resume-writing prompts.
pub const RESUME_WRITER_PERSONA: &str = "\
    You are an expert Resume Writer and ATS specialist. \
    Write in a professional, action-oriented voice and never invent employers, \
    titles, degrees or dates that are not present in the input.";

/// Fills `{name}` markers in a single left-to-right pass. Inserted values are
/// never rescanned, so braces in user text come through literally. Markers
/// with no matching name are left as they are.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let hit = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match hit {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
