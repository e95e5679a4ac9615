use std::collections::HashMap;

use tracing::debug;

/// Replaces every `{{key}}` token in `body` whose key is in `placeholders`.
///
/// The body is scanned once, left to right, so substituted values are never
/// scanned again within a call and the result does not depend on map iteration
/// order. Tokens with no matching key are copied through unchanged.
///
/// Preconditions on the mapping: keys contain no `{` or `}`, and values contain
/// no `{{key}}` token for a key in the same mapping. Outside these, a key such as
/// `{x` can match inside `{{{x}}`, and a second call may expand tokens that the
/// first call inserted.
pub fn replace_placeholders(body: &str, placeholders: &HashMap<String, String>) -> String {
    if placeholders.is_empty() {
        return body.to_string();
    }

    debug!(placeholder_count = placeholders.len(), "Rendering email body");

    let mut output = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(start) = rest.find("{{") {
        let inner = &rest[start + 2..];
        let matched = inner
            .find("}}")
            .and_then(|end| placeholders.get(&inner[..end]).map(|value| (end, value)));

        match matched {
            Some((end, value)) => {
                output.push_str(&rest[..start]);
                output.push_str(value);
                rest = &inner[end + 2..];
            }
            None => {
                // Step past one brace only, so "{{{key}}}" still finds "{{key}}".
                output.push_str(&rest[..=start]);
                rest = &rest[start + 1..];
            }
        }
    }

    output.push_str(rest);
    output
}
