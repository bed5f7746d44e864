//! Built-in provider templates.
//!
//! Mirrors the template files shipped with the original front end for the
//! three first-party providers. Each header string is a JSON rule array; see
//! `structout_core::Rule` for the rule grammar.

use crate::config::ProviderConfig;

/// OpenAI structured-outputs envelope.
///
/// Wraps the schema in `name`/`description`/`strict`, then cascades
/// `additionalProperties: false` and a derived `required` array onto every
/// object node, as the strict decoding mode demands.
const OPENAI_HEADER: &str = r#"[
  {"key":"name","type":"string","sourceparam":"schemaName","level":1},
  {"key":"description","type":"string","sourceparam":"schemaDescription","level":1},
  {"key":"strict","type":"keyvalue","value":true,"level":1},
  {"key":"schema","type":"object","level":1},
  {"key":"type","type":"keyvalue","value":"object","level":2},
  {"key":"properties","type":"object","level":2,"end":true},
  {"key":"additionalProperties","type":"boolean","value":false,"level":2,"action":"include","actionLevel":["object"]},
  {"key":"required","type":"array","value":"{keynames}","level":2,"action":"include","actionLevel":["object"]}
]"#;

/// Anthropic tool-use envelope: the schema becomes the tool's `input_schema`.
const ANTHROPIC_HEADER: &str = r#"[
  {"key":"name","type":"string","sourceparam":"schemaName","level":1},
  {"key":"description","type":"string","sourceparam":"schemaDescription","level":1},
  {"key":"input_schema","type":"object","level":1},
  {"key":"type","type":"keyvalue","value":"object","level":2},
  {"key":"properties","type":"object","level":2,"end":true}
]"#;

/// Gemini response-schema envelope: the schema is sent bare, with
/// `propertyOrdering` cascaded onto every object node.
const GEMINI_HEADER: &str = r#"[
  {"key":"type","type":"keyvalue","value":"object","level":1},
  {"key":"properties","type":"object","level":1,"end":true},
  {"key":"propertyOrdering","type":"array","value":"{keynames}","level":1,"action":"include","actionLevel":["object"]}
]"#;

/// Returns the OpenAI preset.
pub fn openai() -> ProviderConfig {
    ProviderConfig::new("openai", OPENAI_HEADER, "/v1/responses")
}

/// Returns the Anthropic preset.
pub fn anthropic() -> ProviderConfig {
    ProviderConfig::new("anthropic", ANTHROPIC_HEADER, "/v1/messages")
}

/// Returns the Gemini preset.
pub fn gemini() -> ProviderConfig {
    ProviderConfig::new(
        "gemini",
        GEMINI_HEADER,
        "/v1beta/models/{model}:generateContent",
    )
}

/// Returns all built-in presets in catalog order.
pub fn all() -> Vec<ProviderConfig> {
    vec![openai(), anthropic(), gemini()]
}
