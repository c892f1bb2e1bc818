//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Folio Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[assistant]
# endpoint = "https://api.groq.com/openai/v1/chat/completions"
# model = "llama-3.1-8b-instant"
# history_limit = 10          # 2-50
# contact_threshold = 3       # 1-20
# request_timeout_secs = 15   # 1-120
# typing_delay_ms = 600       # 0-5000

[persona.assistant]
# temperature = 0.7           # 0.0-2.0
# max_tokens = 200            # 16-4096
# top_p = 0.9
# frequency_penalty = 0.0
# presence_penalty = 0.0
# preamble = "You are the assistant on a personal portfolio site..."

[persona.human]
# temperature = 0.85
# max_tokens = 300

[credentials]
# key_name = "GROQ_API_KEY"
# dev_file = ".env"
# dev_url = "http://localhost:8000/.env"
#
# Base64 fragments joined into a fallback key. This is obfuscation only:
# anything listed here is readable by whoever has this file or binary.
# embedded_fragments = []

[preferences]
# path = "/path/to/preferences.json"

[logging]
# level = "INFO"              # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
