use crate::config::ScriptConfig;

impl ScriptConfig {
    pub fn print_safe_config(&self) -> String {
        format!(
            r"
ScriptConfig {{
    logging_format: {:#?},
    chain: {:#?},
    keys:
        KeyConfig {{
            signing_keys: [{} key(s) REDACTED],
        }},
}}",
            self.logging_format,
            self.chain,
            self.keys.signing_keys.len(),
        )
    }
}
