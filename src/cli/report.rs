use crate::core::Chain;
use crate::error::Result;
use serde_json::{Map, Value};

/// One block per stanza, each followed by the separator line
pub fn render_text(chain: &Chain, separator: &str) -> String {
    let mut out = String::new();
    for block in chain {
        out.push_str(&block.to_string());
        out.push('\n');
        out.push_str(separator);
        out.push('\n');
    }
    out
}

pub fn render_json(chain: &Chain) -> Result<String> {
    let mut report = Map::new();
    report.insert("blocks".to_string(), serde_json::to_value(chain)?);
    report.insert("valid".to_string(), Value::Bool(chain.is_valid()));
    Ok(serde_json::to_string_pretty(&Value::Object(report))?)
}

pub fn validity_line(chain: &Chain) -> String {
    format!("Is blockchain valid? {}", chain.is_valid())
}
