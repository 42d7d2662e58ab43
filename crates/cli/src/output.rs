use clap::ValueEnum;
use ir::Cfg;
use serde::{Deserialize, Serialize};

/// Supported output formats for answers, batch results and facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            _ => Err("invalid format".into()),
        }
    }
}

impl From<Format> for reporters::Format {
    fn from(fmt: Format) -> Self {
        match fmt {
            Format::Text => reporters::Format::Text,
            Format::Json => reporters::Format::Json,
        }
    }
}

/// Export formats for control flow graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CfgFormat {
    Dot,
    Mermaid,
    Json,
}

impl CfgFormat {
    pub fn render(self, cfg: &Cfg) -> anyhow::Result<String> {
        Ok(match self {
            CfgFormat::Dot => cfg.to_dot(),
            CfgFormat::Mermaid => cfg.to_mermaid(),
            CfgFormat::Json => cfg.to_json()?,
        })
    }
}
