use std::error::Error;

use serde::Serialize;

use super::GenerateCmd;
use crate::commands::Execute;
use crate::dialect::Dialect;

/// Result of the generate command execution
#[derive(Debug, Default, Serialize)]
pub struct GenerateResult {
    pub driver: String,
    pub tables: Vec<String>,
    /// File the script was written to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    /// The script itself when no output file is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ddl: Option<String>,
}

impl Execute for GenerateCmd {
    type Output = GenerateResult;

    fn execute(self) -> Result<Self::Output, Box<dyn Error>> {
        let mut config = self.target.resolve_config()?;
        if let Some(output) = self.output {
            config.out_file_path = Some(output);
        }
        let output_path = config.out_file_path.clone();

        let mut maker = self.target.maker(config)?;
        let ddl = match &output_path {
            Some(_) => {
                maker.generate()?;
                None
            }
            None => {
                let mut buffer = Vec::new();
                maker.generate_to(&mut buffer)?;
                Some(String::from_utf8(buffer)?)
            }
        };

        Ok(GenerateResult {
            driver: maker.dialect().driver().to_string(),
            tables: maker.tables().iter().map(|t| t.name().to_string()).collect(),
            output_path: output_path.map(|p| p.display().to_string()),
            ddl,
        })
    }
}
