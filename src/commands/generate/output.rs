//! Output formatting for generate command results.

use super::execute::GenerateResult;
use crate::output::Outputable;

impl Outputable for GenerateResult {
    fn to_table(&self) -> String {
        if let Some(ddl) = &self.ddl {
            return ddl.clone();
        }

        let mut output = format!(
            "Generated {} table(s) for {}",
            self.tables.len(),
            self.driver
        );
        if let Some(path) = &self.output_path {
            output.push_str(&format!(" -> {}", path));
        }
        for table in &self.tables {
            output.push_str(&format!("\n  {}", table));
        }
        output
    }
}
