use crate::error::{ReportError, Result};
use crate::firm::FirmRecord;
use crate::llm::types::GenerationResult;
use crate::prompts::ReportSection;
use crate::utils::capitalize;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Section results in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSections {
    entries: Vec<(String, GenerationResult)>,
}

impl ReportSections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-inserting a key replaces its result in place.
    pub fn insert(&mut self, key: impl Into<String>, result: GenerationResult) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = result,
            None => self.entries.push((key, result)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&GenerationResult> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, result)| result)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GenerationResult)> {
        self.entries.iter().map(|(key, result)| (key.as_str(), result))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirmReport {
    pub firm_name: String,
    pub record: Option<FirmRecord>,
    pub sections: ReportSections,
    pub generated_at: DateTime<Utc>,
}

impl FirmReport {
    pub fn new(firm_name: impl Into<String>, sections: ReportSections) -> Self {
        Self {
            firm_name: firm_name.into(),
            record: None,
            sections,
            generated_at: Utc::now(),
        }
    }

    pub fn with_record(mut self, record: FirmRecord) -> Self {
        self.record = Some(record);
        self
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# RIA Report: {}\n\n", self.firm_name));
        output.push_str(&format!(
            "_Generated {}_\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));

        if let Some(record) = &self.record {
            let lines = record.summary_lines();
            if !lines.is_empty() {
                output.push_str("## Reported SEC Data\n\n");
                for (label, value) in lines {
                    output.push_str(&format!("- **{}:** {}\n", label, value));
                }
                output.push('\n');
            }
        }

        for (key, result) in self.sections.iter() {
            output.push_str(&format!("## {}\n\n", section_title(key)));
            output.push_str(result.text().trim_end());
            output.push_str("\n\n");

            if !result.citations().is_empty() {
                output.push_str("**Sources**\n\n");
                for (i, citation) in result.citations().iter().enumerate() {
                    output.push_str(&format!("{}. {}\n", i + 1, citation));
                }
                output.push('\n');
            }
        }

        output
    }

    /// Single-row sheet: disclosed firm fields, then one column per section.
    pub fn to_csv(&self) -> Result<String> {
        let mut header: Vec<String> = vec!["Firm Name".to_string()];
        let mut row: Vec<String> = vec![self.firm_name.clone()];

        if let Some(record) = &self.record {
            for (label, value) in record.summary_lines() {
                header.push(label.to_string());
                row.push(value);
            }
        }

        for (key, result) in self.sections.iter() {
            header.push(key.to_string());
            row.push(result.text().to_string());
            header.push(format!("{} sources", key));
            row.push(result.citations_plain());
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&header)?;
        writer.write_record(&row)?;

        let bytes = writer
            .into_inner()
            .map_err(|e| ReportError::IoError(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| ReportError::Parse(e.to_string()))
    }
}

fn section_title(key: &str) -> String {
    ReportSection::from_key(key)
        .map(|section| section.title().to_string())
        .unwrap_or_else(|| capitalize(key))
}

#[cfg(feature = "client")]
pub use generator::ReportGenerator;

#[cfg(feature = "client")]
mod generator {
    use super::*;
    use crate::llm::client::QueryClient;
    use log::{error, info};

    /// Runs the section prompts for one firm, one call at a time.
    pub struct ReportGenerator<'a> {
        client: &'a QueryClient,
    }

    impl<'a> ReportGenerator<'a> {
        pub fn new(client: &'a QueryClient) -> Self {
            Self { client }
        }

        pub async fn generate(&self, firm_name: &str) -> Result<ReportSections> {
            self.generate_sections(firm_name, &ReportSection::ALL).await
        }

        /// Stops at the first failed section and returns its error.
        pub async fn generate_sections(
            &self,
            firm_name: &str,
            sections: &[ReportSection],
        ) -> Result<ReportSections> {
            let firm_name = firm_name.trim();
            if firm_name.is_empty() {
                return Err(ReportError::MissingFirmName);
            }

            info!(
                "Generating {} report sections for {}",
                sections.len(),
                firm_name
            );

            let mut results = ReportSections::new();
            for section in sections {
                info!("Requesting section: {}", section.title());
                let result = self
                    .client
                    .query(&section.prompt(firm_name))
                    .await
                    .map_err(|e| {
                        error!("Section '{}' failed: {}", section.key(), e);
                        e
                    })?;
                results.insert(section.key(), result);
            }

            Ok(results)
        }

        pub async fn generate_report(
            &self,
            firm_name: &str,
            record: Option<FirmRecord>,
        ) -> Result<FirmReport> {
            let sections = self.generate(firm_name).await?;
            let report = FirmReport::new(firm_name.trim(), sections);
            Ok(match record {
                Some(record) => report.with_record(record),
                None => report,
            })
        }
    }
}
