//! Prompt templates for the AI-researched report sections.
//!
//! Each template is a plain function from a firm name to the prompt text sent
//! as the user turn. [`ReportSection`] ties a template to the key and title
//! used when the section is stored and exported.

use serde::{Deserialize, Serialize};

/// System turn sent ahead of every prompt.
pub const SYSTEM_INSTRUCTION: &str = "Be precise and concise.";

pub fn firm_overview(firm_name: &str) -> String {
    format!(
        "Give me a 5-10 sentence firm overview of {}. Be concise, and use bullet points. \
         Don't give a greeting, salutation, lead in, or introduction. BULLET POINTS ONLY",
        firm_name
    )
}

pub fn brief_history(firm_name: &str) -> String {
    format!(
        "Provide a brief, concise history of the {} in bullet point form. \
         Don't give a greeting, salutation, or introduction. BULLET POINTS ONLY",
        firm_name
    )
}

pub fn primary_offerings(firm_name: &str) -> String {
    format!(
        "What are the primary offerings of {}? Please provide a concise response in bullet point form",
        firm_name
    )
}

pub fn firm_size(firm_name: &str) -> String {
    format!(
        "What is the size of {}? Please provide a concise response in bullet point form. \
         Don't give a greeting, salutation, or introduction. BULLET POINTS ONLY",
        firm_name
    )
}

pub fn leadership(firm_name: &str) -> String {
    format!(
        "Who are the key leaders of {}? List each person's name and title, with one line on their background. \
         Don't give a greeting, salutation, or introduction. BULLET POINTS ONLY",
        firm_name
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSection {
    Overview,
    History,
    Offerings,
    Size,
    Leadership,
}

impl ReportSection {
    /// Generation order for a full report.
    pub const ALL: [ReportSection; 5] = [
        ReportSection::Overview,
        ReportSection::History,
        ReportSection::Offerings,
        ReportSection::Size,
        ReportSection::Leadership,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ReportSection::Overview => "overview",
            ReportSection::History => "history",
            ReportSection::Offerings => "offerings",
            ReportSection::Size => "size",
            ReportSection::Leadership => "leadership",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportSection::Overview => "Firm Overview",
            ReportSection::History => "Firm History",
            ReportSection::Offerings => "Primary Offerings",
            ReportSection::Size => "Firm Size",
            ReportSection::Leadership => "Leadership",
        }
    }

    pub fn prompt(&self, firm_name: &str) -> String {
        match self {
            ReportSection::Overview => firm_overview(firm_name),
            ReportSection::History => brief_history(firm_name),
            ReportSection::Offerings => primary_offerings(firm_name),
            ReportSection::Size => firm_size(firm_name),
            ReportSection::Leadership => leadership(firm_name),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|section| section.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_interpolate_firm_name() {
        let firm = "Acme Capital";
        for section in ReportSection::ALL {
            let prompt = section.prompt(firm);
            assert!(
                prompt.contains(firm),
                "{} prompt should mention the firm: {}",
                section.key(),
                prompt
            );
        }
    }

    #[test]
    fn test_overview_prompt_text() {
        assert_eq!(
            firm_overview("Acme Capital"),
            "Give me a 5-10 sentence firm overview of Acme Capital. Be concise, and use bullet points. \
             Don't give a greeting, salutation, lead in, or introduction. BULLET POINTS ONLY"
        );
    }

    #[test]
    fn test_offerings_prompt_text() {
        assert_eq!(
            primary_offerings("Acme Capital"),
            "What are the primary offerings of Acme Capital? Please provide a concise response in bullet point form"
        );
    }

    #[test]
    fn test_section_keys_are_unique_and_ordered() {
        let keys: Vec<&str> = ReportSection::ALL.iter().map(|s| s.key()).collect();
        assert_eq!(
            keys,
            vec!["overview", "history", "offerings", "size", "leadership"]
        );
    }

    #[test]
    fn test_from_key() {
        assert_eq!(ReportSection::from_key("size"), Some(ReportSection::Size));
        assert_eq!(ReportSection::from_key("fees"), None);
    }
}
