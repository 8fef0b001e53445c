use super::DetectionStrategy;
use crate::config::FlowKeywords;
use crate::error::DetectionError;
use crate::flow::model::{DetectionMethod, FlowGroup, FlowMetadata};
use crate::screen::{ScreenId, ScreenStructure};

const BASE_CONFIDENCE: f64 = 0.4;
const FLOW_KEYWORD_BONUS: f64 = 0.3;
const SIZE_BONUS: f64 = 0.2;

/// Groups screens that live on the same page or section.
pub struct PageStrategy {
    flow_keywords: FlowKeywords,
    bonus_min_size: usize,
    bonus_max_size: usize,
}

impl PageStrategy {
    pub fn new(flow_keywords: FlowKeywords, bonus_min_size: usize, bonus_max_size: usize) -> Self {
        Self {
            flow_keywords,
            bonus_min_size,
            bonus_max_size,
        }
    }
}

impl DetectionStrategy for PageStrategy {
    fn name(&self) -> &str {
        "page"
    }

    fn detect(&self, screens: &[ScreenStructure]) -> Result<Vec<FlowGroup>, DetectionError> {
        let mut pages: Vec<(&str, Vec<ScreenId>)> = Vec::new();
        for screen in screens {
            match pages.iter_mut().find(|(page, _)| *page == screen.page) {
                Some((_, members)) => members.push(screen.id),
                None => pages.push((&screen.page, vec![screen.id])),
            }
        }

        let groups = pages
            .into_iter()
            .filter(|(_, members)| members.len() >= 2)
            .enumerate()
            .map(|(i, (page, members))| {
                let flow = self.flow_keywords.match_flow(&page.to_lowercase());
                let mut confidence = BASE_CONFIDENCE;
                let mut evidence = vec![format!("{} screens on page '{}'", members.len(), page)];
                if let Some(flow) = flow {
                    confidence += FLOW_KEYWORD_BONUS;
                    evidence.push(format!("page name implies a {} flow", flow));
                }
                if (self.bonus_min_size..=self.bonus_max_size).contains(&members.len()) {
                    confidence += SIZE_BONUS;
                }
                FlowGroup::new(format!("page-{}", i + 1), members, confidence, DetectionMethod::Page)
                    .with_metadata(FlowMetadata {
                        flow_type: flow.map(|f| f.as_str().to_string()),
                        evidence,
                        ..FlowMetadata::default()
                    })
            })
            .collect();
        Ok(groups)
    }
}
