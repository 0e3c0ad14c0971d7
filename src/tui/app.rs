use std::time::{Duration, Instant};

use ratatui::widgets::{ListState, ScrollbarState};

use anime_relocator::host::{apply_relocation, target_path, ApplyResult};
use anime_relocator::StrategyKind;

use super::models::{ReviewItem, ReviewStats, ReviewStatus};
use crate::batch::Decision;

const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug)]
pub struct App {
    pub items: Vec<ReviewItem>,
    pub list_state: ListState,
    pub scroll_state: ScrollbarState,
    pub strategy: StrategyKind,
    pub show_help: bool,
    pub show_details: bool,
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl ReviewItem {
    fn from_decision(decision: Decision) -> Self {
        let original_name = decision.display_name();
        let Decision { source, file, outcome } = decision;
        match outcome {
            Ok(relocation) => {
                let target = file.as_ref().and_then(|f| target_path(f, &relocation));
                let status = if relocation.is_deferred() {
                    ReviewStatus::Deferred
                } else {
                    ReviewStatus::Ready
                };
                Self {
                    source,
                    file,
                    original_name,
                    relocation: Some(relocation),
                    target,
                    status,
                    message: None,
                }
            }
            Err(message) => Self {
                source,
                file,
                original_name,
                relocation: None,
                target: None,
                status: ReviewStatus::Failed,
                message: Some(message),
            },
        }
    }
}

impl App {
    pub fn new(decisions: Vec<Decision>, strategy: StrategyKind) -> Self {
        let items: Vec<ReviewItem> = decisions.into_iter().map(ReviewItem::from_decision).collect();
        let mut list_state = ListState::default();
        if !items.is_empty() {
            list_state.select(Some(0));
        }
        let scroll_state = ScrollbarState::new(items.len());

        Self {
            items,
            list_state,
            scroll_state,
            strategy,
            show_help: false,
            show_details: true,
            status_message: None,
            status_message_time: None,
        }
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.items.len() => i + 1,
            _ => 0,
        };
        self.select(i);
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.select(i);
    }

    fn select(&mut self, index: usize) {
        self.list_state.select(Some(index));
        self.scroll_state = self.scroll_state.position(index);
    }

    pub fn selected_item(&self) -> Option<&ReviewItem> {
        self.list_state.selected().and_then(|i| self.items.get(i))
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn toggle_details(&mut self) {
        self.show_details = !self.show_details;
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_message_time = Some(Instant::now());
    }

    pub fn clear_status_message_if_expired(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() >= STATUS_MESSAGE_TTL {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    fn apply_item(item: &mut ReviewItem) -> bool {
        if item.status != ReviewStatus::Ready {
            return false;
        }
        let (Some(file), Some(relocation)) = (&item.file, &item.relocation) else {
            return false;
        };

        match apply_relocation(file, relocation) {
            ApplyResult::Success(path) => {
                item.status = ReviewStatus::Applied;
                item.message = Some(format!("Moved to {}", path.display()));
                true
            }
            ApplyResult::Unchanged => {
                item.status = ReviewStatus::Applied;
                item.message = Some("Already in place".to_string());
                true
            }
            other => {
                item.status = ReviewStatus::ApplyFailed;
                item.message = Some(other.to_string());
                false
            }
        }
    }

    pub fn apply_selected(&mut self) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        let name = item.original_name.clone();
        let message = if Self::apply_item(item) {
            format!("Applied {}", name)
        } else {
            format!("Nothing applied for {}", name)
        };
        self.set_status_message(message);
    }

    pub fn apply_all(&mut self) {
        let applied = self
            .items
            .iter_mut()
            .map(Self::apply_item)
            .filter(|applied| *applied)
            .count();
        self.set_status_message(format!("Applied {} file(s)", applied));
    }

    pub fn stats(&self) -> ReviewStats {
        let mut stats = ReviewStats {
            total: self.items.len(),
            ..ReviewStats::default()
        };
        for item in &self.items {
            match item.status {
                ReviewStatus::Ready => stats.ready += 1,
                ReviewStatus::Deferred => stats.deferred += 1,
                ReviewStatus::Failed | ReviewStatus::ApplyFailed => stats.failed += 1,
                ReviewStatus::Applied => stats.applied += 1,
            }
        }
        stats
    }

    /// Share of files that no longer need attention.
    pub fn progress(&self) -> f64 {
        let stats = self.stats();
        if stats.total == 0 {
            return 1.0;
        }
        (stats.total - stats.ready) as f64 / stats.total as f64
    }
}
