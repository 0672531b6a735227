use crate::model::{ActionItem, AppType};
use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActionSort {
    #[default]
    Date,
    None,
}

/// Which completed items are shown. `Hide` shows open items instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompletedWindow {
    #[default]
    Hide,
    LastDays(u32),
    All,
}

impl CompletedWindow {
    pub const CHOICES: [CompletedWindow; 5] = [
        CompletedWindow::Hide,
        CompletedWindow::LastDays(30),
        CompletedWindow::LastDays(60),
        CompletedWindow::LastDays(90),
        CompletedWindow::All,
    ];

    pub fn label(self) -> String {
        match self {
            CompletedWindow::Hide => "Hide Completed".to_string(),
            CompletedWindow::LastDays(days) => format!("Last {days} Days"),
            CompletedWindow::All => "All Completed".to_string(),
        }
    }
}

/// Flag/complete/delete state layered over the action-item list.
#[derive(Clone, Debug, Default)]
pub struct ActionBoard {
    items: Vec<ActionItem>,
    flagged: BTreeSet<String>,
    completed: BTreeMap<String, DateTime<Utc>>,
    dismissed: BTreeSet<String>,
    filters: BTreeSet<AppType>,
    sort: ActionSort,
    window: CompletedWindow,
}

impl ActionBoard {
    pub fn new(items: Vec<ActionItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn is_flagged(&self, id: &str) -> bool {
        self.flagged.contains(id)
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.contains_key(id)
    }

    pub fn toggle_flag(&mut self, id: &str) {
        if !self.flagged.remove(id) {
            self.flagged.insert(id.to_string());
        }
    }

    pub fn complete(&mut self, id: &str, now: DateTime<Utc>) {
        self.completed.entry(id.to_string()).or_insert(now);
    }

    pub fn toggle_complete(&mut self, id: &str, now: DateTime<Utc>) {
        if self.completed.remove(id).is_none() {
            self.completed.insert(id.to_string(), now);
        }
    }

    /// Removes the item from every view.
    pub fn delete(&mut self, id: &str) {
        self.dismissed.insert(id.to_string());
        self.flagged.remove(id);
    }

    pub fn toggle_filter(&mut self, app: AppType) {
        if !self.filters.remove(&app) {
            self.filters.insert(app);
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn filters(&self) -> &BTreeSet<AppType> {
        &self.filters
    }

    pub fn set_sort(&mut self, sort: ActionSort) {
        self.sort = sort;
    }

    pub fn sort(&self) -> ActionSort {
        self.sort
    }

    pub fn set_completed_window(&mut self, window: CompletedWindow) {
        self.window = window;
    }

    pub fn completed_window(&self) -> CompletedWindow {
        self.window
    }

    pub fn visible(&self, now: DateTime<Utc>) -> Vec<&ActionItem> {
        let mut out: Vec<&ActionItem> = self
            .items
            .iter()
            .filter(|item| !self.dismissed.contains(&item.id))
            .filter(|item| match (self.window, self.completed.get(&item.id)) {
                (CompletedWindow::Hide, done) => done.is_none(),
                (CompletedWindow::All, done) => done.is_some(),
                (CompletedWindow::LastDays(days), Some(at)) => {
                    now.signed_duration_since(*at) <= Duration::days(i64::from(days))
                }
                (CompletedWindow::LastDays(_), None) => false,
            })
            .filter(|item| self.filters.is_empty() || self.filters.contains(&item.source.app_type))
            .collect();

        // stable: equal keys keep fixture order
        out.sort_by(|a, b| {
            let flag_order = self.is_flagged(&b.id).cmp(&self.is_flagged(&a.id));
            match self.sort {
                ActionSort::Date => flag_order.then(b.created_at.cmp(&a.created_at)),
                ActionSort::None => flag_order,
            }
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Source;
    use chrono::TimeZone;

    fn item(id: &str, app_type: AppType, hour: u32) -> ActionItem {
        ActionItem {
            id: id.into(),
            title: id.into(),
            created_at: Utc.with_ymd_and_hms(2025, 11, 20, hour, 0, 0).unwrap(),
            source: Source {
                id: format!("src-{id}"),
                app_type,
                title: String::new(),
                subtitle: String::new(),
                metadata: Default::default(),
                content: String::new(),
            },
            app_type,
        }
    }

    fn board() -> ActionBoard {
        ActionBoard::new(vec![
            item("a", AppType::Gmail, 8),
            item("b", AppType::Slack, 12),
            item("c", AppType::Gmail, 10),
        ])
    }

    fn ids(items: Vec<&ActionItem>) -> Vec<&str> {
        items.into_iter().map(|i| i.id.as_str()).collect()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 21, 0, 0, 0).unwrap()
    }

    #[test]
    fn default_view_is_newest_first() {
        assert_eq!(ids(board().visible(now())), vec!["b", "c", "a"]);
    }

    #[test]
    fn flagged_items_lead() {
        let mut b = board();
        b.toggle_flag("a");
        assert_eq!(ids(b.visible(now())), vec!["a", "b", "c"]);
    }

    #[test]
    fn double_flag_toggle_restores_order() {
        let mut b = board();
        let before: Vec<String> = b.visible(now()).iter().map(|i| i.id.clone()).collect();
        b.toggle_flag("c");
        b.toggle_flag("c");
        let after: Vec<String> = b.visible(now()).iter().map(|i| i.id.clone()).collect();
        assert_eq!(before, after);
        assert!(!b.is_flagged("c"));
    }

    #[test]
    fn completed_moves_to_completed_view() {
        let mut b = board();
        b.complete("b", now());
        assert_eq!(ids(b.visible(now())), vec!["c", "a"]);
        b.set_completed_window(CompletedWindow::All);
        assert_eq!(ids(b.visible(now())), vec!["b"]);
    }

    #[test]
    fn toggle_complete_reopens() {
        let mut b = board();
        b.toggle_complete("a", now());
        assert!(b.is_completed("a"));
        b.toggle_complete("a", now());
        assert!(!b.is_completed("a"));
        assert_eq!(b.visible(now()).len(), 3);
    }

    #[test]
    fn completed_window_limits_by_age() {
        let mut b = board();
        b.complete("a", now() - Duration::days(45));
        b.complete("b", now() - Duration::days(5));
        b.set_completed_window(CompletedWindow::LastDays(30));
        assert_eq!(ids(b.visible(now())), vec!["b"]);
        b.set_completed_window(CompletedWindow::LastDays(60));
        assert_eq!(ids(b.visible(now())), vec!["b", "a"]);
    }

    #[test]
    fn filters_restrict_by_app() {
        let mut b = board();
        b.toggle_filter(AppType::Gmail);
        assert_eq!(ids(b.visible(now())), vec!["c", "a"]);
        b.toggle_filter(AppType::Gmail);
        assert_eq!(b.visible(now()).len(), 3);
        b.toggle_filter(AppType::Drive);
        assert!(b.visible(now()).is_empty());
        b.clear_filters();
        assert_eq!(b.visible(now()).len(), 3);
    }

    #[test]
    fn unsorted_keeps_fixture_order() {
        let mut b = board();
        b.set_sort(ActionSort::None);
        assert_eq!(ids(b.visible(now())), vec!["a", "b", "c"]);
    }

    #[test]
    fn delete_hides_everywhere() {
        let mut b = board();
        b.complete("a", now());
        b.delete("a");
        b.set_completed_window(CompletedWindow::All);
        assert!(b.visible(now()).is_empty());
    }
}
