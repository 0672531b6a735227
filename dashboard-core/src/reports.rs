use crate::model::{Report, ReportPeriod};
use chrono::{Datelike, Days, Months, NaiveDate};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TeamFilter {
    #[default]
    All,
    Team(String),
}

impl TeamFilter {
    /// Parses the select-box value; `"all"` and blanks mean no filter.
    pub fn from_value(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == "all" {
            TeamFilter::All
        } else {
            TeamFilter::Team(value.to_string())
        }
    }

    pub fn value(&self) -> &str {
        match self {
            TeamFilter::All => "all",
            TeamFilter::Team(id) => id,
        }
    }

    /// Company-wide reports (no team) pass every filter.
    pub fn admits(&self, team: Option<&str>) -> bool {
        match (self, team) {
            (TeamFilter::All, _) | (_, None) => true,
            (TeamFilter::Team(wanted), Some(team)) => wanted == team,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportQuery {
    pub period: ReportPeriod,
    pub anchor: NaiveDate,
    pub team: TeamFilter,
}

impl ReportQuery {
    pub fn daily(anchor: NaiveDate) -> Self {
        Self {
            period: ReportPeriod::Daily,
            anchor,
            team: TeamFilter::All,
        }
    }

    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        period_range(self.period, self.anchor)
    }
}

/// Inclusive date range covered by `period` around `anchor`.
/// Weeks run Sunday through Saturday.
pub fn period_range(period: ReportPeriod, anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    match period {
        ReportPeriod::Daily => (anchor, anchor),
        ReportPeriod::Weekly => {
            let back = anchor.weekday().num_days_from_sunday() as u64;
            let start = anchor - Days::new(back);
            (start, start + Days::new(6))
        }
        ReportPeriod::Monthly => {
            let start = anchor.with_day(1).unwrap_or(anchor);
            let end = (start + Months::new(1)) - Days::new(1);
            (start, end)
        }
    }
}

/// Moves the anchor one period back or forward.
pub fn step(period: ReportPeriod, anchor: NaiveDate, direction: Direction) -> NaiveDate {
    let moved = match (period, direction) {
        (ReportPeriod::Daily, Direction::Prev) => anchor.checked_sub_days(Days::new(1)),
        (ReportPeriod::Daily, Direction::Next) => anchor.checked_add_days(Days::new(1)),
        (ReportPeriod::Weekly, Direction::Prev) => anchor.checked_sub_days(Days::new(7)),
        (ReportPeriod::Weekly, Direction::Next) => anchor.checked_add_days(Days::new(7)),
        (ReportPeriod::Monthly, Direction::Prev) => anchor.checked_sub_months(Months::new(1)),
        (ReportPeriod::Monthly, Direction::Next) => anchor.checked_add_months(Months::new(1)),
    };
    moved.unwrap_or(anchor)
}

pub fn period_label(period: ReportPeriod, anchor: NaiveDate) -> String {
    match period {
        ReportPeriod::Daily => anchor.format("%A, %B %-d, %Y").to_string(),
        ReportPeriod::Weekly => {
            let (start, end) = period_range(period, anchor);
            format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
        }
        ReportPeriod::Monthly => anchor.format("%B %Y").to_string(),
    }
}

pub fn period_caption(period: ReportPeriod) -> &'static str {
    match period {
        ReportPeriod::Daily => "Viewing all reports for this day",
        ReportPeriod::Weekly => "Viewing all end of week reports",
        ReportPeriod::Monthly => "Viewing all end of month reports",
    }
}

/// Reports for the query. Dated reports inside the period win; when there are
/// none, undated templates of that period are stamped with the range start.
pub fn select<'a, I>(candidates: I, query: &ReportQuery) -> Vec<Report>
where
    I: IntoIterator<Item = (&'a Report, bool)>,
{
    let (start, end) = query.range();
    let mut dated = Vec::new();
    let mut templates = Vec::new();

    for (report, is_template) in candidates {
        if report.period != query.period || !query.team.admits(report.team.as_deref()) {
            continue;
        }
        if is_template {
            templates.push(report);
        } else if report.date >= start && report.date <= end {
            dated.push(report.clone());
        }
    }

    if !dated.is_empty() {
        return dated;
    }

    templates
        .into_iter()
        .map(|report| Report {
            date: start,
            ..report.clone()
        })
        .collect()
}
