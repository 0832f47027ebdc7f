use crate::model::{FileHistory, MetricSample};
use std::collections::HashMap;

/// Lines-of-code weighted mean of complexity and maintainability.
///
/// Lines of code are summed. A group with no lines yields zero for both
/// weighted figures.
pub fn aggregate<'a, I>(samples: I) -> MetricSample
where
    I: IntoIterator<Item = &'a MetricSample>,
{
    let mut total_complexity = 0.0;
    let mut total_maintainability = 0.0;
    let mut total_loc: u64 = 0;

    for sample in samples {
        let weight = sample.lines_of_code as f64;
        total_complexity += sample.ciclomatic_complexity * weight;
        total_maintainability += sample.maintainability * weight;
        total_loc += sample.lines_of_code;
    }

    if total_loc == 0 {
        return MetricSample::zero();
    }
    MetricSample::new(
        total_complexity / total_loc as f64,
        total_maintainability / total_loc as f64,
        total_loc,
    )
}

/// Regroup every history sample by its date string and aggregate each group,
/// newest date first.
pub fn history_timeline(history: &FileHistory) -> Vec<MetricSample> {
    let mut by_date: HashMap<&str, Vec<&MetricSample>> = HashMap::new();
    for sample in history.samples() {
        if let Some(date) = sample.date.as_deref() {
            by_date.entry(date).or_default().push(sample);
        }
    }

    let mut dates: Vec<&str> = by_date.keys().copied().collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));

    dates
        .into_iter()
        .map(|date| aggregate(by_date[date].iter().copied()).with_date(date))
        .collect()
}
