use std::collections::BTreeMap;

/// Running score of the current game plus the named high-score table.
/// The two have independent lifetimes: `reset` only touches the former.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    current_score: u32,
    scores: BTreeMap<String, u32>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.current_score
    }

    pub fn increase_score(&mut self, additional: i32) {
        if additional > 0 {
            self.current_score = self.current_score.saturating_add(additional as u32);
        }
    }

    pub fn reset(&mut self) {
        self.current_score = 0;
    }

    pub fn set_score(&mut self, name: &str, value: i32) {
        if !is_valid_name(name) || value < 0 {
            return;
        }
        self.scores.insert(name.to_string(), value as u32);
    }

    pub fn set_scores<I, S>(&mut self, scores: Option<I>)
    where
        I: IntoIterator<Item = (S, i32)>,
        S: AsRef<str>,
    {
        let Some(scores) = scores else {
            return;
        };
        for (name, value) in scores {
            self.set_score(name.as_ref(), value);
        }
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.scores.get(name).copied()
    }

    /// Table entries in ascending name order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.scores
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }

    pub fn order_by_name(&self) -> Vec<String> {
        self.entries()
            .map(|(name, value)| format_entry(name, value))
            .collect()
    }

    pub fn order_by_score(&self) -> Vec<String> {
        let mut entries: Vec<(&str, u32)> = self.entries().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
            .into_iter()
            .map(|(name, value)| format_entry(name, value))
            .collect()
    }
}

pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric())
}

fn format_entry(name: &str, value: u32) -> String {
    format!("{name} : {value}")
}
