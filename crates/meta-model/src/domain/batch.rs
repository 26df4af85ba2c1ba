/// Result of one item in a batch operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome<T> {
    Succeeded(T),
    Failed { reason: String },
}

impl<T> ItemOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ItemOutcome::Succeeded(_))
    }
}

/// Per-item results of a batch, in input order.
///
/// Every input identifier appears exactly once, either as succeeded or as failed.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome<T> {
    items: Vec<(String, ItemOutcome<T>)>,
}

impl<T> BatchOutcome<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record the outcome for one identifier.
    pub fn push(&mut self, id: impl Into<String>, outcome: ItemOutcome<T>) {
        self.items.push((id.into(), outcome));
    }

    /// All items with their outcome, in input order.
    pub fn items(&self) -> impl Iterator<Item = (&str, &ItemOutcome<T>)> {
        self.items.iter().map(|(id, outcome)| (id.as_str(), outcome))
    }

    /// Successful values, in input order.
    pub fn succeeded(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                ItemOutcome::Succeeded(value) => Some(value),
                ItemOutcome::Failed { .. } => None,
            })
            .collect()
    }

    /// Identifiers of items that succeeded, in input order.
    pub fn succeeded_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|(_, outcome)| outcome.is_success())
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Identifiers of items that failed, in input order.
    pub fn failed_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|(_, outcome)| !outcome.is_success())
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn total_succeeded(&self) -> usize {
        self.items.iter().filter(|(_, o)| o.is_success()).count()
    }

    pub fn total_failed(&self) -> usize {
        self.items.len() - self.total_succeeded()
    }

    /// `true` iff no item failed. An empty batch counts as success.
    pub fn all_success(&self) -> bool {
        self.total_failed() == 0
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<(String, ItemOutcome<T>)> {
        self.items
    }
}

impl<T> Default for BatchOutcome<T> {
    fn default() -> Self {
        Self::new()
    }
}
