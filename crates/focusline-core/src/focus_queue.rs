//! Focus queue with a movable "today line".
//!
//! The queue is an ordered list of work items split by a line marker:
//! items before the line are committed for today, the rest are later.
//! During a drag the ground truth is the visual element array (items
//! plus a single line sentinel); the (items, today_line_index) pair is
//! a projection derived from it. Reordering is a plain splice on that
//! array.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::priority::PriorityScore;

/// What part of a task an item pulls into the queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "selection_type")]
pub enum SelectionType {
    /// The whole task
    EntireTask,
    /// Only the named steps
    Subset { selected_step_ids: Vec<String> },
}

/// One entry in the focus queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FocusQueueItem {
    pub id: String,
    pub task_id: String,
    #[serde(flatten)]
    pub selection: SelectionType,
    /// Dense position within the queue; rewritten by the reorder
    /// algorithm only
    pub order: u32,
    /// Soft-removal flag set on completion or explicit removal
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub added_at: DateTime<Utc>,
    /// How many days this item has rolled over unfinished
    #[serde(default)]
    pub rollover_count: u32,
}

/// The queue: ordered items plus the today-line position.
///
/// Invariant: `0 <= today_line_index <= items.len()`. The line is a
/// first-class visual position, not derived from any item field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FocusQueue {
    pub items: Vec<FocusQueueItem>,
    pub today_line_index: usize,
}

/// One slot in the visual ordering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum QueueElement {
    Item(FocusQueueItem),
    TodayLine,
}

/// Build the visual element array: items in order with the line
/// sentinel spliced in at the today boundary.
pub fn build_elements(items: &[FocusQueueItem], today_line_index: usize) -> Vec<QueueElement> {
    let boundary = today_line_index.min(items.len());
    let mut elements = Vec::with_capacity(items.len() + 1);
    for item in &items[..boundary] {
        elements.push(QueueElement::Item(item.clone()));
    }
    elements.push(QueueElement::TodayLine);
    for item in &items[boundary..] {
        elements.push(QueueElement::Item(item.clone()));
    }
    elements
}

/// Project the (items, today_line_index) pair back out of a visual
/// array. The line index is captured at the moment the sentinel is
/// encountered, so a trailing line yields `items.len()`.
pub fn derive_state(elements: &[QueueElement]) -> (Vec<FocusQueueItem>, usize) {
    let mut items = Vec::new();
    let mut today_line_index = 0;
    for element in elements {
        match element {
            QueueElement::Item(item) => items.push(item.clone()),
            QueueElement::TodayLine => today_line_index = items.len(),
        }
    }
    (items, today_line_index)
}

/// Move the element at `from` to `to`: remove, then insert with the
/// insert position pulled back by one on forward moves to compensate
/// for the removal shift. Without that adjustment the operation would
/// land one slot late and stop being idempotent.
pub fn reorder(elements: &[QueueElement], from: usize, to: usize) -> Result<Vec<QueueElement>> {
    let len = elements.len();
    if from >= len {
        return Err(ValidationError::OutOfBounds {
            collection: "queue elements".to_string(),
            index: from,
            len,
        }
        .into());
    }
    if to >= len {
        return Err(ValidationError::OutOfBounds {
            collection: "queue elements".to_string(),
            index: to,
            len,
        }
        .into());
    }

    let mut next = elements.to_vec();
    let moved = next.remove(from);
    let insert_at = if from < to { to - 1 } else { to };
    next.insert(insert_at, moved);
    Ok(next)
}

impl FocusQueue {
    /// An empty queue with the line at the top.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            today_line_index: 0,
        }
    }

    /// Items committed for today, in visual order.
    pub fn today(&self) -> &[FocusQueueItem] {
        &self.items[..self.today_line_index.min(self.items.len())]
    }

    /// Items parked for later, in visual order.
    pub fn later(&self) -> &[FocusQueueItem] {
        &self.items[self.today_line_index.min(self.items.len())..]
    }

    /// Apply a drag move expressed in visual-array indices, then
    /// renumber `order` densely from the new visual order.
    pub fn apply_move(&mut self, from: usize, to: usize) -> Result<()> {
        let elements = build_elements(&self.items, self.today_line_index);
        let moved = reorder(&elements, from, to)?;
        let (mut items, today_line_index) = derive_state(&moved);
        for (position, item) in items.iter_mut().enumerate() {
            item.order = position as u32;
        }
        self.items = items;
        self.today_line_index = today_line_index;
        Ok(())
    }

    /// Place the today line so that `to` items sit above it. Item
    /// order is untouched; this is the sentinel-only drag expressed as
    /// a boundary index rather than visual coordinates.
    pub fn set_today_line(&mut self, to: usize) -> Result<()> {
        if to > self.items.len() {
            return Err(ValidationError::OutOfBounds {
                collection: "queue items".to_string(),
                index: to,
                len: self.items.len(),
            }
            .into());
        }
        self.today_line_index = to;
        Ok(())
    }

    /// Order items by priority score, highest first, keeping the line
    /// position clamped. Used only to seed a fresh queue; afterwards
    /// the order belongs to the user's drags.
    pub fn seed_order(&mut self, scores: &[(String, PriorityScore)]) {
        let rank_of = |item: &FocusQueueItem| {
            scores
                .iter()
                .find(|(task_id, _)| *task_id == item.task_id)
                .map(|(_, score)| score.total)
                .unwrap_or(i64::MIN)
        };
        self.items.sort_by_key(|item| std::cmp::Reverse(rank_of(item)));
        for (position, item) in self.items.iter_mut().enumerate() {
            item.order = position as u32;
        }
        self.today_line_index = self.today_line_index.min(self.items.len());
    }
}

impl Default for FocusQueue {
    fn default() -> Self {
        Self::new()
    }
}
