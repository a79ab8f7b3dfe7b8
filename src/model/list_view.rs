use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::display::DisplayItem;

/// Input to the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    Up,
    Down,
    PageUp,
    PageDown,
    First,
    Last,
    FilterChar(char),
    FilterBackspace,
    ClearFilter,
    Resize(u16),
    Quit,
}

/// What the caller should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEffect {
    None,
    Redraw,
    Quit,
}

/// Everything the list widget knows: items, filter, selection and viewport.
#[derive(Debug, Clone)]
pub struct ListState {
    items: Vec<DisplayItem>,
    filter: String,
    /// Indices into `items` that pass the filter, best match first.
    visible: Vec<usize>,
    /// Position within `visible`.
    selected: usize,
    /// First row of `visible` drawn on screen.
    offset: usize,
    /// Rows available for items.
    height: usize,
}

impl ListState {
    pub fn new(items: Vec<DisplayItem>, height: usize) -> Self {
        let visible = (0..items.len()).collect();
        Self {
            items,
            filter: String::new(),
            visible,
            selected: 0,
            offset: 0,
            height: height.max(1),
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn selected_index(&self) -> Option<usize> {
        if self.visible.is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    pub fn selected_item(&self) -> Option<&DisplayItem> {
        self.visible
            .get(self.selected)
            .and_then(|&idx| self.items.get(idx))
    }

    #[cfg(test)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Items currently on screen, paired with their position in the
    /// filtered list.
    pub fn window(&self) -> impl Iterator<Item = (usize, &DisplayItem)> {
        self.visible
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.height)
            .map(|(pos, &idx)| (pos, &self.items[idx]))
    }

    fn move_by(&mut self, delta: isize) {
        if self.visible.is_empty() {
            self.selected = 0;
            return;
        }
        let max = self.visible.len().saturating_sub(1) as isize;
        self.selected = (self.selected as isize + delta).clamp(0, max) as usize;
    }

    fn refilter(&mut self) {
        if self.filter.is_empty() {
            self.visible = (0..self.items.len()).collect();
        } else {
            let matcher = SkimMatcherV2::default();
            let mut scored: Vec<(i64, usize)> = self
                .items
                .iter()
                .enumerate()
                .filter_map(|(idx, item)| {
                    matcher
                        .fuzzy_match(item.filter_value(), &self.filter)
                        .map(|score| (score, idx))
                })
                .collect();
            // Stable sort keeps record order among equal scores.
            scored.sort_by(|a, b| b.0.cmp(&a.0));
            self.visible = scored.into_iter().map(|(_, idx)| idx).collect();
        }
        self.selected = 0;
        self.offset = 0;
    }

    fn scroll_to_selection(&mut self) {
        if self.selected < self.offset {
            self.offset = self.selected;
        }
        if self.selected >= self.offset + self.height {
            self.offset = self.selected + 1 - self.height;
        }
        let max_offset = self.visible.len().saturating_sub(self.height);
        self.offset = self.offset.min(max_offset);
    }
}

/// Apply one event to the list state.
pub fn update(state: &mut ListState, event: ListEvent) -> ListEffect {
    let page = state.height as isize;
    match event {
        ListEvent::Up => state.move_by(-1),
        ListEvent::Down => state.move_by(1),
        ListEvent::PageUp => state.move_by(-page),
        ListEvent::PageDown => state.move_by(page),
        ListEvent::First => state.selected = 0,
        ListEvent::Last => state.selected = state.visible.len().saturating_sub(1),
        ListEvent::FilterChar(ch) => {
            state.filter.push(ch);
            state.refilter();
        }
        ListEvent::FilterBackspace => {
            if state.filter.pop().is_none() {
                return ListEffect::None;
            }
            state.refilter();
        }
        ListEvent::ClearFilter => {
            if state.filter.is_empty() {
                return ListEffect::None;
            }
            state.filter.clear();
            state.refilter();
        }
        ListEvent::Resize(height) => state.height = usize::from(height).max(1),
        ListEvent::Quit => return ListEffect::Quit,
    }

    state.scroll_to_selection();
    ListEffect::Redraw
}
