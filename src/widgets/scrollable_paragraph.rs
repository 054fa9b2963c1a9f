#[derive(Debug, Default, Clone)]
pub struct ScrollableParagraphState {
    pub content: String,
    pub scroll_offset: u16,
}

impl ScrollableParagraphState {
    pub fn new(content: String) -> Self {
        Self { content, scroll_offset: 0 }
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.scroll_offset = 0; // Reset scroll when content changes
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: u16) {
        // No max clamp: ratatui renders blank space past the end, which is
        // harmless for overlay-sized content.
        self.scroll_offset = self.scroll_offset.saturating_add(amount);
    }
}
