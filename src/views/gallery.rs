use serde::Serialize;

/// Current-image cursor over a product's ordered image list.
///
/// Owned by whoever renders the gallery; navigation wraps in both directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImageCarousel {
    len: usize,
    index: usize,
}

impl ImageCarousel {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    /// Start at `index`, reduced mod `len`.
    pub fn starting_at(len: usize, index: usize) -> Self {
        let index = if len == 0 { 0 } else { index % len };
        Self { len, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Arrows are only shown when there is somewhere to go.
    pub fn has_controls(&self) -> bool {
        self.len > 1
    }

    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    pub fn previous(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    /// Jump to a thumbnail; out-of-range picks clamp to the last image.
    pub fn select(&mut self, index: usize) -> usize {
        self.index = index.min(self.len.saturating_sub(1));
        self.index
    }

    pub fn current<'a>(&self, images: &'a [String]) -> Option<&'a str> {
        images.get(self.index).map(String::as_str)
    }
}

/// Serializable gallery for the detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    pub images: Vec<String>,
    pub current_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    pub previous_index: usize,
    pub next_index: usize,
    pub has_controls: bool,
}

impl Gallery {
    pub fn new(images: Vec<String>, index: usize) -> Self {
        let carousel = ImageCarousel::starting_at(images.len(), index);
        let mut prev = carousel;
        let mut next = carousel;
        Self {
            current: carousel.current(&images).map(str::to_string),
            current_index: carousel.index(),
            previous_index: prev.previous(),
            next_index: next.next(),
            has_controls: carousel.has_controls(),
            images,
        }
    }
}
