use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub struct LabelMetrics {
    pub char_width: f64,
    /// Display columns available for a node caption.
    pub caption_width: usize,
    pub ellipsis: char,
}

impl Default for LabelMetrics {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            caption_width: 12,
            ellipsis: '…',
        }
    }
}

impl LabelMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    /// Shorten `label` to at most `caption_width` display columns.
    pub fn caption(&self, label: &str) -> String {
        if UnicodeWidthStr::width(label) <= self.caption_width {
            return label.to_string();
        }
        if self.caption_width == 0 {
            return String::new();
        }

        let budget = self.caption_width.saturating_sub(1);
        let mut used = 0;
        let mut out = String::new();
        for ch in label.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if used + w > budget {
                break;
            }
            used += w;
            out.push(ch);
        }
        out.truncate(out.trim_end().len());
        out.push(self.ellipsis);
        out
    }
}
