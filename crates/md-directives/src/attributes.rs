//! Per-line heading attributes collected from `:id:`, `:class:` and `:style:`.

/// Attributes pending for, or attached to, a content line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineAttributes {
    /// Element id. The last `:id:` wins.
    pub id: Option<String>,
    /// Space-separated class list.
    pub class: Option<String>,
    /// Inline style, declarations joined with `"; "`.
    pub style: Option<String>,
}

impl LineAttributes {
    /// Replace the id.
    pub fn set_id(&mut self, id: &str) {
        self.id = Some(id.to_owned());
    }

    /// Append a class, separated from earlier ones by a space.
    pub fn push_class(&mut self, class: &str) {
        append(&mut self.class, class, " ");
    }

    /// Append a style declaration, separated from earlier ones by `"; "`.
    pub fn push_style(&mut self, style: &str) {
        append(&mut self.style, style, "; ");
    }

    /// True when no attribute has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.class.is_none() && self.style.is_none()
    }
}

fn append(slot: &mut Option<String>, value: &str, separator: &str) {
    match slot {
        Some(existing) => {
            existing.push_str(separator);
            existing.push_str(value);
        }
        None => *slot = Some(value.to_owned()),
    }
}
